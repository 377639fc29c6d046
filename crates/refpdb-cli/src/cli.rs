use clap::{Args, Parser};
use refpdb::core::references::ReferenceId;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "fetch-references",
    version,
    about = "Downloads the DNATCO reference conformer PDB files and writes them out as a TypeScript module.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path of the TypeScript module to generate (e.g., src/apps/dnatco/reference-pdbs.ts).
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub fetch: FetchArgs,

    #[command(flatten)]
    pub module: ModuleArgs,

    /// Read the written module back and check it against the fetched references.
    #[arg(long)]
    pub verify: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for the per-reference progress lines
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Overrides for how references are fetched.
#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Base URL holding one `<ID>.pdb` file per reference conformer.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Extra attempts per reference after a server error or connection failure.
    #[arg(long, value_name = "INT")]
    pub retries: Option<u32>,

    /// Delay between attempts, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub retry_delay_ms: Option<u64>,

    /// Per-request timeout in seconds. Defaults to no explicit timeout.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Fetch only the given reference (repeatable). Intended for debugging;
    /// the resulting module does not cover the full `References` type.
    #[arg(long = "only", value_name = "ID")]
    pub only: Vec<ReferenceId>,
}

/// Overrides for the names used in the generated module.
#[derive(Args, Debug, Default)]
pub struct ModuleArgs {
    /// Module path the `References` type is imported from.
    #[arg(long, value_name = "PATH")]
    pub import_path: Option<String>,

    /// Name of the exported namespace.
    #[arg(long, value_name = "NAME")]
    pub namespace: Option<String>,
}
