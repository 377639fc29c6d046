pub mod defaults;
pub mod file;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use file::FileConfig;
use refpdb::core::io::module::ModuleLayout;
use refpdb::engine::config::{FetchConfig, FetchConfigBuilder};
use refpdb::workflows::generate::GenerateOptions;
use std::time::Duration;
use tracing::debug;

/// Fully merged settings for one run: built-in defaults, then the config file, then CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub fetch: FetchConfig,
    pub options: GenerateOptions,
}

pub fn resolve(cli: &Cli) -> Result<ResolvedConfig> {
    let file_config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    merge(file_config, cli, DefaultsConfig::default())
}

pub fn merge(file: FileConfig, cli: &Cli, defaults: DefaultsConfig) -> Result<ResolvedConfig> {
    let args = &cli.fetch;

    let mut builder = FetchConfigBuilder::new()
        .base_url(
            args.base_url
                .clone()
                .or(file.base_url)
                .unwrap_or(defaults.base_url),
        )
        .retries(args.retries.or(file.retries).unwrap_or(defaults.retries))
        .retry_delay(Duration::from_millis(
            args.retry_delay_ms
                .or(file.retry_delay_ms)
                .unwrap_or(defaults.retry_delay_ms),
        ));
    if let Some(secs) = args.timeout_secs.or(file.timeout_secs) {
        if secs == 0 {
            return Err(CliError::Config(
                "timeout-secs must be greater than zero".to_string(),
            ));
        }
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if !args.only.is_empty() {
        builder = builder.references(args.only.clone());
    }
    let fetch = builder.build()?;

    let file_module = file.module.unwrap_or_default();
    let layout = ModuleLayout {
        import_path: cli
            .module
            .import_path
            .clone()
            .or(file_module.import_path)
            .unwrap_or(defaults.layout.import_path),
        namespace: cli
            .module
            .namespace
            .clone()
            .or(file_module.namespace)
            .unwrap_or(defaults.layout.namespace),
        type_name: file_module.type_name.unwrap_or(defaults.layout.type_name),
        const_name: file_module.const_name.unwrap_or(defaults.layout.const_name),
    };
    validate_layout(&layout)?;

    let resolved = ResolvedConfig {
        fetch,
        options: GenerateOptions {
            layout,
            verify: cli.verify,
        },
    };
    debug!("Resolved configuration: {:?}", resolved);
    Ok(resolved)
}

fn validate_layout(layout: &ModuleLayout) -> Result<()> {
    for (key, value) in [
        ("namespace", &layout.namespace),
        ("type-name", &layout.type_name),
        ("const-name", &layout.const_name),
    ] {
        if !is_identifier(value) {
            return Err(CliError::Config(format!(
                "'{value}' is not a valid TypeScript identifier for '{key}'"
            )));
        }
    }
    if layout.import_path.is_empty() || layout.import_path.contains(['\'', '\n', '\r']) {
        return Err(CliError::Config(format!(
            "Invalid import path '{}'",
            layout.import_path.escape_debug()
        )));
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
