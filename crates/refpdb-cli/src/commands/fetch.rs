use crate::cli::Cli;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use refpdb::engine::progress::ProgressReporter;
use refpdb::engine::source::HttpSource;
use refpdb::workflows::generate;
use tracing::info;

pub async fn run(cli: &Cli) -> Result<()> {
    let resolved = config::resolve(cli)?;
    let source = HttpSource::new(&resolved.fetch)?;

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    info!("Generating reference module at {:?}", &cli.output);
    let result = generate::run(
        &source,
        &resolved.fetch,
        &resolved.options,
        &cli.output,
        &reporter,
    )
    .await;

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            handler.abandon();
            return Err(e.into());
        }
    };

    println!(
        "Wrote {} reference conformers ({} bytes) to {}{}",
        summary.references,
        summary.bytes_written,
        summary.output.display(),
        if summary.verified { ", verified" } else { "" }
    );
    Ok(())
}
