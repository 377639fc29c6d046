use crate::core::io::module::{ModuleLayout, ReferenceModule};
use crate::core::mapping::ReferenceMap;
use crate::core::references::REFERENCE_COUNT;
use crate::engine::config::FetchConfig;
use crate::engine::error::PipelineError;
use crate::engine::fetch::fetch_all;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::source::ReferenceSource;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub layout: ModuleLayout,
    /// Read the written file back and compare it with the fetched references.
    pub verify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub output: PathBuf,
    pub references: usize,
    pub bytes_written: usize,
    pub verified: bool,
}

/// Runs `Fetching → Writing → (Verifying)` and returns a summary of the written module.
///
/// The output file is only touched once every reference has been fetched, so a failed
/// fetch never creates or modifies it.
#[instrument(skip_all, name = "generate_workflow", fields(output = %output.display()))]
pub async fn run<S>(
    source: &S,
    config: &FetchConfig,
    options: &GenerateOptions,
    output: &Path,
    reporter: &ProgressReporter<'_>,
) -> Result<GenerateSummary, PipelineError>
where
    S: ReferenceSource + ?Sized,
{
    if !config.is_full_selection() {
        let note = format!(
            "Only {} of {} references selected; the generated module will not satisfy Record<References, string>.",
            config.references.len(),
            REFERENCE_COUNT
        );
        warn!("{}", note);
        reporter.report(Progress::Message(note));
    }

    let map = fetch_all(source, config, reporter).await?;

    reporter.report(Progress::PhaseStart {
        name: "Writing module",
    });
    let bytes_written =
        ReferenceModule::write_to_path(&map, &options.layout, output).map_err(|source| {
            PipelineError::Write {
                path: output.to_path_buf(),
                source,
            }
        })?;
    reporter.report(Progress::PhaseFinish);
    info!("Wrote {} bytes to {}", bytes_written, output.display());

    if options.verify {
        reporter.report(Progress::PhaseStart {
            name: "Verifying module",
        });
        verify_written(&map, &options.layout, output)?;
        reporter.report(Progress::PhaseFinish);
        info!("Verified {} references in {}", map.len(), output.display());
    }

    Ok(GenerateSummary {
        output: output.to_path_buf(),
        references: map.len(),
        bytes_written,
        verified: options.verify,
    })
}

fn verify_written(
    expected: &ReferenceMap,
    layout: &ModuleLayout,
    path: &Path,
) -> Result<(), PipelineError> {
    let parsed =
        ReferenceModule::read_from_path(path, layout).map_err(|source| PipelineError::ReadBack {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read back {} references", parsed.len());

    let mismatch = |reason: String| PipelineError::Verification {
        path: path.to_path_buf(),
        reason,
    };

    if parsed.len() != expected.len() {
        return Err(mismatch(format!(
            "expected {} entries, found {}",
            expected.len(),
            parsed.len()
        )));
    }
    for ((expected_id, expected_text), (found_id, found_text)) in expected.iter().zip(parsed.iter()) {
        if expected_id != found_id {
            return Err(mismatch(format!(
                "expected entry {expected_id}, found {found_id}"
            )));
        }
        if expected_text != found_text {
            return Err(mismatch(format!("text of {expected_id} differs")));
        }
    }
    Ok(())
}
