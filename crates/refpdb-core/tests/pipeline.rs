use async_trait::async_trait;
use refpdb::core::io::module::{ModuleLayout, ReferenceModule};
use refpdb::core::references::{REFERENCE_COUNT, ReferenceId};
use refpdb::engine::config::{FetchConfig, FetchConfigBuilder};
use refpdb::engine::error::{FetchError, PipelineError};
use refpdb::engine::progress::ProgressReporter;
use refpdb::engine::source::ReferenceSource;
use refpdb::workflows::generate::{self, GenerateOptions};
use std::fs;

/// Produces a small but realistic PDB body per identifier, including characters that a
/// naive quoting scheme would trip over.
struct SyntheticPdbSource;

fn synthetic_pdb(id: ReferenceId) -> String {
    format!(
        "HEADER    REFERENCE CONFORMER {id}\n\
         REMARK   1 it's a \"step\"\n\
         ATOM      1  P    DA A   1      -0.123   1.456  -2.789  1.00  0.00           P\n\
         ATOM      2  OP1  DA A   1       0.321  -1.654   2.987  1.00  0.00           O\n\
         END\n"
    )
}

#[async_trait]
impl ReferenceSource for SyntheticPdbSource {
    async fn fetch(&self, id: ReferenceId) -> Result<String, FetchError> {
        Ok(synthetic_pdb(id))
    }
}

struct FailingSource {
    failing: ReferenceId,
}

#[async_trait]
impl ReferenceSource for FailingSource {
    async fn fetch(&self, id: ReferenceId) -> Result<String, FetchError> {
        if id == self.failing {
            Err(FetchError::Status { id, status: 404 })
        } else {
            Ok(synthetic_pdb(id))
        }
    }
}

fn full_config() -> FetchConfig {
    FetchConfigBuilder::new().build().unwrap()
}

#[tokio::test]
async fn full_run_round_trips_through_the_generated_module() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("reference-pdbs.ts");
    let layout = ModuleLayout::default();
    let options = GenerateOptions {
        layout: layout.clone(),
        verify: true,
    };

    let summary = generate::run(
        &SyntheticPdbSource,
        &full_config(),
        &options,
        &output,
        &ProgressReporter::new(),
    )
    .await
    .unwrap();
    assert_eq!(summary.references, REFERENCE_COUNT);

    let parsed = ReferenceModule::read_from_path(&output, &layout).unwrap();
    let all: Vec<_> = ReferenceId::all().collect();
    assert_eq!(parsed.ids().collect::<Vec<_>>(), all);
    parsed.ensure_complete(&all).unwrap();
    for id in all {
        assert_eq!(parsed.get(id), Some(synthetic_pdb(id).as_str()));
    }
}

#[tokio::test]
async fn generated_module_has_expected_shape() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("reference-pdbs.ts");

    generate::run(
        &SyntheticPdbSource,
        &full_config(),
        &GenerateOptions::default(),
        &output,
        &ProgressReporter::new(),
    )
    .await
    .unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with(
        "import { References } from './conformers'\n\nexport namespace ReferencePdbs {\nexport type Map = Record<References, string>;\nexport const data = {\n'AA00': `HEADER    REFERENCE CONFORMER AA00\n"
    ));
    assert!(written.ends_with("END\n`,\n};\n}"));
    assert_eq!(written.matches("`,\n").count(), REFERENCE_COUNT);
}

#[tokio::test]
async fn rerunning_with_identical_content_is_byte_identical() {
    let temp_dir = tempfile::tempdir().unwrap();
    let first = temp_dir.path().join("first.ts");
    let second = temp_dir.path().join("second.ts");

    for output in [&first, &second] {
        generate::run(
            &SyntheticPdbSource,
            &full_config(),
            &GenerateOptions::default(),
            output,
            &ProgressReporter::new(),
        )
        .await
        .unwrap();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[tokio::test]
async fn failure_on_last_reference_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("reference-pdbs.ts");
    let last = ReferenceId::all().last().unwrap();

    let err = generate::run(
        &FailingSource { failing: last },
        &full_config(),
        &GenerateOptions::default(),
        &output,
        &ProgressReporter::new(),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("ZZS2"));
    assert!(matches!(err, PipelineError::Fetch(FetchError::Status { .. })));
    assert!(!output.exists());
}
