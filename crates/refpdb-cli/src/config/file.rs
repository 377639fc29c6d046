use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileModuleConfig {
    #[serde(rename = "import-path")]
    pub import_path: Option<String>,
    pub namespace: Option<String>,
    #[serde(rename = "type-name")]
    pub type_name: Option<String>,
    #[serde(rename = "const-name")]
    pub const_name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,
    pub retries: Option<u32>,
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: Option<u64>,
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,
    pub module: Option<FileModuleConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
