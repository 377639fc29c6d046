use super::config::FetchConfig;
use super::error::{FetchError, PipelineError};
use crate::core::references::ReferenceId;
use async_trait::async_trait;
use tracing::{debug, trace};

/// Anything that can produce the raw PDB text of a reference conformer.
///
/// Implementations are expected to return the body untouched; the text is embedded into
/// the generated module as-is.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch(&self, id: ReferenceId) -> Result<String, FetchError>;
}

/// Fetches `<base-url>/<id>.pdb` over HTTP(S). Only a `200 OK` response counts as success.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Result<Self, PipelineError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("refpdb/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(PipelineError::HttpClient)?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl ReferenceSource for HttpSource {
    async fn fetch(&self, id: ReferenceId) -> Result<String, FetchError> {
        let url = self.config.url_for(id);
        debug!(reference = %id, %url, "Sending request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                id,
                source: e.into(),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                id,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            id,
            source: e.into(),
        })?;
        trace!(reference = %id, bytes = body.len(), "Received body");
        Ok(body)
    }
}
