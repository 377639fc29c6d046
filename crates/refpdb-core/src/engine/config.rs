use crate::core::references::ReferenceId;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Directory on the DNATCO server that holds one `<id>.pdb` file per reference conformer.
pub const DEFAULT_BASE_URL: &str = "https://blackbox.ibt.biocev.org/devel_molstar/references";
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Unsupported URL scheme '{0}'. Only http and https are supported")]
    UnsupportedScheme(String),

    #[error("Reference selection is empty")]
    EmptySelection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Identifiers to fetch, in static list order and without duplicates.
    pub references: Vec<ReferenceId>,
    /// Additional attempts per identifier after a retryable failure.
    pub retries: u32,
    pub retry_delay: Duration,
    /// Per-request timeout. `None` leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,
}

impl FetchConfig {
    pub fn url_for(&self, id: ReferenceId) -> String {
        format!("{}/{}", self.base_url, id.file_name())
    }

    /// Whether this run covers every reference in the static list.
    pub fn is_full_selection(&self) -> bool {
        self.references.len() == ReferenceId::all().len()
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            references: ReferenceId::all().collect(),
            retries: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: None,
        }
    }
}

#[derive(Default)]
pub struct FetchConfigBuilder {
    base_url: Option<String>,
    references: Option<Vec<ReferenceId>>,
    retries: Option<u32>,
    retry_delay: Option<Duration>,
    timeout: Option<Duration>,
}

impl FetchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn references(mut self, references: Vec<ReferenceId>) -> Self {
        self.references = Some(references);
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<FetchConfig, ConfigError> {
        let base_url = match self.base_url {
            Some(url) => normalize_base_url(&url)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let references = match self.references {
            Some(mut references) => {
                references.sort_unstable();
                references.dedup();
                if references.is_empty() {
                    return Err(ConfigError::EmptySelection);
                }
                references
            }
            None => ReferenceId::all().collect(),
        };

        Ok(FetchConfig {
            base_url,
            references,
            retries: self.retries.unwrap_or(0),
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
            timeout: self.timeout,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: "query strings and fragments are not allowed".to_string(),
        });
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
