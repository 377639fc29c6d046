use refpdb::core::io::module::ModuleLayout;
use refpdb::engine::config::{DEFAULT_BASE_URL, DEFAULT_RETRY_DELAY};

pub struct DefaultsConfig {
    pub base_url: String,
    pub retries: u32,
    pub retry_delay_ms: u64,
    pub layout: ModuleLayout,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            retries: 0,
            retry_delay_ms: DEFAULT_RETRY_DELAY.as_millis() as u64,
            layout: ModuleLayout::default(),
        }
    }
}
