use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::gemini::DEFAULT_ENDPOINT;

/// `[ai]` section of the app config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AiSettings {
    /// When false the service never calls the backend, even with a key.
    pub enabled: bool,
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Quiet period before a typed description is sent for prediction.
    pub debounce_ms: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 15,
            debounce_ms: 500,
        }
    }
}

impl AiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
