use serde::{Deserialize, Serialize};

use crate::{parse_bool, parse_var};

fn default_search_url() -> String {
    "http://127.0.0.1:8000/search".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Backend search endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Treat empty events with no search id as a validator rejection
    #[serde(default)]
    pub legacy_validation_inference: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            timeout_seconds: default_timeout_seconds(),
            legacy_validation_inference: false,
        }
    }
}

impl ApiConfig {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let search_url = lookup("SEARCH_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_search_url);

        let timeout_seconds = parse_var(lookup, "SEARCH_TIMEOUT_SECONDS")
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_seconds);

        let legacy_validation_inference =
            parse_bool(lookup, "LEGACY_VALIDATION_INFERENCE").unwrap_or(false);

        Self {
            search_url,
            timeout_seconds,
            legacy_validation_inference,
        }
    }
}
