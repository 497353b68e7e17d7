use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::preferences::PreferencesConfig;
use self::ui::UiConfig;

pub mod api;
pub mod preferences;
pub mod ui;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub preferences: PreferencesConfig,
}

impl Config {
    /// Build config from process environment, falling back to defaults
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            api: ApiConfig::from_lookup(&lookup),
            ui: UiConfig::from_lookup(&lookup),
            preferences: PreferencesConfig::from_lookup(&lookup),
        }
    }
}

/// Parse an env value, ignoring values that fail to parse
pub(crate) fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

pub(crate) fn parse_bool<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
}
