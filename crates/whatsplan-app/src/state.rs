use std::sync::Arc;

use tokio::sync::Mutex;
use whatsplan_config::Config;
use whatsplan_core::preferences::{self, FilePreferences};
use whatsplan_types::Theme;

pub struct AppState {
    /// Fixed after startup
    pub config: Arc<Config>,
    pub preferences: Mutex<FilePreferences>,
    /// OS dark-mode hint, used when no theme is stored
    pub os_prefers_dark: bool,
}

impl AppState {
    pub fn new(config: Config, preferences: FilePreferences, os_prefers_dark: bool) -> Self {
        Self {
            config: Arc::new(config),
            preferences: Mutex::new(preferences),
            os_prefers_dark,
        }
    }

    pub async fn initial_theme(&self) -> Theme {
        let prefs = self.preferences.lock().await;
        preferences::initial_theme(&*prefs, self.os_prefers_dark)
    }
}
