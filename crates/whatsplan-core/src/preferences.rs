use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use whatsplan_types::Theme;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Failed to access preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable key/value preferences owned by the client
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<&str>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preferences kept as a flat JSON object on disk
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// A missing file is an empty store. A corrupt file is logged and replaced on next write.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();

        let values = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable preferences {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PreferenceError::Io { path, source }),
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), PreferenceError> {
        let data = serde_json::to_string_pretty(&self.values)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, data).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// Stored theme, else the OS preference
pub fn initial_theme(store: &dyn PreferenceStore, os_prefers_dark: bool) -> Theme {
    match store.get(THEME_KEY).map(str::parse::<Theme>) {
        Some(Ok(theme)) => theme,
        Some(Err(e)) => {
            tracing::warn!("{e}, using system preference");
            system_theme(os_prefers_dark)
        }
        None => system_theme(os_prefers_dark),
    }
}

pub fn save_theme(store: &mut dyn PreferenceStore, theme: Theme) -> Result<(), PreferenceError> {
    store.set(THEME_KEY, theme.as_str())
}

fn system_theme(prefers_dark: bool) -> Theme {
    if prefers_dark { Theme::Dark } else { Theme::Light }
}

/// Terminal dark-mode hint from `COLORFGBG` ("fg;bg"); dark backgrounds are 0-6 and 8
pub fn os_prefers_dark() -> bool {
    env::var("COLORFGBG")
        .ok()
        .as_deref()
        .map(colorfgbg_is_dark)
        .unwrap_or(false)
}

fn colorfgbg_is_dark(value: &str) -> bool {
    value
        .rsplit(';')
        .next()
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}
