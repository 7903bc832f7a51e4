use std::{
    env,
    path::{
        Path,
        PathBuf,
    },
    sync::{
        Mutex,
        PoisonError,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::info;

use crate::{
    core::{
        models::ENGLISH,
        ShakeItError,
    },
    persistence,
};

pub mod theme;

pub use theme::{
    Color32,
    Palette,
    Theme,
};

pub const PREFERENCES_FILE: &str = "preferences.json";
pub const SUPPORTED_LANGUAGES: [&str; 2] = [ENGLISH, "it"];

/// Process-wide user preferences, injected where needed.
pub trait PreferencesStore: Send + Sync {
    fn theme(&self) -> Theme;

    fn set_theme(&self, theme: Theme) -> Result<(), ShakeItError>;

    /// The stored language code, if the user picked one.
    fn language(&self) -> Option<String>;

    fn set_language(&self, language: &str) -> Result<(), ShakeItError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesData {
    pub theme: Theme,
    pub language: Option<String>,
}

fn normalize_language(language: &str) -> Result<String, ShakeItError> {
    let code = language.trim().to_ascii_lowercase();
    if SUPPORTED_LANGUAGES.contains(&code.as_str()) {
        Ok(code)
    } else {
        Err(ShakeItError::UnsupportedLanguage(language.to_string()))
    }
}

/// Stored choice first, then the system language, then English.
pub fn resolve_language(stored: Option<&str>, system: Option<&str>) -> &'static str {
    [stored, system]
        .into_iter()
        .flatten()
        .find_map(|code| {
            let code = code.trim().to_ascii_lowercase();
            SUPPORTED_LANGUAGES.iter().copied().find(|supported| *supported == code)
        })
        .unwrap_or(ENGLISH)
}

/// Language part of the POSIX locale, e.g. `it` for `it_IT.UTF-8`.
pub fn system_language() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| language_from_locale(&value))
}

fn language_from_locale(locale: &str) -> Option<String> {
    let language = locale.split(['_', '.', '@', '-']).next()?.to_ascii_lowercase();
    if language.is_empty() || language == "c" || language == "posix" {
        return None;
    }
    Some(language)
}

/// Preferences kept as JSON in the app data directory.
pub struct JsonPreferencesStore {
    path: PathBuf,
    data: Mutex<PreferencesData>,
}

impl JsonPreferencesStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = persistence::load_json_or_default(&path);
        Self { path, data: Mutex::new(data) }
    }

    pub fn open_default() -> Self {
        Self::open(persistence::get_data_file_path(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, change: impl FnOnce(&mut PreferencesData)) -> Result<(), ShakeItError> {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        let mut updated = data.clone();
        change(&mut updated);
        persistence::save_json(&updated, &self.path)?;
        *data = updated;
        Ok(())
    }
}

impl PreferencesStore for JsonPreferencesStore {
    fn theme(&self) -> Theme {
        self.data.lock().unwrap_or_else(PoisonError::into_inner).theme
    }

    fn set_theme(&self, theme: Theme) -> Result<(), ShakeItError> {
        self.update(|data| data.theme = theme)?;
        info!(theme = theme.name(), "theme saved");
        Ok(())
    }

    fn language(&self) -> Option<String> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner).language.clone()
    }

    fn set_language(&self, language: &str) -> Result<(), ShakeItError> {
        let code = normalize_language(language)?;
        self.update(|data| data.language = Some(code.clone()))?;
        info!(language = %code, "language saved");
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPreferencesStore {
    data: Mutex<PreferencesData>,
}

impl MemoryPreferencesStore {
    pub fn new(data: PreferencesData) -> Self {
        Self { data: Mutex::new(data) }
    }
}

impl PreferencesStore for MemoryPreferencesStore {
    fn theme(&self) -> Theme {
        self.data.lock().unwrap_or_else(PoisonError::into_inner).theme
    }

    fn set_theme(&self, theme: Theme) -> Result<(), ShakeItError> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner).theme = theme;
        Ok(())
    }

    fn language(&self) -> Option<String> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner).language.clone()
    }

    fn set_language(&self, language: &str) -> Result<(), ShakeItError> {
        let code = normalize_language(language)?;
        self.data.lock().unwrap_or_else(PoisonError::into_inner).language = Some(code);
        Ok(())
    }
}
