use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use atelier_common::error::{AtelierError, AtelierResult};

const THEME_KEY: &str = "theme";
const LOCALE_KEY: &str = "language";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("unknown theme: {value}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            _ => Err(format!("unknown locale: {value}")),
        }
    }
}

/// The only client state that survives a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub locale: Locale,
}

/// Key-value JSON file holding [`Preferences`].
///
/// Unknown keys are preserved on save; unreadable values fall back to defaults.
#[derive(Debug, Clone)]
pub struct PreferenceFile {
    path: PathBuf,
}

impl PreferenceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> AtelierResult<Preferences> {
        let entries = self.read_entries()?;
        let theme = entries
            .get(THEME_KEY)
            .and_then(Value::as_str)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let locale = entries
            .get(LOCALE_KEY)
            .and_then(Value::as_str)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Ok(Preferences { theme, locale })
    }

    /// Fails without touching the file when the existing contents cannot be parsed.
    pub fn save(&self, preferences: &Preferences) -> AtelierResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(THEME_KEY.to_string(), preferences.theme.as_str().into());
        entries.insert(LOCALE_KEY.to_string(), preferences.locale.as_str().into());

        let body = serde_json::to_string_pretty(&entries)
            .map_err(|e| AtelierError::Internal(format!("serialize preferences: {e}")))?;
        fs::write(&self.path, body).map_err(|e| {
            AtelierError::Storage(format!("write {}: {e}", self.path.display()))
        })?;
        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }

    fn read_entries(&self) -> AtelierResult<Map<String, Value>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AtelierError::Storage(format!("parse {}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(AtelierError::Storage(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }
}
