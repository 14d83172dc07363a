use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Display strings used by the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleBundle {
    /// Shown when no time is selected and the host gave no placeholder.
    pub placeholder: String,
}

/// A host-wide locale file.
///
/// Only the `[time_picker]` table is read; tables belonging to other
/// components are ignored.
///
/// ```toml
/// [time_picker]
/// placeholder = "Select a time"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocaleConfig {
    #[serde(default)]
    pub time_picker: Option<LocaleBundle>,
}

#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("cannot read locale file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid locale file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown built-in locale {0:?}")]
    Unknown(String),
}

impl Default for LocaleBundle {
    fn default() -> Self {
        LocaleBundle::zh_cn()
    }
}

impl LocaleBundle {
    pub fn zh_cn() -> Self {
        LocaleBundle {
            placeholder: "请选择时间".to_string(),
        }
    }

    pub fn en_us() -> Self {
        LocaleBundle {
            placeholder: "Select a time".to_string(),
        }
    }

    /// Looks up a bundle shipped with the crate, e.g. `"en_US"` or `"zh-CN"`.
    pub fn builtin(tag: &str) -> Result<Self, LocaleError> {
        match tag.replace('-', "_").to_ascii_lowercase().as_str() {
            "zh_cn" => Ok(LocaleBundle::zh_cn()),
            "en_us" | "en" => Ok(LocaleBundle::en_us()),
            _ => Err(LocaleError::Unknown(tag.to_string())),
        }
    }
}

impl LocaleConfig {
    pub fn new(bundle: LocaleBundle) -> Self {
        LocaleConfig {
            time_picker: Some(bundle),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LocaleError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, LocaleError> {
        let content = std::fs::read_to_string(path).map_err(|source| LocaleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = LocaleConfig::from_toml_str(&content)?;
        log::debug!("Loaded locale file {}", path.display());
        Ok(config)
    }
}

/// Picks the bundle to render with: the host's `[time_picker]` table when
/// there is one, the built-in default otherwise.
pub fn resolve_locale(config: Option<&LocaleConfig>) -> LocaleBundle {
    config
        .and_then(|c| c.time_picker.clone())
        .unwrap_or_default()
}
