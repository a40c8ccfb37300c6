//! User-tunable defaults, read from `settings.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine:
//!
//! ```toml
//! copy_suffix = "bak"
//! preserve_metadata = false
//!
//! [log]
//! level = "debug"
//! directory = "/tmp/ezpaths-logs"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories_next::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::fs_op::copy::CopyBehavior;
use crate::fs_op::error::Result;

pub const SETTINGS_FILE_NAME: &str = "settings.toml";
pub const DEFAULT_COPY_SUFFIX: &str = "copy";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Appended as `_<suffix>` to the name of copies made without a destination.
    pub copy_suffix: String,
    pub copy_buffer_size: usize,
    pub preserve_metadata: bool,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// When set, logs are also written to a file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            copy_suffix: DEFAULT_COPY_SUFFIX.to_string(),
            copy_buffer_size: 64 * 1024,
            preserve_metadata: true,
            log: LogSettings::default(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "ezpaths.log".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(s) => Self::from_toml_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read settings from the per-user config directory, e.g.
    /// `~/.config/ezpaths/settings.toml` on Linux.
    pub fn load_default() -> Result<Self> {
        match default_settings_path() {
            Some(p) => Self::load(&p),
            None => Ok(Self::default()),
        }
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        crate::fs_op::helpers::atomic_write(path, self.to_toml_string()?.as_bytes())?;
        Ok(())
    }

    pub(crate) fn copy_behavior(&self) -> CopyBehavior {
        CopyBehavior {
            buffer_size: self.copy_buffer_size.max(1),
            preserve_metadata: self.preserve_metadata,
        }
    }
}

/// Location of the per-user settings file, if a home directory is known.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ezpaths").map(|d| d.config_dir().join(SETTINGS_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = Settings::from_toml_str("copy_suffix = \"bak\"\n[log]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(s.copy_suffix, "bak");
        assert!(s.preserve_metadata);
        assert_eq!(s.log.level, "debug");
        assert_eq!(s.log.file_prefix, "ezpaths.log");
    }

    #[test]
    fn malformed_toml_is_a_settings_error() {
        let err = Settings::from_toml_str("copy_suffix = [").unwrap_err();
        assert!(matches!(err, crate::FsOpError::Settings(_)));
    }

    #[test]
    fn save_then_load() {
        let td = tempdir().unwrap();
        let path = td.path().join("conf").join(SETTINGS_FILE_NAME);
        let mut s = Settings::default();
        s.preserve_metadata = false;
        s.log.directory = Some(td.path().join("logs"));
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let td = tempdir().unwrap();
        let s = Settings::load(&td.path().join("absent.toml")).unwrap();
        assert_eq!(s, Settings::default());
    }
}
