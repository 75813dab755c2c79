//! Settings file discovery and reading.
//!
//! Both JSON5 (`.json5`) and plain JSON (`.json`) are accepted; the JSON5
//! parser handles both.
//!
//! # File Locations
//!
//! Settings are searched in the following order:
//!
//! 1. Local: `./gitcms.json5` or `./gitcms.json`
//! 2. User: `~/.config/gitcms/config.json5` or `~/.config/gitcms/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Settings file names to search for, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["gitcms.json5", "gitcms.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "gitcms";

/// User config file names to search for, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the settings file path, if any.
///
/// # Examples
///
/// ```no_run
/// use gitcms_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found settings at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILE_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }

    let user_dir = dirs::config_dir()?.join(USER_CONFIG_DIR);
    USER_CONFIG_FILE_NAMES
        .iter()
        .map(|name| user_dir.join(name))
        .find(|path| path.exists())
}

/// Reads and parses a settings file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed into `T`.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Sample {
        name: String,
        value: i32,
    }

    #[test]
    fn read_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json");
        std::fs::write(&path, r#"{"name": "test", "value": 42}"#).unwrap();

        let sample: Sample = read_config_file(&path).unwrap();
        assert_eq!(sample.name, "test");
        assert_eq!(sample.value, 42);
    }

    #[test]
    fn read_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json5");
        std::fs::write(
            &path,
            r#"
            {
                // comments are allowed
                name: "test",
                value: 42,
            }
            "#,
        )
        .unwrap();

        let sample: Sample = read_config_file(&path).unwrap();
        assert_eq!(sample, Sample { name: "test".to_string(), value: 42 });
    }

    #[test]
    fn read_nonexistent_file() {
        let result: Result<Sample> = read_config_file("/nonexistent/path.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn read_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result: Result<Sample> = read_config_file(&path);
        assert!(matches!(result, Err(ConfigError::ParseJson5(_))));
    }
}
