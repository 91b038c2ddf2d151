//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use std::env;
use std::path::{Path, PathBuf};

use dotenv::dotenv;

use crate::chord::classify::DEFAULT_DENY_WORDS;
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Lowercased words never treated as chord fragments
    pub deny_words: Vec<String>,
    /// Default output directory for batch conversions
    pub out_dir: Option<PathBuf>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            deny_words: DEFAULT_DENY_WORDS.iter().map(ToString::to_string).collect(),
            out_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        // Deny words: an inline list wins over a word file
        if let Ok(csv) = env::var("CHORDFLOW_DENY_WORDS") {
            config.deny_words = parse_deny_csv(&csv);
        } else if let Some(path) = deny_words_file() {
            config.deny_words = load_deny_file(&path)?;
        }

        if let Ok(dir) = env::var("CHORDFLOW_OUT_DIR") {
            config.out_dir = Some(PathBuf::from(shellexpand::tilde(&dir).to_string()));
        }

        Ok(config)
    }
}

/// Deny word file: env var override, or default `<config>/chordflow/deny_words.json`
fn deny_words_file() -> Option<PathBuf> {
    env::var("CHORDFLOW_DENY_WORDS_FILE").ok().map_or_else(
        || {
            dirs::config_dir()
                .map(|dir| dir.join("chordflow/deny_words.json"))
                .filter(|path| path.is_file())
        },
        // Explicit paths are not existence-filtered; a missing file is an error
        |path| Some(PathBuf::from(shellexpand::tilde(&path).to_string())),
    )
}

/// Parse a comma-separated deny word list.
fn parse_deny_csv(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Read a JSON array of deny words from `path`.
fn load_deny_file(path: &Path) -> Result<Vec<String>> {
    let raw = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let words: Vec<String> = serde_json::from_str(&raw).map_err(|e| {
        Error::config(
            format!("invalid deny word file {}: {e}", path.display()),
            "expected a JSON array of strings",
        )
    })?;
    Ok(words.iter().map(|word| word.to_lowercase()).collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_default_carries_builtin_deny_words() {
        let config = Config::default();
        assert_eq!(config.app_name(), "chordflow");
        assert!(config.deny_words.iter().any(|w| w == "dat"));
        assert_eq!(config.out_dir, None);
    }

    #[test]
    fn test_parse_deny_csv_trims_and_lowercases() {
        assert_eq!(parse_deny_csv(" Dat, aan ,,zee"), vec!["dat", "aan", "zee"]);
        assert!(parse_deny_csv("").is_empty());
    }

    #[test]
    fn test_load_deny_file_lowercases_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deny_words.json");
        std::fs::write(&path, r#"["Dat", "Zee"]"#).unwrap();
        let words = load_deny_file(&path).unwrap();
        assert_eq!(words, vec!["dat", "zee"]);
    }

    #[test]
    fn test_load_deny_file_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deny_words.json");
        std::fs::write(&path, "niet json").unwrap();
        let err = load_deny_file(&path).unwrap_err();
        assert!(err.to_string().contains("expected a JSON array"));
    }
}
