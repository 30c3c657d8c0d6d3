//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.
//! Command-line flags are applied on top by the binary.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::{defaults, env as keys};
use crate::error::{Error, Result};

/// Configuration for a conversion run.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application version
    app_version: String,
    /// JSON file containing an array of spell records
    pub input: PathBuf,
    /// Directory the markdown notes are written into
    pub output_dir: PathBuf,
    /// Directory the zip archive is written into
    pub archive_dir: PathBuf,
    /// Whether to package the output directory as a zip archive
    pub create_archive: bool,
}

impl Config {
    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            input: PathBuf::from(defaults::INPUT_PATH),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            archive_dir: PathBuf::from(defaults::ARCHIVE_DIR),
            create_archive: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in [`Config::load`]).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(keys::INPUT) {
            self.input = expand_path(keys::INPUT, &path)?;
        }

        if let Some(path) = lookup(keys::OUTPUT_DIR) {
            self.output_dir = expand_path(keys::OUTPUT_DIR, &path)?;
        }

        if let Some(path) = lookup(keys::ARCHIVE_DIR) {
            self.archive_dir = expand_path(keys::ARCHIVE_DIR, &path)?;
        }

        if let Some(flag) = lookup(keys::NO_ZIP) {
            if is_truthy(&flag) {
                self.create_archive = false;
            }
        }

        Ok(())
    }
}

/// Expand `~` in a path taken from the environment.
fn expand_path(key: &str, raw: &str) -> Result<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::config(
            format!("{key} is set but empty"),
            "Unset the variable or give it a path",
        ));
    }
    Ok(PathBuf::from(shellexpand::tilde(trimmed).to_string()))
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_cli_defaults() {
        let config = Config::default();
        assert_eq!(config.input, PathBuf::from("examples/all-spells.json"));
        assert_eq!(config.output_dir, PathBuf::from("output/spells"));
        assert!(config.create_archive);
        assert_eq!(config.app_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn env_overrides_paths_and_zip() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[
                ("SPELLMARK_INPUT", "data/spells.json"),
                ("SPELLMARK_OUTPUT_DIR", "notes"),
                ("SPELLMARK_NO_ZIP", "yes"),
            ]))
            .unwrap();

        assert_eq!(config.input, PathBuf::from("data/spells.json"));
        assert_eq!(config.output_dir, PathBuf::from("notes"));
        assert!(!config.create_archive);
    }

    #[test]
    fn falsy_no_zip_keeps_archive() {
        let mut config = Config::default();
        config.apply_env(lookup_from(&[("SPELLMARK_NO_ZIP", "0")])).unwrap();
        assert!(config.create_archive);
    }

    #[test]
    fn empty_path_is_a_config_error() {
        let mut config = Config::default();
        let err = config
            .apply_env(lookup_from(&[("SPELLMARK_OUTPUT_DIR", "  ")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
