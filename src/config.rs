//! Console configuration loaded from TOML files

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::formatter::OutputFormat;

/// Console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Prompt shown by the interactive loop
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Input line that ends the session
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Result rendering
    #[serde(default)]
    pub output: OutputFormat,

    /// Report failing lines and continue instead of ending the session
    #[serde(default)]
    pub keep_going: bool,

    /// Maximum history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

fn default_prompt() -> String {
    "minisql> ".to_string()
}

fn default_sentinel() -> String {
    "exit".to_string()
}

fn default_history_size() -> usize {
    1000
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            sentinel: default_sentinel(),
            output: OutputFormat::default(),
            keep_going: false,
            history_size: default_history_size(),
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Loads the given file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::ConsoleConfig;
    use crate::formatter::OutputFormat;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.sentinel, "exit");
        assert_eq!(config.output, OutputFormat::Table);
        assert!(!config.keep_going);
        assert_eq!(ConsoleConfig::load(None).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("minisql.toml");
        std::fs::write(&path, "output = \"json\"\nkeep_going = true\n").unwrap();

        let config = ConsoleConfig::from_file(&path).unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.keep_going);
        assert_eq!(config.prompt, "minisql> ");
        assert_eq!(config.history_size, 1000);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join("minisql.toml");

        let config = ConsoleConfig {
            sentinel: "quit".to_string(),
            output: OutputFormat::Raw,
            ..ConsoleConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = ConsoleConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("minisql.toml");
        std::fs::write(&path, "output = \"xml\"").unwrap();
        assert!(ConsoleConfig::from_file(&path).is_err());
        assert!(ConsoleConfig::from_file(&temp_dir.path().join("missing.toml")).is_err());
    }
}
