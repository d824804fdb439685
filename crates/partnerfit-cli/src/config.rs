//! CLI configuration
//!
//! Read from a TOML file; every field is optional and falls back to its default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "partnerfit.toml";

/// Environment variable holding a tracing filter
pub const LOG_ENV: &str = "PARTNERFIT_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Tracing filter used when neither `--verbose` nor `PARTNERFIT_LOG` is set
    pub log_level: String,
    pub output: OutputFormat,
    pub default_corp_name: String,
    pub default_startup_name: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            output: OutputFormat::Text,
            default_corp_name: "Corporate".to_string(),
            default_startup_name: "Startup".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config '{}'", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config '{}'", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Explicit path must exist; the default file is optional
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Filter directive: `--verbose`, then the environment, then the file
    pub fn log_filter(&self, verbose: bool, env_value: Option<String>) -> String {
        if verbose {
            return "debug".to_string();
        }
        env_value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.log_level.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = CliConfig::from_toml("output = \"json\"\n").unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.default_corp_name, "Corporate");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(CliConfig::from_toml("colour = true\n").is_err());
    }

    #[test]
    fn test_loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"info\"").unwrap();
        writeln!(file, "default_corp_name = \"Acme\"").unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.default_corp_name, "Acme");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_log_filter_precedence() {
        let config = CliConfig::default();
        assert_eq!(config.log_filter(true, Some("info".into())), "debug");
        assert_eq!(config.log_filter(false, Some("info".into())), "info");
        assert_eq!(config.log_filter(false, Some("  ".into())), "warn");
        assert_eq!(config.log_filter(false, None), "warn");
    }
}
