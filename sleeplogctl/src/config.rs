//! CLI configuration management
//!
//! Handles loading and saving CLI-specific configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Path of the CSV record store
    pub data_file: PathBuf,

    /// Default output format
    pub output_format: String,

    /// Enable verbose logging by default
    pub verbose: bool,

    /// Chart width in columns
    pub chart_width: usize,

    /// Chart height in rows
    pub chart_height: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_file: sleeplog_core::default_data_file(),
            output_format: "table".to_string(),
            verbose: false,
            chart_width: 72,
            chart_height: 16,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read CLI config file")?;
        toml::from_str(&content).context("Failed to parse CLI config file")
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize CLI config")?;
        std::fs::write(path, content).context("Failed to write CLI config file")?;

        Ok(())
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
///
/// Setters fill a field only when it is still unset, so apply sources from
/// highest to lowest priority: CLI args first, then env, then file.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_file: Option<PathBuf>,
    output_format: Option<String>,
    verbose: Option<bool>,
    chart_width: Option<usize>,
    chart_height: Option<usize>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set data file path (with validation)
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        Self::validate_data_file(&path)?;
        self.data_file = Some(path);
        Ok(self)
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Set verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Set chart width (with validation)
    pub fn with_chart_width(mut self, width: usize) -> Result<Self> {
        Self::validate_chart_width(width)?;
        self.chart_width = Some(width);
        Ok(self)
    }

    /// Set chart height (with validation)
    pub fn with_chart_height(mut self, height: usize) -> Result<Self> {
        Self::validate_chart_height(height)?;
        self.chart_height = Some(height);
        Ok(self)
    }

    /// Fill unset values from the config file at `path`
    pub fn with_config_file(self, path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(self);
        };

        let config = CliConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        let builder = self;
        Ok(Self {
            data_file: builder.data_file.or(Some(config.data_file)),
            output_format: builder.output_format.or(Some(config.output_format)),
            verbose: builder.verbose.or(Some(config.verbose)),
            chart_width: builder.chart_width.or(Some(config.chart_width)),
            chart_height: builder.chart_height.or(Some(config.chart_height)),
        })
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        // Only apply env vars if values weren't already set (preserving priority)
        if self.data_file.is_none() {
            if let Ok(path) = std::env::var("SLEEPLOG_FILE") {
                let path = PathBuf::from(path);
                if Self::validate_data_file(&path).is_ok() {
                    self.data_file = Some(path);
                }
            }
        }

        if self.output_format.is_none() {
            if let Ok(format) = std::env::var("SLEEPLOG_FORMAT") {
                if Self::validate_output_format(&format).is_ok() {
                    self.output_format = Some(format);
                }
            }
        }

        if self.verbose.is_none() {
            if let Ok(verbose) = std::env::var("SLEEPLOG_VERBOSE") {
                self.verbose = Some(verbose.to_lowercase() == "true" || verbose == "1");
            }
        }

        if self.chart_width.is_none() {
            if let Some(width) = env_usize("SLEEPLOG_CHART_WIDTH") {
                if Self::validate_chart_width(width).is_ok() {
                    self.chart_width = Some(width);
                }
            }
        }

        if self.chart_height.is_none() {
            if let Some(height) = env_usize("SLEEPLOG_CHART_HEIGHT") {
                if Self::validate_chart_height(height).is_ok() {
                    self.chart_height = Some(height);
                }
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        let data_file = self.data_file.unwrap_or(defaults.data_file);
        let output_format = self.output_format.unwrap_or(defaults.output_format);
        let chart_width = self.chart_width.unwrap_or(defaults.chart_width);
        let chart_height = self.chart_height.unwrap_or(defaults.chart_height);

        // File values are only checked here
        Self::validate_data_file(&data_file)?;
        Self::validate_output_format(&output_format)?;
        Self::validate_chart_width(chart_width)?;
        Self::validate_chart_height(chart_height)?;

        Ok(CliConfig {
            data_file,
            output_format,
            verbose: self.verbose.unwrap_or(defaults.verbose),
            chart_width,
            chart_height,
        })
    }

    fn validate_data_file(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Data file path cannot be empty"));
        }
        if path.is_dir() {
            return Err(anyhow::anyhow!(
                "Data file path '{}' is a directory",
                path.display()
            ));
        }
        Ok(())
    }

    fn validate_output_format(format: &str) -> Result<()> {
        match format {
            "table" | "json" => Ok(()),
            _ => Err(anyhow::anyhow!(
                "Invalid output format '{}'. Must be 'table' or 'json'",
                format
            )),
        }
    }

    fn validate_chart_width(width: usize) -> Result<()> {
        if !(20..=400).contains(&width) {
            return Err(anyhow::anyhow!(
                "Chart width must be between 20 and 400 columns, got {}",
                width
            ));
        }
        Ok(())
    }

    fn validate_chart_height(height: usize) -> Result<()> {
        if !(5..=100).contains(&height) {
            return Err(anyhow::anyhow!(
                "Chart height must be between 5 and 100 rows, got {}",
                height
            ));
        }
        Ok(())
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_KEYS: [&str; 5] = [
        "SLEEPLOG_FILE",
        "SLEEPLOG_FORMAT",
        "SLEEPLOG_VERBOSE",
        "SLEEPLOG_CHART_WIDTH",
        "SLEEPLOG_CHART_HEIGHT",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.data_file.ends_with("sleep_records.csv"));
        assert_eq!(config.output_format, "table");
        assert!(!config.verbose);
        assert_eq!(config.chart_width, 72);
        assert_eq!(config.chart_height, 16);
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sleeplog").join("config.toml");

        let config = CliConfig {
            data_file: PathBuf::from("/tmp/nights.csv"),
            output_format: "json".to_string(),
            verbose: true,
            chart_width: 100,
            chart_height: 20,
        };
        config.save(&path).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output_format = \"json\"\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.output_format, "json");
        assert_eq!(config.chart_width, 72);
    }

    #[test]
    fn test_missing_config_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = CliConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_broken_config_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "chart_width = \"wide\"").unwrap();

        assert!(CliConfig::load(&path).is_err());
        assert!(ConfigBuilder::new().with_config_file(Some(&path)).is_err());
    }

    #[test]
    fn test_builder_with_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_builder_with_custom_values() {
        let config = ConfigBuilder::new()
            .with_data_file("/tmp/custom.csv")
            .unwrap()
            .with_output_format("json")
            .unwrap()
            .with_verbose(true)
            .with_chart_width(120)
            .unwrap()
            .with_chart_height(30)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/custom.csv"));
        assert_eq!(config.output_format, "json");
        assert!(config.verbose);
        assert_eq!(config.chart_width, 120);
        assert_eq!(config.chart_height, 30);
    }

    #[test]
    fn test_builder_validation() {
        assert!(ConfigBuilder::new().with_data_file("").is_err());
        assert!(ConfigBuilder::new().with_output_format("xml").is_err());
        assert!(ConfigBuilder::new().with_chart_width(19).is_err());
        assert!(ConfigBuilder::new().with_chart_width(401).is_err());
        assert!(ConfigBuilder::new().with_chart_height(4).is_err());

        assert!(ConfigBuilder::new().with_output_format("table").is_ok());
        assert!(ConfigBuilder::new().with_chart_width(20).is_ok());
        assert!(ConfigBuilder::new().with_chart_height(100).is_ok());
    }

    #[test]
    fn test_data_file_cannot_be_directory() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigBuilder::new().with_data_file(dir.path()).is_err());
    }

    #[test]
    fn test_invalid_file_values_fail_build() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "chart_height = 1\n").unwrap();

        let result = ConfigBuilder::new()
            .with_config_file(Some(&path))
            .unwrap()
            .build();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_builder_with_env_overrides() {
        clear_env();
        std::env::set_var("SLEEPLOG_FILE", "/tmp/env.csv");
        std::env::set_var("SLEEPLOG_FORMAT", "json");
        std::env::set_var("SLEEPLOG_VERBOSE", "1");
        std::env::set_var("SLEEPLOG_CHART_WIDTH", "50");

        let config = ConfigBuilder::new().with_env_overrides().build().unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/env.csv"));
        assert_eq!(config.output_format, "json");
        assert!(config.verbose);
        assert_eq!(config.chart_width, 50);
        assert_eq!(config.chart_height, 16);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_builder_priority_chain() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_file = \"/tmp/file.csv\"\noutput_format = \"json\"\nchart_width = 90\n",
        )
        .unwrap();

        std::env::set_var("SLEEPLOG_FILE", "/tmp/env.csv");
        std::env::set_var("SLEEPLOG_CHART_WIDTH", "60");

        let config = ConfigBuilder::new()
            .with_chart_width(30)
            .unwrap()
            .with_env_overrides()
            .with_config_file(Some(&path))
            .unwrap()
            .build()
            .unwrap();

        // CLI arg wins over env and file
        assert_eq!(config.chart_width, 30);
        // Env wins over file
        assert_eq!(config.data_file, PathBuf::from("/tmp/env.csv"));
        // File wins over default
        assert_eq!(config.output_format, "json");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_builder_invalid_env_values_ignored() {
        clear_env();
        std::env::set_var("SLEEPLOG_FORMAT", "xml");
        std::env::set_var("SLEEPLOG_CHART_HEIGHT", "tall");
        std::env::set_var("SLEEPLOG_CHART_WIDTH", "5000");

        let config = ConfigBuilder::new().with_env_overrides().build().unwrap();

        assert_eq!(config.output_format, "table");
        assert_eq!(config.chart_height, 16);
        assert_eq!(config.chart_width, 72);

        clear_env();
    }
}
