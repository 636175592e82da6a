//! Project configuration
//!
//! Stored in `.burnup/config.toml` next to the project snapshot. Every field
//! has a default, so a missing file or section is fine.

use crate::series::AggregateOptions;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Project metadata
    #[serde(default)]
    pub project: ProjectConfig,

    /// Chart configuration
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    /// Project name
    #[serde(default)]
    pub name: Option<String>,

    /// Contributor used by `log`/`remove` when `--user` is omitted
    #[serde(default)]
    pub default_contributor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// First day of each weekly bucket ("sunday", "mon", ...)
    #[serde(default = "default_week_start")]
    pub week_start: String,
}

fn default_week_start() -> String {
    "sunday".to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            week_start: default_week_start(),
        }
    }
}

impl ChartConfig {
    pub fn week_start(&self) -> anyhow::Result<Weekday> {
        self.week_start
            .parse::<Weekday>()
            .map_err(|_| anyhow::anyhow!("Invalid chart.week_start '{}'", self.week_start))
    }
}

impl Config {
    /// Load configuration from the project directory.
    /// Returns the default config if the file doesn't exist.
    pub fn load(project_dir: &Path) -> anyhow::Result<Self> {
        let config_path = project_dir.join("config.toml");

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to read config: {}", e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;

        config.chart.week_start()?;
        Ok(config)
    }

    /// Save configuration to the project directory
    pub fn save(&self, project_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(project_dir)
            .map_err(|e| anyhow::anyhow!("Failed to create project directory: {}", e))?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

        fs::write(project_dir.join("config.toml"), content)
            .map_err(|e| anyhow::anyhow!("Failed to write config: {}", e))?;

        Ok(())
    }

    /// Aggregation options for charting as of today.
    pub fn aggregate_options(&self) -> anyhow::Result<AggregateOptions> {
        Ok(AggregateOptions {
            week_start: self.chart.week_start()?,
            ..AggregateOptions::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chart.week_start().unwrap(), Weekday::Sun);
        assert!(config.project.default_contributor.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.chart.week_start, "sunday");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.chart.week_start = "Mon".to_string();
        config.project.default_contributor = Some("alice".to_string());
        config.save(temp_dir.path()).unwrap();

        let loaded = Config::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.chart.week_start().unwrap(), Weekday::Mon);
        assert_eq!(loaded.project.default_contributor.as_deref(), Some("alice"));
        assert_eq!(loaded.aggregate_options().unwrap().week_start, Weekday::Mon);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.toml"), "[project]\nname = \"Apollo\"\n").unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.project.name.as_deref(), Some("Apollo"));
        assert_eq!(config.chart.week_start().unwrap(), Weekday::Sun);
    }

    #[test]
    fn test_invalid_week_start_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.toml"), "[chart]\nweek_start = \"someday\"\n").unwrap();

        let err = Config::load(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("someday"));
    }
}
