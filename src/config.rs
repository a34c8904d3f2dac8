//! Dashboard configuration loader - parses dashboard.toml
//!
//! The file is optional. Every key has a default, so a missing file or a
//! partial one both work; only a malformed file stops startup.

use crate::aggregation::RangeBounds;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "dashboard.toml";
pub const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8050";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// CSV file, relative to the working directory
    pub data_path: PathBuf,
    pub bind_addr: String,
    pub payload_bounds: RangeBounds,
    pub slider: SliderConfig,
}

/// Payload slider settings in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            payload_bounds: RangeBounds::default(),
            slider: SliderConfig::default(),
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        SliderConfig {
            min: 0.0,
            max: 10000.0,
            step: 1000.0,
        }
    }
}

impl DashboardConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: DashboardConfig =
            toml::from_str(contents).context("Failed to parse dashboard config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let slider = &self.slider;
        if !(slider.min.is_finite() && slider.max.is_finite() && slider.step.is_finite()) {
            bail!("slider bounds must be finite numbers");
        }
        if slider.min >= slider.max {
            bail!("slider.min ({}) must be below slider.max ({})", slider.min, slider.max);
        }
        if slider.step <= 0.0 {
            bail!("slider.step must be positive, got {}", slider.step);
        }
        Ok(())
    }
}

/// Loads the dashboard config, falling back to defaults when the file does
/// not exist.
pub fn load_config(path: &Path) -> Result<DashboardConfig> {
    if !path.exists() {
        return Ok(DashboardConfig::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    DashboardConfig::from_toml_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config(Path::new("no/such/dashboard.toml")).unwrap();

        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(config.bind_addr, "127.0.0.1:8050");
        assert_eq!(config.payload_bounds, RangeBounds::Inclusive);
        assert_eq!(config.slider.max, 10000.0);
        assert_eq!(config.slider.step, 1000.0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            payload_bounds = "exclusive"

            [slider]
            max = 16000
            "#,
        )
        .unwrap();

        assert_eq!(config.payload_bounds, RangeBounds::Exclusive);
        assert_eq!(config.slider.max, 16000.0);
        assert_eq!(config.slider.min, 0.0);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_full_file() {
        let config = DashboardConfig::from_toml_str(
            r#"
            data_path = "data/launches.csv"
            bind_addr = "0.0.0.0:9000"
            payload_bounds = "inclusive"

            [slider]
            min = 0.0
            max = 10000.0
            step = 500.0
            "#,
        )
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("data/launches.csv"));
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.slider.step, 500.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(DashboardConfig::from_toml_str("payload_bounds = ").is_err());
        assert!(DashboardConfig::from_toml_str("payload_bounds = \"sideways\"").is_err());
        assert!(DashboardConfig::from_toml_str("unknown_key = 1").is_err());
    }

    #[test]
    fn test_inverted_slider_is_rejected() {
        let result = DashboardConfig::from_toml_str("[slider]\nmin = 5000\nmax = 1000\n");
        assert!(result.is_err());

        let result = DashboardConfig::from_toml_str("[slider]\nstep = 0\n");
        assert!(result.is_err());
    }
}
