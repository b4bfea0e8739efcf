// Front-end configuration, mirroring assets/config/default.json
use std::path::{Path, PathBuf};

use anyhow::Context;
use engine::ChartSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExportSettings {
    /// Where chart JSON and CSV downloads are written.
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
        }
    }
}

impl AppConfig {
    /// The config embedded in the binary.
    pub fn load_default() -> Result<Self, anyhow::Error> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json_str(config_str).context("embedded default configuration is invalid")
    }

    pub fn load_from_path(path: &Path) -> Result<Self, anyhow::Error> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        Self::from_json_str(&config_str).with_context(|| format!("invalid config file '{}'", path.display()))
    }

    pub fn from_json_str(config_str: &str) -> Result<Self, anyhow::Error> {
        let config: AppConfig = serde_json::from_str(config_str)?;
        config.chart.validate()?;
        Ok(config)
    }
}
