use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::calculator::Throughput;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub fps: u32,
    /// Initial contents of the token field (e.g. "200M").
    pub tokens: String,
    pub project_name: String,
    /// Tokens per second; must be a multiple of 5 within [10, 100].
    pub throughput: u32,
    /// Rate table to use instead of the built-in one.
    pub rates_file: Option<PathBuf>,
    /// Where exported reports are written. Defaults to the working directory.
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_string(),
            fps: 30,
            tokens: "200000000".to_string(),
            project_name: "My Project".to_string(),
            throughput: Throughput::DEFAULT.get(),
            rates_file: None,
            export_dir: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_path(),
        };

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config TOML")?;

        config.validate()?;
        tracing::info!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("cloud-cost")
            .join("config.toml")
    }

    /// Validated throughput. Only meaningful after `load`.
    pub fn throughput(&self) -> Throughput {
        Throughput::clamped(self.throughput)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.fps >= 1 && self.fps <= 120, "fps must be between 1 and 120");
        anyhow::ensure!(
            Throughput::new(self.throughput).is_some(),
            "throughput must be a multiple of {} between {} and {}",
            Throughput::STEP,
            Throughput::MIN,
            Throughput::MAX
        );
        Ok(())
    }
}
