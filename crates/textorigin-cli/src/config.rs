//! CLI configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use textorigin_classifiers::DetectorConfig;
use tracing::debug;

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Detector settings
    #[serde(default)]
    pub detector: DetectorConfig,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides.
    ///
    /// A relative `model_path` from the file resolves against the file's
    /// directory, or against the executable's directory when no file exists.
    /// CLI paths are taken as given.
    pub fn load(config_path: &Path, cli: &crate::Cli) -> anyhow::Result<Self> {
        let (mut config, base) = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config = Self::from_yaml(&content)
                .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;
            debug!(path = %config_path.display(), "Loaded configuration file");
            (config, config_dir(config_path))
        } else {
            debug!(path = %config_path.display(), "No configuration file, using defaults");
            (Self::default(), executable_dir()?)
        };

        config.detector.resolve_model_path(&base);

        // Apply CLI overrides
        if let Some(model_path) = &cli.model_path {
            config.detector.model_path = model_path.clone();
        }

        if let Some(device) = cli.device {
            config.detector.device = device;
        }

        if let Some(max_length) = cli.max_length {
            config.detector.max_length = max_length;
        }

        config.detector.validate()?;
        Ok(config)
    }

    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.detector.validate()?;
        Ok(config)
    }
}

fn config_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn executable_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the executable")?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
