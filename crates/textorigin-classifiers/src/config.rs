//! Configuration for the detector and model loading

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use textorigin_core::{Error, Result};

/// Detector configuration (the `detector:` section of the config file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Directory holding `config.json`, tokenizer files and weights
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Device to run inference on
    #[serde(default)]
    pub device: DeviceSpec,

    /// Truncation window in tokens, special tokens included
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Labels that denote the AI-generated class; anything else is human
    #[serde(default = "default_ai_labels")]
    pub ai_labels: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            device: DeviceSpec::default(),
            max_length: default_max_length(),
            ai_labels: default_ai_labels(),
        }
    }
}

impl DetectorConfig {
    /// Defaults with the given model directory
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            ..Default::default()
        }
    }

    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse detector config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Set device
    pub fn with_device(mut self, device: DeviceSpec) -> Self {
        self.device = device;
        self
    }

    /// Set truncation window
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Set the AI label set
    pub fn with_ai_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ai_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve a relative `model_path` against `base`
    pub fn resolve_model_path(&mut self, base: &Path) {
        if self.model_path.is_relative() {
            self.model_path = base.join(&self.model_path);
        }
    }

    /// Reject settings no model can run with
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(Error::config("max_length must be greater than zero"));
        }
        if self.ai_labels.is_empty() {
            return Err(Error::config("ai_labels must name at least one label"));
        }
        Ok(())
    }
}

/// Device specification, written as a string in config files and on the
/// command line (`cpu`, `cuda`, `cuda:1`, `metal`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeviceSpec {
    #[default]
    Cpu,
    Cuda { index: Option<usize> },
    Metal { index: Option<usize> },
}

impl FromStr for DeviceSpec {
    type Err = Error;

    /// Parses `cpu`, `cuda`, `cuda:<n>`, `metal`, `mps` and `metal:<n>`
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let (kind, index) = match lower.split_once(':') {
            Some((kind, idx)) => {
                let idx = idx
                    .parse::<usize>()
                    .map_err(|_| Error::config(format!("Invalid device index in '{s}'")))?;
                (kind, Some(idx))
            }
            None => (lower.as_str(), None),
        };

        match kind {
            "cpu" if index.is_none() => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda { index }),
            "metal" | "mps" => Ok(Self::Metal { index }),
            _ => Err(Error::config(format!("Unknown device '{s}'"))),
        }
    }
}

impl TryFrom<String> for DeviceSpec {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<DeviceSpec> for String {
    fn from(spec: DeviceSpec) -> Self {
        spec.to_string()
    }
}

impl std::fmt::Display for DeviceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (kind, index) = match self {
            Self::Cpu => return f.write_str("cpu"),
            Self::Cuda { index } => ("cuda", index),
            Self::Metal { index } => ("metal", index),
        };
        match index {
            Some(idx) => write!(f, "{kind}:{idx}"),
            None => f.write_str(kind),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./roberta-base-openai-detector")
}

fn default_max_length() -> usize {
    510
}

fn default_ai_labels() -> Vec<String> {
    vec!["AI-Generated".to_string(), "Fake".to_string()]
}
