//! `config.json` parsing for pretrained sequence-classification checkpoints

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use textorigin_core::{Error, Result};

/// Backbone families with a candle implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    /// RoBERTa and XLM-RoBERTa (same layout)
    Roberta,
    /// BERT
    Bert,
}

impl Architecture {
    /// Map a Hugging Face `model_type`
    pub fn from_model_type(model_type: &str) -> Result<Self> {
        match model_type {
            "roberta" | "xlm-roberta" => Ok(Self::Roberta),
            "bert" => Ok(Self::Bert),
            other => Err(Error::model_load(format!(
                "Unsupported model_type '{other}' (expected roberta, xlm-roberta or bert)"
            ))),
        }
    }

    /// Usable positions; RoBERTa offsets positions past the padding index
    pub fn max_positions(&self, max_position_embeddings: usize) -> usize {
        match self {
            Self::Roberta => max_position_embeddings.saturating_sub(2),
            Self::Bert => max_position_embeddings,
        }
    }
}

/// Parsed model `config.json`
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Backbone family
    pub architecture: Architecture,

    /// Label names in class-index order
    pub labels: Vec<String>,

    /// Hidden size of the backbone
    pub hidden_size: usize,

    /// Position embedding table size
    pub max_position_embeddings: usize,

    raw: Value,
}

impl ModelConfig {
    /// Read and parse `<model_path>/config.json`
    pub fn from_dir(model_path: &Path) -> Result<Self> {
        let config_path = model_path.join("config.json");
        let config_str = std::fs::read_to_string(&config_path).map_err(|e| {
            Error::model_load(format!(
                "Failed to read config {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_json(&config_str)
    }

    /// Parse a `config.json` document
    pub fn from_json(config_str: &str) -> Result<Self> {
        let mut raw: Value = serde_json::from_str(config_str)
            .map_err(|e| Error::model_load(format!("Failed to parse config JSON: {e}")))?;

        let obj = raw
            .as_object_mut()
            .ok_or_else(|| Error::model_load("config.json is not a JSON object"))?;

        let model_type = obj
            .get("model_type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::model_load("config.json has no model_type"))?;
        let architecture = Architecture::from_model_type(model_type)?;

        fill_defaults(obj, architecture);

        let hidden_size = required_usize(obj, "hidden_size")?;
        let max_position_embeddings = required_usize(obj, "max_position_embeddings")?;
        let labels = parse_labels(obj);

        Ok(Self {
            architecture,
            labels,
            hidden_size,
            max_position_embeddings,
            raw,
        })
    }

    /// Number of output classes
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Longest token window the backbone accepts
    pub fn max_positions(&self) -> usize {
        self.architecture.max_positions(self.max_position_embeddings)
    }

    /// Deserialize the full document into a candle model config
    pub fn backbone_config<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.raw.clone())
            .map_err(|e| Error::model_load(format!("Failed to parse backbone config: {e}")))
    }
}

/// Older checkpoints omit keys the candle configs require
fn fill_defaults(obj: &mut Map<String, Value>, architecture: Architecture) {
    let defaults: Vec<(&str, Value)> = match architecture {
        Architecture::Roberta => vec![
            ("position_embedding_type", Value::from("absolute")),
            ("hidden_act", Value::from("gelu")),
            ("layer_norm_eps", Value::from(1e-5)),
            ("hidden_dropout_prob", Value::from(0.1)),
            ("attention_probs_dropout_prob", Value::from(0.1)),
            ("type_vocab_size", Value::from(1)),
            ("pad_token_id", Value::from(1)),
        ],
        Architecture::Bert => vec![
            ("position_embedding_type", Value::from("absolute")),
            ("hidden_act", Value::from("gelu")),
            ("layer_norm_eps", Value::from(1e-12)),
            ("hidden_dropout_prob", Value::from(0.1)),
            ("type_vocab_size", Value::from(2)),
            ("pad_token_id", Value::from(0)),
        ],
    };

    for (key, value) in defaults {
        obj.entry(key).or_insert(value);
    }
}

fn required_usize(obj: &Map<String, Value>, key: &str) -> Result<usize> {
    obj.get(key)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .ok_or_else(|| Error::model_load(format!("config.json is missing '{key}'")))
}

/// `id2label` keyed by stringified index, padded to `num_labels` (default 2)
fn parse_labels(obj: &Map<String, Value>) -> Vec<String> {
    let id2label: HashMap<usize, String> = obj
        .get("id2label")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(idx, label)| {
                    Some((idx.parse::<usize>().ok()?, label.as_str()?.to_string()))
                })
                .collect()
        })
        .unwrap_or_default();

    let num_labels = obj
        .get("num_labels")
        .or_else(|| obj.get("_num_labels"))
        .and_then(Value::as_u64)
        .map(|n| n as usize)
        .or_else(|| id2label.keys().max().map(|max| max + 1))
        .unwrap_or(2);

    (0..num_labels)
        .map(|idx| {
            id2label
                .get(&idx)
                .cloned()
                .unwrap_or_else(|| format!("LABEL_{idx}"))
        })
        .collect()
}
