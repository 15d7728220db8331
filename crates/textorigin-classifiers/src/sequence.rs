//! Candle sequence-classification backends

use crate::classifier::{Prediction, SequenceClassifier};
use crate::model_config::ModelConfig;
use candle_core::{Device, IndexOp, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use candle_transformers::models::xlm_roberta::{
    Config as XlmRobertaConfig, XLMRobertaForSequenceClassification,
};
use std::time::Instant;
use textorigin_core::{Error, Result};
use tokenizers::Tokenizer;
use tracing::{debug, info};

/// RoBERTa / XLM-RoBERTa with its `classifier.{dense,out_proj}` head
pub struct RobertaSequenceClassifier {
    name: String,
    tokenizer: Tokenizer,
    model: XLMRobertaForSequenceClassification,
    device: Device,
    labels: Vec<String>,
    max_length: usize,
}

impl RobertaSequenceClassifier {
    pub fn load(
        name: String,
        vb: &VarBuilder,
        config: &ModelConfig,
        tokenizer: Tokenizer,
        device: Device,
        max_length: usize,
    ) -> Result<Self> {
        let backbone: XlmRobertaConfig = config.backbone_config()?;
        let model = load_roberta_sequence_model(vb, config.num_labels(), &backbone)?;

        Ok(Self {
            name,
            tokenizer,
            model,
            device,
            labels: config.labels.clone(),
            max_length,
        })
    }
}

impl SequenceClassifier for RobertaSequenceClassifier {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let start = Instant::now();
        let input = EncodedInput::new(&self.tokenizer, text, &self.device)?;

        let logits = self
            .model
            .forward(&input.input_ids, &input.attention_mask, &input.token_type_ids)
            .map_err(inference_error("Model forward pass failed"))?;

        let probabilities = to_probabilities(&logits)?;
        Ok(finish(
            Prediction::argmax(&self.labels, &probabilities),
            &self.name,
            input.tokens,
            start,
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn max_length(&self) -> usize {
        self.max_length
    }
}

/// BERT backbone, optional pooler, linear classification head
pub struct BertSequenceClassifier {
    name: String,
    tokenizer: Tokenizer,
    model: BertModel,
    pooler: Option<Linear>,
    classifier: Linear,
    device: Device,
    labels: Vec<String>,
    max_length: usize,
}

impl BertSequenceClassifier {
    pub fn load(
        name: String,
        vb: &VarBuilder,
        config: &ModelConfig,
        tokenizer: Tokenizer,
        device: Device,
        max_length: usize,
    ) -> Result<Self> {
        let backbone: BertConfig = config.backbone_config()?;
        let (model, prefix) = load_bert_backbone(vb, &backbone, &["bert", ""])?;

        let hidden_size = config.hidden_size;
        let pooler = candle_nn::linear(
            hidden_size,
            hidden_size,
            scoped(vb, prefix).pp("pooler").pp("dense"),
        )
        .ok();
        if pooler.is_none() {
            debug!("No pooler weights found, classifying the raw [CLS] embedding");
        }

        let classifier = candle_nn::linear(hidden_size, config.num_labels(), vb.pp("classifier"))
            .map_err(|e| {
                Error::model_load(format!(
                    "Failed to load classification head (hidden_size={}, num_labels={}): {}",
                    hidden_size,
                    config.num_labels(),
                    e
                ))
            })?;

        Ok(Self {
            name,
            tokenizer,
            model,
            pooler,
            classifier,
            device,
            labels: config.labels.clone(),
            max_length,
        })
    }
}

impl SequenceClassifier for BertSequenceClassifier {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let start = Instant::now();
        let input = EncodedInput::new(&self.tokenizer, text, &self.device)?;

        let hidden_states = self
            .model
            .forward(
                &input.input_ids,
                &input.token_type_ids,
                Some(&input.attention_mask),
            )
            .map_err(inference_error("Model forward pass failed"))?;

        let cls_embedding = hidden_states
            .i((.., 0))
            .map_err(inference_error("Failed to get CLS token"))?;

        let pooled = match &self.pooler {
            Some(pooler) => pooler
                .forward(&cls_embedding)
                .and_then(|t| t.tanh())
                .map_err(inference_error("Pooler failed"))?,
            None => cls_embedding,
        };

        let logits = self
            .classifier
            .forward(&pooled)
            .map_err(inference_error("Classification head failed"))?;

        let probabilities = to_probabilities(&logits)?;
        Ok(finish(
            Prediction::argmax(&self.labels, &probabilities),
            &self.name,
            input.tokens,
            start,
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn max_length(&self) -> usize {
        self.max_length
    }
}

/// Batch-of-one model inputs
struct EncodedInput {
    input_ids: Tensor,
    attention_mask: Tensor,
    token_type_ids: Tensor,
    tokens: usize,
}

impl EncodedInput {
    /// Tokenize with the tokenizer's truncation settings and lift to `[1, seq_len]`
    fn new(tokenizer: &Tokenizer, text: &str, device: &Device) -> Result<Self> {
        let encoding = tokenizer
            .encode(text, true)
            .map_err(|e| Error::classification(format!("Tokenization failed: {}", e)))?;

        let row = |values: &[u32], what: &'static str| {
            Tensor::new(values, device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(inference_error(what))
        };

        Ok(Self {
            input_ids: row(encoding.get_ids(), "Failed to create input tensor")?,
            attention_mask: row(
                encoding.get_attention_mask(),
                "Failed to create attention mask",
            )?,
            token_type_ids: row(encoding.get_type_ids(), "Failed to create token type tensor")?,
            tokens: encoding.get_ids().len(),
        })
    }
}

fn inference_error(context: &'static str) -> impl Fn(candle_core::Error) -> Error {
    move |e| Error::classification(format!("{}: {}", context, e))
}

/// Softmax over classes; a single-logit head uses a sigmoid
fn to_probabilities(logits: &Tensor) -> Result<Vec<f32>> {
    let num_labels = logits
        .dim(D::Minus1)
        .map_err(inference_error("Unexpected logits shape"))?;

    if num_labels == 1 {
        let raw: Vec<f32> = logits
            .flatten_all()
            .and_then(|t| t.to_vec1())
            .map_err(inference_error("Failed to convert to vec"))?;
        return Ok(raw.into_iter().map(|x| 1.0 / (1.0 + (-x).exp())).collect());
    }

    candle_nn::ops::softmax(logits, D::Minus1)
        .and_then(|t| t.squeeze(0))
        .and_then(|t| t.to_vec1())
        .map_err(inference_error("Softmax failed"))
}

fn finish(mut prediction: Prediction, name: &str, tokens: usize, start: Instant) -> Prediction {
    prediction.metadata.model = Some(name.to_string());
    prediction.latency_us = start.elapsed().as_micros() as u64;

    debug!(
        model = name,
        tokens,
        label = %prediction.label,
        score = prediction.score,
        latency_us = prediction.latency_us,
        "Sequence classified"
    );

    prediction
}

fn scoped<'a>(vb: &VarBuilder<'a>, prefix: &str) -> VarBuilder<'a> {
    if prefix.is_empty() {
        vb.clone()
    } else {
        vb.pp(prefix)
    }
}

fn display_prefix(prefix: &str) -> &str {
    if prefix.is_empty() {
        "<root>"
    } else {
        prefix
    }
}

fn load_roberta_sequence_model(
    vb: &VarBuilder,
    num_labels: usize,
    config: &XlmRobertaConfig,
) -> Result<XLMRobertaForSequenceClassification> {
    let mut errors = Vec::new();

    for prefix in ["", "model"] {
        match XLMRobertaForSequenceClassification::new(num_labels, config, scoped(vb, prefix)) {
            Ok(model) => {
                info!("Loaded RoBERTa backbone from '{}'", display_prefix(prefix));
                return Ok(model);
            }
            Err(e) => errors.push(format!("{}: {}", display_prefix(prefix), e)),
        }
    }

    Err(Error::model_load(format!(
        "Failed to load RoBERTa sequence model with tried prefixes [{}]",
        errors.join(" | ")
    )))
}

fn load_bert_backbone<'p>(
    vb: &VarBuilder,
    config: &BertConfig,
    prefixes: &[&'p str],
) -> Result<(BertModel, &'p str)> {
    let mut errors = Vec::new();

    for &prefix in prefixes {
        match BertModel::load(scoped(vb, prefix), config) {
            Ok(model) => {
                info!("Loaded BERT backbone from '{}'", display_prefix(prefix));
                return Ok((model, prefix));
            }
            Err(e) => errors.push(format!("{}: {}", display_prefix(prefix), e)),
        }
    }

    Err(Error::model_load(format!(
        "Failed to load BERT backbone with tried prefixes [{}]",
        errors.join(" | ")
    )))
}
