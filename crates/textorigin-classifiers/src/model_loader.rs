//! Model loading for Candle-based sequence classifiers
//!
//! Everything is read from a local, pre-downloaded directory:
//! - `config.json` (required)
//! - `tokenizer.json`, or `vocab.json` + `merges.txt` (RoBERTa), or `vocab.txt` (BERT)
//! - `model.safetensors`, or `pytorch_model.bin`
//!
//! Nothing is fetched over the network.

use crate::classifier::SequenceClassifier;
use crate::config::{DetectorConfig, DeviceSpec};
use crate::model_config::{Architecture, ModelConfig};
use crate::sequence::{BertSequenceClassifier, RobertaSequenceClassifier};
use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use std::path::Path;
use textorigin_core::{Error, Result};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

/// Device type for inference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    /// CPU inference (always available)
    Cpu,
    /// CUDA GPU inference (if available)
    Cuda(usize),
    /// Metal (Apple Silicon)
    Metal(usize),
}

impl From<DeviceSpec> for DeviceType {
    fn from(spec: DeviceSpec) -> Self {
        match spec {
            DeviceSpec::Cpu => Self::Cpu,
            DeviceSpec::Cuda { index } => Self::Cuda(index.unwrap_or(0)),
            DeviceSpec::Metal { index } => Self::Metal(index.unwrap_or(0)),
        }
    }
}

/// Create Candle device from device type
pub fn create_device(device_type: DeviceType) -> Result<Device> {
    match device_type {
        DeviceType::Cpu => Ok(Device::Cpu),
        DeviceType::Cuda(idx) => Device::new_cuda(idx)
            .map_err(|e| Error::model_load(format!("Failed to create CUDA device: {}", e))),
        DeviceType::Metal(idx) => Device::new_metal(idx)
            .map_err(|e| Error::model_load(format!("Failed to create Metal device: {}", e))),
    }
}

/// Load the sequence classifier described by `config`
pub fn load_sequence_classifier(config: &DetectorConfig) -> Result<Box<dyn SequenceClassifier>> {
    config.validate()?;

    let model_path = config.model_path.as_path();
    if !model_path.is_dir() {
        return Err(Error::model_load(format!(
            "Model directory does not exist: {}",
            model_path.display()
        )));
    }

    let model_config = ModelConfig::from_dir(model_path)?;
    let max_length = config.max_length.min(model_config.max_positions());
    let tokenizer = load_tokenizer(model_path, model_config.architecture, max_length)?;
    let device = create_device(config.device.into())?;
    let vb = load_var_builder(model_path, &device)?;
    let name = model_name(model_path);

    let classifier: Box<dyn SequenceClassifier> = match model_config.architecture {
        Architecture::Roberta => Box::new(RobertaSequenceClassifier::load(
            name,
            &vb,
            &model_config,
            tokenizer,
            device,
            max_length,
        )?),
        Architecture::Bert => Box::new(BertSequenceClassifier::load(
            name,
            &vb,
            &model_config,
            tokenizer,
            device,
            max_length,
        )?),
    };

    info!(
        model = classifier.name(),
        architecture = ?model_config.architecture,
        labels = ?model_config.labels,
        max_length,
        "Loaded sequence classifier"
    );

    Ok(classifier)
}

/// Load the tokenizer and pin truncation to `max_length` tokens
pub fn load_tokenizer(
    model_path: &Path,
    architecture: Architecture,
    max_length: usize,
) -> Result<Tokenizer> {
    let mut tokenizer = read_tokenizer(model_path, architecture)?;

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| Error::model_load(format!("Failed to configure truncation: {}", e)))?;
    tokenizer.with_padding(None);

    Ok(tokenizer)
}

fn read_tokenizer(model_path: &Path, architecture: Architecture) -> Result<Tokenizer> {
    let tokenizer_json_path = model_path.join("tokenizer.json");
    if tokenizer_json_path.exists() {
        debug!("Loading tokenizer from tokenizer.json");
        return Tokenizer::from_file(&tokenizer_json_path)
            .map_err(|e| Error::model_load(format!("Failed to load tokenizer.json: {}", e)));
    }

    match architecture {
        Architecture::Roberta => {
            let vocab_path = model_path.join("vocab.json");
            let merges_path = model_path.join("merges.txt");
            if vocab_path.exists() && merges_path.exists() {
                return build_bpe_tokenizer(&vocab_path, &merges_path);
            }
        }
        Architecture::Bert => {
            let vocab_path = model_path.join("vocab.txt");
            if vocab_path.exists() {
                return build_wordpiece_tokenizer(&vocab_path);
            }
        }
    }

    Err(Error::model_load(format!(
        "No tokenizer found in {} (tried tokenizer.json, vocab.json + merges.txt, vocab.txt)",
        model_path.display()
    )))
}

fn build_bpe_tokenizer(vocab_path: &Path, merges_path: &Path) -> Result<Tokenizer> {
    use tokenizers::models::bpe::BPE;
    use tokenizers::pre_tokenizers::byte_level::ByteLevel;
    use tokenizers::processors::roberta::RobertaProcessing;

    debug!("Building byte-level BPE tokenizer from vocab.json and merges.txt");

    let bpe = BPE::from_file(
        vocab_path.to_string_lossy().as_ref(),
        merges_path.to_string_lossy().as_ref(),
    )
    .build()
    .map_err(|e| Error::model_load(format!("Failed to build BPE model: {}", e)))?;

    let mut tokenizer = Tokenizer::new(bpe);
    let cls_id = tokenizer.token_to_id("<s>").unwrap_or(0);
    let sep_id = tokenizer.token_to_id("</s>").unwrap_or(2);

    tokenizer.with_pre_tokenizer(Some(ByteLevel::default().add_prefix_space(false)));
    tokenizer.with_post_processor(Some(RobertaProcessing::new(
        ("</s>".to_string(), sep_id),
        ("<s>".to_string(), cls_id),
    )));

    Ok(tokenizer)
}

fn build_wordpiece_tokenizer(vocab_path: &Path) -> Result<Tokenizer> {
    use tokenizers::models::wordpiece::WordPiece;
    use tokenizers::normalizers::BertNormalizer;
    use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
    use tokenizers::processors::bert::BertProcessing;

    debug!("Building WordPiece tokenizer from vocab.txt");

    let wordpiece = WordPiece::from_file(vocab_path.to_string_lossy().as_ref())
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(|e| Error::model_load(format!("Failed to build WordPiece model: {}", e)))?;

    let mut tokenizer = Tokenizer::new(wordpiece);
    let cls_id = tokenizer.token_to_id("[CLS]").unwrap_or(101);
    let sep_id = tokenizer.token_to_id("[SEP]").unwrap_or(102);

    tokenizer.with_normalizer(Some(BertNormalizer::default()));
    tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));
    tokenizer.with_post_processor(Some(BertProcessing::new(
        ("[SEP]".to_string(), sep_id),
        ("[CLS]".to_string(), cls_id),
    )));

    Ok(tokenizer)
}

/// Memory-map `model.safetensors`, else read `pytorch_model.bin`
pub fn load_var_builder(model_path: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let safetensors_path = model_path.join("model.safetensors");
    if safetensors_path.exists() {
        // SAFETY: the weights file is not modified while the model is loaded
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[safetensors_path], DType::F32, device)
                .map_err(|e| Error::model_load(format!("Failed to load SafeTensors: {}", e)))?
        };
        return Ok(vb);
    }

    let pth_path = model_path.join("pytorch_model.bin");
    if pth_path.exists() {
        return VarBuilder::from_pth(&pth_path, DType::F32, device)
            .map_err(|e| Error::model_load(format!("Failed to load PyTorch weights: {}", e)));
    }

    Err(Error::model_load(format!(
        "No weights found in {} (tried model.safetensors, pytorch_model.bin)",
        model_path.display()
    )))
}

fn model_name(model_path: &Path) -> String {
    model_path
        .file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .unwrap_or("sequence-classifier")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_from_spec() {
        assert_eq!(DeviceType::from(DeviceSpec::Cpu), DeviceType::Cpu);
        assert_eq!(
            DeviceType::from(DeviceSpec::Cuda { index: Some(1) }),
            DeviceType::Cuda(1)
        );
        assert_eq!(
            DeviceType::from(DeviceSpec::Metal { index: None }),
            DeviceType::Metal(0)
        );
    }

    #[test]
    fn test_cpu_device() {
        assert!(create_device(DeviceType::Cpu).unwrap().is_cpu());
    }

    #[test]
    fn test_model_name() {
        assert_eq!(
            model_name(Path::new("/models/roberta-base-openai-detector")),
            "roberta-base-openai-detector"
        );
        assert_eq!(model_name(Path::new("/")), "sequence-classifier");
    }
}
