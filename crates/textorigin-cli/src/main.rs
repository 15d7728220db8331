//! TextOrigin CLI
//!
//! Reads a txt, docx or pdf file, extracts its text and reports how likely
//! the text is to be human-written or AI-generated.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use textorigin_classifiers::{Classifier, DeviceSpec};
use tracing::info;

mod config;
mod upload;

use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "textorigin")]
#[command(about = "Score a document as human-written or AI-generated", long_about = None)]
struct Cli {
    /// Document to analyze (.txt, .docx or .pdf)
    file: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "textorigin.yaml")]
    config: PathBuf,

    /// Local model directory
    #[arg(short, long, env = "TEXTORIGIN_MODEL_PATH")]
    model_path: Option<PathBuf>,

    /// Inference device: cpu, cuda[:N] or metal[:N]
    #[arg(short, long)]
    device: Option<DeviceSpec>,

    /// Truncation window in tokens
    #[arg(long)]
    max_length: Option<usize>,

    /// Print the extracted text instead of classifying it
    #[arg(long)]
    text_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(&cli.config, cli)?;

    let upload = upload::read_upload(&cli.file)?;
    let text = textorigin_extract::extract_upload(&upload)
        .with_context(|| format!("Failed to extract text from {}", cli.file.display()))?;
    info!(file = %upload.filename, chars = text.chars().count(), "Extracted text");

    if cli.text_only {
        println!("{}", text);
        return Ok(());
    }

    let classifier = Classifier::from_config(&config.detector).with_context(|| {
        format!(
            "Failed to load model from {}",
            config.detector.model_path.display()
        )
    })?;

    let result = classifier
        .classify(&text)
        .with_context(|| format!("Failed to classify {}", cli.file.display()))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Initialize tracing/logging on stderr so stdout carries only the result
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("textorigin=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("textorigin=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
