//! End-to-end tests for the `textorigin` binary

use std::path::Path;
use std::process::{Command, Output};

fn textorigin(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_textorigin"))
        .args(args)
        .current_dir(cwd)
        .env_remove("TEXTORIGIN_MODEL_PATH")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run textorigin")
}

#[test]
fn test_text_only_prints_extracted_text() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("essay.txt"), "Plain text body.").unwrap();

    let output = textorigin(&["essay.txt", "--text-only"], dir.path());

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Plain text body.\n");
}

#[test]
fn test_unsupported_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("table.csv"), "a,b\n1,2\n").unwrap();

    let output = textorigin(&["table.csv", "--text-only"], dir.path());

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported file format"));
}

#[test]
fn test_missing_model_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("essay.txt"), "Some words to classify.").unwrap();

    let output = textorigin(
        &["essay.txt", "--model-path", "no-such-model"],
        dir.path(),
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load model"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("essay.txt"), "text").unwrap();
    std::fs::write(dir.path().join("textorigin.yaml"), "detector:\n  ai_labels: []\n").unwrap();

    let output = textorigin(&["essay.txt", "--text-only"], dir.path());

    assert!(!output.status.success());
}
