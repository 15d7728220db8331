//! File to data-URI upload

use anyhow::Context;
use std::path::Path;
use textorigin_core::EncodedUpload;

/// Read `path` and wrap it as `data:<guessed type>;base64,<payload>`
pub fn read_upload(path: &Path) -> anyhow::Result<EncodedUpload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;

    let media_type = mime_guess::from_path(path).first_or_octet_stream();

    Ok(EncodedUpload::from_bytes(
        filename,
        media_type.essence_str(),
        &bytes,
    ))
}
