pub mod init;
pub mod publish;
pub mod responses;
pub mod score;
pub mod submit;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read an answers file. The payload itself is sanitized later, so any
/// well-formed JSON is accepted here.
pub fn read_answers(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
}
