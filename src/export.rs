//! Write the ordered indexes as JSON for the front-end app.
//!
//! Each index is a pretty-printed JSON array. Files are replaced
//! atomically (temp file in the same directory, then rename), so a reader
//! never sees a partial index. Unchanged content is not rewritten.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::models::CanonicalEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub entries: usize,
    /// SHA-256 of the written bytes, hex encoded.
    pub digest: String,
    /// False when the destination already held identical bytes.
    pub changed: bool,
}

/// Serialize entries exactly as they are written to disk.
pub fn render_index(entries: &[CanonicalEntry]) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(entries)?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub fn write_index(path: &Path, entries: &[CanonicalEntry]) -> Result<WriteOutcome> {
    let bytes = render_index(entries)?;
    let digest = digest(&bytes);

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)
        .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;

    let changed = match std::fs::read(path) {
        Ok(existing) => existing != bytes,
        Err(_) => true,
    };

    if changed {
        let mut tmp = NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
        tmp.write_all(&bytes)?;
        tmp.flush()?;
        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write index: {}", path.display()))?;
    }

    Ok(WriteOutcome {
        path: path.to_path_buf(),
        entries: entries.len(),
        digest,
        changed,
    })
}
