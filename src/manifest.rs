//! External manifest of remotely hosted notes.
//!
//! Some files are too large for the static host and live elsewhere (e.g.
//! Google Drive). They are listed in a JSON manifest shaped like:
//!
//! ```json
//! [
//!   {
//!     "filename": "large_file.pdf",
//!     "url": "https://drive.google.com/uc?export=download&id=...",
//!     "department": "CSE",
//!     "semester": "sem4",
//!     "subject": "DBMS"
//!   }
//! ]
//! ```
//!
//! Rows become `notes` entries with the URL taken verbatim and no size,
//! since a remote size is not knowable without fetching the file. A bad row
//! is skipped; a bad manifest contributes nothing. Neither stops the build.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{IndexError, Rejection};
use crate::models::{CanonicalEntry, ContentType};
use crate::subject::SubjectNormalizer;

/// Result of merging one manifest.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub entries: Vec<CanonicalEntry>,
    pub rejected: Vec<Rejection>,
    /// The manifest was present but not a list of records.
    pub unreadable: bool,
}

/// Read and parse the manifest at `path`.
///
/// `Ok(None)` when no path is configured or the file does not exist.
pub fn load_manifest(path: Option<&Path>) -> Result<Option<Value>, IndexError> {
    let Some(path) = path else {
        return Ok(None);
    };
    if !path.exists() {
        info!("no manifest at {}, skipping external notes", path.display());
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|e| IndexError::ManifestUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let value = serde_json::from_str(&text).map_err(|e| IndexError::ManifestUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(Some(value))
}

/// Convert a parsed manifest into entries.
pub fn merge_manifest(manifest: Option<&Value>, subjects: &SubjectNormalizer) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    let Some(manifest) = manifest else {
        return outcome;
    };
    let Some(records) = manifest.as_array() else {
        warn!("manifest invalid: expected a list of records");
        outcome.unreadable = true;
        return outcome;
    };

    for record in records {
        match record_to_entry(record, subjects) {
            Ok(entry) => outcome.entries.push(entry),
            Err(rejection) => {
                warn!("SKIP {}", rejection);
                outcome.rejected.push(rejection);
            }
        }
    }
    info!("added {} external notes", outcome.entries.len());
    outcome
}

/// Load the manifest at `path` and merge it. Load failures are logged and
/// reported through [`MergeOutcome::unreadable`].
pub fn read_and_merge(path: Option<&Path>, subjects: &SubjectNormalizer) -> MergeOutcome {
    match load_manifest(path) {
        Ok(manifest) => merge_manifest(manifest.as_ref(), subjects),
        Err(e) => {
            warn!("{}", e);
            MergeOutcome {
                unreadable: true,
                ..MergeOutcome::default()
            }
        }
    }
}

pub fn record_to_entry(
    record: &Value,
    subjects: &SubjectNormalizer,
) -> Result<CanonicalEntry, Rejection> {
    let Some(fields) = record.as_object() else {
        return Err(Rejection::InvalidManifestRecord(format!(
            "not an object: {}",
            record
        )));
    };

    let filename = required(fields, "filename", record)?;
    let url = required(fields, "url", record)?;
    let department = optional(fields, "department", record)?;
    let semester = optional(fields, "semester", record)?;
    let subject = subjects.normalize(optional(fields, "subject", record)?);

    Ok(CanonicalEntry {
        content_type: ContentType::Notes,
        department: department.to_uppercase(),
        semester: semester.to_string(),
        subject: subject.code,
        subject_full: subject.full,
        year: None,
        exam_type: None,
        filename: filename.to_string(),
        url: url.to_string(),
        file_size_bytes: None,
        file_size: None,
    })
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
    record: &Value,
) -> Result<&'a str, Rejection> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        Some(Value::String(_)) => Err(Rejection::InvalidManifestRecord(format!(
            "empty `{}` in {}",
            key, record
        ))),
        None | Some(Value::Null) => Err(Rejection::InvalidManifestRecord(format!(
            "missing `{}` in {}",
            key, record
        ))),
        Some(_) => Err(Rejection::InvalidManifestRecord(format!(
            "`{}` is not a string in {}",
            key, record
        ))),
    }
}

fn optional<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
    record: &Value,
) -> Result<&'a str, Rejection> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(Rejection::InvalidManifestRecord(format!(
            "`{}` is not a string in {}",
            key, record
        ))),
    }
}
