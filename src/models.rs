//! Core data models used throughout the indexer.
//!
//! These types represent the candidate files, classified fields, and
//! canonical index entries that flow through the build pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which index an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Pyq,
    Notes,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Pyq, ContentType::Notes];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Pyq => "pyq",
            ContentType::Notes => "notes",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When within an academic term an exam took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    Mid,
    End,
    Suppl,
}

impl ExamType {
    /// Parse an already lower-cased exam token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "mid" => Some(ExamType::Mid),
            "end" => Some(ExamType::End),
            "suppl" => Some(ExamType::Suppl),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExamType::Mid => "mid",
            ExamType::End => "end",
            ExamType::Suppl => "suppl",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file discovered under the content root, before classification.
///
/// `segments` are relative to the content root, so the first segment is
/// the category folder (`pyq` or `notes`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub segments: Vec<String>,
    pub size_bytes: u64,
}

impl FileCandidate {
    pub fn new<S: Into<String>>(segments: impl IntoIterator<Item = S>, size_bytes: u64) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            size_bytes,
        }
    }

    /// Parse a `/`-separated relative path.
    pub fn from_relative(path: &str, size_bytes: u64) -> Self {
        Self::new(path.split('/'), size_bytes)
    }

    pub fn relative_path(&self) -> String {
        self.segments.join("/")
    }
}

/// Fields extracted from a path by the classifier, prior to normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFields {
    pub content_type: ContentType,
    pub layout: &'static str,
    pub department: String,
    pub semester: String,
    pub subject: String,
    pub year: Option<String>,
    pub exam_type: Option<ExamType>,
    pub filename: String,
}

/// The normalized record describing one indexed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEntry {
    pub content_type: ContentType,
    pub department: String,
    pub semester: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_full: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<ExamType>,
    pub filename: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
}

/// The two ordered output sequences of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSet {
    pub pyq: Vec<CanonicalEntry>,
    pub notes: Vec<CanonicalEntry>,
}

impl IndexSet {
    pub fn entries(&self, content_type: ContentType) -> &[CanonicalEntry] {
        match content_type {
            ContentType::Pyq => &self.pyq,
            ContentType::Notes => &self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_type_tokens() {
        assert_eq!(ExamType::from_token("mid"), Some(ExamType::Mid));
        assert_eq!(ExamType::from_token("suppl"), Some(ExamType::Suppl));
        assert_eq!(ExamType::from_token("misc"), None);
        assert_eq!(ExamType::from_token("MID"), None);
    }

    #[test]
    fn test_candidate_from_relative() {
        let c = FileCandidate::from_relative("notes/cse/sem4/os/unit1.pdf", 10);
        assert_eq!(c.segments.len(), 5);
        assert_eq!(c.relative_path(), "notes/cse/sem4/os/unit1.pdf");
    }

    #[test]
    fn test_entry_omits_absent_fields() {
        let entry = CanonicalEntry {
            content_type: ContentType::Notes,
            department: "CSE".to_string(),
            semester: "sem4".to_string(),
            subject: "OS".to_string(),
            subject_full: None,
            year: None,
            exam_type: None,
            filename: "a.pdf".to_string(),
            url: "https://drive.example/a".to_string(),
            file_size_bytes: None,
            file_size: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["content_type"], "notes");
        assert!(!obj.contains_key("year"));
        assert!(!obj.contains_key("file_size"));
        assert!(!obj.contains_key("subject_full"));
    }

    #[test]
    fn test_entry_json_roundtrip_keeps_all_fields() {
        let entry = CanonicalEntry {
            content_type: ContentType::Pyq,
            department: "CSE".to_string(),
            semester: "sem4".to_string(),
            subject: "AFL".to_string(),
            subject_full: Some("AUTOMATA AND FORMAL LANGUAGES".to_string()),
            year: Some("2023".to_string()),
            exam_type: Some(ExamType::Mid),
            filename: "AFL_MIDSEM_2023.pdf".to_string(),
            url: "https://example.org/pyq/cse/sem4/afl/mid/AFL_MIDSEM_2023.pdf".to_string(),
            file_size_bytes: Some(1_536_000),
            file_size: Some("1.5 MB".to_string()),
        };
        let text = serde_json::to_string(&entry).unwrap();
        let back: CanonicalEntry = serde_json::from_str(&text).unwrap();
        assert_eq!(back, entry);
        assert!(text.contains("\"exam_type\":\"mid\""));
    }
}
