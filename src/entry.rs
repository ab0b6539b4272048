//! Canonical entry construction for locally discovered files.

use crate::config::Config;
use crate::models::{CanonicalEntry, FileCandidate, RawFields};
use crate::size::format_file_size;
use crate::subject::SubjectNormalizer;

#[derive(Debug, Clone)]
pub struct EntryBuilder {
    base_url: String,
    subjects: SubjectNormalizer,
}

impl EntryBuilder {
    pub fn new(base_url: impl Into<String>, subjects: SubjectNormalizer) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url, subjects }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.site.base_url.clone(),
            SubjectNormalizer::with_overrides(&config.subjects.abbreviations),
        )
    }

    pub fn subjects(&self) -> &SubjectNormalizer {
        &self.subjects
    }

    /// Public address of a file: base URL plus the relative segments, verbatim.
    pub fn url_for<S: AsRef<str>>(&self, segments: &[S]) -> String {
        let path: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();
        format!("{}/{}", self.base_url, path.join("/"))
    }

    pub fn build(&self, raw: RawFields, candidate: &FileCandidate) -> CanonicalEntry {
        let subject = self.subjects.normalize(&raw.subject);
        CanonicalEntry {
            content_type: raw.content_type,
            department: raw.department.to_uppercase(),
            semester: raw.semester,
            subject: subject.code,
            subject_full: subject.full,
            year: raw.year,
            exam_type: raw.exam_type,
            filename: raw.filename,
            url: self.url_for(&candidate.segments),
            file_size_bytes: Some(candidate.size_bytes),
            file_size: Some(format_file_size(candidate.size_bytes)),
        }
    }
}
