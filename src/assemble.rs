//! Index assembly and deterministic ordering.
//!
//! Entries arrive in whatever order the content source and manifest yield
//! them. [`IndexAssembler::finish`] sorts each index by a total order so
//! the same input set always produces the same output.

use std::cmp::Ordering;
use tracing::warn;

use crate::models::{CanonicalEntry, ContentType, IndexSet};
use crate::year::is_plausible_year;

#[derive(Debug, Default)]
pub struct IndexAssembler {
    pyq: Vec<CanonicalEntry>,
    notes: Vec<CanonicalEntry>,
    dropped: usize,
}

impl IndexAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Incomplete entries are dropped with a warning and
    /// `false` is returned.
    pub fn push(&mut self, entry: CanonicalEntry) -> bool {
        if let Err(problem) = check_complete(&entry) {
            warn!("DROP incomplete entry {}: {}", entry.url, problem);
            self.dropped += 1;
            return false;
        }
        match entry.content_type {
            ContentType::Pyq => self.pyq.push(entry),
            ContentType::Notes => self.notes.push(entry),
        }
        true
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = CanonicalEntry>) {
        for entry in entries {
            self.push(entry);
        }
    }

    pub fn len(&self, content_type: ContentType) -> usize {
        match content_type {
            ContentType::Pyq => self.pyq.len(),
            ContentType::Notes => self.notes.len(),
        }
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn finish(mut self) -> IndexSet {
        self.pyq.sort_by(pyq_order);
        self.notes.sort_by(notes_order);
        IndexSet {
            pyq: self.pyq,
            notes: self.notes,
        }
    }
}

/// Department, semester, subject ascending; newest year first; then exam
/// type, filename and URL to make the order total.
pub fn pyq_order(a: &CanonicalEntry, b: &CanonicalEntry) -> Ordering {
    a.department
        .cmp(&b.department)
        .then_with(|| a.semester.cmp(&b.semester))
        .then_with(|| a.subject.cmp(&b.subject))
        .then_with(|| b.year.cmp(&a.year))
        .then_with(|| a.exam_type.cmp(&b.exam_type))
        .then_with(|| a.filename.cmp(&b.filename))
        .then_with(|| a.url.cmp(&b.url))
}

/// Department, semester, subject, filename ascending; URL breaks ties.
pub fn notes_order(a: &CanonicalEntry, b: &CanonicalEntry) -> Ordering {
    a.department
        .cmp(&b.department)
        .then_with(|| a.semester.cmp(&b.semester))
        .then_with(|| a.subject.cmp(&b.subject))
        .then_with(|| a.filename.cmp(&b.filename))
        .then_with(|| a.url.cmp(&b.url))
}

fn check_complete(entry: &CanonicalEntry) -> Result<(), String> {
    if entry.department != entry.department.to_uppercase()
        || entry.subject != entry.subject.to_uppercase()
    {
        return Err("department and subject must be uppercase".to_string());
    }
    if entry.filename.is_empty() || entry.url.is_empty() {
        return Err("filename and url are required".to_string());
    }
    if entry.file_size_bytes.is_some() != entry.file_size.is_some() {
        return Err("file size fields must come as a pair".to_string());
    }
    match entry.content_type {
        ContentType::Pyq => match (&entry.year, entry.exam_type) {
            (Some(year), Some(_)) if is_plausible_year(year) => Ok(()),
            (Some(year), Some(_)) => Err(format!("implausible year `{}`", year)),
            _ => Err("pyq entries need a year and an exam type".to_string()),
        },
        ContentType::Notes => {
            if entry.year.is_some() || entry.exam_type.is_some() {
                Err("notes entries carry no year or exam type".to_string())
            } else {
                Ok(())
            }
        }
    }
}
