//! Path classification against the historical directory layouts.
//!
//! The content tree has changed shape over time. Each supported shape is a
//! [`Layout`] variant with a fixed segment count; the classifier picks the
//! variant whose count matches the path exactly and extracts raw fields
//! from it. Adding or retiring a layout is a change to [`Layout`] and the
//! per-category priority lists, nothing else.

use crate::config::Config;
use crate::error::Rejection;
use crate::models::{ContentType, ExamType, RawFields};
use crate::year::{is_plausible_year, YearExtractor};

/// A supported directory convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `pyq/{dept}/{sem}/{subject}/{year}/{exam}/{filename}`
    PyqDatedFolder,
    /// `pyq/{dept}/{sem}/{subject}/{exam}/{filename}`, year in the filename.
    PyqYearInFilename,
    /// `notes/{dept}/{sem}/{subject}/{filename}`
    NotesFlat,
}

impl Layout {
    pub fn segment_count(self) -> usize {
        match self {
            Layout::PyqDatedFolder => 7,
            Layout::PyqYearInFilename => 6,
            Layout::NotesFlat => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layout::PyqDatedFolder => "dated-folder",
            Layout::PyqYearInFilename => "year-in-filename",
            Layout::NotesFlat => "flat",
        }
    }

    pub fn content_type(self) -> ContentType {
        match self {
            Layout::PyqDatedFolder | Layout::PyqYearInFilename => ContentType::Pyq,
            Layout::NotesFlat => ContentType::Notes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PathClassifier {
    pyq_folder: String,
    notes_folder: String,
    exam_types: Vec<ExamType>,
    years: YearExtractor,
    pyq_layouts: Vec<Layout>,
    notes_layouts: Vec<Layout>,
}

impl PathClassifier {
    pub fn new(
        pyq_folder: impl Into<String>,
        notes_folder: impl Into<String>,
        exam_types: Vec<ExamType>,
        years: YearExtractor,
    ) -> Self {
        Self {
            pyq_folder: pyq_folder.into(),
            notes_folder: notes_folder.into(),
            exam_types,
            years,
            pyq_layouts: vec![Layout::PyqDatedFolder, Layout::PyqYearInFilename],
            notes_layouts: vec![Layout::NotesFlat],
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.content.folder(ContentType::Pyq),
            config.content.folder(ContentType::Notes),
            config.classify.recognized_exam_types(),
            YearExtractor::new(config.classify.year_pattern),
        )
    }

    /// Layouts tried for `content_type`, in priority order.
    pub fn layouts(&self, content_type: ContentType) -> &[Layout] {
        match content_type {
            ContentType::Pyq => &self.pyq_layouts,
            ContentType::Notes => &self.notes_layouts,
        }
    }

    pub fn folder(&self, content_type: ContentType) -> &str {
        match content_type {
            ContentType::Pyq => &self.pyq_folder,
            ContentType::Notes => &self.notes_folder,
        }
    }

    /// Classify a path given as segments relative to the content root.
    pub fn classify<S: AsRef<str>>(
        &self,
        segments: &[S],
        content_type: ContentType,
    ) -> Result<RawFields, Rejection> {
        let parts: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();

        if parts.iter().any(|p| p.is_empty()) {
            return Err(Rejection::MalformedPath("empty path segment".to_string()));
        }
        let folder = self.folder(content_type);
        if parts.first() != Some(&folder) {
            return Err(Rejection::MalformedPath(format!("not under `{}/`", folder)));
        }

        let layouts = self.layouts(content_type);
        let layout = layouts
            .iter()
            .copied()
            .find(|l| l.segment_count() == parts.len())
            .ok_or_else(|| {
                let expected: Vec<String> = layouts
                    .iter()
                    .map(|l| l.segment_count().to_string())
                    .collect();
                Rejection::MalformedPath(format!(
                    "{} segments, expected {}",
                    parts.len(),
                    expected.join(" or ")
                ))
            })?;

        self.extract(layout, &parts)
    }

    fn extract(&self, layout: Layout, parts: &[&str]) -> Result<RawFields, Rejection> {
        match (layout, parts) {
            (Layout::PyqDatedFolder, [_, dept, sem, subject, year, exam, filename]) => {
                let exam_type = self.exam_type(exam)?;
                if !is_plausible_year(year) {
                    return Err(Rejection::InvalidYear {
                        token: year.to_string(),
                    });
                }
                Ok(raw(layout, dept, sem, subject, Some(*year), Some(exam_type), filename))
            }
            (Layout::PyqYearInFilename, [_, dept, sem, subject, exam, filename]) => {
                let exam_type = self.exam_type(exam)?;
                let year = self
                    .years
                    .extract(filename)
                    .ok_or_else(|| Rejection::MissingYear {
                        filename: filename.to_string(),
                    })?;
                if !is_plausible_year(year) {
                    return Err(Rejection::InvalidYear {
                        token: year.to_string(),
                    });
                }
                Ok(raw(layout, dept, sem, subject, Some(year), Some(exam_type), filename))
            }
            (Layout::NotesFlat, [_, dept, sem, subject, filename]) => {
                Ok(raw(layout, dept, sem, subject, None, None, filename))
            }
            _ => Err(Rejection::MalformedPath(format!(
                "{} segments do not fit layout {}",
                parts.len(),
                layout.name()
            ))),
        }
    }

    fn exam_type(&self, token: &str) -> Result<ExamType, Rejection> {
        ExamType::from_token(&token.to_lowercase())
            .filter(|t| self.exam_types.contains(t))
            .ok_or_else(|| Rejection::UnrecognizedExamType {
                token: token.to_string(),
            })
    }
}

impl Default for PathClassifier {
    fn default() -> Self {
        Self::from_config(&Config::minimal())
    }
}

fn raw(
    layout: Layout,
    dept: &str,
    sem: &str,
    subject: &str,
    year: Option<&str>,
    exam_type: Option<ExamType>,
    filename: &str,
) -> RawFields {
    RawFields {
        content_type: layout.content_type(),
        layout: layout.name(),
        department: dept.to_string(),
        semester: sem.to_string(),
        subject: subject.to_string(),
        year: year.map(str::to_string),
        exam_type,
        filename: filename.to_string(),
    }
}
