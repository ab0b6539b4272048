//! Content sources: where candidate files come from.
//!
//! The build pipeline only sees [`ContentSource`]. [`FilesystemSource`]
//! walks `<root>/<category folder>` lazily, keeps files matching the
//! category's include globs and not matching its exclude globs, and yields
//! their segments relative to the content root.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{IndexError, Rejection};
use crate::models::{ContentType, FileCandidate};

/// Per-item failures are yielded as [`Rejection`]s; the walk continues
/// past them.
pub type CandidateIter<'a> = Box<dyn Iterator<Item = Result<FileCandidate, Rejection>> + 'a>;

/// A lazy enumeration of candidate files per category.
pub trait ContentSource {
    /// Human-readable description for logs.
    fn describe(&self) -> String;

    /// Fails with [`IndexError::RootUnavailable`] when nothing can be
    /// enumerated at all.
    fn candidates(&self, content_type: ContentType) -> Result<CandidateIter<'_>, IndexError>;
}

struct CategoryFilter {
    folder: String,
    include: GlobSet,
    exclude: GlobSet,
}

pub struct FilesystemSource {
    root: PathBuf,
    follow_symlinks: bool,
    pyq: CategoryFilter,
    notes: CategoryFilter,
}

impl FilesystemSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        let category = |content_type: ContentType| -> Result<CategoryFilter> {
            Ok(CategoryFilter {
                folder: config.content.folder(content_type).to_string(),
                include: build_globset(&config.content.include_globs(content_type))?,
                exclude: build_globset(&config.content.exclude_globs(content_type))?,
            })
        };
        Ok(Self {
            root: config.content.root.clone(),
            follow_symlinks: config.content.follow_symlinks,
            pyq: category(ContentType::Pyq)?,
            notes: category(ContentType::Notes)?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category_dir(&self, content_type: ContentType) -> PathBuf {
        self.root.join(&self.filter(content_type).folder)
    }

    pub fn check_root(&self) -> Result<(), IndexError> {
        match std::fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(IndexError::RootUnavailable {
                path: self.root.clone(),
                source: None,
            }),
            Err(e) => Err(IndexError::RootUnavailable {
                path: self.root.clone(),
                source: Some(e),
            }),
        }
    }

    fn filter(&self, content_type: ContentType) -> &CategoryFilter {
        match content_type {
            ContentType::Pyq => &self.pyq,
            ContentType::Notes => &self.notes,
        }
    }
}

impl ContentSource for FilesystemSource {
    fn describe(&self) -> String {
        format!("filesystem:{}", self.root.display())
    }

    fn candidates(&self, content_type: ContentType) -> Result<CandidateIter<'_>, IndexError> {
        self.check_root()?;

        let dir = self.category_dir(content_type);
        if !dir.is_dir() {
            info!("no {} folder at {}, nothing to index", content_type, dir.display());
            return Ok(Box::new(std::iter::empty()));
        }

        let filter = self.filter(content_type);
        let root = self.root.as_path();
        let walker = WalkDir::new(&dir)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter();

        Ok(Box::new(walker.filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(Rejection::unreadable(e.path(), &e))),
            };
            if !entry.file_type().is_file() {
                return None;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            let Some(segments) = utf8_segments(relative) else {
                warn!("SKIP non UTF-8 path: {}", path.display());
                return None;
            };

            // Globs are matched below the category folder.
            let within = segments[1..].join("/");
            if filter.exclude.is_match(&within) || !filter.include.is_match(&within) {
                return None;
            }

            match entry.metadata() {
                Ok(meta) => Some(Ok(FileCandidate {
                    segments,
                    size_bytes: meta.len(),
                })),
                Err(e) => Some(Err(Rejection::unreadable(Some(path), &e))),
            }
        })))
    }
}

fn utf8_segments(relative: &Path) -> Option<Vec<String>> {
    let segments: Option<Vec<String>> = relative
        .components()
        .map(|c| c.as_os_str().to_str().map(str::to_string))
        .collect();
    segments.filter(|s| s.len() >= 2)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid glob pattern: {}", pattern))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, bytes: usize) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![b'x'; bytes]).unwrap();
    }

    fn collect(source: &FilesystemSource, ct: ContentType) -> Vec<FileCandidate> {
        source
            .candidates(ct)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_walks_category_with_globs() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pyq/cse/sem4/os/mid/os_2021.pdf", 10);
        touch(tmp.path(), "pyq/cse/sem4/os/mid/OS_2022.PDF", 20);
        touch(tmp.path(), "pyq/cse/sem4/os/mid/readme.txt", 5);
        touch(tmp.path(), "pyq/cse/sem4/os/mid/.hidden.pdf", 5);
        touch(tmp.path(), "notes/cse/sem4/os/unit1.zip", 7);
        touch(tmp.path(), "notes/cse/sem4/os/unit1.docx", 7);

        let source = FilesystemSource::from_config(&Config::with_root(tmp.path())).unwrap();

        let pyq = collect(&source, ContentType::Pyq);
        let names: Vec<String> = pyq.iter().map(|c| c.relative_path()).collect();
        assert_eq!(
            names,
            vec![
                "pyq/cse/sem4/os/mid/OS_2022.PDF".to_string(),
                "pyq/cse/sem4/os/mid/os_2021.pdf".to_string(),
            ]
        );
        assert_eq!(pyq[1].size_bytes, 10);

        let notes = collect(&source, ContentType::Notes);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].segments[0], "notes");
    }

    #[test]
    fn test_missing_category_folder_is_empty() {
        let tmp = TempDir::new().unwrap();
        let source = FilesystemSource::from_config(&Config::with_root(tmp.path())).unwrap();
        assert!(collect(&source, ContentType::Notes).is_empty());
    }

    #[test]
    fn test_missing_root_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let source =
            FilesystemSource::from_config(&Config::with_root(tmp.path().join("nope"))).unwrap();
        let err = source.candidates(ContentType::Pyq).err().unwrap();
        assert!(matches!(err, IndexError::RootUnavailable { .. }));
    }

    #[test]
    fn test_hidden_directories_are_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "notes/cse/sem4/os/unit1.pdf", 1);
        touch(tmp.path(), "notes/cse/sem4/os/.trash/unit1.pdf", 1);
        touch(tmp.path(), "notes/.cache/cse/sem4/os/unit2.pdf", 1);

        let source = FilesystemSource::from_config(&Config::with_root(tmp.path())).unwrap();
        let notes = collect(&source, ContentType::Notes);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].relative_path(), "notes/cse/sem4/os/unit1.pdf");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_yields_rejection() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "notes/cse/sem4/os/unit1.pdf", 1);
        std::os::unix::fs::symlink(
            tmp.path().join("gone.pdf"),
            tmp.path().join("notes/cse/sem4/os/old.pdf"),
        )
        .unwrap();

        let mut config = Config::with_root(tmp.path());
        config.content.follow_symlinks = true;
        let source = FilesystemSource::from_config(&config).unwrap();

        let items: Vec<_> = source.candidates(ContentType::Notes).unwrap().collect();
        assert_eq!(items.len(), 2);
        let rejected = items.iter().find_map(|i| i.as_ref().err()).unwrap();
        assert_eq!(rejected.kind(), "unreadable entry");
        assert!(rejected.to_string().contains("old.pdf"));
        let ok: Vec<_> = items.iter().filter_map(|i| i.as_ref().ok()).collect();
        assert_eq!(ok[0].relative_path(), "notes/cse/sem4/os/unit1.pdf");
    }

    #[test]
    fn test_exclude_globs() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "notes/cse/sem4/os/unit1.pdf", 1);
        touch(tmp.path(), "notes/cse/sem4/drafts/unit2.pdf", 1);
        let mut config = Config::with_root(tmp.path());
        config.content.notes.exclude_globs = vec!["**/drafts/**".to_string()];
        let source = FilesystemSource::from_config(&config).unwrap();
        let notes = collect(&source, ContentType::Notes);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].relative_path(), "notes/cse/sem4/os/unit1.pdf");
    }
}
