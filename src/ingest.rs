//! Build pipeline orchestration.
//!
//! One pass: enumerate candidates per category → classify → build entries
//! → merge the external manifest → sort → write. Per-file problems are
//! logged and counted; only an unusable content root (or a failed write)
//! aborts the build.

use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::assemble::IndexAssembler;
use crate::classify::PathClassifier;
use crate::config::Config;
use crate::connector_fs::{ContentSource, FilesystemSource};
use crate::entry::EntryBuilder;
use crate::error::Rejection;
use crate::export::{self, WriteOutcome};
use crate::manifest::{self, MergeOutcome};
use crate::models::{CanonicalEntry, ContentType, FileCandidate, IndexSet};

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Classify and count without writing index files.
    pub dry_run: bool,
}

/// Counts and outcomes of one build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub scanned: BTreeMap<ContentType, usize>,
    pub entries: BTreeMap<ContentType, usize>,
    pub manifest_entries: usize,
    pub manifest_unreadable: bool,
    /// Rejections keyed by [`Rejection::kind`].
    pub rejections: BTreeMap<&'static str, usize>,
    pub dropped: usize,
    pub outputs: Vec<WriteOutcome>,
}

impl BuildReport {
    pub fn entry_count(&self, content_type: ContentType) -> usize {
        self.entries.get(&content_type).copied().unwrap_or(0)
    }

    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }

    fn record_rejection(&mut self, rejection: &Rejection) {
        *self.rejections.entry(rejection.kind()).or_default() += 1;
    }
}

/// Classifier and builder configured for one run.
#[derive(Debug, Clone)]
pub struct Indexer {
    classifier: PathClassifier,
    builder: EntryBuilder,
}

impl Indexer {
    pub fn new(classifier: PathClassifier, builder: EntryBuilder) -> Self {
        Self {
            classifier,
            builder,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PathClassifier::from_config(config),
            EntryBuilder::from_config(config),
        )
    }

    pub fn classifier(&self) -> &PathClassifier {
        &self.classifier
    }

    pub fn builder(&self) -> &EntryBuilder {
        &self.builder
    }

    /// Classify one candidate and build its entry.
    pub fn index_candidate(
        &self,
        candidate: &FileCandidate,
        content_type: ContentType,
    ) -> Result<CanonicalEntry, Rejection> {
        let raw = self.classifier.classify(&candidate.segments, content_type)?;
        debug!("{} matched layout {}", candidate.relative_path(), raw.layout);
        Ok(self.builder.build(raw, candidate))
    }

    /// Run the full pass over `source` plus an already merged manifest.
    pub fn build(
        &self,
        source: &dyn ContentSource,
        external: MergeOutcome,
    ) -> Result<(IndexSet, BuildReport)> {
        let mut report = BuildReport::default();
        let mut assembler = IndexAssembler::new();

        for content_type in ContentType::ALL {
            let mut scanned = 0usize;
            for candidate in source.candidates(content_type)? {
                scanned += 1;
                let candidate = match candidate {
                    Ok(candidate) => candidate,
                    Err(rejection) => {
                        warn!("SKIP {}", rejection);
                        report.record_rejection(&rejection);
                        continue;
                    }
                };
                match self.index_candidate(&candidate, content_type) {
                    Ok(entry) => {
                        assembler.push(entry);
                    }
                    Err(rejection) => {
                        warn!("SKIP {}: {}", rejection, candidate.relative_path());
                        report.record_rejection(&rejection);
                    }
                }
            }
            report.scanned.insert(content_type, scanned);
        }

        report.manifest_entries = external.entries.len();
        report.manifest_unreadable = external.unreadable;
        for rejection in &external.rejected {
            report.record_rejection(rejection);
        }
        assembler.extend(external.entries);

        report.dropped = assembler.dropped();
        let index = assembler.finish();
        for content_type in ContentType::ALL {
            report
                .entries
                .insert(content_type, index.entries(content_type).len());
        }
        Ok((index, report))
    }
}

/// Build the index from `source` and the configured manifest, without writing.
pub fn build_index(config: &Config, source: &dyn ContentSource) -> Result<(IndexSet, BuildReport)> {
    let indexer = Indexer::from_config(config);
    let manifest_path = config.manifest_path();
    let external = manifest::read_and_merge(manifest_path.as_deref(), indexer.builder().subjects());
    info!("building index from {}", source.describe());
    indexer.build(source, external)
}

/// `study-index build`: scan the content root and write both index files.
pub fn run_build(config: &Config, options: BuildOptions) -> Result<BuildReport> {
    let source = FilesystemSource::from_config(config)?;
    source.check_root()?;

    let (index, mut report) = build_index(config, &source)?;

    if !options.dry_run {
        for content_type in ContentType::ALL {
            let outcome =
                export::write_index(&config.output_path(content_type), index.entries(content_type))?;
            report.outputs.push(outcome);
        }
    }

    print_report(&report, options);
    Ok(report)
}

fn print_report(report: &BuildReport, options: BuildOptions) {
    if options.dry_run {
        println!("build (dry-run)");
    } else {
        println!("build");
    }
    for content_type in ContentType::ALL {
        println!(
            "  {} files scanned: {}",
            content_type,
            report.scanned.get(&content_type).copied().unwrap_or(0)
        );
    }
    println!("  external notes merged: {}", report.manifest_entries);
    if report.manifest_unreadable {
        println!("  manifest: unreadable (skipped)");
    }
    for (kind, count) in &report.rejections {
        println!("  skipped ({}): {}", kind, count);
    }
    if report.dropped > 0 {
        println!("  dropped incomplete: {}", report.dropped);
    }
    for content_type in ContentType::ALL {
        println!(
            "  {} entries: {}",
            content_type,
            report.entry_count(content_type)
        );
    }
    for outcome in &report.outputs {
        println!(
            "  wrote {} ({} entries, sha256 {}{})",
            outcome.path.display(),
            outcome.entries,
            &outcome.digest[..12],
            if outcome.changed { "" } else { ", unchanged" }
        );
    }
    println!("ok");
}

/// `study-index classify`: explain how individual relative paths are indexed.
pub fn run_classify(config: &Config, paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        bail!("no paths given");
    }
    let indexer = Indexer::from_config(config);

    for path in paths {
        let relative = normalize_relative(path);
        let candidate = FileCandidate::from_relative(&relative, 0);
        let Some(content_type) = ContentType::ALL.into_iter().find(|ct| {
            candidate.segments.first().map(String::as_str) == Some(config.content.folder(*ct))
        }) else {
            println!(
                "REJECT {}: malformed path: not under `{}/` or `{}/`",
                relative,
                config.content.folder(ContentType::Pyq),
                config.content.folder(ContentType::Notes)
            );
            continue;
        };

        let size = std::fs::metadata(config.content.root.join(&relative))
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len());
        let candidate = FileCandidate {
            size_bytes: size.unwrap_or(0),
            ..candidate
        };

        match indexer.index_candidate(&candidate, content_type) {
            Ok(mut entry) => {
                if size.is_none() {
                    entry.file_size_bytes = None;
                    entry.file_size = None;
                }
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }
            Err(rejection) => println!("REJECT {}: {}", relative, rejection),
        }
    }
    Ok(())
}

fn normalize_relative(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let trimmed = unified.trim_start_matches("./").trim_start_matches('/');
    Path::new(trimmed)
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}
