use std::fs;
use std::path::Path;
use tempfile::TempDir;

use study_index::config::Config;
use study_index::connector_fs::FilesystemSource;
use study_index::ingest::{self, BuildOptions};
use study_index::models::ContentType;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"%PDF").unwrap();
}

#[test]
fn test_build_index_from_filesystem() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "pyq/it/sem2/ds/end/DS_ENDSEM_2019.pdf");
    touch(tmp.path(), "pyq/it/sem2/ds/end/DS_ENDSEM_2024.pdf");
    touch(tmp.path(), "pyq/it/sem2/ds/suppl/DS_SUPPL_2024.pdf");
    touch(tmp.path(), "notes/it/sem2/ds/trees.pdf");

    let config = Config::with_root(tmp.path());
    let source = FilesystemSource::from_config(&config).unwrap();
    let (index, report) = ingest::build_index(&config, &source).unwrap();

    let years: Vec<_> = index
        .pyq
        .iter()
        .map(|e| (e.year.as_deref().unwrap(), e.exam_type.unwrap().as_str()))
        .collect();
    assert_eq!(years, vec![("2024", "end"), ("2024", "suppl"), ("2019", "end")]);
    assert_eq!(index.pyq[0].department, "IT");
    assert_eq!(index.pyq[0].subject_full.as_deref(), Some("DATA STRUCTURES"));
    assert_eq!(index.notes.len(), 1);
    assert_eq!(report.rejected(), 0);
    assert_eq!(report.manifest_entries, 0);
}

#[test]
fn test_empty_root_writes_empty_arrays() {
    let tmp = TempDir::new().unwrap();
    let config = Config::with_root(tmp.path());

    let report = ingest::run_build(&config, BuildOptions::default()).unwrap();
    assert_eq!(report.entry_count(ContentType::Pyq), 0);
    assert_eq!(report.entry_count(ContentType::Notes), 0);

    for file in ["pyq-index.json", "notes-index.json"] {
        let text = fs::read_to_string(tmp.path().join(file)).unwrap();
        assert_eq!(text.trim(), "[]");
    }
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_does_not_abort_build() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "notes/cse/sem4/os/unit1.pdf");
    std::os::unix::fs::symlink(
        tmp.path().join("nowhere.pdf"),
        tmp.path().join("notes/cse/sem4/os/old.pdf"),
    )
    .unwrap();

    let mut config = Config::with_root(tmp.path());
    config.content.follow_symlinks = true;

    let report = ingest::run_build(&config, BuildOptions::default()).unwrap();
    assert_eq!(report.entry_count(ContentType::Notes), 1);
    assert_eq!(report.rejections.get("unreadable entry"), Some(&1));

    let text = fs::read_to_string(tmp.path().join("notes-index.json")).unwrap();
    assert!(text.contains("unit1.pdf"));
    assert!(!text.contains("old.pdf"));
}

#[test]
fn test_missing_root_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let config = Config::with_root(tmp.path().join("missing"));

    assert!(ingest::run_build(&config, BuildOptions::default()).is_err());
    assert!(!tmp.path().join("missing").exists());
}
