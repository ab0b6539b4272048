//! TOML configuration for the indexer.
//!
//! Every section and field is optional; an absent config file behaves like
//! an empty one. See [`EXAMPLE_CONFIG`] for the full set of keys.

use anyhow::{bail, Context, Result};
use globset::Glob;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::models::{ContentType, ExamType};
use crate::year::YearPattern;

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "./study-index.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub subjects: SubjectsConfig,
    #[serde(default)]
    pub manifest: ManifestConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default)]
    pub follow_symlinks: bool,
    #[serde(default)]
    pub pyq: CategoryConfig,
    #[serde(default)]
    pub notes: CategoryConfig,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            follow_symlinks: false,
            pyq: CategoryConfig::default(),
            notes: CategoryConfig::default(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("public")
}

/// Per-category overrides. Unset fields fall back to the category defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CategoryConfig {
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub include_globs: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
}

impl ContentConfig {
    fn category(&self, content_type: ContentType) -> &CategoryConfig {
        match content_type {
            ContentType::Pyq => &self.pyq,
            ContentType::Notes => &self.notes,
        }
    }

    /// Name of the top-level folder holding this category.
    pub fn folder(&self, content_type: ContentType) -> &str {
        self.category(content_type)
            .folder
            .as_deref()
            .unwrap_or(content_type.as_str())
    }

    pub fn include_globs(&self, content_type: ContentType) -> Vec<String> {
        if let Some(globs) = &self.category(content_type).include_globs {
            return globs.clone();
        }
        match content_type {
            ContentType::Pyq => vec!["**/*.pdf".to_string()],
            ContentType::Notes => vec!["**/*.pdf".to_string(), "**/*.zip".to_string()],
        }
    }

    pub fn exclude_globs(&self, content_type: ContentType) -> Vec<String> {
        let mut globs = vec!["**/.*".to_string(), "**/.*/**".to_string()];
        globs.extend(self.category(content_type).exclude_globs.iter().cloned());
        globs
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://kvstudy.netlify.app".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifyConfig {
    #[serde(default = "default_exam_types")]
    pub exam_types: Vec<String>,
    #[serde(default)]
    pub year_pattern: YearPattern,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            exam_types: default_exam_types(),
            year_pattern: YearPattern::default(),
        }
    }
}

fn default_exam_types() -> Vec<String> {
    vec!["mid".to_string(), "end".to_string(), "suppl".to_string()]
}

impl ClassifyConfig {
    /// Recognized exam types; unknown tokens are dropped (rejected by validation).
    pub fn recognized_exam_types(&self) -> Vec<ExamType> {
        self.exam_types
            .iter()
            .filter_map(|t| ExamType::from_token(&t.to_lowercase()))
            .collect()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SubjectsConfig {
    /// Extra or overriding abbreviation expansions, e.g. `EVS = "ENVIRONMENTAL SCIENCE"`.
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ManifestConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Defaults to `<content root>/drive-notes.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Defaults to the content root.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_pyq_file")]
    pub pyq_file: String,
    #[serde(default = "default_notes_file")]
    pub notes_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            pyq_file: default_pyq_file(),
            notes_file: default_notes_file(),
        }
    }
}

fn default_pyq_file() -> String {
    "pyq-index.json".to_string()
}
fn default_notes_file() -> String {
    "notes-index.json".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Same defaults, rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.content.root = root.into();
        config
    }

    pub fn manifest_path(&self) -> Option<PathBuf> {
        if !self.manifest.enabled {
            return None;
        }
        Some(
            self.manifest
                .path
                .clone()
                .unwrap_or_else(|| self.content.root.join("drive-notes.json")),
        )
    }

    pub fn output_dir(&self) -> &Path {
        self.output.dir.as_deref().unwrap_or(&self.content.root)
    }

    pub fn output_path(&self, content_type: ContentType) -> PathBuf {
        let file = match content_type {
            ContentType::Pyq => &self.output.pyq_file,
            ContentType::Notes => &self.output.notes_file,
        };
        self.output_dir().join(file)
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.site.base_url.trim();
        if base.is_empty() {
            bail!("site.base_url must not be empty");
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            bail!("site.base_url must start with http:// or https://, got '{}'", base);
        }

        if self.classify.exam_types.is_empty() {
            bail!("classify.exam_types must list at least one exam type");
        }
        for token in &self.classify.exam_types {
            if ExamType::from_token(&token.to_lowercase()).is_none() {
                bail!(
                    "Unknown exam type: '{}'. Must be mid, end, or suppl.",
                    token
                );
            }
        }

        for content_type in ContentType::ALL {
            let folder = self.content.folder(content_type);
            if folder.is_empty() || folder.contains('/') || folder.contains('\\') {
                bail!(
                    "content.{}.folder must be a single path segment, got '{}'",
                    content_type,
                    folder
                );
            }
            for pattern in self
                .content
                .include_globs(content_type)
                .iter()
                .chain(self.content.exclude_globs(content_type).iter())
            {
                Glob::new(pattern).with_context(|| {
                    format!("Invalid glob in content.{}: {}", content_type, pattern)
                })?;
            }
        }
        if self.content.folder(ContentType::Pyq) == self.content.folder(ContentType::Notes) {
            bail!("content.pyq.folder and content.notes.folder must differ");
        }

        if self.output.pyq_file.is_empty() || self.output.notes_file.is_empty() {
            bail!("output.pyq_file and output.notes_file must not be empty");
        }
        if self.output.pyq_file == self.output.notes_file {
            bail!("output.pyq_file and output.notes_file must differ");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

/// Load `path` if given; otherwise the default location if it exists,
/// falling back to built-in defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                load_config(default)
            } else {
                tracing::debug!("no config file at {}, using defaults", default.display());
                Ok(Config::minimal())
            }
        }
    }
}

/// Written by `study-index init`.
pub const EXAMPLE_CONFIG: &str = r#"# study-index configuration

[content]
root = "public"
follow_symlinks = false

[content.pyq]
folder = "pyq"
include_globs = ["**/*.pdf"]
exclude_globs = []

[content.notes]
folder = "notes"
include_globs = ["**/*.pdf", "**/*.zip"]
exclude_globs = []

[site]
base_url = "https://kvstudy.netlify.app"

[classify]
exam_types = ["mid", "end", "suppl"]
# "century" accepts 19xx/20xx only; "any" accepts any isolated 4-digit run
year_pattern = "century"

[subjects.abbreviations]
# EVS = "ENVIRONMENTAL SCIENCE"

[manifest]
enabled = true
# Defaults to <content.root>/drive-notes.json
# path = "public/drive-notes.json"

[output]
# Defaults to <content.root>
# dir = "public"
pyq_file = "pyq-index.json"
notes_file = "notes-index.json"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(EXAMPLE_CONFIG).unwrap();
        config.validate().unwrap();
        assert_eq!(config.content.root, PathBuf::from("public"));
        assert_eq!(config.classify.year_pattern, YearPattern::Century);
        assert_eq!(
            config.manifest_path(),
            Some(PathBuf::from("public/drive-notes.json"))
        );
    }

    #[test]
    fn test_example_config_follows_root_override() {
        let mut config: Config = toml::from_str(EXAMPLE_CONFIG).unwrap();
        config.content.root = PathBuf::from("/srv/site");
        assert_eq!(
            config.output_path(ContentType::Pyq),
            PathBuf::from("/srv/site/pyq-index.json")
        );
        assert_eq!(
            config.manifest_path(),
            Some(PathBuf::from("/srv/site/drive-notes.json"))
        );
    }

    #[test]
    fn test_default_excludes_cover_hidden_folders() {
        let config = Config::minimal();
        let globs = config.content.exclude_globs(ContentType::Notes);
        assert!(globs.contains(&"**/.*".to_string()));
        assert!(globs.contains(&"**/.*/**".to_string()));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        config.validate().unwrap();
        assert_eq!(config.content.folder(ContentType::Pyq), "pyq");
        assert_eq!(config.content.include_globs(ContentType::Notes).len(), 2);
        assert_eq!(config.classify.recognized_exam_types().len(), 3);
        assert_eq!(
            config.output_path(ContentType::Notes),
            PathBuf::from("public/notes-index.json")
        );
        assert_eq!(
            config.manifest_path(),
            Some(PathBuf::from("public/drive-notes.json"))
        );
    }

    #[test]
    fn test_partial_category_override() {
        let config: Config = toml::from_str(
            r#"
            [content.pyq]
            folder = "papers"
            "#,
        )
        .unwrap();
        assert_eq!(config.content.folder(ContentType::Pyq), "papers");
        assert_eq!(
            config.content.include_globs(ContentType::Pyq),
            vec!["**/*.pdf".to_string()]
        );
    }

    #[test]
    fn test_rejects_unknown_exam_type() {
        let config: Config = toml::from_str(
            r#"
            [classify]
            exam_types = ["mid", "quiz"]
            "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quiz"));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config: Config = toml::from_str(
            r#"
            [site]
            base_url = "ftp://files.example"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_year_pattern() {
        let parsed: std::result::Result<Config, _> = toml::from_str(
            r#"
            [classify]
            year_pattern = "latest"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_disabled_manifest() {
        let config: Config = toml::from_str(
            r#"
            [manifest]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.manifest_path(), None);
    }
}
