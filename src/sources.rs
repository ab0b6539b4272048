use anyhow::Result;

use crate::config::Config;
use crate::manifest;
use crate::models::ContentType;

/// Status of one configured input, as shown by `study-index sources`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    pub name: String,
    pub location: String,
    pub status: &'static str,
    pub healthy: bool,
}

pub fn get_sources(config: &Config) -> Vec<SourceStatus> {
    let root = &config.content.root;
    let root_ok = root.is_dir();
    let mut sources = vec![SourceStatus {
        name: "content root".to_string(),
        location: root.display().to_string(),
        status: if root_ok { "OK" } else { "MISSING" },
        healthy: root_ok,
    }];

    for content_type in ContentType::ALL {
        let dir = root.join(config.content.folder(content_type));
        let present = dir.is_dir();
        sources.push(SourceStatus {
            name: content_type.to_string(),
            location: dir.display().to_string(),
            status: if present { "OK" } else { "EMPTY (no folder)" },
            // An absent category folder only means an empty index.
            healthy: root_ok,
        });
    }

    let (location, status, healthy) = match config.manifest_path() {
        None => ("-".to_string(), "DISABLED", true),
        Some(path) => {
            let status = if !path.exists() {
                ("NOT PRESENT", true)
            } else {
                match manifest::load_manifest(Some(&path)) {
                    Ok(Some(value)) if value.is_array() => ("OK", true),
                    Ok(_) => ("INVALID (not a list)", false),
                    Err(_) => ("INVALID (unreadable)", false),
                }
            };
            (path.display().to_string(), status.0, status.1)
        }
    };
    sources.push(SourceStatus {
        name: "manifest".to_string(),
        location,
        status,
        healthy,
    });

    sources
}

pub fn list_sources(config: &Config) -> Result<()> {
    println!("{:<14} {:<22} {:<8} LOCATION", "SOURCE", "STATUS", "HEALTHY");
    for s in get_sources(config) {
        println!(
            "{:<14} {:<22} {:<8} {}",
            s.name, s.status, s.healthy, s.location
        );
    }
    Ok(())
}
