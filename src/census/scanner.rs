//! Source tree discovery — microservices and their controller files.
//!
//! A microservice is a directory near the repository root that carries a
//! build descriptor (`pom.xml`, `build.gradle`, …). A controller file is a
//! source file under it, outside build/test directories, whose head contains
//! a controller marker such as `@RestController`.

use ignore::WalkBuilder;
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

use super::types::Microservice;
use crate::config::CensusConfig;

/// Find microservice directories below `root`, sorted by id.
///
/// Only directories up to `microservice_depth` levels deep are probed; the
/// root itself never counts.
pub fn discover_microservices(root: &Path, config: &CensusConfig) -> Vec<Microservice> {
    let mut services: Vec<Microservice> = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .max_depth(Some(config.microservice_depth))
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.depth() > 0)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_dir()))
        .filter(|entry| {
            config
                .build_descriptors
                .iter()
                .any(|descriptor| entry.path().join(descriptor).is_file())
        })
        .map(|entry| Microservice {
            id: relative_id(root, entry.path()),
            path: entry.into_path(),
        })
        .collect();

    services.sort_by(|a, b| a.id.cmp(&b.id));
    services
}

/// Controller files of one microservice, relative to `repo_root`, sorted.
pub fn find_controller_files(
    repo_root: &Path,
    service: &Microservice,
    config: &CensusConfig,
) -> Vec<PathBuf> {
    let walk_config = config.clone();

    let mut files: Vec<PathBuf> = WalkBuilder::new(&service.path)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir
                && entry.depth() > 0
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| walk_config.is_skipped_dir(name)))
        })
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| config.is_source_file(entry.path()))
        .filter(|entry| is_controller(entry.path(), config))
        .map(|entry| {
            let path = entry.into_path();
            path.strip_prefix(repo_root)
                .map(Path::to_path_buf)
                .unwrap_or(path)
        })
        .collect();

    files.sort();
    files
}

/// Whether the head of `path` contains a controller marker. Unreadable files
/// are reported and treated as non-controllers.
pub fn is_controller(path: &Path, config: &CensusConfig) -> bool {
    match read_head(path, config.controller_probe_bytes) {
        Ok(head) => config
            .controller_annotations
            .iter()
            .any(|marker| head.contains(marker.as_str())),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "failed to probe file, skipping");
            false
        }
    }
}

fn read_head(path: &Path, limit: usize) -> std::io::Result<String> {
    let mut buf = Vec::with_capacity(limit.min(64 * 1024));
    File::open(path)?.take(limit as u64).read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// `root`-relative id with `/` separators (`services/orders`).
fn relative_id(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
