//! Census builder — runs extraction and validation over microservices.
//!
//! Each controller file is read, dispatched to an extractor, validated and
//! folded into its microservice result. Files are independent, so they can
//! be fanned out on rayon; the indexed collect keeps results in the sorted
//! input order regardless of completion order.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::aggregate::aggregate;
use super::scanner::{discover_microservices, find_controller_files};
use super::types::{FileResult, Microservice, MicroserviceResult};
use super::validator::scan_file;
use crate::config::CensusConfig;
use crate::parser::{extract_source, read_source, PatternOptions};

/// Extract and validate one controller file.
///
/// `file` is relative to `repo_root` and is what every endpoint records.
/// An unreadable file yields an empty result.
pub fn scan_controller(repo_root: &Path, file: &Path, options: &PatternOptions) -> FileResult {
    let source = match read_source(&repo_root.join(file)) {
        Ok(source) => source,
        Err(e) => {
            warn!(error = %e, "skipping unreadable controller file");
            return FileResult::empty(file);
        }
    };

    let extraction = extract_source(file, &source, options);
    let result = scan_file(file, &extraction.mappings);
    debug!(
        file = %file.display(),
        strategy = %extraction.strategy,
        mappings = extraction.mappings.len(),
        endpoints = result.endpoints.len(),
        "controller scanned"
    );
    result
}

/// Census of an explicit list of controller files.
pub fn analyze_files(
    microservice: &str,
    repo_root: &Path,
    files: &[PathBuf],
    config: &CensusConfig,
) -> MicroserviceResult {
    let options = PatternOptions {
        lookahead: config.lookahead,
    };

    let results: Vec<FileResult> = if config.parallel {
        files
            .par_iter()
            .map(|file| scan_controller(repo_root, file, &options))
            .collect()
    } else {
        files
            .iter()
            .map(|file| scan_controller(repo_root, file, &options))
            .collect()
    };

    for result in results.iter().filter(|r| !r.endpoints.is_empty()) {
        info!(
            file = %result.file.display(),
            endpoints = result.endpoints.len(),
            "endpoints found"
        );
    }

    aggregate(microservice, results)
}

/// Discover the controller files of `service` and take its census.
pub fn analyze_microservice(
    repo_root: &Path,
    service: &Microservice,
    config: &CensusConfig,
) -> MicroserviceResult {
    info!(microservice = %service.id, path = %service.path.display(), "crawling microservice");
    let files = find_controller_files(repo_root, service, config);
    info!(microservice = %service.id, controllers = files.len(), "controller files found");
    analyze_files(&service.id, repo_root, &files, config)
}

/// Census of every microservice under `root`, in discovery order.
pub fn analyze_repository(root: &Path, config: &CensusConfig) -> Vec<MicroserviceResult> {
    let services = discover_microservices(root, config);
    info!(root = %root.display(), microservices = services.len(), "analyzing microservices");

    services
        .iter()
        .map(|service| analyze_microservice(root, service, config))
        .collect()
}
