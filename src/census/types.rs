//! Core types for the endpoint census.
//!
//! `RawMapping` is the single intermediate representation both extractors
//! emit; everything downstream of the dispatcher only ever sees it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Method name recorded when extraction cannot determine one.
pub const UNKNOWN_METHOD: &str = "unknown";

/// The URI argument of a mapping annotation, as far as it could be read statically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawArgument {
    /// No URI argument, or one that cannot be resolved without evaluation
    /// (constant references, concatenations).
    Absent,
    /// A single string literal.
    Single(String),
    /// A list of string literals (URI aliases).
    List(Vec<String>),
}

/// Where a mapping annotation was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// 1-indexed line of the annotation.
    pub line: Option<usize>,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file.display(), line),
            None => write!(f, "{}", self.file.display()),
        }
    }
}

/// One mapping annotation occurrence, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawMapping {
    /// Simple annotation name, e.g. `GetMapping`.
    pub annotation: String,
    /// Name of the annotated method, or [`UNKNOWN_METHOD`].
    pub method_name: String,
    pub argument: RawArgument,
    pub location: SourceLocation,
}

/// A validated endpoint.
///
/// Only `method`, `annotation` and `file` are part of the persisted report
/// shape; `uri` and `line` are kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub method: String,
    pub annotation: String,
    pub file: PathBuf,
    /// First non-empty URI the mapping declared.
    #[serde(skip)]
    pub uri: String,
    #[serde(skip)]
    pub line: Option<usize>,
}

/// All endpoints found in one controller file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    pub file: PathBuf,
    pub endpoints: Vec<Endpoint>,
}

impl FileResult {
    /// A file that contributed nothing (unreadable, or no valid mappings).
    pub fn empty(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            endpoints: Vec::new(),
        }
    }
}

/// Census of one microservice. Built by the aggregator and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MicroserviceResult {
    pub(crate) microservice: String,
    pub(crate) controller_files: Vec<PathBuf>,
    pub(crate) total_controllers: usize,
    pub(crate) total_endpoints: usize,
    pub(crate) endpoints: Vec<Endpoint>,
}

impl MicroserviceResult {
    pub fn microservice(&self) -> &str {
        &self.microservice
    }

    pub fn controller_files(&self) -> &[PathBuf] {
        &self.controller_files
    }

    pub fn total_controllers(&self) -> usize {
        self.total_controllers
    }

    pub fn total_endpoints(&self) -> usize {
        self.total_endpoints
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }
}

/// A directory identified as an independently buildable module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Microservice {
    /// Path relative to the repository root, e.g. `gate` or `services/orders`.
    pub id: String,
    /// Absolute (or root-joined) directory path.
    pub path: PathBuf,
}

// ─── Run Summary ──────────────────────────────────────────────────────────────

/// Totals for a whole run, derived from the microservice results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total_microservices: usize,
    pub total_controllers: usize,
    pub total_endpoints: usize,
    pub breakdown: Vec<ServiceBreakdown>,
}

/// One line of the per-microservice breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBreakdown {
    pub microservice: String,
    pub total_controllers: usize,
    pub total_endpoints: usize,
}

impl RunSummary {
    pub fn from_results(results: &[MicroserviceResult]) -> Self {
        let breakdown: Vec<ServiceBreakdown> = results
            .iter()
            .map(|r| ServiceBreakdown {
                microservice: r.microservice.clone(),
                total_controllers: r.total_controllers,
                total_endpoints: r.total_endpoints,
            })
            .collect();

        Self {
            total_microservices: results.len(),
            total_controllers: breakdown.iter().map(|b| b.total_controllers).sum(),
            total_endpoints: breakdown.iter().map(|b| b.total_endpoints).sum(),
            breakdown,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} microservices, {} controllers, {} endpoints",
            self.total_microservices, self.total_controllers, self.total_endpoints
        )
    }
}
