//! Endpoint validity policy.
//!
//! The unit of count is the functional endpoint, not the URI: a mapping with
//! several aliases is one endpoint. Mappings on the same method are not
//! merged; each valid annotation yields its own `Endpoint`.

use std::fmt;
use std::path::Path;
use tracing::debug;

use super::types::{Endpoint, FileResult, RawArgument, RawMapping};

/// Why a mapping did not become an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// No URI argument, or one that could not be read statically.
    MissingUri,
    /// Every URI given is empty or blank.
    EmptyUri,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingUri => write!(f, "missing URI"),
            Rejection::EmptyUri => write!(f, "empty URI"),
        }
    }
}

/// Decide whether `mapping` declares an endpoint.
pub fn validate(mapping: &RawMapping) -> Result<Endpoint, Rejection> {
    let uri = match &mapping.argument {
        RawArgument::Absent => return Err(Rejection::MissingUri),
        RawArgument::Single(uri) => Some(uri.as_str()),
        RawArgument::List(uris) => uris.iter().map(String::as_str).find(|u| !u.trim().is_empty()),
    };

    match uri {
        Some(uri) if !uri.trim().is_empty() => Ok(Endpoint {
            method: mapping.method_name.clone(),
            annotation: mapping.annotation.clone(),
            file: mapping.location.file.clone(),
            uri: uri.to_string(),
            line: mapping.location.line,
        }),
        _ => Err(Rejection::EmptyUri),
    }
}

/// Validate every mapping of one file, keeping the valid ones in order.
pub fn scan_file(file: &Path, mappings: &[RawMapping]) -> FileResult {
    let endpoints = mappings
        .iter()
        .filter_map(|mapping| match validate(mapping) {
            Ok(endpoint) => Some(endpoint),
            Err(reason) => {
                debug!(
                    location = %mapping.location,
                    annotation = %mapping.annotation,
                    method = %mapping.method_name,
                    %reason,
                    "mapping rejected"
                );
                None
            }
        })
        .collect();

    FileResult {
        file: file.to_path_buf(),
        endpoints,
    }
}
