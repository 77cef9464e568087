//! Census configuration.
//!
//! Read from `.census/config.toml` under the repository root (or an explicit
//! path). Every field has a default, so a partial file only overrides what it
//! names and a missing file means "use defaults".

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{CensusError, Result};

/// Directory (under the repository root) holding census state.
pub const CONFIG_DIR: &str = ".census";
/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CensusConfig {
    /// File extensions (without dot) considered as controller candidates.
    pub source_extensions: Vec<String>,
    /// Directory names never descended into while looking for controllers.
    pub skipped_dirs: Vec<String>,
    /// Class-level markers that make a file a controller.
    pub controller_annotations: Vec<String>,
    /// How many leading bytes of a file are probed for a controller marker.
    pub controller_probe_bytes: usize,
    /// Files whose presence marks a directory as an independently buildable module.
    pub build_descriptors: Vec<String>,
    /// How many directory levels below the root are probed for microservices.
    pub microservice_depth: usize,
    /// Bytes after a mapping annotation searched for the method signature.
    pub lookahead: usize,
    /// Extract controller files on the rayon pool.
    pub parallel: bool,
    /// Where `scan` writes the JSON report, relative to the working directory.
    pub report_path: PathBuf,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            source_extensions: strings(&["java", "groovy", "kt", "scala"]),
            skipped_dirs: strings(&[
                "target",
                "build",
                "node_modules",
                ".idea",
                ".gradle",
                "test",
                "tests",
                "testing",
            ]),
            controller_annotations: strings(&["@RestController", "@Controller"]),
            controller_probe_bytes: 5000,
            build_descriptors: strings(&["pom.xml", "build.gradle", "build.gradle.kts"]),
            microservice_depth: 1,
            lookahead: 500,
            parallel: true,
            report_path: PathBuf::from("endpoint_analysis.json"),
        }
    }
}

impl CensusConfig {
    /// Load config from `path`, falling back to defaults when the file is
    /// missing or invalid. Invalid files are reported, not fatal.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(error = %e, "ignoring config, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from `path`. `Ok(None)` when the file does not exist.
    pub fn try_load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
            .map(Some)
            .map_err(|source| CensusError::Config {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Default config location for a repository root.
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Whether `path` carries one of the configured source extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.source_extensions.iter().any(|s| s == ext))
    }

    /// Whether a directory with this name is never descended into.
    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skipped_dirs.iter().any(|d| d == name)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
