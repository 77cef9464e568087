//! Mapping extraction.
//!
//! Two providers emit the same `RawMapping` representation:
//!
//! - **Grammar**: tree-sitter parse, Java only (`queries::java`).
//! - **Pattern**: regex heuristics, any language (`pattern`).
//!
//! [`extract_source`] is the only place that chooses between them. A Java
//! file the grammar cannot parse is re-read by the pattern provider; the
//! caller always gets mappings back, tagged with how they were produced.

pub mod catalog;
pub mod language;
pub mod literal;
pub mod pattern;
pub mod queries;

pub use catalog::{is_mapping_annotation, uri_argument_keys, AnnotationSpec, MAPPING_ANNOTATIONS};
pub use language::SourceLanguage;
pub use pattern::PatternOptions;

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::census::types::RawMapping;
use crate::error::{CensusError, Result};

/// Which provider produced an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Full-syntax parse succeeded.
    Grammar,
    /// Language has no grammar; heuristics only.
    Pattern,
    /// Grammar parse failed; heuristics re-read the same text.
    Fallback,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Grammar => write!(f, "grammar"),
            Strategy::Pattern => write!(f, "pattern"),
            Strategy::Fallback => write!(f, "fallback"),
        }
    }
}

/// Mappings found in one file and how they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub mappings: Vec<RawMapping>,
    pub strategy: Strategy,
}

/// Read `path` and extract its mappings.
pub fn extract(path: &Path, options: &PatternOptions) -> Result<Extraction> {
    let source = read_source(path)?;
    Ok(extract_source(path, &source, options))
}

/// Read a source file as text. Invalid UTF-8 is replaced rather than
/// rejected; annotations are ASCII.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| CensusError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Extract mappings from already-loaded source. `path` is used for language
/// detection and recorded in every `SourceLocation`.
pub fn extract_source(path: &Path, source: &str, options: &PatternOptions) -> Extraction {
    match SourceLanguage::from_path(path) {
        Some(SourceLanguage::Java) => match queries::java::extract_java_mappings(path, source) {
            Ok(mappings) => {
                debug!(file = %path.display(), count = mappings.len(), "grammar extraction");
                Extraction {
                    mappings,
                    strategy: Strategy::Grammar,
                }
            }
            Err(e) => {
                info!(file = %path.display(), error = %e, "falling back to pattern extraction");
                Extraction {
                    mappings: pattern::extract_pattern_mappings(path, source, options),
                    strategy: Strategy::Fallback,
                }
            }
        },
        _ => {
            let mappings = pattern::extract_pattern_mappings(path, source, options);
            debug!(file = %path.display(), count = mappings.len(), "pattern extraction");
            Extraction {
                mappings,
                strategy: Strategy::Pattern,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::types::RawArgument;
    use std::path::PathBuf;

    const BROKEN_JAVA: &str = r#"
@RestController
public class Broken {
    @GetMapping("/a")
    public String a() { return "a"; }

    @PostMapping(value = "/b")
    public String b() { return "b"; }
    )))
"#;

    #[test]
    fn test_java_uses_grammar() {
        let source = r#"
public class Ok {
    @GetMapping("/ok")
    public String ok() { return "ok"; }
}
"#;
        let extraction = extract_source(Path::new("Ok.java"), source, &PatternOptions::default());
        assert_eq!(extraction.strategy, Strategy::Grammar);
        assert_eq!(extraction.mappings.len(), 1);
    }

    #[test]
    fn test_broken_java_falls_back() {
        let extraction =
            extract_source(Path::new("Broken.java"), BROKEN_JAVA, &PatternOptions::default());
        assert_eq!(extraction.strategy, Strategy::Fallback);
        let names: Vec<&str> = extraction.mappings.iter().map(|m| m.method_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(extraction.mappings[1].argument, RawArgument::Single("/b".into()));
    }

    #[test]
    fn test_other_languages_use_patterns() {
        for file in ["Api.kt", "Api.groovy", "Api.scala", "Api.txt"] {
            let extraction = extract_source(
                Path::new(file),
                "@GetMapping(\"/x\")\nfun x() {}",
                &PatternOptions::default(),
            );
            assert_eq!(extraction.strategy, Strategy::Pattern, "{file}");
            assert_eq!(extraction.mappings.len(), 1, "{file}");
        }
    }

    #[test]
    fn test_paths_agree_on_shared_shapes() {
        let source = r#"
public class Same {
    @GetMapping("/users")
    public String users() { return ""; }

    @GetMapping({"/users", "/all-users"})
    public String aliases() { return ""; }

    @PostMapping(value = "")
    public String empty() { return ""; }

    @RequestMapping(path = "/api/orders", method = RequestMethod.GET)
    public String orders() { return ""; }

    @DeleteMapping(ORDERS)
    public String constant() { return ""; }

    @PatchMapping()
    public String none() { return ""; }
}
"#;
        let path = Path::new("Same.java");
        let grammar = queries::java::extract_java_mappings(path, source).unwrap();
        let heuristic = pattern::extract_pattern_mappings(path, source, &PatternOptions::default());
        assert_eq!(grammar, heuristic);
    }

    #[test]
    fn test_extract_unreadable_file() {
        let missing = PathBuf::from("/nonexistent/census/Missing.java");
        let result = extract(&missing, &PatternOptions::default());
        assert!(matches!(result, Err(CensusError::UnreadableFile { .. })));
    }

    #[test]
    fn test_extract_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Ping.kt");
        fs::write(&path, "@GetMapping(\"/ping\")\nfun ping() = \"pong\"\n").unwrap();

        let extraction = extract(&path, &PatternOptions::default()).unwrap();
        assert_eq!(extraction.strategy, Strategy::Pattern);
        assert_eq!(extraction.mappings[0].location.file, path);
        assert_eq!(extraction.mappings[0].method_name, "ping");
    }
}
