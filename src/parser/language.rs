//! Language detection and tree-sitter grammar loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tree_sitter::Language;

/// JVM languages that declare Spring controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceLanguage {
    Java,
    Kotlin,
    Groovy,
    Scala,
}

impl SourceLanguage {
    /// Detect language from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "java" => Some(SourceLanguage::Java),
            "kt" | "kts" => Some(SourceLanguage::Kotlin),
            "groovy" | "gvy" => Some(SourceLanguage::Groovy),
            "scala" | "sc" => Some(SourceLanguage::Scala),
            _ => None,
        }
    }

    /// The tree-sitter grammar for this language, if one is bundled.
    ///
    /// Only Java has one; `tree-sitter-kotlin` pins an older tree-sitter and
    /// the other languages are covered by pattern extraction.
    pub fn tree_sitter_language(&self) -> Option<Language> {
        match self {
            SourceLanguage::Java => Some(tree_sitter_java::LANGUAGE.into()),
            SourceLanguage::Kotlin | SourceLanguage::Groovy | SourceLanguage::Scala => None,
        }
    }

    /// Get the display name.
    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::Java => "Java",
            SourceLanguage::Kotlin => "Kotlin",
            SourceLanguage::Groovy => "Groovy",
            SourceLanguage::Scala => "Scala",
        }
    }
}
