//! Heuristic mapping extraction for any JVM language.
//!
//! Used for Kotlin, Groovy and Scala, and as the fallback for Java files the
//! grammar cannot parse. There is no syntax tree here: annotations are found
//! by pattern in the source with its comments blanked out, their argument
//! text is cut out by balanced parentheses, and the method name is the first
//! call-like signature that follows, once other annotations are masked. Every
//! ambiguity degrades to `RawArgument::Absent` or an unknown method name;
//! nothing in this module returns an error.

use regex::Regex;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use crate::census::types::{RawArgument, RawMapping, SourceLocation, UNKNOWN_METHOD};
use crate::parser::catalog::{self, AnnotationSpec, MAPPING_ANNOTATIONS};
use crate::parser::literal::{
    blank_spans, matching_paren, split_top_level, strip_comments, unquote,
};

/// Default bytes searched after an annotation for the method signature.
pub const DEFAULT_LOOKAHEAD: usize = 500;

/// `@GetMapping`, `@org.springframework.web.bind.annotation.GetMapping`, …
static MAPPING_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let names: Vec<&str> = MAPPING_ANNOTATIONS.iter().map(|a| a.name).collect();
    Regex::new(&format!(
        r"@(?:[A-Za-z_$][\w$]*\.)*({})\b",
        names.join("|")
    ))
    .ok()
});

/// Any annotation name: `@Override`, `@field:JsonProperty`, `@a.b.C`.
static ANNOTATION_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z_$][\w$.:]*").ok());

/// Call-like signature: `name(` or `name<T>(`.
static SIGNATURE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_$][\w$]*)\s*(?:<[^<>()]*>\s*)?\(").ok());

/// Keywords that open a type declaration rather than a method.
static TYPE_DECL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(?:class|interface|enum|object|trait|record)\b").ok());

static NAMED_CLAUSE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*([A-Za-z_][\w]*)\s*=([^=].*)$").ok());

static BLANK_LINE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").ok());

const KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "new", "synchronized", "super", "this",
    "throw", "when", "match", "try",
];

/// Heuristic extractor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternOptions {
    /// Bytes after the annotation searched for a method signature.
    pub lookahead: usize,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

/// What the text after an annotation declares.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Method(Option<String>),
    /// A class/interface/object: the annotation is a base path, not an endpoint.
    Type,
}

/// Extract mapping annotations from source text of any supported language.
pub fn extract_pattern_mappings(file: &Path, source: &str, options: &PatternOptions) -> Vec<RawMapping> {
    let Some(mapping_re) = MAPPING_RE.as_ref() else {
        return Vec::new();
    };

    // Same length and line breaks as `source`, so offsets carry over.
    let code = strip_comments(source);

    let mut mappings = Vec::new();
    for caps in mapping_re.captures_iter(&code) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(spec) = catalog::lookup(name.as_str()) else {
            continue;
        };

        let (args, after) = annotation_arguments(&code, whole.end());
        let method_name = match declared_target(source, &code, after, options.lookahead) {
            Target::Type => continue,
            Target::Method(name) => name.unwrap_or_else(|| UNKNOWN_METHOD.to_string()),
        };

        mappings.push(RawMapping {
            annotation: spec.name.to_string(),
            method_name,
            argument: args.map(|a| classify_arguments(a, spec)).unwrap_or(RawArgument::Absent),
            location: SourceLocation {
                file: file.to_path_buf(),
                line: Some(line_of(source, whole.start())),
            },
        });
    }
    mappings
}

/// Parenthesized argument text following an annotation name, and the offset
/// just past it. `None` when there are no parentheses or they never close.
fn annotation_arguments(source: &str, name_end: usize) -> (Option<&str>, usize) {
    let rest = &source[name_end..];
    let open = name_end + (rest.len() - rest.trim_start().len());
    match matching_paren(source, open) {
        Some(close) => (Some(&source[open + 1..close - 1]), close),
        None => (None, name_end),
    }
}

/// Classify the text between an annotation's parentheses.
fn classify_arguments(args: &str, spec: &AnnotationSpec) -> RawArgument {
    let clauses = split_top_level(args, ',');
    let Some(named_re) = NAMED_CLAUSE_RE.as_ref() else {
        return RawArgument::Absent;
    };

    let named: Vec<(&str, &str)> = clauses
        .iter()
        .filter_map(|clause| {
            let caps = named_re.captures(clause)?;
            Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
        })
        .collect();

    if named.is_empty() {
        return match clauses.as_slice() {
            [single] => classify_value(single),
            _ => RawArgument::Absent,
        };
    }
    if named.len() != clauses.len() {
        return RawArgument::Absent;
    }

    spec.uri_keys
        .iter()
        .find_map(|key| named.iter().find(|(k, _)| k == key))
        .map(|(_, value)| classify_value(value))
        .unwrap_or(RawArgument::Absent)
}

/// A single literal, a list literal of literals, or `Absent`.
fn classify_value(value: &str) -> RawArgument {
    let value = value.trim();
    if let Some(s) = unquote(value) {
        return RawArgument::Single(s.to_string());
    }
    match list_body(value) {
        Some(body) => RawArgument::List(
            split_top_level(body, ',')
                .into_iter()
                .filter_map(unquote)
                .map(str::to_string)
                .collect(),
        ),
        None => RawArgument::Absent,
    }
}

/// Inner text of `[…]`, `{…}`, `arrayOf(…)`, `listOf(…)` or `Array(…)`.
fn list_body(value: &str) -> Option<&str> {
    for (open, close) in [("[", "]"), ("{", "}")] {
        if let Some(inner) = value.strip_prefix(open).and_then(|v| v.strip_suffix(close)) {
            return Some(inner);
        }
    }
    for ctor in ["arrayOf", "listOf", "Array", "List"] {
        if let Some(rest) = value.strip_prefix(ctor) {
            let open = value.len() - rest.len() + (rest.len() - rest.trim_start().len());
            if matching_paren(value, open) == Some(value.len()) {
                return Some(&value[open + 1..value.len() - 1]);
            }
        }
    }
    None
}

/// Find what the annotation at `from` is attached to. `code` is `source`
/// with comments blanked; blank lines are judged on `source`.
fn declared_target(source: &str, code: &str, from: usize, lookahead: usize) -> Target {
    let mut end = source.len().min(from.saturating_add(lookahead));
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let text = &code[from..end];
    let window = blank_spans(text, &annotation_spans(text));
    let start = window.len() - window.trim_start().len();

    let mut cut = window.len();
    if let Some(m) = BLANK_LINE_RE
        .as_ref()
        .and_then(|re| re.find(&source[from + start..end]))
    {
        cut = cut.min(start + m.start());
    }
    if let Some(pos) = window[start..].find(['{', '}', ';']) {
        cut = cut.min(start + pos);
    }
    let segment = &window[start..cut];

    let signature = SIGNATURE_RE.as_ref().and_then(|re| {
        re.captures_iter(segment).find_map(|caps| {
            let name = caps.get(1)?;
            let before = segment[..name.start()].chars().next_back();
            let qualified = matches!(before, Some('.') | Some(':'));
            (!qualified && !KEYWORDS.contains(&name.as_str())).then_some(name)
        })
    });

    let decl_end = signature.map(|m| m.start()).unwrap_or(segment.len());
    if TYPE_DECL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(&segment[..decl_end]))
    {
        return Target::Type;
    }
    Target::Method(signature.map(|m| m.as_str().to_string()))
}

/// Spans of every annotation in `text`, each with its parenthesized
/// arguments, so stacked or inline annotations never read as the signature.
fn annotation_spans(text: &str) -> Vec<Range<usize>> {
    let Some(re) = ANNOTATION_RE.as_ref() else {
        return Vec::new();
    };
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(m) = re.find_at(text, pos) {
        let rest = &text[m.end()..];
        let open = m.end() + (rest.len() - rest.trim_start().len());
        let end = matching_paren(text, open).unwrap_or(m.end());
        spans.push(m.start()..end);
        pos = end;
    }
    spans
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}
