//! Recognized endpoint-declaring annotations.

/// A mapping annotation and the argument keys that carry its URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationSpec {
    pub name: &'static str,
    /// URI-carrying keys in preference order. A lone positional argument
    /// binds to the first one (`value`).
    pub uri_keys: &'static [&'static str],
}

const URI_KEYS: &[&str] = &["value", "path"];

/// Every annotation the census counts. `RequestMapping` also accepts a
/// `method` key, which is metadata and never a URI.
pub const MAPPING_ANNOTATIONS: &[AnnotationSpec] = &[
    AnnotationSpec { name: "GetMapping", uri_keys: URI_KEYS },
    AnnotationSpec { name: "PostMapping", uri_keys: URI_KEYS },
    AnnotationSpec { name: "PutMapping", uri_keys: URI_KEYS },
    AnnotationSpec { name: "DeleteMapping", uri_keys: URI_KEYS },
    AnnotationSpec { name: "PatchMapping", uri_keys: URI_KEYS },
    AnnotationSpec { name: "RequestMapping", uri_keys: URI_KEYS },
];

/// Look up an annotation by name. Qualified names
/// (`org.springframework.web.bind.annotation.GetMapping`) resolve by their
/// last segment.
pub fn lookup(name: &str) -> Option<&'static AnnotationSpec> {
    let simple = simple_name(name);
    MAPPING_ANNOTATIONS.iter().find(|spec| spec.name == simple)
}

pub fn is_mapping_annotation(name: &str) -> bool {
    lookup(name).is_some()
}

/// URI keys for `name`; empty for annotations outside the catalog.
pub fn uri_argument_keys(name: &str) -> &'static [&'static str] {
    lookup(name).map(|spec| spec.uri_keys).unwrap_or(&[])
}

fn simple_name(name: &str) -> &str {
    let name = name.trim().trim_start_matches('@');
    name.rsplit('.').next().unwrap_or(name)
}
