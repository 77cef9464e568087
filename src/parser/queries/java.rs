//! Java mapping extraction via AST traversal.
//!
//! Reads Spring mapping annotations from the modifiers of every method
//! declaration:
//!   @GetMapping("/users")
//!   @PostMapping(value = {"/users", "/all-users"})
//!   @RequestMapping(path = "/orders", method = RequestMethod.GET)

use std::path::Path;
use tree_sitter::{Node, Parser};

use crate::census::types::{RawArgument, RawMapping, SourceLocation, UNKNOWN_METHOD};
use crate::error::{CensusError, Result};
use crate::parser::catalog::{self, AnnotationSpec};
use crate::parser::language::SourceLanguage;
use crate::parser::literal::unquote;

/// Extract mapping annotations from Java source.
///
/// Fails with [`CensusError::GrammarParse`] when the tree contains any
/// ERROR or MISSING node; partial trees are never mined.
pub fn extract_java_mappings(file: &Path, source: &str) -> Result<Vec<RawMapping>> {
    let language = SourceLanguage::Java
        .tree_sitter_language()
        .ok_or_else(|| parse_error(file, "no Java grammar available"))?;

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| parse_error(file, &e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| parse_error(file, "parser produced no tree"))?;
    let root = tree.root_node();

    if root.has_error() {
        let reason = match first_error(root) {
            Some(node) => format!("syntax error at line {}", node.start_position().row + 1),
            None => "syntax error".to_string(),
        };
        return Err(parse_error(file, &reason));
    }

    let source = source.as_bytes();
    let mut mappings = Vec::new();

    // Pre-order walk with an explicit stack; long concatenation chains make
    // Java trees deep enough to matter.
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.kind() == "method_declaration" {
            extract_from_method(&node, source, file, &mut mappings);
        }
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }

    Ok(mappings)
}

fn parse_error(file: &Path, reason: &str) -> CensusError {
    CensusError::GrammarParse {
        file: file.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn first_error(root: Node) -> Option<Node> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
    None
}

/// One `RawMapping` per mapping annotation on the method.
fn extract_from_method(node: &Node, source: &[u8], file: &Path, out: &mut Vec<RawMapping>) {
    let method_name = node
        .child_by_field_name("name")
        .and_then(|n| n.utf8_text(source).ok())
        .unwrap_or(UNKNOWN_METHOD);

    let Some(modifiers) = child_of_kind(node, "modifiers") else {
        return;
    };

    for i in 0..modifiers.child_count() {
        let Some(annotation) = modifiers.child(i) else {
            continue;
        };
        if !matches!(annotation.kind(), "annotation" | "marker_annotation") {
            continue;
        }
        let Some(spec) = annotation
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
            .and_then(catalog::lookup)
        else {
            continue;
        };

        let argument = match annotation.child_by_field_name("arguments") {
            Some(args) => read_arguments(&args, source, spec),
            None => RawArgument::Absent,
        };

        out.push(RawMapping {
            annotation: spec.name.to_string(),
            method_name: method_name.to_string(),
            argument,
            location: SourceLocation {
                file: file.to_path_buf(),
                line: Some(annotation.start_position().row + 1),
            },
        });
    }
}

fn child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find(|child| child.kind() == kind)
}

/// Read the URI argument from an `annotation_argument_list`.
fn read_arguments(args: &Node, source: &[u8], spec: &AnnotationSpec) -> RawArgument {
    let values: Vec<Node> = (0..args.named_child_count())
        .filter_map(|i| args.named_child(i))
        .filter(|n| !n.is_extra())
        .collect();

    let pairs: Vec<&Node> = values
        .iter()
        .filter(|n| n.kind() == "element_value_pair")
        .collect();

    if pairs.is_empty() {
        return match values.as_slice() {
            [single] => read_value(single, source),
            _ => RawArgument::Absent,
        };
    }
    if pairs.len() != values.len() {
        return RawArgument::Absent;
    }

    for key in spec.uri_keys {
        let bound = pairs.iter().find(|pair| {
            pair.child_by_field_name("key")
                .and_then(|k| k.utf8_text(source).ok())
                .is_some_and(|k| k == *key)
        });
        if let Some(pair) = bound {
            return pair
                .child_by_field_name("value")
                .map(|v| read_value(&v, source))
                .unwrap_or(RawArgument::Absent);
        }
    }
    RawArgument::Absent
}

/// Classify one element value. Only literals are read; everything else
/// (constants, concatenations, method calls) is `Absent`.
fn read_value(node: &Node, source: &[u8]) -> RawArgument {
    match node.kind() {
        "string_literal" => literal_text(node, source)
            .map(|s| RawArgument::Single(s.to_string()))
            .unwrap_or(RawArgument::Absent),
        "element_value_array_initializer" => {
            let items = (0..node.named_child_count())
                .filter_map(|i| node.named_child(i))
                .filter(|n| n.kind() == "string_literal")
                .filter_map(|n| literal_text(&n, source).map(str::to_string))
                .collect();
            RawArgument::List(items)
        }
        _ => RawArgument::Absent,
    }
}

fn literal_text<'s>(node: &Node, source: &'s [u8]) -> Option<&'s str> {
    unquote(node.utf8_text(source).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> Vec<RawMapping> {
        extract_java_mappings(Path::new("UserController.java"), source).unwrap()
    }

    #[test]
    fn test_argument_shapes() {
        let source = r#"
package com.example.users;

import org.springframework.web.bind.annotation.*;

@RestController
@RequestMapping("/api")
public class UserController {

    @GetMapping("/users")
    public List<User> list() { return service.all(); }

    @GetMapping()
    public String blank() { return ""; }

    @PostMapping(value = "")
    public void emptyValue() {}

    @RequestMapping(path = "/orders", method = RequestMethod.GET)
    public String orders() { return "orders"; }

    @GetMapping({"/users", "/all-users"})
    public List<User> aliases() { return service.all(); }

    @PutMapping(path = {"/a", ""})
    public void named() {}

    @DeleteMapping(USERS_PATH)
    public void constant() {}

    @PatchMapping
    public void marker() {}
}
"#;
        let mappings = extract(source);
        let shapes: Vec<(&str, &str, &RawArgument)> = mappings
            .iter()
            .map(|m| (m.annotation.as_str(), m.method_name.as_str(), &m.argument))
            .collect();

        assert_eq!(
            shapes,
            vec![
                ("GetMapping", "list", &RawArgument::Single("/users".into())),
                ("GetMapping", "blank", &RawArgument::Absent),
                ("PostMapping", "emptyValue", &RawArgument::Single("".into())),
                ("RequestMapping", "orders", &RawArgument::Single("/orders".into())),
                (
                    "GetMapping",
                    "aliases",
                    &RawArgument::List(vec!["/users".into(), "/all-users".into()])
                ),
                (
                    "PutMapping",
                    "named",
                    &RawArgument::List(vec!["/a".into(), "".into()])
                ),
                ("DeleteMapping", "constant", &RawArgument::Absent),
                ("PatchMapping", "marker", &RawArgument::Absent),
            ]
        );
    }

    #[test]
    fn test_class_level_mapping_is_not_a_method() {
        let source = r#"
@RestController
@RequestMapping("/api/v1")
public class Empty {
    private final Service service;
}
"#;
        assert!(extract(source).is_empty());
    }

    #[test]
    fn test_catalog_key_order_wins() {
        let source = r#"
public class C {
    @RequestMapping(method = RequestMethod.POST, path = "/second", value = "/first")
    public void both() {}
}
"#;
        let mappings = extract(source);
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].argument, RawArgument::Single("/first".into()));
    }

    #[test]
    fn test_stacked_annotations_and_lines() {
        let source = r#"public class C {
    @GetMapping("/a")
    @PostMapping("/a")
    @ResponseBody
    public String a() { return "a"; }
}
"#;
        let mappings = extract(source);
        assert_eq!(mappings.len(), 2);
        assert!(mappings.iter().all(|m| m.method_name == "a"));
        assert_eq!(mappings[0].location.line, Some(2));
        assert_eq!(mappings[1].location.line, Some(3));
    }

    #[test]
    fn test_qualified_annotation_and_interface() {
        let source = r#"
public interface Api {
    @org.springframework.web.bind.annotation.GetMapping("/health")
    String health();
}
"#;
        let mappings = extract(source);
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].annotation, "GetMapping");
        assert_eq!(mappings[0].method_name, "health");
    }

    #[test]
    fn test_concatenation_is_absent() {
        let source = r#"
public class C {
    @GetMapping(BASE + "/users")
    public void users() {}
}
"#;
        let mappings = extract(source);
        assert_eq!(mappings[0].argument, RawArgument::Absent);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let source = r#"
public class Broken {
    @GetMapping("/a")
    public String a() { return "a"; }
    )))
"#;
        let result = extract_java_mappings(Path::new("Broken.java"), source);
        assert!(matches!(result, Err(CensusError::GrammarParse { .. })));
    }

    #[test]
    fn test_no_annotations() {
        let source = "public class Plain { public int size() { return 0; } }";
        assert!(extract(source).is_empty());
    }
}
