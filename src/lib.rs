//! # Endpoint Census
//!
//! Static inventory of Spring-style REST endpoints across large,
//! multi-module JVM source trees. Nothing is compiled or executed.
//!
//! ## How it counts
//!
//! - **Discovery**: directories with a build descriptor are microservices;
//!   files with `@RestController`/`@Controller` are controllers.
//! - **Extraction**: Java is parsed with tree-sitter; Kotlin, Groovy, Scala
//!   (and Java the grammar rejects) go through pattern matching. Both emit
//!   the same `RawMapping`.
//! - **Validation**: a mapping with a non-empty literal URI is one endpoint,
//!   however many URI aliases it lists.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use census::{analyze_repository, report, CensusConfig};
//! use std::path::Path;
//!
//! let config = CensusConfig::default();
//! let results = analyze_repository(Path::new("."), &config);
//! report::write_console(&mut std::io::stdout(), &results).unwrap();
//! ```

pub mod census;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;

// Re-exports for convenience
pub use config::CensusConfig;
pub use error::{CensusError, Result};

pub use census::{
    aggregate, analyze_files, analyze_microservice, analyze_repository, discover_microservices,
    find_controller_files, scan_controller, scan_file, validate, Endpoint, FileResult,
    Microservice, MicroserviceAccumulator, MicroserviceResult, RawArgument, RawMapping, Rejection,
    RunSummary, SourceLocation,
};
pub use parser::{extract, extract_source, Extraction, PatternOptions, SourceLanguage, Strategy};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn count(file: &str, source: &str) -> usize {
        let path = Path::new(file);
        let extraction = extract_source(path, source, &PatternOptions::default());
        scan_file(path, &extraction.mappings).endpoints.len()
    }

    fn java_method(annotation: &str) -> String {
        format!(
            "public class C {{\n    {annotation}\n    public String handle() {{ return \"\"; }}\n}}\n"
        )
    }

    fn kotlin_method(annotation: &str) -> String {
        format!("class C {{\n    {annotation}\n    fun handle(): String = \"\"\n}}\n")
    }

    #[test]
    fn test_counting_rules_both_paths() {
        let cases = [
            ("@GetMapping(\"/users\")", 1),
            ("@GetMapping()", 0),
            ("@GetMapping(\"\")", 0),
            ("@PostMapping(value = \"\")", 0),
            ("@RequestMapping(path = \"/api/orders\")", 1),
            ("@GetMapping({\"/users\", \"/all-users\"})", 1),
            ("@GetMapping(UserPaths.ALL)", 0),
            ("@DeleteMapping", 0),
        ];
        for (annotation, expected) in cases {
            assert_eq!(
                count("C.java", &java_method(annotation)),
                expected,
                "java: {annotation}"
            );
            assert_eq!(
                count("C.kt", &kotlin_method(annotation)),
                expected,
                "kotlin: {annotation}"
            );
        }
    }

    #[test]
    fn test_kotlin_list_literal_counts_once() {
        assert_eq!(
            count("C.kt", &kotlin_method("@GetMapping([\"/users\", \"/all-users\"])")),
            1
        );
        assert_eq!(
            count("C.kt", &kotlin_method("@GetMapping(value = [\"\", \" \"])")),
            0
        );
    }

    #[test]
    fn test_no_annotations_no_mappings() {
        let source = "public class Plain {\n    public int size() { return 0; }\n}\n";
        let extraction = extract_source(Path::new("Plain.java"), source, &PatternOptions::default());
        assert!(extraction.mappings.is_empty());
        assert_eq!(count("Plain.groovy", source), 0);
    }

    #[test]
    fn test_stacked_annotations_count_per_annotation() {
        let source = java_method("@GetMapping(\"/a\")\n    @PostMapping(\"/a\")");
        assert_eq!(count("C.java", &source), 2);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let rel = Path::new("svc/C.java");
        fs::create_dir_all(dir.path().join("svc")).unwrap();
        fs::write(dir.path().join(rel), java_method("@GetMapping(\"/users\")")).unwrap();

        let first = scan_controller(dir.path(), rel, &PatternOptions::default());
        let second = scan_controller(dir.path(), rel, &PatternOptions::default());
        assert_eq!(first, second);
        assert_eq!(first.endpoints.len(), 1);
    }

    #[test]
    fn test_fallback_never_drops_to_empty() {
        let source = r#"
public class Broken {
    @GetMapping("/a")
    public String a() { return "a"; }
    <<< not java >>>
"#;
        let extraction = extract_source(Path::new("Broken.java"), source, &PatternOptions::default());
        assert_eq!(extraction.strategy, Strategy::Fallback);
        assert_eq!(extraction.mappings.len(), 1);
        assert_eq!(count("Broken.java", source), 1);
    }

    fn methods(file: &str, source: &str) -> (Strategy, Vec<String>) {
        let path = Path::new(file);
        let extraction = extract_source(path, source, &PatternOptions::default());
        let endpoints = scan_file(path, &extraction.mappings).endpoints;
        (
            extraction.strategy,
            endpoints.into_iter().map(|e| e.method).collect(),
        )
    }

    #[test]
    fn test_commented_mappings_agree_across_paths() {
        let body = r#"
    // @GetMapping("/old")
    @GetMapping("/new")
    public String handle() { return ""; }

    /** Example: @PostMapping("/legacy") */
    @PutMapping(value = "/put" /* alias */)
    public String put() { return ""; }
"#;
        let java = format!("public class C {{{body}}}\n");
        let broken = format!("public class C {{{body}    <<< not java >>>\n");
        let kotlin = format!("class C {{{body}}}\n");

        let expected = vec!["handle".to_string(), "put".to_string()];
        assert_eq!(methods("C.java", &java), (Strategy::Grammar, expected.clone()));
        assert_eq!(methods("C.java", &broken), (Strategy::Fallback, expected.clone()));
        assert_eq!(methods("C.kt", &kotlin), (Strategy::Pattern, expected));
    }

    #[test]
    fn test_end_to_end_microservice() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("orders/src")).unwrap();

        // 5 valid + 2 invalid mappings.
        fs::write(
            root.join("orders/src/OrderController.java"),
            r#"
@RestController
@RequestMapping("/api")
public class OrderController {
    @GetMapping("/orders")
    public List<Order> list() { return repo.all(); }

    @GetMapping({"/orders/{id}", "/order/{id}"})
    public Order get(@PathVariable long id) { return repo.get(id); }

    @PostMapping(value = "/orders")
    public Order create(@RequestBody Order o) { return repo.save(o); }

    @PutMapping(path = "/orders/{id}")
    public Order update(@PathVariable long id, @RequestBody Order o) { return repo.save(o); }

    @RequestMapping(path = "/orders/{id}", method = RequestMethod.DELETE)
    public void delete(@PathVariable long id) { repo.delete(id); }

    @PatchMapping("")
    public void blank() {}

    @GetMapping()
    public void none() {}
}
"#,
        )
        .unwrap();
        fs::write(
            root.join("orders/src/StatusController.kt"),
            "@RestController\nclass StatusController {\n    fun status() = \"ok\"\n}\n",
        )
        .unwrap();

        let files = vec![
            PathBuf::from("orders/src/OrderController.java"),
            PathBuf::from("orders/src/StatusController.kt"),
            PathBuf::from("orders/src/Missing.java"),
        ];
        let result = analyze_files("orders", root, &files, &CensusConfig::default());

        assert_eq!(result.total_controllers(), 3);
        assert_eq!(result.total_endpoints(), 5);
        assert_eq!(result.total_endpoints(), result.endpoints().len());
        assert_eq!(result.total_controllers(), result.controller_files().len());

        let methods: Vec<&str> = result.endpoints().iter().map(|e| e.method.as_str()).collect();
        assert_eq!(methods, vec!["list", "get", "create", "update", "delete"]);

        let summary = RunSummary::from_results(&[result]);
        assert_eq!(summary.total_microservices, 1);
        assert_eq!(summary.total_controllers, 3);
        assert_eq!(summary.total_endpoints, 5);
    }

    #[test]
    fn test_repository_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".census")).unwrap();
        fs::write(
            CensusConfig::default_path(root),
            "controller_annotations = [\"@Resource\"]\nparallel = false\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("echo/src")).unwrap();
        fs::write(root.join("echo/pom.xml"), "<project/>").unwrap();
        fs::write(
            root.join("echo/src/Hooks.groovy"),
            "@Resource\nclass Hooks {\n  @PostMapping('/hooks')\n  def receive() {}\n}\n",
        )
        .unwrap();

        let config = CensusConfig::load(&CensusConfig::default_path(root));
        assert!(!config.parallel);

        let results = analyze_repository(root, &config);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].microservice(), "echo");
        assert_eq!(results[0].total_endpoints(), 1);
        assert_eq!(results[0].endpoints()[0].annotation, "PostMapping");
    }
}
