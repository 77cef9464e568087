//! Endpoint census — the data model, validity policy and aggregation,
//! plus discovery and analysis of whole source trees.

pub mod aggregate;
pub mod builder;
pub mod scanner;
pub mod types;
pub mod validator;

pub use aggregate::{aggregate, MicroserviceAccumulator};
pub use builder::{analyze_files, analyze_microservice, analyze_repository, scan_controller};
pub use scanner::{discover_microservices, find_controller_files, is_controller};
pub use types::{
    Endpoint, FileResult, Microservice, MicroserviceResult, RawArgument, RawMapping, RunSummary,
    ServiceBreakdown, SourceLocation, UNKNOWN_METHOD,
};
pub use validator::{scan_file, validate, Rejection};
