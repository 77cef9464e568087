//! Folding per-file results into a microservice census.

use std::path::PathBuf;

use super::types::{Endpoint, FileResult, MicroserviceResult};

/// Append-only accumulator for one microservice.
///
/// Files are pushed in processing order; [`finish`](Self::finish) seals the
/// result, after which it cannot change.
#[derive(Debug, Clone, Default)]
pub struct MicroserviceAccumulator {
    microservice: String,
    controller_files: Vec<PathBuf>,
    endpoints: Vec<Endpoint>,
}

impl MicroserviceAccumulator {
    pub fn new(microservice: impl Into<String>) -> Self {
        Self {
            microservice: microservice.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, file: FileResult) {
        self.controller_files.push(file.file);
        self.endpoints.extend(file.endpoints);
    }

    pub fn finish(self) -> MicroserviceResult {
        MicroserviceResult {
            microservice: self.microservice,
            total_controllers: self.controller_files.len(),
            total_endpoints: self.endpoints.len(),
            controller_files: self.controller_files,
            endpoints: self.endpoints,
        }
    }
}

/// Build the census of one microservice from its file results, in order.
pub fn aggregate(
    microservice: impl Into<String>,
    files: impl IntoIterator<Item = FileResult>,
) -> MicroserviceResult {
    let mut acc = MicroserviceAccumulator::new(microservice);
    for file in files {
        acc.push(file);
    }
    acc.finish()
}
