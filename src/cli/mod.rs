//! CLI definition for endpoint-census.
//!
//! Commands:
//! - scan: census of every microservice, console + JSON report
//! - service: census of one microservice directory
//! - file: extraction result for a single source file
//! - services: list discovered microservices

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "endpoint-census")]
#[command(about = "Static inventory of Spring REST endpoints across JVM microservices")]
#[command(version)]
pub struct Cli {
    /// Repository root directory (default: current directory)
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/.census/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every microservice and write the JSON report
    Scan {
        /// Where to write the JSON report (overrides config)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Extract files one at a time instead of on the thread pool
        #[arg(long)]
        sequential: bool,
    },

    /// Analyze a single microservice directory and print its JSON
    Service {
        /// Microservice directory, relative to the root or absolute
        path: PathBuf,
    },

    /// Extract and validate one source file
    File {
        /// Source file path
        path: PathBuf,
    },

    /// List directories recognized as microservices
    Services,
}
