//! endpoint-census CLI - static REST endpoint inventory.
//!
//! Usage:
//!   endpoint-census scan                   # Census of every microservice
//!   endpoint-census scan --json out.json   # ... with a custom report path
//!   endpoint-census service gate           # One microservice, as JSON
//!   endpoint-census file Foo.java          # One file, as JSON
//!   endpoint-census services               # Discovered microservices

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::Path;
use tracing::info;

use census::cli::{Cli, Commands};
use census::parser::{extract, PatternOptions, SourceLanguage};
use census::{
    analyze_microservice, analyze_repository, discover_microservices, report, scan_file,
    CensusConfig, Microservice,
};

fn main() {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let config_path = cli
        .config
        .unwrap_or_else(|| CensusConfig::default_path(&root));
    let mut config = CensusConfig::load(&config_path);

    match cli.command {
        Commands::Scan { json, sequential } => {
            if sequential {
                config.parallel = false;
            }
            let results = analyze_repository(&root, &config);

            report::write_console(&mut io::stdout().lock(), &results)?;

            let report_path = json.unwrap_or_else(|| config.report_path.clone());
            report::write_json(&report_path, &results)
                .with_context(|| format!("writing {}", report_path.display()))?;
            println!();
            println!("Detailed results saved to '{}'", report_path.display());
        }

        Commands::Service { path } => {
            let service_path = if path.is_absolute() {
                path
            } else {
                root.join(path)
            };
            let service = Microservice {
                id: service_id(&root, &service_path),
                path: service_path,
            };
            let result = analyze_microservice(&root, &service, &config);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::File { path } => {
            let options = PatternOptions {
                lookahead: config.lookahead,
            };
            let extraction =
                extract(&path, &options).with_context(|| format!("reading {}", path.display()))?;
            let language = SourceLanguage::from_path(&path).map_or("unknown", |l| l.name());
            info!(
                file = %path.display(),
                language,
                strategy = %extraction.strategy,
                mappings = extraction.mappings.len(),
                "extracted"
            );
            let result = scan_file(&path, &extraction.mappings);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Services => {
            let services = discover_microservices(&root, &config);
            if services.is_empty() {
                println!("No microservices under {}", root.display());
                return Ok(());
            }
            for service in &services {
                println!("{}", service.id);
            }
        }
    }

    Ok(())
}

fn service_id(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
