//! Console and JSON reports of a census run.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::census::types::{MicroserviceResult, RunSummary};
use crate::error::Result;

const RULE: &str = "============================================================";

/// Print the run summary and per-microservice breakdown.
pub fn write_console(out: &mut impl Write, results: &[MicroserviceResult]) -> io::Result<()> {
    let summary = RunSummary::from_results(results);

    writeln!(out, "{RULE}")?;
    writeln!(out, "SUMMARY")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Total microservices analyzed: {}", summary.total_microservices)?;
    writeln!(out, "Total controllers found: {}", summary.total_controllers)?;
    writeln!(out, "Total valid endpoints: {}", summary.total_endpoints)?;
    writeln!(out)?;
    writeln!(out, "Breakdown by microservice:")?;
    for line in &summary.breakdown {
        writeln!(
            out,
            "  {:30} - {:3} endpoints from {:2} controllers",
            line.microservice, line.total_endpoints, line.total_controllers
        )?;
    }
    Ok(())
}

/// Write the results as a pretty-printed JSON array, creating parent
/// directories as needed.
pub fn write_json(path: &Path, results: &[MicroserviceResult]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
