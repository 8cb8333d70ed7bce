//! Breakdown table (`-l`).
//!
//! Runs lsof once, aggregates the listing per process (and descriptor type)
//! and renders the result as a table sorted by count.

use anyhow::Context;
use tracing::{debug, error};

use crate::command::CommandRunner;
use crate::config::Config;
use crate::listing::{listing_rows, Aggregator, ReportRow};
use crate::process::should_include_process;
use crate::table::render_table;

pub const LIST_HEADER: [&str; 4] = ["COMMAND", "PID", "FDTYPE", "COUNT"];

/// Builds the sorted report from raw lsof output.
pub fn build_report(output: &str, cfg: &Config) -> anyhow::Result<Vec<ReportRow>> {
    let format = cfg.listing_format.unwrap_or_default();
    let rows = listing_rows(output, format)
        .with_context(|| format!("Cannot parse lsof {:?} listing", format))?;
    let parsed = rows.len();

    let mut aggregator = Aggregator::new(cfg.group_by.unwrap_or_default());
    aggregator.extend(
        rows.into_iter()
            .filter(|row| should_include_process(&row.command, cfg)),
    );
    debug!(
        "Aggregated {} descriptor rows into {} report rows",
        parsed,
        aggregator.len()
    );

    let mut report = aggregator.finish();
    if let Some(n) = cfg.top_n {
        report.truncate(n);
    }
    Ok(report)
}

pub fn render_report(report: &[ReportRow]) -> String {
    let cells: Vec<Vec<String>> = report.iter().map(ReportRow::cells).collect();
    render_table(&LIST_HEADER, &cells)
}

/// Prints the breakdown table. A failed lsof run is reported and renders nothing.
pub fn command_list(runner: &dyn CommandRunner, cfg: &Config) -> anyhow::Result<()> {
    let format = cfg.listing_format.unwrap_or_default();
    let output = match runner.run(cfg.lsof(), format.lsof_args()) {
        Ok(output) => output,
        Err(e) => {
            error!("{}", e);
            return Ok(());
        }
    };

    let report = build_report(&output, cfg)?;
    print!("{}", render_report(&report));
    Ok(())
}
