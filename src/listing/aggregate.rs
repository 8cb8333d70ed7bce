//! Aggregation of descriptor rows into per-process counts.
//!
//! Rows are tallied under an explicit composite key. The command name stored
//! for a key is the one seen first: a pid names a single process within one
//! snapshot, so later rows never carry a different name for it.

use ahash::AHashMap as HashMap;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::listing::row::DescriptorRow;

/// Reporting mode for the breakdown table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GroupBy {
    /// One row per process
    Process,
    /// One row per process and descriptor type
    #[default]
    ProcessType,
}

/// Key a row is counted under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub pid: String,
    pub fd_type: Option<String>,
}

impl AggregationKey {
    fn for_row(row: &DescriptorRow, group_by: GroupBy) -> Self {
        let fd_type = match group_by {
            GroupBy::Process => None,
            GroupBy::ProcessType => Some(row.type_or_unknown().to_string()),
        };
        Self {
            pid: row.pid.clone(),
            fd_type,
        }
    }
}

#[derive(Debug, Clone)]
struct Tally {
    command: String,
    count: u64,
}

/// Final output unit of the breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub command: String,
    pub pid: String,
    pub fd_type: Option<String>,
    pub count: u64,
}

impl ReportRow {
    /// Cells in COMMAND, PID, FDTYPE, COUNT order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.command.clone(),
            self.pid.clone(),
            self.fd_type.clone().unwrap_or_else(|| "-".to_string()),
            self.count.to_string(),
        ]
    }
}

/// Incremental counter over a stream of rows.
#[derive(Debug, Default)]
pub struct Aggregator {
    group_by: GroupBy,
    tallies: HashMap<AggregationKey, Tally>,
}

impl Aggregator {
    pub fn new(group_by: GroupBy) -> Self {
        Self {
            group_by,
            tallies: HashMap::new(),
        }
    }

    pub fn push(&mut self, row: DescriptorRow) {
        let key = AggregationKey::for_row(&row, self.group_by);
        // First write wins for the command name.
        self.tallies
            .entry(key)
            .or_insert_with(|| Tally {
                command: row.command,
                count: 0,
            })
            .count += 1;
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Flattens the tallies, highest count first. Ties keep no defined order.
    pub fn finish(self) -> Vec<ReportRow> {
        let mut rows: Vec<ReportRow> = self
            .tallies
            .into_iter()
            .map(|(key, tally)| ReportRow {
                command: tally.command,
                pid: key.pid,
                fd_type: key.fd_type,
                count: tally.count,
            })
            .collect();
        rows.sort_unstable_by(|a, b| b.count.cmp(&a.count));
        rows
    }
}

impl Extend<DescriptorRow> for Aggregator {
    fn extend<I: IntoIterator<Item = DescriptorRow>>(&mut self, iter: I) {
        for row in iter {
            self.push(row);
        }
    }
}
