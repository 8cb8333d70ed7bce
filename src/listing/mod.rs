//! Parsing of `lsof` listings into per-process descriptor counts.
//!
//! This module provides:
//! - `layout`: Column boundary detection from a fixed-width header
//! - `row`: Slicing of data rows with a detected layout
//! - `aggregate`: Composite-key counting and ordering of rows
//! - `fields`: Parser for `lsof -F` field output

pub mod aggregate;
pub mod fields;
pub mod layout;
pub mod row;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use aggregate::{AggregationKey, Aggregator, GroupBy, ReportRow};
pub use fields::parse_field_output;
pub use layout::{detect_layout, Column, ColumnLayout, ColumnSpan, LayoutError, SLICED_COLUMNS};
pub use row::{parse_row, DescriptorRow, UNKNOWN_TYPE};

/// Output format requested from lsof for the breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ListingFormat {
    /// Column-aligned default output (`lsof -n`)
    #[default]
    Fixed,
    /// Prefix-coded field output (`lsof -n -F ct`)
    Fields,
}

impl ListingFormat {
    /// lsof arguments producing this format.
    pub fn lsof_args(self) -> &'static [&'static str] {
        match self {
            ListingFormat::Fixed => &["-n"],
            ListingFormat::Fields => &["-n", "-F", "ct"],
        }
    }
}

/// Rows of a fixed-width listing. The first line is the header.
pub fn fixed_width_rows(
    text: &str,
) -> Result<impl Iterator<Item = DescriptorRow> + '_, LayoutError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(LayoutError::EmptyHeader)?;
    let layout = detect_layout(header)?;
    Ok(lines.filter_map(move |line| parse_row(line, &layout)))
}

/// Parses a listing of the given format into rows.
pub fn listing_rows(text: &str, format: ListingFormat) -> Result<Vec<DescriptorRow>, LayoutError> {
    match format {
        ListingFormat::Fixed => Ok(fixed_width_rows(text)?.collect()),
        ListingFormat::Fields => Ok(parse_field_output(text)),
    }
}

/// Parses and aggregates a fixed-width listing in one pass.
pub fn aggregate_fixed_width(text: &str, group_by: GroupBy) -> Result<Vec<ReportRow>, LayoutError> {
    let mut aggregator = Aggregator::new(group_by);
    aggregator.extend(fixed_width_rows(text)?);
    Ok(aggregator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
COMMAND   PID USER   FD   TYPE DEVICE SIZE/OFF    NODE NAME
systemd     1 root  cwd    DIR  253,0     4096       2 /
systemd     1 root  rtd    DIR  253,0     4096       2 /
systemd     1 root    0u   CHR    1,3      0t0       6 /dev/null
sshd      812 root    3u  IPv4  21013      0t0     TCP *:22 (LISTEN)
";

    #[test]
    fn test_aggregate_fixed_width() {
        let rows = aggregate_fixed_width(LISTING, GroupBy::ProcessType).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].command, "systemd");
        assert_eq!(rows[0].fd_type.as_deref(), Some("DIR"));
        assert_eq!(rows[0].count, 2);
    }

    #[test]
    fn test_aggregate_by_process() {
        let rows = aggregate_fixed_width(LISTING, GroupBy::Process).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pid, "1");
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[1].pid, "812");
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn test_empty_listing_fails_layout() {
        assert!(matches!(
            aggregate_fixed_width("", GroupBy::Process),
            Err(LayoutError::EmptyHeader)
        ));
    }

    #[test]
    fn test_listing_rows_fields_format() {
        let rows = listing_rows("p7\ncbash\nf0\ntCHR\n", ListingFormat::Fields).unwrap();
        assert_eq!(rows, vec![DescriptorRow::new("bash", "7", "CHR")]);
    }

    #[test]
    fn test_lsof_args() {
        assert_eq!(ListingFormat::Fixed.lsof_args(), &["-n"]);
        assert_eq!(ListingFormat::Fields.lsof_args(), &["-n", "-F", "ct"]);
    }
}
