//! Column layout detection for fixed-width `lsof` listings.
//!
//! `lsof` pads every column to the width of its widest value and prints a
//! header row whose labels sit on top of those columns. The layout is derived
//! from the header once and then reused to slice every data row.
//!
//! All offsets are character offsets, not byte offsets.

use std::ops::Range;
use thiserror::Error;

/// Columns printed by `lsof` in canonical left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Command,
    Pid,
    Tid,
    TaskCmd,
    User,
    Fd,
    Type,
    Device,
    SizeOff,
    Node,
    Name,
}

impl Column {
    /// Header label as printed by `lsof`.
    pub fn label(self) -> &'static str {
        match self {
            Column::Command => "COMMAND",
            Column::Pid => "PID",
            Column::Tid => "TID",
            Column::TaskCmd => "TASKCMD",
            Column::User => "USER",
            Column::Fd => "FD",
            Column::Type => "TYPE",
            Column::Device => "DEVICE",
            Column::SizeOff => "SIZE/OFF",
            Column::Node => "NODE",
            Column::Name => "NAME",
        }
    }

    /// TID and TASKCMD are only printed when lsof lists tasks.
    pub fn is_optional(self) -> bool {
        matches!(self, Column::Tid | Column::TaskCmd)
    }
}

/// Sliced columns with the overhang added to each end boundary.
///
/// COMMAND values are truncated by lsof to 9 characters while the label is 7.
/// FD values carry a trailing mode character (`3u`, `10w`) past the label.
/// The remaining columns are right-aligned or never wider than their label at
/// the boundary that matters.
pub const SLICED_COLUMNS: [(Column, usize); 10] = [
    (Column::Command, 2),
    (Column::Pid, 0),
    (Column::Tid, 0),
    (Column::TaskCmd, 0),
    (Column::User, 0),
    (Column::Fd, 1),
    (Column::Type, 0),
    (Column::Device, 0),
    (Column::SizeOff, 0),
    (Column::Node, 0),
];

/// Errors raised while deriving a layout from a header line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("listing header is empty")]
    EmptyHeader,

    #[error("column {0} not found in listing header")]
    MissingColumn(&'static str),

    #[error("column {label} at offset {offset} is out of order")]
    OutOfOrder { label: &'static str, offset: usize },

    #[error("column {label} has an empty range {start}..{end}")]
    EmptyRange {
        label: &'static str,
        start: usize,
        end: usize,
    },
}

/// Half-open character range of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub column: Column,
    pub start: usize,
    pub end: usize,
}

impl ColumnSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Column boundaries of one listing. Immutable once detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    spans: Vec<ColumnSpan>,
    name_start: usize,
}

impl ColumnLayout {
    /// Spans of every sliced column present in the header, left to right.
    pub fn spans(&self) -> &[ColumnSpan] {
        &self.spans
    }

    /// Span of a sliced column, `None` for NAME or an absent optional column.
    pub fn span(&self, column: Column) -> Option<ColumnSpan> {
        self.spans.iter().copied().find(|s| s.column == column)
    }

    /// NAME runs from here to the end of each line.
    pub fn name_start(&self) -> usize {
        self.name_start
    }

    pub fn command_end(&self) -> usize {
        self.required(Column::Command).end
    }

    pub fn pid_range(&self) -> Range<usize> {
        self.required(Column::Pid).range()
    }

    pub fn type_range(&self) -> Range<usize> {
        self.required(Column::Type).range()
    }

    // Required columns are guaranteed present by `detect_layout`.
    fn required(&self, column: Column) -> ColumnSpan {
        self.span(column).unwrap_or(ColumnSpan {
            column,
            start: 0,
            end: 0,
        })
    }
}

/// Derives the column layout from a listing header.
///
/// Each label is located as a whole token, then the scan walks forward to the
/// first blank. A label that ends the header without a trailing blank uses the
/// end of the line as its boundary.
pub fn detect_layout(header: &str) -> Result<ColumnLayout, LayoutError> {
    let chars: Vec<char> = header.trim_end_matches(['\r', '\n']).chars().collect();
    if chars.iter().all(|c| c.is_whitespace()) {
        return Err(LayoutError::EmptyHeader);
    }

    let mut spans = Vec::with_capacity(SLICED_COLUMNS.len());
    let mut start = 0;
    let mut last_label_offset: Option<usize> = None;

    for (column, overhang) in SLICED_COLUMNS {
        let offset = match find_token(&chars, column.label()) {
            Some(offset) => offset,
            None if column.is_optional() => continue,
            None => return Err(LayoutError::MissingColumn(column.label())),
        };
        if last_label_offset.is_some_and(|prev| offset <= prev) {
            return Err(LayoutError::OutOfOrder {
                label: column.label(),
                offset,
            });
        }
        last_label_offset = Some(offset);

        let blank = chars[offset..]
            .iter()
            .position(|c| c.is_whitespace())
            .map_or(chars.len(), |p| offset + p);
        let end = blank + overhang;
        if end <= start {
            return Err(LayoutError::EmptyRange {
                label: column.label(),
                start,
                end,
            });
        }
        spans.push(ColumnSpan { column, start, end });
        start = end;
    }

    let name_label = Column::Name.label();
    let name_start = find_token(&chars, name_label)
        .ok_or(LayoutError::MissingColumn(name_label))?;
    if last_label_offset.is_some_and(|prev| name_start <= prev) || name_start < start {
        return Err(LayoutError::OutOfOrder {
            label: name_label,
            offset: name_start,
        });
    }

    Ok(ColumnLayout { spans, name_start })
}

/// First occurrence of `label` bounded by blanks or the line edges.
fn find_token(chars: &[char], label: &str) -> Option<usize> {
    let needle: Vec<char> = label.chars().collect();
    if needle.len() > chars.len() {
        return None;
    }
    (0..=chars.len() - needle.len()).find(|&i| {
        chars[i..i + needle.len()] == needle[..]
            && (i == 0 || chars[i - 1].is_whitespace())
            && chars
                .get(i + needle.len())
                .map_or(true, |c| c.is_whitespace())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "COMMAND PID TID TASKCMD USER FD TYPE DEVICE SIZE/OFF NODE NAME";
    const LSOF_HEADER: &str =
        "COMMAND     PID   TID TASKCMD       USER   FD      TYPE             DEVICE SIZE/OFF       NODE NAME";

    fn overhang(column: Column) -> usize {
        SLICED_COLUMNS
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, o)| *o)
            .unwrap()
    }

    #[test]
    fn test_command_end_is_first_blank_plus_overhang() {
        let layout = detect_layout(CANONICAL).unwrap();
        let first_blank = CANONICAL.find(' ').unwrap();
        assert_eq!(layout.command_end(), first_blank + overhang(Column::Command));
    }

    #[test]
    fn test_canonical_ranges_contiguous_and_increasing() {
        for header in [CANONICAL, LSOF_HEADER] {
            let layout = detect_layout(header).unwrap();
            let spans = layout.spans();
            assert_eq!(spans.len(), 10);
            assert_eq!(spans[0].start, 0);
            for pair in spans.windows(2) {
                assert_eq!(pair[0].end, pair[1].start, "gap after {:?}", pair[0].column);
                assert!(pair[0].start < pair[1].start);
            }
            for span in spans {
                assert!(span.start < span.end);
            }
            assert!(layout.name_start() >= spans[9].end);
        }
    }

    #[test]
    fn test_name_start_is_label_index() {
        let layout = detect_layout(LSOF_HEADER).unwrap();
        assert_eq!(layout.name_start(), LSOF_HEADER.find("NAME").unwrap());
    }

    #[test]
    fn test_optional_task_columns_may_be_absent() {
        let header = "COMMAND   PID USER   FD   TYPE DEVICE SIZE/OFF    NODE NAME";
        let layout = detect_layout(header).unwrap();
        assert!(layout.span(Column::Tid).is_none());
        assert!(layout.span(Column::TaskCmd).is_none());
        assert_eq!(layout.span(Column::User).unwrap().start, layout.pid_range().end);
        assert_eq!(layout.pid_range(), 9..13);
    }

    #[test]
    fn test_missing_required_column() {
        let header = "COMMAND PID USER FD DEVICE SIZE/OFF NODE NAME";
        assert_eq!(
            detect_layout(header),
            Err(LayoutError::MissingColumn("TYPE"))
        );
    }

    #[test]
    fn test_ppid_does_not_match_pid() {
        let header = "COMMAND PPID USER FD TYPE DEVICE SIZE/OFF NODE NAME";
        assert_eq!(detect_layout(header), Err(LayoutError::MissingColumn("PID")));
    }

    #[test]
    fn test_out_of_order_columns_rejected() {
        let header = "PID COMMAND USER FD TYPE DEVICE SIZE/OFF NODE NAME";
        assert!(matches!(
            detect_layout(header),
            Err(LayoutError::OutOfOrder { label: "PID", .. })
        ));
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(detect_layout(""), Err(LayoutError::EmptyHeader));
        assert_eq!(detect_layout("   \r\n"), Err(LayoutError::EmptyHeader));
    }

    #[test]
    fn test_label_at_end_of_line_clamps_to_line_length() {
        // No NAME and NODE ends the header: the scan must stop at the line end.
        let header = "COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE";
        let chars = header.chars().count();
        let err = detect_layout(header).unwrap_err();
        assert_eq!(err, LayoutError::MissingColumn("NAME"));

        let header = format!("{header} NAME");
        let layout = detect_layout(&header).unwrap();
        assert_eq!(layout.span(Column::Node).unwrap().end, chars);
    }

    #[test]
    fn test_truncated_header_does_not_panic() {
        assert_eq!(detect_layout("COMMAND"), Err(LayoutError::MissingColumn("PID")));
        assert_eq!(
            detect_layout("COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAM"),
            Err(LayoutError::MissingColumn("NAME"))
        );
    }

    #[test]
    fn test_crlf_header() {
        let header = format!("{CANONICAL}\r\n");
        assert_eq!(detect_layout(&header).unwrap(), detect_layout(CANONICAL).unwrap());
    }
}
