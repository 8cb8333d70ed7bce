//! Slicing of fixed-width listing rows.

use crate::listing::layout::ColumnLayout;
use std::ops::Range;

/// Descriptor type used when a row leaves the TYPE column blank.
pub const UNKNOWN_TYPE: &str = "unknown";

/// One descriptor held open by a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorRow {
    pub command: String,
    pub pid: String,
    pub fd_type: String,
}

impl DescriptorRow {
    pub fn new(
        command: impl Into<String>,
        pid: impl Into<String>,
        fd_type: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            pid: pid.into(),
            fd_type: fd_type.into(),
        }
    }

    /// Descriptor type with blank values replaced by [`UNKNOWN_TYPE`].
    pub fn type_or_unknown(&self) -> &str {
        let t = self.fd_type.trim();
        if t.is_empty() {
            UNKNOWN_TYPE
        } else {
            t
        }
    }
}

/// Slices COMMAND, PID and TYPE out of a data line.
///
/// Returns `None` for lines that do not reach the end of the COMMAND column:
/// blank lines, truncated output and the like are skipped, not errors.
pub fn parse_row(line: &str, layout: &ColumnLayout) -> Option<DescriptorRow> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.chars().count() < layout.command_end() {
        return None;
    }

    Some(DescriptorRow {
        command: slice_chars(line, 0..layout.command_end()).trim().to_string(),
        pid: slice_chars(line, layout.pid_range()).trim().to_string(),
        fd_type: slice_chars(line, layout.type_range()).trim().to_string(),
    })
}

/// Substring by character range, clamped to the line.
fn slice_chars(line: &str, range: Range<usize>) -> &str {
    let byte_at = |idx: usize| {
        line.char_indices()
            .nth(idx)
            .map_or(line.len(), |(offset, _)| offset)
    };
    let (start, end) = (byte_at(range.start), byte_at(range.end));
    if start >= end {
        ""
    } else {
        &line[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::layout::detect_layout;

    const HEADER: &str = "COMMAND   PID USER   FD   TYPE DEVICE SIZE/OFF    NODE NAME";

    #[test]
    fn test_parse_row_fields() {
        let layout = detect_layout(HEADER).unwrap();
        let row = parse_row("systemd     1 root  cwd    DIR  253,0     4096       2 /", &layout)
            .unwrap();
        assert_eq!(row, DescriptorRow::new("systemd", "1", "DIR"));
    }

    #[test]
    fn test_parse_row_with_mode_suffix() {
        let layout = detect_layout(HEADER).unwrap();
        let row = parse_row("sshd      812 root    3u  IPv4  21013      0t0     TCP *:22 (LISTEN)", &layout)
            .unwrap();
        assert_eq!(row.command, "sshd");
        assert_eq!(row.pid, "812");
        assert_eq!(row.fd_type, "IPv4");
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let layout = detect_layout(HEADER).unwrap();
        assert!(parse_row("", &layout).is_none());
        assert!(parse_row("systemd", &layout).is_none());
        assert!(parse_row("\r\n", &layout).is_none());
    }

    #[test]
    fn test_line_ending_before_type_yields_blank_type() {
        let layout = detect_layout(HEADER).unwrap();
        let row = parse_row("kworker/0 200 root", &layout).unwrap();
        assert_eq!(row.pid, "200");
        assert_eq!(row.fd_type, "");
        assert_eq!(row.type_or_unknown(), UNKNOWN_TYPE);
    }

    #[test]
    fn test_non_ascii_command_uses_char_offsets() {
        let layout = detect_layout(HEADER).unwrap();
        let row = parse_row("prüfung    42 root  cwd    DIR  253,0     4096       2 /", &layout)
            .unwrap();
        assert_eq!(row.command, "prüfung");
        assert_eq!(row.pid, "42");
        assert_eq!(row.fd_type, "DIR");
    }

    #[test]
    fn test_slice_chars_clamps() {
        assert_eq!(slice_chars("abc", 1..10), "bc");
        assert_eq!(slice_chars("abc", 5..10), "");
        assert_eq!(slice_chars("abc", 2..1), "");
    }
}
