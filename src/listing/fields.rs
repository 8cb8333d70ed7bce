//! Parser for `lsof -F ct` field output.
//!
//! Field output prints one field per line, each prefixed with an identifier
//! character: `p` starts a process set, `c` carries its command, `f` starts a
//! descriptor set and `t` carries the descriptor type. Other identifiers are
//! ignored.

use crate::listing::row::DescriptorRow;

#[derive(Debug, PartialEq, Eq)]
enum Field<'a> {
    Pid(&'a str),
    Command(&'a str),
    Descriptor,
    Type(&'a str),
}

fn parse_field(line: &str) -> Option<Field<'_>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut chars = line.chars();
    let tag = chars.next()?;
    let value = chars.as_str();
    match tag {
        'p' => Some(Field::Pid(value)),
        'c' => Some(Field::Command(value)),
        'f' => Some(Field::Descriptor),
        't' => Some(Field::Type(value)),
        _ => None,
    }
}

/// Converts field output into one row per descriptor.
///
/// Every `t` record yields a descriptor of the current process. An `f` record
/// opens a descriptor that the following `t` completes; an `f` with no `t`
/// yields a row with a blank type. Records seen before any process set are
/// dropped.
pub fn parse_field_output(text: &str) -> Vec<DescriptorRow> {
    let mut rows = Vec::new();
    let mut pid: Option<&str> = None;
    let mut command = "";
    let mut open_descriptor = false;

    for field in text.lines().filter_map(parse_field) {
        match field {
            Field::Pid(value) => {
                close_untyped(&mut rows, pid, command, &mut open_descriptor);
                pid = Some(value);
                command = "";
            }
            Field::Command(value) => command = value,
            Field::Descriptor => {
                close_untyped(&mut rows, pid, command, &mut open_descriptor);
                open_descriptor = true;
            }
            Field::Type(value) => {
                open_descriptor = false;
                if let Some(pid) = pid {
                    rows.push(DescriptorRow::new(command, pid, value));
                }
            }
        }
    }
    close_untyped(&mut rows, pid, command, &mut open_descriptor);

    rows
}

// An `f` record closed without a `t` record.
fn close_untyped(
    rows: &mut Vec<DescriptorRow>,
    pid: Option<&str>,
    command: &str,
    open_descriptor: &mut bool,
) {
    if std::mem::take(open_descriptor) {
        if let Some(pid) = pid {
            rows.push(DescriptorRow::new(command, pid, ""));
        }
    }
}
