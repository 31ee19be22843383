//! Format read results for display (indented tree text).

use crate::reader::ReadResult;
use crate::value::Value;
use std::fmt;

/// Render `result` as an indented tree: one line per field, then gaps and recorded errors.
///
/// Offsets inside a nested block are relative to the block's (transformed) buffer.
pub fn format_result(result: &ReadResult) -> String {
    Tree(result).to_string()
}

/// [`fmt::Display`] adapter behind [`format_result`], for writing straight to a stream.
pub struct Tree<'a>(pub &'a ReadResult);

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_result(f, self.0, 0)
    }
}

fn write_result(out: &mut fmt::Formatter<'_>, result: &ReadResult, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    for entry in result.iter() {
        write!(
            out,
            "{}{:#010x} {:>8}  {:<8} {}",
            indent, entry.range.start, entry.range.length, entry.kind, entry.name
        )?;
        match &entry.value {
            Value::Block(nested) => {
                writeln!(out)?;
                write_result(out, nested, depth + 1)?;
            }
            Value::Bytes(b) if entry.kind == "string" || entry.kind == "cstring" => {
                let text = entry.value.as_text().unwrap_or_default();
                writeln!(out, " = \"{}\" ({} bytes)", text.escape_debug(), b.len())?;
            }
            other => writeln!(out, " = {}", other)?,
        }
    }
    if let Some(gaps) = result.gaps() {
        for g in gaps {
            writeln!(out, "{}{:#010x} {:>8}  <gap>", indent, g.start, g.length)?;
        }
    }
    for failure in result.errors() {
        writeln!(out, "{}error: {} (#{}): {}", indent, failure.name, failure.index, failure.error)?;
    }
    Ok(())
}
