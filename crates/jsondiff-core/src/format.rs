//! Text output for documents: pretty-print, minify, and normalized
//! pretty-print.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::equality::normalize;
use crate::error::DiffError;
use crate::value::Value;

/// Default indent width for pretty output.
pub const DEFAULT_INDENT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    /// One entry per line, `indent` spaces per level.
    Pretty { indent: usize },
    /// No insignificant whitespace.
    Compact,
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle::Pretty {
            indent: DEFAULT_INDENT,
        }
    }
}

/// Render `value` as JSON text, keeping map key order.
pub fn format_value(value: &Value, style: FormatStyle) -> Result<String, DiffError> {
    let mut buf = Vec::new();
    match style {
        FormatStyle::Pretty { indent } => {
            let indent = " ".repeat(indent);
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut ser = Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
        }
        FormatStyle::Compact => {
            let mut ser = Serializer::new(&mut buf);
            value.serialize(&mut ser)?;
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render `value` with every map's keys sorted, as both sides of a diff are
/// displayed.
pub fn format_normalized(value: &Value, style: FormatStyle) -> Result<String, DiffError> {
    format_value(&normalize(value), style)
}
