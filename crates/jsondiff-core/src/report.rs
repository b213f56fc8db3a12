//! Plain-text rendering of a diff, one column per document.
//!
//! Each document is printed with sorted keys and two-space indentation. Every
//! opening line and scalar line carries the status of its path, so a
//! terminal reporter can mark it; closing brackets never do.

use std::fmt;

use crate::engine::DiffResult;
use crate::equality::locale_compare;
use crate::path::{Path, PathKey};
use crate::status::{Status, StatusMap};
use crate::value::Value;

const INDENT: &str = "  ";

/// Which kinds of difference get marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFlags {
    /// Mark `LeftOnly` / `RightOnly` paths.
    pub show_missing: bool,
    /// Mark `Changed` paths.
    pub show_changed: bool,
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self {
            show_missing: true,
            show_changed: true,
        }
    }
}

impl RenderFlags {
    fn allows(self, status: Status) -> bool {
        match status {
            Status::Equal => false,
            Status::LeftOnly | Status::RightOnly => self.show_missing,
            Status::Changed => self.show_changed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    /// Indented JSON text of the line.
    pub text: String,
    /// Path of the node the line opens or holds; `None` for closing lines.
    pub path: Option<PathKey>,
    /// Highlighted status, when the flags enable it.
    pub status: Option<Status>,
}

impl ReportLine {
    pub fn marker(&self) -> char {
        match self.status {
            Some(Status::LeftOnly) => '-',
            Some(Status::RightOnly) => '+',
            Some(Status::Changed) => '~',
            Some(Status::Equal) | None => ' ',
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker(), self.text)
    }
}

/// Render one document against its side's status map.
pub fn render_side(value: &Value, statuses: &StatusMap, flags: RenderFlags) -> Vec<ReportLine> {
    let mut renderer = SideRenderer {
        statuses,
        flags,
        path: Path::root(),
        lines: Vec::new(),
    };
    renderer.node(value, 0, true, None);
    renderer.lines
}

/// Legend, summary, then the left and right columns.
pub fn render_report(
    left: &Value,
    right: &Value,
    result: &DiffResult,
    flags: RenderFlags,
) -> String {
    let counts = &result.counts;
    let mut lines = vec![
        format!("Missing on right: {}", counts.left_only),
        format!("Missing on left: {}", counts.right_only),
        format!("Unequal values: {}", counts.changed),
    ];
    if result.is_identical() {
        lines.push("No differences".to_string());
    } else {
        lines.push(counts.to_string());
    }

    for (title, value, statuses) in [
        ("--- left", left, &result.left),
        ("+++ right", right, &result.right),
    ] {
        lines.push(String::new());
        lines.push(title.to_string());
        lines.extend(
            render_side(value, statuses, flags)
                .iter()
                .map(ToString::to_string),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

struct SideRenderer<'a> {
    statuses: &'a StatusMap,
    flags: RenderFlags,
    path: Path,
    lines: Vec<ReportLine>,
}

impl SideRenderer<'_> {
    fn node(&mut self, value: &Value, level: usize, is_last: bool, key: Option<&str>) {
        let indent = INDENT.repeat(level);
        let prefix = key.map(|k| format!("{}: ", quote(k))).unwrap_or_default();
        let comma = if is_last { "" } else { "," };

        match value {
            Value::List(items) => {
                self.open(format!("{indent}{prefix}["));
                for (i, item) in items.iter().enumerate() {
                    self.path.push(i);
                    self.node(item, level + 1, i + 1 == items.len(), None);
                    self.path.pop();
                }
                self.close(format!("{indent}]{comma}"));
            }
            Value::Map(map) => {
                self.open(format!("{indent}{prefix}{{"));
                let mut entries: Vec<(&str, &Value)> = map.iter().collect();
                entries.sort_by(|(a, _), (b, _)| locale_compare(a, b));
                let count = entries.len();
                for (i, (k, item)) in entries.into_iter().enumerate() {
                    self.path.push(k);
                    self.node(item, level + 1, i + 1 == count, Some(k));
                    self.path.pop();
                }
                self.close(format!("{indent}}}{comma}"));
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                self.open(format!("{indent}{prefix}{value}{comma}"));
            }
        }
    }

    fn open(&mut self, text: String) {
        let key = self.path.to_key();
        let status = self
            .statuses
            .get(&key)
            .filter(|status| self.flags.allows(*status));
        self.lines.push(ReportLine {
            text,
            path: Some(key),
            status,
        });
    }

    fn close(&mut self, text: String) {
        self.lines.push(ReportLine {
            text,
            path: None,
            status: None,
        });
    }
}

fn quote(key: &str) -> String {
    Value::String(key.to_string()).to_string()
}
