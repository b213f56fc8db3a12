//! # jsondiff-core
//!
//! Structural comparison of two JSON documents.
//!
//! [`diff`] walks both documents in lock-step and classifies every location
//! that differs: present only on the left, present only on the right, or
//! present on both sides with a different value. Results are keyed by a
//! canonical [`PathKey`] (`$.tags[1]`, `$["first name"]`), one map per side,
//! plus summary [`DiffCounts`].
//!
//! The crate is a classification oracle. It does not produce edit scripts
//! or patches and does not merge documents.
//!
//! ## Example
//!
//! ```
//! use jsondiff_core::{diff, parse_document, PathKey, Status};
//!
//! let left = parse_document(r#"{"id": 101, "tags": ["beta", "team-a"]}"#).unwrap();
//! let right = parse_document(r#"{"id": 102, "tags": ["beta"]}"#).unwrap();
//!
//! let result = diff(&left, &right).unwrap();
//! let removed = PathKey::parse("$.tags[1]").unwrap().to_key();
//! assert_eq!(result.left_status(&removed), Status::LeftOnly);
//! assert_eq!(result.counts.to_string(), "3 differences");
//! ```

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod equality;
pub mod error;
pub mod format;
pub mod parse;
pub mod path;
pub mod report;
pub mod status;
pub mod value;

pub use aggregate::DiffCounts;
pub use config::{DiffOptions, DEFAULT_MAX_DEPTH};
pub use engine::{diff, diff_with_options, DiffResult};
pub use equality::{deep_equal, locale_compare, normalize};
pub use error::{DiffError, ErrorCode, ParseError};
pub use format::{format_normalized, format_value, FormatStyle, DEFAULT_INDENT};
pub use parse::{parse_document, parse_reader};
pub use path::{canonicalize, Path, PathKey, Segment};
pub use report::{render_report, render_side, RenderFlags, ReportLine};
pub use status::{Status, StatusMap};
pub use value::{Map, Value, ValueKind};
