//! Configuration for document comparison.

use serde::{Deserialize, Serialize};

/// Default nesting ceiling. Matches serde_json's parser recursion limit, so
/// every document produced by [`parse_document`](crate::parse_document) fits.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for [`diff_with_options`](crate::diff_with_options).
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `max-depth`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiffOptions {
    /// Maximum path length the walk may reach before failing with
    /// [`DiffError::NestingTooDeep`](crate::DiffError::NestingTooDeep)
    /// (stack overflow guard for untrusted documents).
    pub max_depth: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_options_serde_round_trip() {
        let opts = DiffOptions { max_depth: 12 };

        let json = serde_json::to_string(&opts).unwrap();
        assert!(json.contains("\"max-depth\""));

        let deserialized: DiffOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, opts);
    }

    #[test]
    fn test_missing_fields_fall_back_to_default() {
        let opts: DiffOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.max_depth, DEFAULT_MAX_DEPTH);
    }
}
