//! Diff engine: lock-step walk of two documents.
//!
//! Every node reached by the walk is classified:
//!
//! - present on one side only → `LeftOnly` / `RightOnly`, propagated to every
//!   descendant of the exclusive subtree;
//! - present on both sides and deep-equal → nothing recorded;
//! - present on both sides and unequal → `Changed` in both maps, then the
//!   walk descends into list indices or the union of map keys. Mismatched
//!   shapes (list vs map, scalar vs container, differing scalars) stop at the
//!   `Changed` marker.
//!
//! The root entry is removed from both maps before the result is returned.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::aggregate::DiffCounts;
use crate::config::DiffOptions;
use crate::equality::deep_equal;
use crate::error::DiffError;
use crate::path::{Path, PathKey, Segment};
use crate::status::{Status, StatusMap};
use crate::value::{Map, Value};

/// Classification of every differing path, one map per side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    /// `false` whenever the documents differ, including a difference that
    /// is only visible at the (elided) root, such as a list against a map.
    pub identical: bool,
    /// Statuses oriented to the left document (`LeftOnly`, `Changed`).
    pub left: StatusMap,
    /// Statuses oriented to the right document (`RightOnly`, `Changed`).
    pub right: StatusMap,
    pub counts: DiffCounts,
}

impl DiffResult {
    /// `true` when the documents are structurally equal.
    pub fn is_identical(&self) -> bool {
        self.identical
    }

    pub fn left_status(&self, key: &PathKey) -> Status {
        self.left.status_of(key)
    }

    pub fn right_status(&self, key: &PathKey) -> Status {
        self.right.status_of(key)
    }
}

/// Compare two documents with [`DiffOptions::default`].
///
/// Any pair of values is valid input; the only failure is nesting deeper
/// than the configured maximum.
///
/// # Example
/// ```
/// use jsondiff_core::{diff, Value};
/// use serde_json::json;
///
/// let left = Value::from(json!({"id": 101, "tags": ["beta", "team-a"]}));
/// let right = Value::from(json!({"id": 102, "tags": ["beta"]}));
/// let result = diff(&left, &right).unwrap();
/// assert_eq!(result.counts.left_only, 1);
/// assert_eq!(result.counts.changed, 2);
/// ```
pub fn diff(left: &Value, right: &Value) -> Result<DiffResult, DiffError> {
    diff_with_options(left, right, &DiffOptions::default())
}

/// Compare two documents.
pub fn diff_with_options(
    left: &Value,
    right: &Value,
    options: &DiffOptions,
) -> Result<DiffResult, DiffError> {
    let mut walker = Walker::new(options);
    walker.compare(Some(left), Some(right))?;

    let Walker {
        left: mut left_map,
        right: mut right_map,
        ..
    } = walker;

    // The root is always present on both sides, so it can only be `Changed`.
    let root = PathKey::root();
    let identical = left_map.remove(&root).is_none();
    right_map.remove(&root);

    let counts = DiffCounts::tally(&left_map, &right_map);
    tracing::debug!(
        left_only = counts.left_only,
        right_only = counts.right_only,
        changed = counts.changed,
        "diff complete"
    );

    Ok(DiffResult {
        identical,
        left: left_map,
        right: right_map,
        counts,
    })
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    /// Place `child` on this side of a `compare` call, absent on the other.
    fn only(self, child: &Value) -> (Option<&Value>, Option<&Value>) {
        match self {
            Side::Left => (Some(child), None),
            Side::Right => (None, Some(child)),
        }
    }
}

struct Walker<'o> {
    options: &'o DiffOptions,
    path: Path,
    left: StatusMap,
    right: StatusMap,
}

impl<'o> Walker<'o> {
    fn new(options: &'o DiffOptions) -> Self {
        Self {
            options,
            path: Path::root(),
            left: StatusMap::new(),
            right: StatusMap::new(),
        }
    }

    fn compare(&mut self, left: Option<&Value>, right: Option<&Value>) -> Result<(), DiffError> {
        if self.path.len() > self.options.max_depth {
            return Err(DiffError::NestingTooDeep {
                path: self.path.to_string(),
                max_depth: self.options.max_depth,
            });
        }

        match (left, right) {
            (None, None) => Ok(()),
            (Some(left), None) => self.exclusive(left, Side::Left),
            (None, Some(right)) => self.exclusive(right, Side::Right),
            (Some(left), Some(right)) => self.shared(left, right),
        }
    }

    /// Mark `value` and its whole subtree as present on `side` only.
    fn exclusive(&mut self, value: &Value, side: Side) -> Result<(), DiffError> {
        let status = match side {
            Side::Left => Status::LeftOnly,
            Side::Right => Status::RightOnly,
        };
        self.record(side, self.path.to_key(), status);

        match value {
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    let (l, r) = side.only(item);
                    self.descend(Segment::Index(i), l, r)?;
                }
            }
            Value::Map(map) => {
                for (k, item) in map.iter() {
                    let (l, r) = side.only(item);
                    self.descend(Segment::Key(k.to_string()), l, r)?;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
        Ok(())
    }

    fn shared(&mut self, left: &Value, right: &Value) -> Result<(), DiffError> {
        if deep_equal(left, right) {
            return Ok(());
        }

        let key = self.path.to_key();
        self.record(Side::Left, key.clone(), Status::Changed);
        self.record(Side::Right, key, Status::Changed);

        match (left, right) {
            (Value::List(l), Value::List(r)) => self.compare_lists(l, r),
            (Value::Map(l), Value::Map(r)) => self.compare_maps(l, r),
            _ => Ok(()),
        }
    }

    /// Index-aligned: positions past one side's end fall into the
    /// exclusive cases.
    fn compare_lists(&mut self, left: &[Value], right: &[Value]) -> Result<(), DiffError> {
        for i in 0..left.len().max(right.len()) {
            self.descend(Segment::Index(i), left.get(i), right.get(i))?;
        }
        Ok(())
    }

    /// Key-aligned over the sorted union of both key sets.
    fn compare_maps(&mut self, left: &Map, right: &Map) -> Result<(), DiffError> {
        let left_index: BTreeMap<&str, &Value> = left.iter().collect();
        let right_index: BTreeMap<&str, &Value> = right.iter().collect();
        let keys: BTreeSet<&str> = left_index.keys().chain(right_index.keys()).copied().collect();

        for k in keys {
            self.descend(
                Segment::Key(k.to_string()),
                left_index.get(k).copied(),
                right_index.get(k).copied(),
            )?;
        }
        Ok(())
    }

    fn descend(
        &mut self,
        segment: Segment,
        left: Option<&Value>,
        right: Option<&Value>,
    ) -> Result<(), DiffError> {
        self.path.push(segment);
        let result = self.compare(left, right);
        self.path.pop();
        result
    }

    fn record(&mut self, side: Side, key: PathKey, status: Status) {
        tracing::trace!(path = %key, ?status, ?side, "recording status");
        match side {
            Side::Left => self.left.escalate(key, status),
            Side::Right => self.right.escalate(key, status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(left: serde_json::Value, right: serde_json::Value) -> DiffResult {
        diff(&Value::from(left), &Value::from(right)).unwrap()
    }

    fn entries(map: &StatusMap) -> Vec<(String, Status)> {
        map.iter().map(|(k, s)| (k.to_string(), s)).collect()
    }

    #[test]
    fn test_identical_documents() {
        let doc = json!({"a": [1, {"b": null}], "c": "x"});
        let result = run(doc.clone(), doc);
        assert!(result.is_identical());
        assert_eq!(result.counts, DiffCounts::default());
    }

    #[test]
    fn test_tags_example() {
        let result = run(
            json!({"id": 101, "tags": ["beta", "team-a"]}),
            json!({"id": 102, "tags": ["beta"]}),
        );

        assert_eq!(
            entries(&result.left),
            vec![
                ("$.id".to_string(), Status::Changed),
                ("$.tags".to_string(), Status::Changed),
                ("$.tags[1]".to_string(), Status::LeftOnly),
            ]
        );
        assert_eq!(
            entries(&result.right),
            vec![
                ("$.id".to_string(), Status::Changed),
                ("$.tags".to_string(), Status::Changed),
            ]
        );
        assert_eq!(
            result.counts,
            DiffCounts {
                left_only: 1,
                right_only: 0,
                changed: 2
            }
        );
    }

    #[test]
    fn test_type_mismatch_stops_descent() {
        let result = run(json!({"x": 1}), json!({"x": [1]}));
        assert_eq!(entries(&result.left), vec![("$.x".to_string(), Status::Changed)]);
        assert_eq!(entries(&result.right), vec![("$.x".to_string(), Status::Changed)]);
    }

    #[test]
    fn test_list_vs_map_at_root_elides_root() {
        let result = run(json!([1, 2]), json!({"a": 1}));
        assert!(result.left.is_empty());
        assert!(result.right.is_empty());
        assert_eq!(result.counts.total(), 0);
        assert!(!result.is_identical());
    }

    #[test]
    fn test_differing_root_scalars_elide_root() {
        let result = run(json!(1), json!(2));
        assert!(result.left.is_empty());
        assert!(result.right.is_empty());
        assert!(!result.is_identical());
    }

    #[test]
    fn test_exclusive_subtree_is_propagated() {
        let result = run(json!({}), json!({"new": {"a": [1, {"b": true}]}}));
        assert_eq!(
            entries(&result.right),
            vec![
                ("$.new".to_string(), Status::RightOnly),
                ("$.new.a".to_string(), Status::RightOnly),
                ("$.new.a[0]".to_string(), Status::RightOnly),
                ("$.new.a[1]".to_string(), Status::RightOnly),
                ("$.new.a[1].b".to_string(), Status::RightOnly),
            ]
        );
        assert!(result.left.is_empty());
        assert_eq!(result.counts.right_only, 5);
    }

    #[test]
    fn test_map_order_insensitive_list_order_sensitive() {
        assert!(run(json!({"a": 1, "b": 2}), json!({"b": 2, "a": 1})).is_identical());

        let result = run(json!([1, 2]), json!([2, 1]));
        assert_eq!(result.counts.changed, 2);
        assert_eq!(
            entries(&result.left),
            vec![
                ("$[0]".to_string(), Status::Changed),
                ("$[1]".to_string(), Status::Changed),
            ]
        );
    }

    #[test]
    fn test_null_vs_missing() {
        let result = run(json!({"a": null}), json!({}));
        assert_eq!(entries(&result.left), vec![("$.a".to_string(), Status::LeftOnly)]);
        assert!(result.right.is_empty());
    }

    #[test]
    fn test_quoted_keys_in_paths() {
        let result = run(json!({"first name": "A"}), json!({"first name": "B"}));
        assert_eq!(
            entries(&result.left),
            vec![(r#"$["first name"]"#.to_string(), Status::Changed)]
        );
    }

    #[test]
    fn test_depth_guard_fails_fast() {
        let options = DiffOptions { max_depth: 2 };
        let left = Value::from(json!({"a": {"b": {"c": 1}}}));
        let right = Value::from(json!({"a": {"b": {"c": 2}}}));

        let err = diff_with_options(&left, &right, &options).unwrap_err();
        match err {
            DiffError::NestingTooDeep { path, max_depth } => {
                assert_eq!(path, "$.a.b.c");
                assert_eq!(max_depth, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_depth_guard_allows_equal_deep_subtrees() {
        // Equal subtrees are never walked, so they never hit the ceiling.
        let options = DiffOptions { max_depth: 1 };
        let left = Value::from(json!({"a": {"b": {"c": 1}}, "x": 1}));
        let right = Value::from(json!({"a": {"b": {"c": 1}}, "x": 2}));

        let result = diff_with_options(&left, &right, &options).unwrap();
        assert_eq!(entries(&result.left), vec![("$.x".to_string(), Status::Changed)]);
    }

    #[test]
    fn test_serialized_shape() {
        let result = run(json!({"a": 1}), json!({"a": 2, "b": 3}));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            json!({
                "identical": false,
                "left": {"$.a": "changed"},
                "right": {"$.a": "changed", "$.b": "right_only"},
                "counts": {"left_only": 0, "right_only": 1, "changed": 1}
            })
        );
    }
}
