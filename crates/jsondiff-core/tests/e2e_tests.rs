//! End-to-end tests that parse fixture documents from disk and diff them
//! through the public API.

use jsondiff_core::{
    diff, diff_with_options, format_normalized, parse_document, render_report, DiffCounts,
    DiffError, DiffOptions, FormatStyle, ParseError, PathKey, RenderFlags, Status, StatusMap,
    Value,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

// ── Helpers ─────────────────────────────────────────────────────────────────

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/documents");

fn load_fixture(name: &str) -> Value {
    let path = Path::new(FIXTURES_DIR).join(format!("{name}.json"));
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {name}.json: {e}"));
    parse_document(&content).unwrap_or_else(|e| panic!("Failed to parse fixture {name}.json: {e}"))
}

fn entries(map: &StatusMap) -> Vec<(&str, Status)> {
    map.iter().map(|(k, s)| (k.as_str(), s)).collect()
}

// ── Fixture pairs ───────────────────────────────────────────────────────────

#[test]
fn test_user_profile_pair() {
    let left = load_fixture("user_left");
    let right = load_fixture("user_right");
    let result = diff(&left, &right).unwrap();

    assert_eq!(
        entries(&result.left),
        vec![
            ("$.active", Status::Changed),
            ("$.id", Status::Changed),
            ("$.preferences", Status::Changed),
            ("$.preferences.notifications", Status::Changed),
            ("$.preferences.notifications[1]", Status::LeftOnly),
            ("$.preferences.theme", Status::Changed),
            ("$.tags", Status::Changed),
            ("$.tags[1]", Status::LeftOnly),
        ]
    );
    assert_eq!(
        entries(&result.right),
        vec![
            ("$.active", Status::Changed),
            ("$.id", Status::Changed),
            ("$.preferences", Status::Changed),
            ("$.preferences.notifications", Status::Changed),
            ("$.preferences.theme", Status::Changed),
            ("$.tags", Status::Changed),
        ]
    );
    assert_eq!(
        result.counts,
        DiffCounts {
            left_only: 2,
            right_only: 0,
            changed: 6
        }
    );
    assert_eq!(result.counts.to_string(), "8 differences");
}

#[test]
fn test_config_pair_with_added_subtree() {
    let left = load_fixture("config_left");
    let right = load_fixture("config_right");
    let result = diff(&left, &right).unwrap();

    assert_eq!(
        entries(&result.right),
        vec![
            ("$.features", Status::Changed),
            ("$.features[1]", Status::RightOnly),
            ("$.server", Status::Changed),
            ("$.server.tls", Status::RightOnly),
            ("$.server.tls.cert", Status::RightOnly),
            ("$.server.tls.key", Status::RightOnly),
        ]
    );
    assert_eq!(result.counts.left_only, 0);
    assert_eq!(result.counts.right_only, 4);
    assert_eq!(result.counts.changed, 2);
}

#[test]
fn test_reversed_pair_swaps_sides() {
    let left = load_fixture("config_left");
    let right = load_fixture("config_right");
    let forward = diff(&left, &right).unwrap();
    let backward = diff(&right, &left).unwrap();

    assert_eq!(forward.counts.right_only, backward.counts.left_only);
    assert_eq!(forward.counts.changed, backward.counts.changed);
    for (key, status) in forward.right.iter() {
        let mirrored = match status {
            Status::RightOnly => Status::LeftOnly,
            other => other,
        };
        assert_eq!(backward.left.get(key), Some(mirrored), "at {key}");
    }
}

#[test]
fn test_fixture_against_itself() {
    let doc = load_fixture("user_left");
    let result = diff(&doc, &doc).unwrap();
    assert!(result.is_identical());
    assert!(result.counts.is_zero());
}

#[test]
fn test_invalid_fixture_reports_position() {
    let path = Path::new(FIXTURES_DIR).join("invalid.json");
    let content = fs::read_to_string(path).unwrap();
    match parse_document(&content) {
        Err(ParseError::Syntax { line, position, .. }) => {
            assert_eq!(line, 1);
            assert!(position > 0);
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

// ── Presentation helpers over fixtures ──────────────────────────────────────

#[test]
fn test_normalized_formatting_is_order_independent() {
    let left = load_fixture("config_left");
    let right = load_fixture("config_right");
    // Strip the right-only additions; what remains differs from the left
    // document only in key order.
    let stripped = parse_document(
        &format_normalized(&right, FormatStyle::Compact)
            .unwrap()
            .replace(r#","tls":{"cert":"c.pem","key":"k.pem"}"#, "")
            .replace(r#"["a","b"]"#, r#"["a"]"#),
    )
    .unwrap();
    assert!(diff(&left, &stripped).unwrap().is_identical());

    assert_eq!(
        format_normalized(&left, FormatStyle::default()).unwrap(),
        format_normalized(&stripped, FormatStyle::default()).unwrap()
    );
}

#[test]
fn test_text_report_over_fixtures() {
    let left = load_fixture("user_left");
    let right = load_fixture("user_right");
    let result = diff(&left, &right).unwrap();
    let report = render_report(&left, &right, &result, RenderFlags::default());

    assert!(report.contains("Missing on right: 2\n"));
    assert!(report.contains("Missing on left: 0\n"));
    assert!(report.contains("Unequal values: 6\n"));
    assert!(report.contains("-       \"push\""));
    assert!(report.contains("~     \"theme\": \"light\""));
}

#[test]
fn test_status_lookup_by_parsed_key() {
    let left = load_fixture("user_left");
    let right = load_fixture("user_right");
    let result = diff(&left, &right).unwrap();

    let key = PathKey::parse("$.preferences.notifications[1]").unwrap().to_key();
    assert_eq!(result.left_status(&key), Status::LeftOnly);
    assert_eq!(result.right_status(&key), Status::Equal);
}

#[test]
fn test_depth_ceiling_on_deep_document() {
    let depth = 40;
    let left = parse_document(&format!("{}1{}", "[".repeat(depth), "]".repeat(depth))).unwrap();
    let right = parse_document(&format!("{}2{}", "[".repeat(depth), "]".repeat(depth))).unwrap();

    let shallow = DiffOptions { max_depth: 10 };
    let err = diff_with_options(&left, &right, &shallow).unwrap_err();
    assert!(matches!(err, DiffError::NestingTooDeep { max_depth: 10, .. }));

    let result = diff(&left, &right).unwrap();
    assert_eq!(result.counts.changed, depth);
}
