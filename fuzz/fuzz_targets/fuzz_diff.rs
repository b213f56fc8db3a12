#![no_main]

use libfuzzer_sys::fuzz_target;

// Accepts arbitrary bytes, splits them into two halves, parses each as JSON
// and diffs the pair. Goal: no panics, and the classification invariants
// hold for whatever parses.
fuzz_target!(|data: &[u8]| {
    let mid = data.len() / 2;
    let (a, b) = data.split_at(mid);
    let (Ok(a), Ok(b)) = (std::str::from_utf8(a), std::str::from_utf8(b)) else {
        return;
    };
    let (Ok(left), Ok(right)) = (
        jsondiff_core::parse_document(a),
        jsondiff_core::parse_document(b),
    ) else {
        return;
    };

    if let Ok(result) = jsondiff_core::diff(&left, &right) {
        assert!(!result.left.contains(&jsondiff_core::PathKey::root()));
        assert_eq!(
            result.counts.changed,
            result.right.count(jsondiff_core::Status::Changed)
        );
    }
});
