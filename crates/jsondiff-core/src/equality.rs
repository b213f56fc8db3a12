//! Deep structural equality and key normalization.
//!
//! Lists and maps follow two different rules and are deliberately kept in
//! separate functions: lists compare pairwise by index (order matters), maps
//! compare by key set and per-key value (order does not).

use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::value::{Map, Value};

/// Structural equality of two documents.
///
/// Different variants are never equal (`null` included). Numbers use exact
/// `f64` equality, so `NaN` never equals itself. The walk keeps its own
/// work stack instead of recursing, so arbitrarily deep input is safe.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    drain(vec![(a, b)])
}

/// Map equality: same key set, equal value under every key.
pub fn maps_equal(a: &Map, b: &Map) -> bool {
    let mut pending = Vec::new();
    push_map_pairs(a, b, &mut pending) && drain(pending)
}

fn drain<'a>(mut pending: Vec<(&'a Value, &'a Value)>) -> bool {
    while let Some((a, b)) = pending.pop() {
        let equal = match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (Value::List(x), Value::List(y)) => push_list_pairs(x, y, &mut pending),
            (Value::Map(x), Value::Map(y)) => push_map_pairs(x, y, &mut pending),
            _ => false,
        };
        if !equal {
            return false;
        }
    }
    true
}

/// Queue index-aligned element pairs. `false` when lengths differ.
fn push_list_pairs<'a>(
    a: &'a [Value],
    b: &'a [Value],
    pending: &mut Vec<(&'a Value, &'a Value)>,
) -> bool {
    if a.len() != b.len() {
        return false;
    }
    pending.extend(a.iter().zip(b));
    true
}

/// Queue same-key value pairs. `false` when the key sets differ.
fn push_map_pairs<'a>(a: &'a Map, b: &'a Map, pending: &mut Vec<(&'a Value, &'a Value)>) -> bool {
    // Keys are unique within a map, so equal sizes plus a ⊆ b means equal sets.
    if a.len() != b.len() {
        return false;
    }
    let index: HashMap<&str, &Value> = b.iter().collect();
    for (key, value) in a.iter() {
        match index.get(key) {
            Some(other) => pending.push((value, *other)),
            None => return false,
        }
    }
    true
}

/// Rebuild `value` with every map's keys sorted by [`locale_compare`].
///
/// List order is kept. Used for deterministic presentation; the diff engine
/// does not need normalized input.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::List(items) => Value::List(items.iter().map(normalize).collect()),
        Value::Map(map) => {
            let mut entries: Vec<(&str, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| locale_compare(a, b));
            Value::Map(Map::from_unique(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), normalize(v)))
                    .collect(),
            ))
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}

/// Human-oriented key ordering.
///
/// Compared level by level, each level only breaking ties of the previous:
///
/// 1. base letters, case-insensitive and with diacritics removed, with
///    whitespace before punctuation before digits before letters;
/// 2. diacritics (unaccented first), so `éclair` sorts between `eclair` and
///    `ezra`;
/// 3. case (lowercase first);
/// 4. code points, so the order is total.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let (ka, kb) = (CollationKey::new(a), CollationKey::new(b));
    ka.primary
        .cmp(&kb.primary)
        .then_with(|| ka.accents.cmp(&kb.accents))
        .then_with(|| ka.case.cmp(&kb.case))
        .then_with(|| a.cmp(b))
}

/// Per-level weights of one string, one slot per base character after
/// canonical decomposition.
struct CollationKey {
    primary: Vec<(u8, char)>,
    accents: Vec<Vec<char>>,
    case: Vec<u8>,
}

impl CollationKey {
    fn new(s: &str) -> Self {
        let mut key = CollationKey {
            primary: Vec::with_capacity(s.len()),
            accents: Vec::with_capacity(s.len()),
            case: Vec::with_capacity(s.len()),
        };
        for c in s.nfd() {
            if is_combining_mark(c) {
                if let Some(marks) = key.accents.last_mut() {
                    marks.push(c);
                    continue;
                }
            }
            key.primary.push(primary_weight(c));
            key.accents.push(Vec::new());
            key.case.push(u8::from(c.is_uppercase()));
        }
        key
    }
}

fn primary_weight(c: char) -> (u8, char) {
    let class = if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}
