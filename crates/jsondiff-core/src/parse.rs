//! Boundary between raw text and the value model.
//!
//! The diff engine only ever sees valid [`Value`] trees; everything that can
//! go wrong with the text itself is reported here.

use std::io::Read;

use crate::error::ParseError;
use crate::value::Value;

/// Parse one JSON document.
///
/// Surrounding whitespace is ignored. Empty input is [`ParseError::Empty`];
/// malformed input is [`ParseError::Syntax`] with a line, column and byte
/// position into the trimmed text.
///
/// # Example
/// ```
/// use jsondiff_core::parse_document;
///
/// let value = parse_document("  {\"a\": [1, 2]}  ").unwrap();
/// assert_eq!(value.to_string(), r#"{"a":[1,2]}"#);
/// assert!(parse_document("[1,]").unwrap_err().position().is_some());
/// ```
pub fn parse_document(input: &str) -> Result<Value, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(json) => Ok(Value::from(json)),
        Err(e) => {
            let (line, column) = (e.line(), e.column());
            tracing::debug!(line, column, "document failed to parse");
            let full = e.to_string();
            let suffix = format!(" at line {line} column {column}");
            let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();
            Err(ParseError::Syntax {
                message,
                line,
                column,
                position: byte_offset(trimmed, line, column),
            })
        }
    }
}

/// Read everything from `reader` and parse it as one document.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Value, ParseError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| ParseError::Io(e.to_string()))?;
    parse_document(&text)
}

/// Convert a 1-based line/column pair into a byte offset, clamped to the
/// end of the text.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_valid_document() {
        let value = parse_document(r#"{"id": 101, "tags": ["beta"]}"#).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.get("id").and_then(Value::as_f64), Some(101.0));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_document(""), Err(ParseError::Empty)));
        assert!(matches!(parse_document(" \n\t "), Err(ParseError::Empty)));
    }

    #[test]
    fn test_syntax_error_position() {
        let err = parse_document("{\n  \"a\": tru\n}").unwrap_err();
        match err {
            ParseError::Syntax {
                message,
                line,
                position,
                ..
            } => {
                assert_eq!(line, 2);
                assert!(!message.contains("at line"), "{message}");
                assert!(position > 2 && position < 14, "position {position}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        assert!(parse_document("{} {}").is_err());
    }

    #[test]
    fn test_number_out_of_f64_range_is_rejected() {
        match parse_document("[1e400]") {
            Err(ParseError::Syntax { line, message, .. }) => {
                assert_eq!(line, 1);
                assert!(message.contains("out of range"), "{message}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(parse_document("[1e308]").is_ok());
    }

    #[test]
    fn test_parse_reader() {
        let value = parse_reader("[1, 2]".as_bytes()).unwrap();
        assert_eq!(value.as_list().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_byte_offset() {
        assert_eq!(byte_offset("abc\ndef", 1, 1), 0);
        assert_eq!(byte_offset("abc\ndef", 2, 2), 5);
        assert_eq!(byte_offset("abc", 9, 9), 3);
    }
}
