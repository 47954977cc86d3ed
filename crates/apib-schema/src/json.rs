//! # JSON Syntax Checking
//!
//! Classifies a payload string as well-formed JSON or produces a parse
//! error that points at the offending character:
//!
//! ```text
//! Parse error on line 1:
//! {"id": 1, "name": }
//! ------------------^
//! expected value at line 1 column 19
//! ```
//!
//! The last line is `serde_json`'s own message, kept verbatim. The excerpt
//! above it is rebuilt from the line/column the error reports.

use std::fmt;

use serde_json::Value;

/// Characters of context shown on each side of the error column.
const EXCERPT_WINDOW: usize = 30;

/// A payload that is not well-formed JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSyntaxError {
    /// 1-based line reported by the parser.
    pub line: usize,
    /// 1-based column reported by the parser.
    pub column: usize,
    /// The parser's message, verbatim.
    pub message: String,
    excerpt: Option<String>,
}

impl JsonSyntaxError {
    fn from_serde(text: &str, error: &serde_json::Error) -> Self {
        let (line, column) = (error.line(), error.column());
        Self {
            line,
            column,
            message: error.to_string(),
            excerpt: excerpt(text, line, column),
        }
    }

    /// Source excerpt with a caret under the error column, if the reported
    /// line exists in the text.
    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }
}

impl fmt::Display for JsonSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.excerpt {
            Some(excerpt) => write!(
                f,
                "Parse error on line {}:\n{excerpt}\n{}",
                self.line, self.message
            ),
            None => write!(f, "Parse error: {}", self.message),
        }
    }
}

impl std::error::Error for JsonSyntaxError {}

/// Parses `text` as JSON.
///
/// Callers skip empty payloads; an empty string here is reported as a
/// syntax error like any other malformed input.
pub fn check_json(text: &str) -> Result<Value, JsonSyntaxError> {
    serde_json::from_str(text).map_err(|e| JsonSyntaxError::from_serde(text, &e))
}

fn excerpt(text: &str, line: usize, column: usize) -> Option<String> {
    let source_line = text.lines().nth(line.checked_sub(1)?)?;
    let chars: Vec<char> = source_line.chars().collect();

    // serde_json columns count bytes; convert to a character index.
    let byte_column = column.saturating_sub(1);
    let caret = source_line
        .char_indices()
        .take_while(|(i, _)| *i < byte_column)
        .count()
        .min(chars.len());

    let start = caret.saturating_sub(EXCERPT_WINDOW);
    let end = (caret + EXCERPT_WINDOW).min(chars.len());

    let mut shown = String::new();
    let mut lead = caret - start;
    if start > 0 {
        shown.push_str("...");
        lead += 3;
    }
    shown.extend(&chars[start..end]);
    if end < chars.len() {
        shown.push_str("...");
    }

    Some(format!("{shown}\n{}^", "-".repeat(lead)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_object() {
        let value = check_json(r#"{"a":1}"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_valid_scalars_and_arrays() {
        assert!(check_json("true").is_ok());
        assert!(check_json("[1, 2, 3]").is_ok());
        assert!(check_json("  \"text\"\n").is_ok());
    }

    #[test]
    fn test_missing_value_is_error() {
        let err = check_json(r#"{"a":}"#).unwrap_err();
        assert!(!err.message.is_empty());
        assert!(err.message.contains("expected value"), "got: {}", err.message);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_error_display_has_excerpt_and_caret() {
        let err = check_json(r#"{"a":}"#).unwrap_err();
        let rendered = err.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Parse error on line 1:");
        assert_eq!(lines[1], r#"{"a":}"#);
        assert!(lines[2].ends_with('^'));
        assert_eq!(lines[3], err.message);
    }

    #[test]
    fn test_error_on_later_line() {
        let text = "{\n  \"a\": 1,\n  \"b\": \n}";
        let err = check_json(text).unwrap_err();
        assert_eq!(err.line, 4);
        assert!(err.to_string().starts_with("Parse error on line 4:"));
    }

    #[test]
    fn test_plain_text_is_error() {
        let err = check_json("not json").unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }

    #[test]
    fn test_long_line_is_windowed() {
        let padding = "1, ".repeat(40);
        let text = format!("[{padding}]]");
        let err = check_json(&text).unwrap_err();
        let excerpt = err.excerpt().unwrap();
        let first = excerpt.lines().next().unwrap();
        assert!(first.starts_with("..."));
        assert!(first.chars().count() <= 2 * EXCERPT_WINDOW + 6);
    }

    #[test]
    fn test_trailing_garbage_is_error() {
        assert!(check_json(r#"{"a":1} x"#).is_err());
    }

    proptest::proptest! {
        #[test]
        fn test_arbitrary_text_never_panics(text in "\\PC{0,64}") {
            if let Err(err) = check_json(&text) {
                let rendered = err.to_string();
                proptest::prop_assert!(rendered.starts_with("Parse error"));
                proptest::prop_assert!(rendered.ends_with(err.message.as_str()));
            }
        }
    }
}
