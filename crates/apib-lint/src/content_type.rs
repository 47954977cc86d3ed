//! JSON detection from message headers.

use apib_core::Header;

/// Media type whose presence in `Content-Type` marks a message as JSON.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Whether a message carrying `headers` holds JSON.
///
/// The header name must be exactly `Content-Type`; the value only has to
/// contain `application/json`, so parameters such as `; charset=utf-8` and
/// suffixed types like `application/json-patch` still match.
pub fn is_json_content_type(headers: &[Header]) -> bool {
    headers
        .iter()
        .any(|h| h.name == "Content-Type" && h.value.contains(JSON_MEDIA_TYPE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn headers(pairs: &[(&str, &str)]) -> Vec<Header> {
        pairs.iter().map(|(n, v)| Header::new(*n, *v)).collect()
    }

    #[test]
    fn json_with_parameters() {
        assert!(is_json_content_type(&headers(&[(
            "Content-Type",
            "application/json; charset=utf-8"
        )])));
    }

    #[test]
    fn plain_text_is_not_json() {
        assert!(!is_json_content_type(&headers(&[("Content-Type", "text/plain")])));
    }

    #[test]
    fn no_headers_is_not_json() {
        assert!(!is_json_content_type(&[]));
    }

    #[test]
    fn header_name_is_case_sensitive() {
        assert!(!is_json_content_type(&headers(&[(
            "content-type",
            "application/json"
        )])));
    }

    #[test]
    fn any_matching_header_counts() {
        assert!(is_json_content_type(&headers(&[
            ("Accept", "application/json"),
            ("Content-Type", "text/html"),
            ("Content-Type", "application/json"),
        ])));
        assert!(!is_json_content_type(&headers(&[(
            "Accept",
            "application/json"
        )])));
    }

    proptest! {
        #[test]
        fn media_type_anywhere_in_value_matches(prefix in "[a-z/; =-]{0,20}", suffix in "[a-z/; =-]{0,20}") {
            let value = format!("{prefix}application/json{suffix}");
            prop_assert!(is_json_content_type(&headers(&[("Content-Type", &value)])));
        }
    }
}
