//! Classification of heading and list-item signatures.
//!
//! | Signature                         | Meaning                           |
//! |-----------------------------------|-----------------------------------|
//! | `Group Notes`                     | resource group                    |
//! | `Notes [/notes]`, `/notes`        | resource                          |
//! | `GET /notes`                      | resource with a single action     |
//! | `List [GET]`, `List [GET /notes]` | action                            |
//! | `Request Create (application/json)` | request                         |
//! | `Response 201 (application/json)` | response                          |
//! | `Headers`, `Body`, `Schema`       | message sections                  |

pub(crate) const HTTP_METHODS: &[&str] = &[
    "GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS", "TRACE", "CONNECT", "LINK",
    "UNLINK",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Heading<'a> {
    Group(&'a str),
    Resource {
        name: Option<&'a str>,
        uri: &'a str,
    },
    /// `GET /notes`: a resource declared together with its only action.
    ResourceAction { method: &'a str, uri: &'a str },
    Action {
        name: Option<&'a str>,
        method: &'a str,
        uri: Option<&'a str>,
    },
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Item<'a> {
    Request {
        name: Option<&'a str>,
        media_type: Option<&'a str>,
    },
    Response {
        status: &'a str,
        media_type: Option<&'a str>,
    },
    Headers,
    Body,
    Schema,
    Other,
}

fn is_method(token: &str) -> bool {
    HTTP_METHODS.contains(&token)
}

fn non_empty(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

pub(crate) fn classify_heading(title: &str) -> Heading<'_> {
    if let Some(name) = title.strip_prefix("Group ") {
        return Heading::Group(name.trim());
    }

    if let Some(stripped) = title.strip_suffix(']') {
        if let Some(open) = stripped.rfind('[') {
            let name = non_empty(&stripped[..open]);
            let inner = stripped[open + 1..].trim();
            if inner.starts_with('/') {
                return Heading::Resource { name, uri: inner };
            }
            let mut tokens = inner.split_whitespace();
            if let Some(method) = tokens.next().filter(|t| is_method(t)) {
                let uri = tokens.next().filter(|t| t.starts_with('/'));
                return Heading::Action { name, method, uri };
            }
            return Heading::Other;
        }
    }

    if title.starts_with('/') && !title.contains(char::is_whitespace) {
        return Heading::Resource {
            name: None,
            uri: title,
        };
    }

    let mut tokens = title.split_whitespace();
    if let (Some(method), Some(uri), None) = (tokens.next(), tokens.next(), tokens.next()) {
        if is_method(method) && uri.starts_with('/') {
            return Heading::ResourceAction { method, uri };
        }
    }

    Heading::Other
}

/// Splits a trailing `(media/type)` off a list item signature.
fn split_media_type(text: &str) -> (&str, Option<&str>) {
    if let Some(stripped) = text.strip_suffix(')') {
        if let Some(open) = stripped.rfind('(') {
            return (stripped[..open].trim(), non_empty(&stripped[open + 1..]));
        }
    }
    (text, None)
}

pub(crate) fn classify_item(text: &str) -> Item<'_> {
    let (signature, media_type) = split_media_type(text);
    let (keyword, rest) = match signature.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (signature, ""),
    };

    match keyword {
        "Request" | "request" => Item::Request {
            name: non_empty(rest),
            media_type,
        },
        "Response" | "response" => Item::Response {
            status: rest,
            media_type,
        },
        "Headers" | "headers" if rest.is_empty() => Item::Headers,
        "Body" | "body" if rest.is_empty() => Item::Body,
        "Schema" | "schema" if rest.is_empty() => Item::Schema,
        _ => Item::Other,
    }
}

/// Whether a response status is a three-digit code in `100..=599`.
pub(crate) fn is_valid_status(status: &str) -> bool {
    status.len() == 3
        && status
            .parse::<u16>()
            .map(|code| (100..=599).contains(&code))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_heading() {
        assert_eq!(classify_heading("Group Notes"), Heading::Group("Notes"));
    }

    #[test]
    fn resource_headings() {
        assert_eq!(
            classify_heading("Note [/notes/{id}]"),
            Heading::Resource {
                name: Some("Note"),
                uri: "/notes/{id}"
            }
        );
        assert_eq!(
            classify_heading("[/notes]"),
            Heading::Resource {
                name: None,
                uri: "/notes"
            }
        );
        assert_eq!(
            classify_heading("/notes"),
            Heading::Resource {
                name: None,
                uri: "/notes"
            }
        );
    }

    #[test]
    fn resource_action_heading() {
        assert_eq!(
            classify_heading("GET /message"),
            Heading::ResourceAction {
                method: "GET",
                uri: "/message"
            }
        );
    }

    #[test]
    fn action_headings() {
        assert_eq!(
            classify_heading("Retrieve a Note [GET]"),
            Heading::Action {
                name: Some("Retrieve a Note"),
                method: "GET",
                uri: None
            }
        );
        assert_eq!(
            classify_heading("[DELETE /notes/{id}]"),
            Heading::Action {
                name: None,
                method: "DELETE",
                uri: Some("/notes/{id}")
            }
        );
    }

    #[test]
    fn other_headings() {
        assert_eq!(classify_heading("Notes API"), Heading::Other);
        assert_eq!(classify_heading("Fetch [FETCH]"), Heading::Other);
        assert_eq!(classify_heading("GET the thing"), Heading::Other);
    }

    #[test]
    fn message_items() {
        assert_eq!(
            classify_item("Request Create Note (application/json)"),
            Item::Request {
                name: Some("Create Note"),
                media_type: Some("application/json")
            }
        );
        assert_eq!(
            classify_item("Request"),
            Item::Request {
                name: None,
                media_type: None
            }
        );
        assert_eq!(
            classify_item("Response 200 (application/json; charset=utf-8)"),
            Item::Response {
                status: "200",
                media_type: Some("application/json; charset=utf-8")
            }
        );
    }

    #[test]
    fn section_items() {
        assert_eq!(classify_item("Headers"), Item::Headers);
        assert_eq!(classify_item("Body"), Item::Body);
        assert_eq!(classify_item("Schema"), Item::Schema);
        assert_eq!(classify_item("Body of work"), Item::Other);
        assert_eq!(classify_item("Parameters"), Item::Other);
        assert_eq!(classify_item("Model (application/json)"), Item::Other);
    }

    #[test]
    fn status_codes() {
        assert!(is_valid_status("200"));
        assert!(is_valid_status("599"));
        assert!(!is_valid_status("600"));
        assert!(!is_valid_status("20"));
        assert!(!is_valid_status("OK"));
    }
}
