//! Parsing whole blueprints through the public `BlueprintParser` seam.

use apib_core::{line_number, DiagnosticCode};
use apib_parser::{BlueprintParser, MarkdownParser, ParseOptions};
use proptest::prelude::*;

const POLLS: &str = "FORMAT: 1A

# Polls

Polls is a simple API allowing consumers to view polls and vote in them.

## Questions Collection [/questions]

### List All Questions [GET]

+ Response 200 (application/json)

        [
          {
            \"question\": \"Favourite programming language?\",
            \"choices\": [\"Swift\", \"Python\"]
          }
        ]

### Create a New Question [POST]

+ Request (application/json)

    + Body

            {
              \"question\": \"Favourite programming language?\"
            }

    + Schema

            {
              \"$schema\": \"http://json-schema.org/draft-04/schema#\",
              \"type\": \"object\",
              \"required\": [\"question\"]
            }

+ Response 201 (application/json)

    + Headers

            Location: /questions/2

    + Body

            {\"question\": \"Favourite programming language?\"}

+ Response 422 (text/plain)

        question is required
";

#[test]
fn parses_a_realistic_blueprint() {
    let parsed = MarkdownParser::new()
        .parse(POLLS, &ParseOptions::default())
        .unwrap();
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

    let doc = parsed.document.unwrap();
    assert_eq!(doc.name.as_deref(), Some("Polls"));
    let resource = &doc.resource_groups[0].resources[0];
    assert_eq!(resource.name.as_deref(), Some("Questions Collection"));

    let create = &resource.actions[1];
    assert_eq!(create.examples.len(), 1);
    let example = &create.examples[0];
    assert_eq!(example.requests.len(), 1);
    assert_eq!(example.responses.len(), 2);
    assert!(example.requests[0].schema.starts_with("{\n  \"$schema\""));
    assert_eq!(example.responses[0].headers.len(), 2);
    assert_eq!(example.responses[1].body, "question is required\n");
}

#[test]
fn warning_offsets_resolve_to_source_lines() {
    let source = "# API\n\n## GET /a\n\n+ Response 2000\n";
    let parsed = MarkdownParser::new()
        .parse(source, &ParseOptions::default())
        .unwrap();
    assert_eq!(parsed.warnings.len(), 1);
    let warning = &parsed.warnings[0];
    assert_eq!(warning.code, DiagnosticCode::Http);
    assert_eq!(line_number(source, warning.offset), 5);
}

#[test]
fn parser_is_usable_as_trait_object() {
    let parser: Box<dyn BlueprintParser> = Box::new(MarkdownParser::new());
    let parsed = parser.parse("", &ParseOptions::default()).unwrap();
    let doc = parsed.document.unwrap();
    assert!(doc.resource_groups.is_empty());
    assert_eq!(parsed.warnings.len(), 1);
    assert!(parsed.warnings[0].is_missing_api_name());
}

proptest! {
    #[test]
    fn parse_never_panics(source in "[#+\\- a-zA-Z0-9/\\[\\]{}():\"\n]{0,200}") {
        let _ = MarkdownParser::new().parse(&source, &ParseOptions::default());
    }

    #[test]
    fn warnings_are_in_source_order(source in "[#+ a-zA-Z0-9/\\[\\]\n]{0,200}") {
        if let Ok(parsed) = MarkdownParser::new().parse(&source, &ParseOptions::default()) {
            let offsets: Vec<usize> = parsed.warnings.iter().map(|w| w.offset).collect();
            let mut sorted = offsets.clone();
            sorted.sort_unstable();
            prop_assert_eq!(offsets, sorted);
        }
    }
}
