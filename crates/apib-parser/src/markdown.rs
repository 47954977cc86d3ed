//! # Built-in Markdown Parser
//!
//! A single pass over the source lines with a small amount of state: the
//! innermost open scope (group, resource, action), the open message, and
//! the open section inside that message. A section collects every line
//! indented deeper than the list item that opened it; the next line at or
//! above that indentation closes it.
//!
//! Asset content is expected to be a pre-formatted block: eight spaces
//! deeper than the list item it belongs to. Shallower content is still
//! collected but draws an indentation warning.

use apib_core::diagnostic::EXPECTED_API_NAME;
use apib_core::{
    Action, Diagnostic, DiagnosticCode, Document, Example, Header, Message, Metadata, Resource,
    ResourceGroup,
};

use crate::lines::{scan, Line};
use crate::signature::{classify_heading, classify_item, is_valid_status, Heading, Item};
use crate::{BlueprintParser, ParseFailure, ParseOptions, Parsed, TAB_ERROR};

/// Line-oriented API Blueprint parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }
}

impl BlueprintParser for MarkdownParser {
    fn parse(&self, source: &str, options: &ParseOptions) -> Result<Parsed, ParseFailure> {
        if let Some(offset) = source.chars().position(|c| c == '\t') {
            return Err(ParseFailure {
                error: Diagnostic::error(DiagnosticCode::Syntax, offset, 1, TAB_ERROR),
            });
        }

        let mut builder = Builder::default();
        for line in scan(source) {
            builder.line(line);
        }
        let (document, mut warnings) = builder.finish();

        if document.name.is_none() {
            let message = format!("{EXPECTED_API_NAME}, e.g. '# <API Name>'");
            if options.require_blueprint_name {
                return Err(ParseFailure {
                    error: Diagnostic::error(DiagnosticCode::ApiName, 0, 0, message),
                });
            }
            warnings.insert(0, Diagnostic::warning(DiagnosticCode::ApiName, 0, 0, message));
        }

        tracing::trace!(
            groups = document.resource_groups.len(),
            warnings = warnings.len(),
            "parsed blueprint"
        );

        Ok(Parsed {
            document: Some(document),
            warnings,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Scope {
    #[default]
    Preamble,
    Group,
    Resource,
    Action,
    /// Inside an action that was declared outside a resource.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Request,
    Response,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Headers,
    Body,
    Schema,
    /// Asset placed directly under a request or response.
    ImplicitBody,
    Ignored,
}

impl SectionKind {
    fn asset_name(self) -> &'static str {
        match self {
            Self::Headers => "headers",
            Self::Body | Self::ImplicitBody => "message-body",
            Self::Schema => "message-schema",
            Self::Ignored => "description",
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Headers => "Headers",
            Self::Body | Self::ImplicitBody => "Body",
            Self::Schema => "Schema",
            Self::Ignored => "",
        }
    }
}

#[derive(Debug)]
struct Section<'a> {
    kind: SectionKind,
    /// Content is every following line indented deeper than this.
    item_indent: usize,
    expected_indent: usize,
    opener: Line<'a>,
    content: Vec<Line<'a>>,
}

impl<'a> Section<'a> {
    fn opened_by(kind: SectionKind, opener: Line<'a>) -> Self {
        Self {
            kind,
            item_indent: opener.indent,
            expected_indent: opener.indent + 8,
            opener,
            content: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Builder<'a> {
    document: Document,
    warnings: Vec<Diagnostic>,
    scope: Scope,
    seen_heading: bool,
    metadata_closed: bool,
    /// Open message and the indentation of its list item.
    message: Option<(MessageKind, usize)>,
    section: Option<Section<'a>>,
    /// Heading line of the open action.
    action_opener: Option<Line<'a>>,
}

impl<'a> Builder<'a> {
    fn line(&mut self, line: Line<'a>) {
        if let Some(section) = self.section.as_mut() {
            // A shallow implicit body still gives way to nested sections.
            let nested_item = section.kind == SectionKind::ImplicitBody
                && line.list_item().is_some()
                && line.indent < section.expected_indent;
            if !nested_item && (line.is_blank() || line.indent > section.item_indent) {
                section.content.push(line);
                return;
            }
            self.close_section();
        }

        if let Some((_, title)) = line.heading() {
            self.close_message();
            self.heading(line, title);
            return;
        }

        if let Some(item) = line.list_item() {
            if line.indent < 4 {
                self.close_message();
                self.top_level_item(line, item);
                return;
            }
            if let Some((_, message_indent)) = self.message {
                if (message_indent + 4..message_indent + 8).contains(&line.indent) {
                    self.nested_item(line, item);
                    return;
                }
            }
        }

        if line.is_blank() {
            if !self.seen_heading && !self.document.metadata.is_empty() {
                self.metadata_closed = true;
            }
            return;
        }

        if let Some((_, message_indent)) = self.message {
            if line.indent > message_indent {
                let mut section = Section::opened_by(SectionKind::ImplicitBody, line);
                section.item_indent = message_indent;
                section.expected_indent = message_indent + 8;
                section.content.push(line);
                self.section = Some(section);
                return;
            }
        }

        if !self.seen_heading && !self.metadata_closed {
            match metadata_entry(line) {
                Some(entry) => self.document.metadata.push(entry),
                None => self.metadata_closed = true,
            }
        }
    }

    fn finish(mut self) -> (Document, Vec<Diagnostic>) {
        self.close_message();
        self.close_action();
        self.warnings.sort_by_key(|w| w.offset);
        (self.document, self.warnings)
    }

    fn warn(&mut self, code: DiagnosticCode, line: Line<'_>, message: impl Into<String>) {
        self.warnings.push(Diagnostic::warning(
            code,
            line.content_offset(),
            line.content_len(),
            message,
        ));
    }

    fn heading(&mut self, line: Line<'a>, title: &str) {
        let first_heading = !self.seen_heading;
        self.seen_heading = true;
        self.metadata_closed = true;

        match classify_heading(title) {
            Heading::Group(name) => {
                self.close_action();
                self.document.resource_groups.push(ResourceGroup {
                    name: Some(name.to_string()).filter(|n| !n.is_empty()),
                    resources: Vec::new(),
                });
                self.scope = Scope::Group;
            }
            Heading::Resource { name, uri } => {
                self.close_action();
                self.push_resource(line, name, uri);
            }
            Heading::ResourceAction { method, uri } => {
                self.close_action();
                self.push_resource(line, None, uri);
                self.push_action(line, None, method);
            }
            Heading::Action { name, method, uri } => {
                self.close_action();
                match (self.scope, uri) {
                    (Scope::Resource | Scope::Action, _) => self.push_action(line, name, method),
                    (_, Some(uri)) => {
                        self.push_resource(line, None, uri);
                        self.push_action(line, name, method);
                    }
                    (_, None) => {
                        self.warn(
                            DiagnosticCode::Ignoring,
                            line,
                            "action definition outside of a resource, ignoring it",
                        );
                        self.scope = Scope::Skipped;
                    }
                }
            }
            Heading::Other => {
                if first_heading && !title.is_empty() {
                    self.document.name = Some(title.to_string());
                }
            }
        }
    }

    fn push_resource(&mut self, line: Line<'a>, name: Option<&str>, uri: &str) {
        let duplicate = self
            .document
            .resource_groups
            .iter()
            .flat_map(|g| &g.resources)
            .any(|r| r.uri_template == uri);
        if duplicate {
            self.warn(
                DiagnosticCode::Duplicate,
                line,
                format!("the resource '{uri}' is already defined"),
            );
        }

        if self.document.resource_groups.is_empty() {
            self.document.resource_groups.push(ResourceGroup::default());
        }
        if let Some(group) = self.document.resource_groups.last_mut() {
            group.resources.push(Resource {
                name: name.map(str::to_string),
                uri_template: uri.to_string(),
                actions: Vec::new(),
            });
        }
        self.scope = Scope::Resource;
    }

    fn push_action(&mut self, line: Line<'a>, name: Option<&str>, method: &str) {
        let resource = self
            .document
            .resource_groups
            .last_mut()
            .and_then(|g| g.resources.last_mut());
        if let Some(resource) = resource {
            resource.actions.push(Action {
                name: name.map(str::to_string),
                method: method.to_string(),
                examples: Vec::new(),
            });
            self.action_opener = Some(line);
            self.scope = Scope::Action;
        }
    }

    fn close_action(&mut self) {
        let Some(opener) = self.action_opener.take() else {
            return;
        };
        let has_response = self
            .action_mut()
            .map(|a| a.examples.iter().any(|e| !e.responses.is_empty()))
            .unwrap_or(false);
        if !has_response {
            self.warn(DiagnosticCode::Logical, opener, "action is missing a response");
        }
    }

    fn action_mut(&mut self) -> Option<&mut Action> {
        self.document
            .resource_groups
            .last_mut()?
            .resources
            .last_mut()?
            .actions
            .last_mut()
    }

    fn top_level_item(&mut self, line: Line<'a>, text: &str) {
        let (kind, name, media_type) = match classify_item(text) {
            Item::Request { name, media_type } => (MessageKind::Request, name, media_type),
            Item::Response { status, media_type } => {
                let status = if status.is_empty() {
                    self.warn(
                        DiagnosticCode::Http,
                        line,
                        "missing response HTTP status code, assuming 'Response 200'",
                    );
                    "200"
                } else {
                    if !is_valid_status(status) {
                        self.warn(
                            DiagnosticCode::Http,
                            line,
                            format!("invalid HTTP status code '{status}'"),
                        );
                    }
                    status
                };
                (MessageKind::Response, Some(status), media_type)
            }
            _ => {
                self.section = Some(Section::opened_by(SectionKind::Ignored, line));
                return;
            }
        };

        if self.scope != Scope::Action {
            if self.scope != Scope::Skipped {
                let what = match kind {
                    MessageKind::Request => "request",
                    MessageKind::Response => "response",
                };
                self.warn(
                    DiagnosticCode::Ignoring,
                    line,
                    format!("ignoring {what} outside of an action"),
                );
            }
            self.section = Some(Section::opened_by(SectionKind::Ignored, line));
            return;
        }

        let message = Message {
            name: name.map(str::to_string),
            headers: media_type
                .map(|m| vec![Header::new("Content-Type", m)])
                .unwrap_or_default(),
            body: String::new(),
            schema: String::new(),
        };

        let Some(action) = self.action_mut() else {
            return;
        };
        let starts_example = match (kind, action.examples.last()) {
            (_, None) => true,
            (MessageKind::Request, Some(last)) => !last.responses.is_empty(),
            (MessageKind::Response, Some(_)) => false,
        };
        if starts_example {
            action.examples.push(Example::default());
        }
        if let Some(example) = action.examples.last_mut() {
            match kind {
                MessageKind::Request => example.requests.push(message),
                MessageKind::Response => example.responses.push(message),
            }
        }
        self.message = Some((kind, line.indent));
    }

    fn nested_item(&mut self, line: Line<'a>, text: &str) {
        let kind = match classify_item(text) {
            Item::Headers => SectionKind::Headers,
            Item::Body => SectionKind::Body,
            Item::Schema => SectionKind::Schema,
            _ => SectionKind::Ignored,
        };
        self.section = Some(Section::opened_by(kind, line));
    }

    fn close_message(&mut self) {
        self.close_section();
        self.message = None;
    }

    fn close_section(&mut self) {
        let Some(section) = self.section.take() else {
            return;
        };
        if section.kind == SectionKind::Ignored {
            return;
        }

        let misindented = section
            .content
            .iter()
            .any(|l| !l.is_blank() && l.indent < section.expected_indent);
        if misindented {
            self.warn(
                DiagnosticCode::Indentation,
                section.opener,
                format!(
                    "{} asset is expected to be a pre-formatted code block, every of its line indented by exactly {} spaces",
                    section.kind.asset_name(),
                    section.expected_indent
                ),
            );
        }

        let text = dedent(&section.content);
        if text.is_empty() {
            self.warn(
                DiagnosticCode::EmptyDefinition,
                section.opener,
                format!("empty '{}' section", section.kind.keyword()),
            );
            return;
        }

        match section.kind {
            SectionKind::Headers => self.apply_headers(&section.content),
            SectionKind::Body | SectionKind::ImplicitBody => {
                if let Some(message) = self.message_mut() {
                    message.body = text;
                }
            }
            SectionKind::Schema => {
                if let Some(message) = self.message_mut() {
                    message.schema = text;
                }
            }
            SectionKind::Ignored => {}
        }
    }

    fn apply_headers(&mut self, content: &[Line<'a>]) {
        let mut parsed = Vec::new();
        let mut problems = Vec::new();
        for line in content.iter().filter(|l| !l.is_blank()) {
            match line.text.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    parsed.push((*line, Header::new(name.trim(), value.trim())));
                }
                _ => problems.push((
                    *line,
                    DiagnosticCode::Http,
                    "unable to parse HTTP header, expected '<header name> : <header value>', one header per line"
                        .to_string(),
                )),
            }
        }

        if let Some(message) = self.message_mut() {
            for (line, header) in parsed {
                if message
                    .headers
                    .iter()
                    .any(|h| h.name.eq_ignore_ascii_case(&header.name))
                {
                    problems.push((
                        line,
                        DiagnosticCode::Duplicate,
                        format!("duplicate definition of '{}' header", header.name),
                    ));
                }
                message.headers.push(header);
            }
        }

        for (line, code, message) in problems {
            self.warn(code, line, message);
        }
    }

    fn message_mut(&mut self) -> Option<&mut Message> {
        let (kind, _) = self.message?;
        let example = self.action_mut()?.examples.last_mut()?;
        match kind {
            MessageKind::Request => example.requests.last_mut(),
            MessageKind::Response => example.responses.last_mut(),
        }
    }
}

/// Joins section lines, trimming blank lines at both ends and removing the
/// common indentation.
fn dedent(lines: &[Line<'_>]) -> String {
    let first = lines.iter().position(|l| !l.is_blank());
    let last = lines.iter().rposition(|l| !l.is_blank());
    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };
    let lines = &lines[first..=last];
    let margin = lines
        .iter()
        .filter(|l| !l.is_blank())
        .map(|l| l.indent)
        .min()
        .unwrap_or(0);

    let mut text = String::new();
    for line in lines {
        if !line.is_blank() {
            text.push_str(&" ".repeat(line.indent - margin));
            text.push_str(line.text);
        }
        text.push('\n');
    }
    text
}

/// `Key: Value` metadata at the top of a document.
fn metadata_entry(line: Line<'_>) -> Option<Metadata> {
    if line.indent != 0 {
        return None;
    }
    let (name, value) = line.text.split_once(':')?;
    let valid_name = name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    let value = value.trim();
    (valid_name && !value.is_empty()).then(|| Metadata {
        name: name.to_string(),
        value: value.to_string(),
    })
}
