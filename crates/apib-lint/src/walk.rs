//! # Tree Walker
//!
//! Flattens a [`Document`] into the examples it contains, each paired with
//! the action, resource and group that enclose it. The walk is a plain
//! iterator over borrowed data: it has no side effects and can be cloned to
//! restart from the beginning.

use apib_core::{Action, Document, Example, Resource, ResourceGroup};

/// An example together with its enclosing scopes.
#[derive(Debug, Clone, Copy)]
pub struct ExampleContext<'a> {
    pub example: &'a Example,
    pub action: &'a Action,
    pub resource: &'a Resource,
    pub group: &'a ResourceGroup,
}

impl ExampleContext<'_> {
    /// Human-readable location, e.g.
    /// `in group "Notes", resource "Note", action "Get", example "1"`.
    ///
    /// Unnamed scopes are left out, except the resource, which falls back
    /// to its URI template.
    pub fn location(&self) -> String {
        let mut segments = Vec::with_capacity(4);
        if let Some(group) = self.group.label() {
            segments.push(format!("group \"{group}\""));
        }
        let resource = self
            .resource
            .label()
            .unwrap_or(self.resource.uri_template.as_str());
        segments.push(format!("resource \"{resource}\""));
        if let Some(action) = self.action.label() {
            segments.push(format!("action \"{action}\""));
        }
        if let Some(example) = self.example.label() {
            segments.push(format!("example \"{example}\""));
        }
        format!("in {}", segments.join(", "))
    }
}

/// Every example of `document` in document order. An absent document has
/// no examples.
pub fn examples<'a>(
    document: Option<&'a Document>,
) -> impl Iterator<Item = ExampleContext<'a>> + Clone + 'a {
    document
        .into_iter()
        .flat_map(|doc| doc.resource_groups.iter())
        .flat_map(|group| {
            group.resources.iter().flat_map(move |resource| {
                resource.actions.iter().flat_map(move |action| {
                    action.examples.iter().map(move |example| ExampleContext {
                        example,
                        action,
                        resource,
                        group,
                    })
                })
            })
        })
}
