//! # Document Model
//!
//! The tree a blueprint parser hands to the linter:
//!
//! ```text
//! Document
//! └── ResourceGroup*
//!     └── Resource*          (uri_template always present)
//!         └── Action*
//!             └── Example*
//!                 ├── Request*   (Message)
//!                 └── Response*  (Message)
//! ```
//!
//! Field names serialize in camelCase (`resourceGroups`, `uriTemplate`) so
//! the JSON form lines up with the AST layout API Blueprint tooling uses.

use serde::{Deserialize, Serialize};

/// Root of a parsed blueprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// API name from the first heading, if the source declared one.
    #[serde(default)]
    pub name: Option<String>,
    /// Leading `Key: Value` lines such as `FORMAT: 1A`.
    #[serde(default)]
    pub metadata: Vec<Metadata>,
    /// Resource groups in document order.
    #[serde(default)]
    pub resource_groups: Vec<ResourceGroup>,
}

/// A single metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Key, e.g. `FORMAT` or `HOST`.
    pub name: String,
    /// Value after the colon, trimmed.
    pub value: String,
}

/// A `# Group <name>` section, or the unnamed group holding resources
/// declared outside of one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    /// Group name; `None` for the implicit group.
    #[serde(default)]
    pub name: Option<String>,
    /// Resources in document order.
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// An endpoint, identified by its URI template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Name from `## <name> [<uri>]`; `None` for `## <METHOD> <uri>`.
    #[serde(default)]
    pub name: Option<String>,
    /// URI template such as `/notes/{id}`.
    pub uri_template: String,
    /// Actions in document order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One HTTP method on a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Name from the action heading, e.g. `Create a Note`.
    #[serde(default)]
    pub name: Option<String>,
    /// HTTP method, upper case.
    pub method: String,
    /// Transaction examples in document order.
    #[serde(default)]
    pub examples: Vec<Example>,
}

/// One documented call: requests and the responses they produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// Always `None` from the built-in parser, which never names examples.
    #[serde(default)]
    pub name: Option<String>,
    /// Requests in document order.
    #[serde(default)]
    pub requests: Vec<Message>,
    /// Responses in document order.
    #[serde(default)]
    pub responses: Vec<Message>,
}

/// A request or a response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Request name, or the status code of a response.
    #[serde(default)]
    pub name: Option<String>,
    /// Headers, starting with the `Content-Type` implied by the media type.
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Payload text; empty when none was given.
    #[serde(default)]
    pub body: String,
    /// JSON Schema text; empty when none was given.
    #[serde(default)]
    pub schema: String,
}

/// HTTP header as written in the source. Names keep their original case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Field name, e.g. `Content-Type`.
    pub name: String,
    /// Field value, trimmed.
    pub value: String,
}

impl Header {
    /// Builds a header from anything string-like.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Label helper: empty strings count as absent.
pub(crate) fn non_empty(name: &Option<String>) -> Option<&str> {
    name.as_deref().filter(|n| !n.is_empty())
}

impl ResourceGroup {
    /// Group name, treating `""` as absent.
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}

impl Resource {
    /// Resource name, treating `""` as absent.
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}

impl Action {
    /// Action name, treating `""` as absent.
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}

impl Example {
    /// Example name, treating `""` as absent.
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}
