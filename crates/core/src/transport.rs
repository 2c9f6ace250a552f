//! Transport trait definition
//!
//! This trait defines the four HTTP calls the account client needs. It keeps
//! the core decoupled from any HTTP library; `gf-http` provides the reqwest
//! implementation and tests use a mock.

use async_trait::async_trait;
use url::Url;

use crate::envelope::Envelope;
use crate::error::Result;

/// Ordered `application/x-www-form-urlencoded` fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, String)>,
}

impl Form {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append a field only when a value is present
    pub fn field_opt(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    /// Value of the first field with the given name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single part of a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Plain text field
    Text { name: String, value: String },

    /// Raw file content
    File {
        name: String,
        file_name: String,
        content: Vec<u8>,
    },
}

impl Part {
    /// Name of the form field this part fills
    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => name,
        }
    }
}

/// Ordered `multipart/form-data` parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multipart {
    parts: Vec<Part>,
}

impl Multipart {
    /// Create an empty multipart body
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text part
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append a file part
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        self.parts.push(Part::File {
            name: name.into(),
            file_name: file_name.into(),
            content,
        });
        self
    }

    /// Value of the first text part with the given name
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            Part::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Whether a part with the given name exists
    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p.name() == name)
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// HTTP calls used by the account client
///
/// Every call except [`Transport::get_raw`] parses the response body as an
/// [`Envelope`], whatever the HTTP status, because the service reports its
/// errors in-band. Implementations
/// must reject an empty form or multipart body with
/// [`Error::InvalidArgument`](crate::Error::InvalidArgument) before sending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET the url
    async fn get(&self, url: &Url) -> Result<Envelope>;

    /// GET the url and return the body as received, without parsing
    async fn get_raw(&self, url: &Url) -> Result<String>;

    /// PUT a url-encoded form
    async fn put_form(&self, url: &Url, form: Form) -> Result<Envelope>;

    /// DELETE with a url-encoded form body
    async fn delete_form(&self, url: &Url, form: Form) -> Result<Envelope>;

    /// POST a multipart body
    async fn post_multipart(&self, url: &Url, body: Multipart) -> Result<Envelope>;
}
