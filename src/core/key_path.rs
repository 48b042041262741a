use std::fmt;
use std::str::FromStr;

use super::error::DocumentError;

/// Ordered, non-empty sequence of segments addressing a node in a document.
///
/// Written dotted on the command line and in entry files: `crm.leads.columns.status`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Build a key path from explicit segments.
    ///
    /// Segments may contain any character, including dots; only emptiness is rejected.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(DocumentError::EmptyKeyPath);
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(DocumentError::InvalidKeyPath {
                path: segments.join("."),
                reason: "segments cannot be empty".to_string(),
            });
        }
        Ok(Self { segments })
    }

    /// Wrap segments read from an existing document, where any key is legal.
    pub(crate) fn from_document(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Parse a dotted key such as `common.editTitle`.
    ///
    /// Keys must:
    /// - Not be empty
    /// - Not start or end with '.'
    /// - Not contain consecutive dots '..'
    /// - Not contain whitespace or control characters
    pub fn parse(key: &str) -> Result<Self, DocumentError> {
        let invalid = |reason: &str| DocumentError::InvalidKeyPath {
            path: key.to_string(),
            reason: reason.to_string(),
        };

        if key.is_empty() {
            return Err(DocumentError::EmptyKeyPath);
        }
        if key.starts_with('.') {
            return Err(invalid("cannot start with '.'"));
        }
        if key.ends_with('.') {
            return Err(invalid("cannot end with '.'"));
        }
        if key.contains("..") {
            return Err(invalid("cannot contain consecutive dots '..'"));
        }
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid("cannot contain whitespace or control characters"));
        }

        Ok(Self {
            segments: key.split('.').map(String::from).collect(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, i.e. the leaf key.
    pub fn last(&self) -> &str {
        // Non-empty by construction.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Dotted form of the first `len` segments.
    pub fn prefix(&self, len: usize) -> String {
        self.segments[..len.min(self.segments.len())].join(".")
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
