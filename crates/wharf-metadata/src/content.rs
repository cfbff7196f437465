//! Replacement content accepted by [`MetadataDocument::with_content`].
//!
//! [`MetadataDocument::with_content`]: crate::MetadataDocument::with_content

use std::fmt;

use serde_json::{Map, Value};

/// The three forms a document rewrite can take.
///
/// Mirrors the ways the serving layer rewrites documents: pass raw bytes
/// through unchanged, serialize a structured value canonically, or rewrite
/// the previously decoded object with a pure function.
pub enum DocumentContent {
    /// Literal bytes stored as-is.
    Raw(Vec<u8>),
    /// Structured value, serialized with sorted object keys.
    Json(Value),
    /// Rewrite of the previously decoded object. The function receives the
    /// current content decoded as a JSON object and returns the new value to
    /// serialize.
    Transform(Box<dyn FnOnce(Map<String, Value>) -> Value>),
}

impl DocumentContent {
    /// Wraps a rewrite function over the previously decoded object.
    pub fn transform<F>(f: F) -> Self
    where
        F: FnOnce(Map<String, Value>) -> Value + 'static,
    {
        Self::Transform(Box::new(f))
    }
}

impl fmt::Debug for DocumentContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(bytes) => f.debug_tuple("Raw").field(&bytes.len()).finish(),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

impl From<Vec<u8>> for DocumentContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Raw(bytes)
    }
}

impl From<&[u8]> for DocumentContent {
    fn from(bytes: &[u8]) -> Self {
        Self::Raw(bytes.to_vec())
    }
}

impl From<String> for DocumentContent {
    fn from(content: String) -> Self {
        Self::Raw(content.into_bytes())
    }
}

impl From<&str> for DocumentContent {
    fn from(content: &str) -> Self {
        Self::Raw(content.as_bytes().to_vec())
    }
}

impl From<Value> for DocumentContent {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}
