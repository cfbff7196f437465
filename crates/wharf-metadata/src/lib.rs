//! Metadata document model for the wharf registry server.
//!
//! This crate provides the value types the registry core hands to its
//! serving layer: immutable, hash-addressed containers for serialized JSON
//! documents.
//!
//! # Overview
//!
//! A [`MetadataDocument`] wraps the exact bytes served to a client together
//! with a creation timestamp, an optional content digest and a bag of
//! transport hints ([`MetadataOptions`]). Documents are never mutated in
//! place: every content change goes through [`MetadataDocument::with_content`]
//! and produces a fresh instance with its digest cleared, so cached copies
//! stay valid by construction.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use wharf_metadata::{DocumentContent, MetadataDocument};
//!
//! let doc = MetadataDocument::new(br#"{"packages":{}}"#.to_vec());
//! let doc = doc.with_content(DocumentContent::transform(|mut root| {
//!     root.insert("notify".into(), json!("/downloads/%package%"));
//!     serde_json::Value::Object(root)
//! }));
//! assert!(doc.hash().is_none());
//! assert!(doc.decode_json().contains_key("notify"));
//! ```

pub mod content;
pub mod document;
pub mod error;
pub mod options;

pub use content::DocumentContent;
pub use document::MetadataDocument;
pub use error::{MetadataError, Result};
pub use options::MetadataOptions;
