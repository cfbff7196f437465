//! Hash-addressed container for serialized registry documents.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;
use wharf_utils::gzip;

use crate::{content::DocumentContent, error::Result, options::MetadataOptions};

/// Immutable, hash-addressed container for a serialized JSON document.
///
/// A document wraps the exact bytes served for one registry endpoint,
/// together with a creation timestamp, an optional sha256 digest of those
/// bytes and a bag of transport hints. Content-changing operations return a
/// new instance with the digest cleared; the receiver is never touched, so
/// any number of threads can hold and read the same document concurrently.
#[derive(Debug, Clone)]
pub struct MetadataDocument {
    content: Vec<u8>,
    created_at: DateTime<Utc>,
    hash: Option<String>,
    options: MetadataOptions,
    not_modified: bool,
}

impl MetadataDocument {
    /// Creates a document from its serialized bytes, stamped with the
    /// current time, no digest and empty options.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            created_at: Utc::now(),
            hash: None,
            options: MetadataOptions::new(),
            not_modified: false,
        }
    }

    /// Sentinel for "unchanged since `timestamp`".
    ///
    /// Carries no body. The serving layer must answer such a document from
    /// its cache and suppress body emission entirely.
    pub fn not_modified_at(timestamp: DateTime<Utc>) -> Self {
        Self {
            content: Vec::new(),
            created_at: timestamp,
            hash: None,
            options: MetadataOptions::new(),
            not_modified: true,
        }
    }

    /// Replaces the creation timestamp.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.created_at = timestamp;
        self
    }

    /// Stamps a precomputed digest of the stored bytes.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Replaces the option bag.
    pub fn with_options(mut self, options: MetadataOptions) -> Self {
        self.options = options;
        self
    }

    /// Creation time of the content, in UTC.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `true` for the sentinel produced by [`MetadataDocument::not_modified_at`].
    pub fn is_not_modified(&self) -> bool {
        self.not_modified
    }

    /// The stored content digest, if one has been computed.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Transport hints attached to this document.
    pub fn options(&self) -> &MetadataOptions {
        &self.options
    }

    /// Returns the document body, gunzipping lazily when the stored bytes
    /// carry the gzip magic.
    ///
    /// Pure read: never mutates the document. A corrupt gzip stream degrades
    /// to the stored bytes unchanged.
    pub fn content(&self) -> Cow<'_, [u8]> {
        if gzip::is_gzipped(&self.content) {
            match gzip::decompress(&self.content) {
                Ok(bytes) => Cow::Owned(bytes),
                Err(err) => {
                    warn!("Failed to decode stored document content: {err}");
                    Cow::Borrowed(&self.content)
                }
            }
        } else {
            Cow::Borrowed(&self.content)
        }
    }

    /// Parses the document body as a JSON object.
    ///
    /// Malformed content and non-object payloads both yield an empty map, so
    /// callers never special-case parse failures.
    pub fn decode_json(&self) -> Map<String, Value> {
        match serde_json::from_slice(&self.content()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Returns a new document with replaced content and a cleared digest.
    ///
    /// The timestamp and options carry over. The receiver keeps its content
    /// and digest untouched.
    pub fn with_content(&self, content: impl Into<DocumentContent>) -> Self {
        let content = match content.into() {
            DocumentContent::Raw(bytes) => bytes,
            DocumentContent::Json(value) => encode_json(&value),
            DocumentContent::Transform(rewrite) => encode_json(&rewrite(self.decode_json())),
        };

        Self {
            content,
            created_at: self.created_at,
            hash: None,
            options: self.options.clone(),
            not_modified: false,
        }
    }

    /// Shallow-merges options into the bag. Content and digest are untouched.
    pub fn set_options(&mut self, options: MetadataOptions) {
        self.options.merge(options);
    }

    /// Sets a single option. Content and digest are untouched.
    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.options.set(key, value);
    }

    /// Returns a document whose stored bytes are gzip-compressed.
    ///
    /// The logical content is unchanged, so the digest and timestamp carry
    /// over. Sentinels and already-compressed documents pass through as-is.
    pub fn into_gzipped(self) -> Result<Self> {
        if self.not_modified || gzip::is_gzipped(&self.content) {
            return Ok(self);
        }
        let content = gzip::compress(&self.content)?;
        Ok(Self {
            content,
            ..self
        })
    }
}

/// Serializing a `Value` only fails on non-string map keys, which `Value`
/// cannot hold; degrade to an empty body on the unreachable path.
fn encode_json(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use serde_json::{json, Value};
    use wharf_utils::gzip;

    use super::{DocumentContent, MetadataDocument, MetadataOptions};

    fn timestamp() -> chrono::DateTime<chrono::Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_decode_json_malformed_content() {
        let cases: [&[u8]; 6] = [
            b"not json",
            b"",
            b"[1,2,3]",
            b"42",
            b"\"scalar\"",
            b"{\"unterminated\":",
        ];
        for content in cases {
            let doc = MetadataDocument::new(content.to_vec());
            assert!(doc.decode_json().is_empty(), "content: {content:?}");
        }
    }

    #[test]
    fn test_decode_json_object() {
        let doc = MetadataDocument::new(br#"{"providers":{}}"#.to_vec());
        let decoded = doc.decode_json();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.get("providers"), Some(&json!({})));
    }

    #[test]
    fn test_with_content_never_mutates_receiver() {
        let doc = MetadataDocument::new(br#"{"a":1}"#.to_vec()).with_hash("abc123");
        let rewritten = doc.with_content(br#"{"b":2}"#.to_vec());

        assert_eq!(doc.hash(), Some("abc123"));
        assert_eq!(doc.content().as_ref(), &br#"{"a":1}"#[..]);
        assert_eq!(rewritten.content().as_ref(), &br#"{"b":2}"#[..]);
    }

    #[test]
    fn test_with_content_clears_hash() {
        let doc = MetadataDocument::new(b"{}".to_vec()).with_hash("abc123");
        assert!(doc.with_content(b"{}".to_vec()).hash().is_none());
        assert!(doc.with_content(json!({"a": 1})).hash().is_none());
    }

    #[test]
    fn test_with_content_carries_timestamp_and_options() {
        let mut doc = MetadataDocument::new(b"{}".to_vec()).at(timestamp());
        doc.set_option("ttl", 600);

        let rewritten = doc.with_content(json!({"a": 1}));
        assert_eq!(rewritten.last_modified(), timestamp());
        assert_eq!(rewritten.options().get("ttl"), Some(&json!(600)));
    }

    #[test]
    fn test_with_content_json_serializes_sorted() {
        let doc = MetadataDocument::new(Vec::new());
        let rewritten = doc.with_content(json!({"b": 1, "a": 2}));
        assert_eq!(rewritten.content().as_ref(), &br#"{"a":2,"b":1}"#[..]);
    }

    #[test]
    fn test_with_content_transform_sees_decoded_object() {
        let doc = MetadataDocument::new(br#"{"count":1}"#.to_vec());
        let rewritten = doc.with_content(DocumentContent::transform(|mut root| {
            let count = root.get("count").and_then(Value::as_i64).unwrap_or(0);
            root.insert("count".into(), json!(count + 1));
            Value::Object(root)
        }));
        assert_eq!(rewritten.decode_json().get("count"), Some(&json!(2)));
    }

    #[test]
    fn test_not_modified_sentinel() {
        let doc = MetadataDocument::not_modified_at(timestamp());
        assert!(doc.is_not_modified());
        assert!(doc.content().is_empty());
        assert!(doc.hash().is_none());
        assert_eq!(doc.last_modified(), timestamp());
    }

    #[test]
    fn test_set_options_keeps_content_and_hash() {
        let mut doc = MetadataDocument::new(b"{}".to_vec()).with_hash("abc123");
        doc.set_options(
            [("gzip".to_string(), json!(true))].into_iter().collect::<MetadataOptions>(),
        );
        doc.set_option("ttl", 600);

        assert_eq!(doc.hash(), Some("abc123"));
        assert_eq!(doc.content().as_ref(), &b"{}"[..]);
        assert_eq!(doc.options().get("gzip"), Some(&json!(true)));
        assert_eq!(doc.options().get("ttl"), Some(&json!(600)));
    }

    #[test]
    fn test_into_gzipped_round_trip() {
        let body = br#"{"packages":{"acme/widget":{}}}"#.to_vec();
        let doc = MetadataDocument::new(body.clone())
            .at(timestamp())
            .with_hash("abc123");

        let compressed = doc.into_gzipped().unwrap();
        assert!(gzip::is_gzipped(&compressed.content));
        assert_eq!(compressed.content().as_ref(), &body[..]);
        assert_eq!(compressed.hash(), Some("abc123"));
        assert_eq!(compressed.last_modified(), timestamp());

        // A second pass is a no-op.
        let stored = compressed.content.clone();
        let again = compressed.into_gzipped().unwrap();
        assert_eq!(again.content, stored);
    }

    #[test]
    fn test_corrupt_gzip_degrades_to_stored_bytes() {
        let mut corrupt = gzip::compress(b"{\"a\":1}").unwrap();
        let cut = corrupt.len() / 2;
        corrupt.truncate(cut);

        let doc = MetadataDocument::new(corrupt.clone());
        assert_eq!(doc.content().as_ref(), &corrupt[..]);
        assert!(doc.decode_json().is_empty());
    }

    #[test]
    fn test_content_lazy_decompression() {
        let body = br#"{"providers":{"acme/widget":{"sha256":"aa"}}}"#;
        let doc = MetadataDocument::new(gzip::compress(body).unwrap());
        assert_eq!(doc.content().as_ref(), &body[..]);
        assert_eq!(
            doc.decode_json().get("providers"),
            Some(&json!({"acme/widget": {"sha256": "aa"}}))
        );
    }
}
