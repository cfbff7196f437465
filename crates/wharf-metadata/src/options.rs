//! Transport option bag attached to metadata documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flat key/value bag carrying transport-layer hints for a document.
///
/// The core never interprets these values. The serving layer reads them to
/// decide on compression, cache lifetimes and similar concerns, and may
/// persist them next to cached documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataOptions(BTreeMap<String, Value>);

impl MetadataOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets a single option, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Shallow-merges `other` into this bag. Keys from `other` win.
    pub fn merge(&mut self, other: MetadataOptions) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the stored key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for MetadataOptions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::MetadataOptions;

    #[test]
    fn test_set_and_get() {
        let mut options = MetadataOptions::new();
        assert!(options.is_empty());

        options.set("ttl", 600);
        options.set("gzip", true);
        assert_eq!(options.get("ttl"), Some(&json!(600)));
        assert_eq!(options.get("gzip"), Some(&json!(true)));
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_merge_later_keys_win() {
        let mut options: MetadataOptions = [
            ("ttl".to_string(), json!(600)),
            ("gzip".to_string(), json!(false)),
        ]
        .into_iter()
        .collect();

        let overrides: MetadataOptions =
            [("gzip".to_string(), json!(true))].into_iter().collect();
        options.merge(overrides);

        assert_eq!(options.get("gzip"), Some(&json!(true)));
        assert_eq!(options.get("ttl"), Some(&json!(600)));
    }

    #[test]
    fn test_serde_round_trip() {
        let options: MetadataOptions = [("max-age".to_string(), json!(3600))]
            .into_iter()
            .collect();
        let encoded = serde_json::to_string(&options).unwrap();
        assert_eq!(encoded, r#"{"max-age":3600}"#);
        let decoded: MetadataOptions = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, options);
    }
}
