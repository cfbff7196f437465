//! Package and identity models shared across the registry core.

use serde::{Deserialize, Serialize};

/// A package tracked by the registry.
///
/// Owned by the external store; this core only ever reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Package {
    pub id: u64,
    pub name: String,
    /// Released versions, in the store's order.
    pub versions: Vec<Version>,
}

impl Package {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            versions: Vec::new(),
        }
    }

    pub fn with_versions(mut self, versions: Vec<Version>) -> Self {
        self.versions = versions;
        self
    }
}

/// A single released version of a package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Version {
    pub id: u64,
    pub package_id: u64,
    pub version: String,
}

impl Version {
    pub fn new(id: u64, package_id: u64, version: impl Into<String>) -> Self {
        Self {
            id,
            package_id,
            version: version.into(),
        }
    }
}

/// A requesting identity, resolved by the embedding auth layer.
///
/// Anonymous requests carry no identity and see the unfiltered store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    pub username: String,
}

impl Identity {
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
