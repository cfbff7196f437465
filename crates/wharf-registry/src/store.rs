//! Narrow read interface over the package/version store.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;

use crate::{
    error::Result,
    models::{Identity, Package},
};

/// Read-only view of the package/version store consumed by the dumper.
///
/// The dumper depends only on this interface, never on a persistence
/// technology, so any backend (or an in-memory fixture) can stand in.
/// Hard failures (store unavailable, inconsistent rows) surface as
/// [`crate::RegistryError::Store`] and propagate to the caller untouched.
pub trait PackageStore {
    /// Packages visible to `identity`: the group-granted set for a known
    /// identity, every package for anonymous access.
    fn list_visible_packages(&self, identity: Option<&Identity>) -> Result<Vec<Package>>;

    /// Looks up a single package by its unique name.
    fn find_package(&self, name: &str) -> Result<Option<Package>>;

    /// Bulk-loads the serialized detail fields for a set of version ids.
    ///
    /// One call per dump; the dumper never issues per-version queries.
    /// Unknown ids are simply absent from the result.
    fn batch_load_version_fields(&self, ids: &[u64]) -> Result<HashMap<u64, Value>>;
}

/// In-memory [`PackageStore`] backed by plain maps.
///
/// Stands in for the persistence layer in tests and small deployments. The
/// group-membership resolution of a real backend collapses to an explicit
/// per-identity grant set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    packages: Vec<Package>,
    version_fields: HashMap<u64, Value>,
    grants: HashMap<u64, BTreeSet<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a package. Insertion order is the listing order.
    pub fn add_package(&mut self, package: Package) -> &mut Self {
        self.packages.push(package);
        self
    }

    /// Sets the bulk-loadable detail fields for a version id.
    pub fn set_version_fields(&mut self, version_id: u64, fields: Value) -> &mut Self {
        self.version_fields.insert(version_id, fields);
        self
    }

    /// Grants `identity_id` visibility of the named package.
    pub fn grant(&mut self, identity_id: u64, package_name: impl Into<String>) -> &mut Self {
        self.grants
            .entry(identity_id)
            .or_default()
            .insert(package_name.into());
        self
    }
}

impl PackageStore for InMemoryStore {
    fn list_visible_packages(&self, identity: Option<&Identity>) -> Result<Vec<Package>> {
        let packages = match identity {
            None => self.packages.clone(),
            Some(identity) => {
                let granted = self.grants.get(&identity.id);
                self.packages
                    .iter()
                    .filter(|package| {
                        granted.is_some_and(|names| names.contains(&package.name))
                    })
                    .cloned()
                    .collect()
            }
        };
        Ok(packages)
    }

    fn find_package(&self, name: &str) -> Result<Option<Package>> {
        Ok(self
            .packages
            .iter()
            .find(|package| package.name == name)
            .cloned())
    }

    fn batch_load_version_fields(&self, ids: &[u64]) -> Result<HashMap<u64, Value>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.version_fields.get(id).map(|fields| (*id, fields.clone())))
            .collect())
    }
}
