//! Access control seam for package- and version-level grants.

use std::collections::HashSet;

use crate::models::{Identity, Package, Version};

/// Decides whether an identity may see a package or one of its versions.
///
/// The two checks are independent: a package-level grant never implies
/// access to any particular version. Both are pure functions of their
/// arguments and must be safe to call concurrently across requests.
pub trait AccessChecker {
    /// Package-level grant.
    fn is_package_granted(&self, identity: &Identity, package: &Package) -> bool;

    /// Version-level grant, checked independently of the package grant.
    fn is_version_granted(&self, identity: &Identity, version: &Version) -> bool;
}

/// Grant table resolving access from explicit per-identity sets.
///
/// A version is visible through either a single-version grant or a blanket
/// grant covering every version of its package.
#[derive(Debug, Clone, Default)]
pub struct GrantTable {
    packages: HashSet<(u64, u64)>,
    versions: HashSet<(u64, u64)>,
    all_versions: HashSet<(u64, u64)>,
}

impl GrantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `identity_id` package-level access.
    pub fn grant_package(&mut self, identity_id: u64, package_id: u64) -> &mut Self {
        self.packages.insert((identity_id, package_id));
        self
    }

    /// Grants `identity_id` a single version.
    pub fn grant_version(&mut self, identity_id: u64, version_id: u64) -> &mut Self {
        self.versions.insert((identity_id, version_id));
        self
    }

    /// Grants `identity_id` every version of a package, present and future.
    pub fn grant_all_versions(&mut self, identity_id: u64, package_id: u64) -> &mut Self {
        self.all_versions.insert((identity_id, package_id));
        self
    }
}

impl AccessChecker for GrantTable {
    fn is_package_granted(&self, identity: &Identity, package: &Package) -> bool {
        self.packages.contains(&(identity.id, package.id))
    }

    fn is_version_granted(&self, identity: &Identity, version: &Version) -> bool {
        self.versions.contains(&(identity.id, version.id))
            || self.all_versions.contains(&(identity.id, version.package_id))
    }
}
