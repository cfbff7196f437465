//! ACL-filtered metadata synthesis for a Composer-style private registry.
//!
//! This crate turns a package/version store into the byte-exact,
//! hash-addressed JSON documents a registry serves: the root index, the
//! providers manifest and one metadata document per package, each filtered
//! for the requesting identity.
//!
//! # Overview
//!
//! [`MetadataDumper`] orchestrates three narrow collaborator seams:
//!
//! - [`PackageStore`]: read-only package/version queries, batched
//! - [`AccessChecker`]: independent package-level and version-level grants
//! - [`RouteGenerator`]: concrete URLs for the notify callback routes
//!
//! Denied and unknown entries degrade to empty results rather than errors,
//! so the synthesized output never discloses what exists.
//!
//! # Example
//!
//! ```
//! use wharf_registry::{
//!     GrantTable, InMemoryStore, MetadataDumper, Package, StaticRoutes, Version,
//! };
//!
//! let mut store = InMemoryStore::new();
//! store.add_package(
//!     Package::new(1, "acme/widget").with_versions(vec![Version::new(11, 1, "1.0")]),
//! );
//!
//! let dumper = MetadataDumper::new(store, GrantTable::new(), StaticRoutes::new(""));
//! let dump = dumper.dump(None)?;
//! assert!(dump.packages.contains_key("acme/widget"));
//! assert!(dump.root.hash().is_some());
//! # Ok::<(), wharf_registry::RegistryError>(())
//! ```

pub mod acl;
pub mod constants;
pub mod dumper;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use acl::{AccessChecker, GrantTable};
pub use dumper::{
    MetadataDumper, PackageMetadata, PackageRef, ProviderDigest, ProviderManifest, RegistryDump,
    RootIndex,
};
pub use error::{RegistryError, Result};
pub use models::{Identity, Package, Version};
pub use routes::{Route, RouteGenerator, StaticRoutes};
pub use store::{InMemoryStore, PackageStore};
