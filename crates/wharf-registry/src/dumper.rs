//! ACL-filtered synthesis of registry metadata documents.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use wharf_metadata::MetadataDocument;
use wharf_utils::hash::sha256_hex;

use crate::{
    acl::AccessChecker,
    constants::{
        METADATA_URL_TEMPLATE, PACKAGE_PLACEHOLDER, PROVIDERS_URL_TEMPLATE,
        PROVIDER_INCLUDES_PATH, ROUTE_SENTINEL,
    },
    error::Result,
    models::{Identity, Package, Version},
    routes::{Route, RouteGenerator},
    store::PackageStore,
};

/// Digest entry advertised for a provider shard or package document.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderDigest {
    pub sha256: String,
}

/// Providers manifest: one digest per retained package (v1 protocol).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProviderManifest {
    pub providers: BTreeMap<String, ProviderDigest>,
}

/// Per-package metadata document (v1/v2 protocol shape).
#[derive(Debug, Clone, Serialize)]
pub struct PackageMetadata {
    pub packages: BTreeMap<String, Map<String, Value>>,
}

/// Root index advertised at the registry entry point.
///
/// Field order is declaration order, which together with sorted map keys
/// fixes the serialized bytes for a given input.
#[derive(Debug, Clone, Serialize)]
pub struct RootIndex {
    pub packages: Map<String, Value>,
    pub notify: String,
    #[serde(rename = "notify-batch")]
    pub notify_batch: String,
    #[serde(rename = "providers-url")]
    pub providers_url: String,
    #[serde(rename = "metadata-url")]
    pub metadata_url: String,
    #[serde(rename = "available-packages")]
    pub available_packages: Vec<String>,
    #[serde(rename = "provider-includes")]
    pub provider_includes: BTreeMap<String, ProviderDigest>,
}

/// One full synthesis run: root index, providers manifest and the
/// per-package documents, each hash-stamped over its exact serialized bytes.
#[derive(Debug, Clone)]
pub struct RegistryDump {
    pub root: MetadataDocument,
    pub providers: MetadataDocument,
    pub packages: BTreeMap<String, MetadataDocument>,
}

/// Reference to a package: already resolved, or a name to look up.
#[derive(Debug, Clone, Copy)]
pub enum PackageRef<'a> {
    Name(&'a str),
    Resolved(&'a Package),
}

impl<'a> From<&'a str> for PackageRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a Package> for PackageRef<'a> {
    fn from(package: &'a Package) -> Self {
        Self::Resolved(package)
    }
}

/// Builds ACL-filtered, hash-addressed registry documents from the package
/// store.
///
/// One instance serves any number of concurrent requests: it holds no
/// per-request state, and every dump reads the store through the narrow
/// [`PackageStore`] interface with a single bulk field query.
pub struct MetadataDumper<S, A, R> {
    store: S,
    checker: A,
    router: R,
}

impl<S, A, R> MetadataDumper<S, A, R>
where
    S: PackageStore,
    A: AccessChecker,
    R: RouteGenerator,
{
    pub fn new(store: S, checker: A, router: R) -> Self {
        Self {
            store,
            checker,
            router,
        }
    }

    /// Synthesizes the full document set visible to `identity`.
    ///
    /// Packages left without a single visible version are dropped from all
    /// three outputs, never present as an empty entry.
    pub fn dump(&self, identity: Option<&Identity>) -> Result<RegistryDump> {
        let packages = self.store.list_visible_packages(identity)?;
        debug!("Dumping registry metadata for {} package(s)", packages.len());

        // One bulk query covering every version retained by both ACL levels.
        let retained_ids: Vec<u64> = packages
            .iter()
            .filter(|package| self.package_granted(identity, package))
            .flat_map(|package| {
                self.visible_versions(identity, package)
                    .into_iter()
                    .map(|version| version.id)
            })
            .collect();
        let fields = self.store.batch_load_version_fields(&retained_ids)?;

        let mut providers = BTreeMap::new();
        let mut package_docs = BTreeMap::new();
        let mut available_packages = Vec::new();

        for package in &packages {
            let payload = self.dump_package(identity, package, Some(&fields))?;
            if payload.is_empty() {
                continue;
            }

            let document = PackageMetadata {
                packages: BTreeMap::from([(package.name.clone(), payload)]),
            };
            let bytes = serde_json::to_vec(&document)?;
            let digest = sha256_hex(&bytes);

            available_packages.push(package.name.clone());
            providers.insert(
                package.name.clone(),
                ProviderDigest {
                    sha256: digest.clone(),
                },
            );
            package_docs.insert(
                package.name.clone(),
                MetadataDocument::new(bytes).with_hash(digest),
            );
        }

        let manifest = ProviderManifest {
            providers,
        };
        let manifest_bytes = serde_json::to_vec(&manifest)?;
        let manifest_hash = sha256_hex(&manifest_bytes);

        let root = self.root_index(available_packages, &manifest_hash);
        let root_bytes = serde_json::to_vec(&root)?;
        let root_hash = sha256_hex(&root_bytes);

        Ok(RegistryDump {
            root: MetadataDocument::new(root_bytes).with_hash(root_hash),
            providers: MetadataDocument::new(manifest_bytes).with_hash(manifest_hash),
            packages: package_docs,
        })
    }

    /// Dumps the `version -> payload` mapping for a single package.
    ///
    /// Unknown packages and package-level denials both come back as an empty
    /// map; the transport layer decides which status that maps to. When
    /// `fields` is supplied (the batched path from [`MetadataDumper::dump`])
    /// the store is not queried again.
    pub fn dump_package<'a>(
        &self,
        identity: Option<&Identity>,
        package: impl Into<PackageRef<'a>>,
        fields: Option<&HashMap<u64, Value>>,
    ) -> Result<Map<String, Value>> {
        let resolved;
        let package = match package.into() {
            PackageRef::Resolved(package) => package,
            PackageRef::Name(name) => match self.store.find_package(name)? {
                Some(found) => {
                    resolved = found;
                    &resolved
                }
                None => return Ok(Map::new()),
            },
        };

        if !self.package_granted(identity, package) {
            return Ok(Map::new());
        }

        let versions = self.visible_versions(identity, package);
        let loaded;
        let fields = match fields {
            Some(fields) => fields,
            None => {
                let ids: Vec<u64> = versions.iter().map(|version| version.id).collect();
                loaded = self.store.batch_load_version_fields(&ids)?;
                &loaded
            }
        };

        Ok(version_payloads(&versions, fields))
    }

    fn package_granted(&self, identity: Option<&Identity>, package: &Package) -> bool {
        identity.map_or(true, |identity| {
            self.checker.is_package_granted(identity, package)
        })
    }

    fn visible_versions<'p>(
        &self,
        identity: Option<&Identity>,
        package: &'p Package,
    ) -> Vec<&'p Version> {
        package
            .versions
            .iter()
            .filter(|version| {
                identity.map_or(true, |identity| {
                    self.checker.is_version_granted(identity, version)
                })
            })
            .collect()
    }

    fn root_index(&self, available_packages: Vec<String>, manifest_hash: &str) -> RootIndex {
        let notify = self
            .router
            .generate(Route::TrackDownload {
                package: ROUTE_SENTINEL,
            })
            .replace(ROUTE_SENTINEL, PACKAGE_PLACEHOLDER);

        RootIndex {
            packages: Map::new(),
            notify,
            notify_batch: self.router.generate(Route::TrackDownloadBatch),
            providers_url: PROVIDERS_URL_TEMPLATE.to_string(),
            metadata_url: METADATA_URL_TEMPLATE.to_string(),
            available_packages,
            provider_includes: BTreeMap::from([(
                PROVIDER_INCLUDES_PATH.to_string(),
                ProviderDigest {
                    sha256: manifest_hash.to_string(),
                },
            )]),
        }
    }
}

/// Builds the `version -> payload` mapping from bulk-loaded detail fields.
///
/// Each payload is the store-resolved field object with the version string
/// and the opaque `uid` spliced in last.
fn version_payloads(versions: &[&Version], fields: &HashMap<u64, Value>) -> Map<String, Value> {
    let mut payloads = Map::new();
    for version in versions {
        let mut payload = match fields.get(&version.id) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        payload.insert("version".into(), Value::from(version.version.clone()));
        payload.insert("uid".into(), Value::from(version.id));
        payloads.insert(version.version.clone(), Value::Object(payload));
    }
    payloads
}
