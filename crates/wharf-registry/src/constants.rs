//! Protocol constants for the Composer-style registry endpoints.

/// Providers URL template advertised in the root index (v1 protocol).
pub const PROVIDERS_URL_TEMPLATE: &str = "/p/%package%$%hash%.json";

/// Per-package metadata URL template advertised in the root index (v2 protocol).
pub const METADATA_URL_TEMPLATE: &str = "/p2/%package%.json";

/// Shard path keying the root `provider-includes` entry.
pub const PROVIDER_INCLUDES_PATH: &str = "p/providers$%hash%.json";

/// Placeholder clients substitute with a concrete package name.
pub const PACKAGE_PLACEHOLDER: &str = "%package%";

/// Sentinel package name routed through the URL generator, then replaced
/// with [`PACKAGE_PLACEHOLDER`]. Routers URL-encode `%`, so the template
/// cannot be passed through them directly.
pub const ROUTE_SENTINEL: &str = "VND/PKG";
