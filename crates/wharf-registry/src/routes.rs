//! Callback route generation seam.

/// Named callback routes the registry documents point clients at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Per-package download notification endpoint.
    TrackDownload { package: &'a str },
    /// Batched download notification endpoint.
    TrackDownloadBatch,
}

/// Produces concrete URLs for named routes.
///
/// Implemented by the embedding HTTP layer; the core only splices the
/// results into the root index.
pub trait RouteGenerator {
    fn generate(&self, route: Route<'_>) -> String;
}

/// Route table backed by fixed path patterns under one base URL.
#[derive(Debug, Clone)]
pub struct StaticRoutes {
    base_url: String,
}

impl StaticRoutes {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
        }
    }
}

impl RouteGenerator for StaticRoutes {
    fn generate(&self, route: Route<'_>) -> String {
        match route {
            Route::TrackDownload {
                package,
            } => format!("{}/downloads/{package}", self.base_url),
            Route::TrackDownloadBatch => format!("{}/downloads", self.base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Route, RouteGenerator, StaticRoutes};

    #[test]
    fn test_static_routes() {
        let routes = StaticRoutes::new("https://repo.example.org");
        assert_eq!(
            routes.generate(Route::TrackDownload {
                package: "acme/widget",
            }),
            "https://repo.example.org/downloads/acme/widget"
        );
        assert_eq!(
            routes.generate(Route::TrackDownloadBatch),
            "https://repo.example.org/downloads"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let routes = StaticRoutes::new("https://repo.example.org/");
        assert_eq!(
            routes.generate(Route::TrackDownloadBatch),
            "https://repo.example.org/downloads"
        );
    }

    #[test]
    fn test_relative_base() {
        let routes = StaticRoutes::new("");
        assert_eq!(routes.generate(Route::TrackDownloadBatch), "/downloads");
    }
}
