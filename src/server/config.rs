use axum::http::{header, HeaderValue, Method};
use log::warn;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const DEFAULT_PORT: u16 = 1234;

/// Origins allowed to call the API from a browser when none are configured.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:8080",
    "http://localhost:1234",
    "http://movies.com",
    "http://dmedinadev.com",
];

pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Resolved settings for [`Server`](crate::server::Server).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Origins that receive CORS headers. `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
    pub max_concurrent_requests: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl ServerConfig {
    /// Builds the CORS layer for the configured origins.
    ///
    /// Requests without an `Origin` header are served normally; the layer
    /// only decides which cross-origin callers get the allow headers.
    pub fn cors_layer(&self) -> CorsLayer {
        let origins = if self.allowed_origins.iter().any(|o| o == "*") {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(self.allowed_origins.iter().filter_map(|o| {
                match HeaderValue::from_str(o) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin {:?}", o);
                        None
                    }
                }
            }))
        };

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
    }
}
