/// HTTP server implementation for the Movie Store daemon.
///
/// This module provides the [`Server`] which builds the axum router for the
/// `/movies` resource and serves it with CORS and a concurrency limit.
pub mod config;
pub mod response;
pub mod router;

pub use config::ServerConfig;
pub use router::{app, Server};
