//! Movie Store is a small in-memory movie catalog served over HTTP.
//!
//! Every write goes through a fixed schema first: a full record for creation,
//! a partial one for updates. Only validated data ever reaches the store, and
//! a rejected request comes back with one error per offending field.
//!
//! ## Core Components
//! - [`schema`]: Field-level validation of untyped JSON candidates.
//! - [`engine`]: The in-memory record store and its startup seed.
//! - [`catalog`]: The entry points that compose validation with the store.
//! - [`server`]: The HTTP daemon (axum router, CORS, shutdown).

pub mod catalog;
pub mod engine;
pub mod model;
pub mod schema;
pub mod server;

use async_trait::async_trait;
use thiserror::Error;

pub use catalog::Catalog;
pub use model::{Genre, Movie, MovieDraft, MoviePatch};
pub use schema::{FieldError, FieldErrorKind, ValidationErrors};

/// Errors returned by the Movie Store.
#[derive(Error, Debug)]
pub enum Error {
    /// No movie with the requested id exists.
    #[error("movie not found")]
    MovieNotFound,
    /// The candidate body violated one or more schema constraints.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
    /// An I/O error occurred while reading the seed or serving connections.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

/// A specialized Result type for Movie Store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Defines read operations over the movie collection.
#[async_trait]
pub trait MovieReader: Send + Sync {
    /// Lists all movies in insertion order.
    ///
    /// With a `genre`, only movies carrying that genre are returned. The
    /// comparison ignores case, so `"action"` matches [`Genre::Action`].
    async fn list(&self, genre: Option<&str>) -> Result<Vec<Movie>>;
    /// Retrieves a single movie by id.
    async fn get(&self, id: &str) -> Result<Movie>;
}

/// Defines write operations over the movie collection.
///
/// Callers are expected to hand in data that already passed [`schema`]
/// validation; the writer does not re-check it.
#[async_trait]
pub trait MovieWriter: Send + Sync {
    /// Stores a new movie under a freshly generated id and returns it.
    async fn insert(&self, draft: MovieDraft) -> Result<Movie>;
    /// Removes the movie with the given id.
    async fn delete(&self, id: &str) -> Result<()>;
    /// Overwrites the fields present in `patch` on an existing movie and
    /// returns the merged record. The id is never touched.
    async fn replace(&self, id: &str, patch: MoviePatch) -> Result<Movie>;
}

/// The complete storage interface used by the [`Catalog`].
pub trait MovieStore: MovieReader + MovieWriter {}

impl<T: MovieReader + MovieWriter> MovieStore for T {}
