//! The movie catalog entry points.
//!
//! [`Catalog`] is what the transport layer talks to. Write operations run the
//! candidate body through [`schema`] first; the store is only touched once
//! validation has succeeded, so a rejected request never changes state.

use std::sync::Arc;

use log::{debug, info};
use serde_json::Value;

use crate::model::Movie;
use crate::{schema, MovieStore, Result};

/// Validated access to a [`MovieStore`].
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn MovieStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    /// Lists movies, optionally filtered by genre. An empty filter string is
    /// treated as no filter.
    pub async fn list_movies(&self, genre: Option<&str>) -> Result<Vec<Movie>> {
        let genre = genre.filter(|g| !g.is_empty());
        self.store.list(genre).await
    }

    pub async fn get_movie(&self, id: &str) -> Result<Movie> {
        self.store.get(id).await
    }

    /// Validates `body` as a complete movie and stores it under a new id.
    pub async fn create_movie(&self, body: &Value) -> Result<Movie> {
        let draft = schema::validate(body).map_err(|e| {
            debug!("Rejected new movie: {}", e);
            e
        })?;
        let movie = self.store.insert(draft).await?;
        info!("Created movie {} ({})", movie.id, movie.title);
        Ok(movie)
    }

    /// Validates the fields present in `body` and merges them onto the
    /// stored movie.
    ///
    /// The body is validated before the id is looked up, so an invalid body
    /// is reported as such even when the id does not exist.
    pub async fn update_movie_partial(&self, id: &str, body: &Value) -> Result<Movie> {
        let patch = schema::validate_partial(body).map_err(|e| {
            debug!("Rejected update for movie {}: {}", id, e);
            e
        })?;
        let movie = self.store.replace(id, patch).await?;
        info!("Updated movie {}", movie.id);
        Ok(movie)
    }

    pub async fn delete_movie(&self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        info!("Deleted movie {}", id);
        Ok(())
    }
}
