use std::future::Future;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use log::info;
use crate::{Catalog, Movie, Result};
use crate::server::config::ServerConfig;
use crate::server::response::body_rejection;

pub struct Server {
    catalog: Catalog,
    config: ServerConfig,
}

impl Server {
    pub fn new(catalog: Catalog, config: ServerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn app(&self) -> Router {
        app(self.catalog.clone(), &self.config)
    }

    /// Binds `0.0.0.0` on the configured port and serves until `shutdown`
    /// resolves.
    pub async fn listen<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(format!("0.0.0.0:{}", self.config.port)).await?;
        self.serve(listener, shutdown).await
    }

    /// Serves on an already bound listener. In-flight requests are allowed to
    /// finish once `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Movie Store listening on {}", listener.local_addr()?);
        axum::serve(listener, self.app())
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

/// Builds the `/movies` router around `catalog`.
pub fn app(catalog: Catalog, config: &ServerConfig) -> Router {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/:id", get(get_movie).patch(update_movie).delete(delete_movie))
        .layer(config.cors_layer())
        .layer(GlobalConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .with_state(catalog)
}

#[derive(Debug, Deserialize)]
struct ListParams {
    genre: Option<String>,
}

async fn list_movies(
    State(catalog): State<Catalog>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Movie>>> {
    Ok(Json(catalog.list_movies(params.genre.as_deref()).await?))
}

async fn get_movie(State(catalog): State<Catalog>, Path(id): Path<String>) -> Result<Json<Movie>> {
    Ok(Json(catalog.get_movie(&id).await?))
}

async fn create_movie(
    State(catalog): State<Catalog>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>)> {
    let Json(body) = body.map_err(body_rejection)?;
    let movie = catalog.create_movie(&body).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

async fn update_movie(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Movie>> {
    let Json(body) = body.map_err(body_rejection)?;
    Ok(Json(catalog.update_movie_partial(&id, &body).await?))
}

async fn delete_movie(State(catalog): State<Catalog>, Path(id): Path<String>) -> Result<Json<Value>> {
    catalog.delete_movie(&id).await?;
    Ok(Json(json!({ "message": "Movie deleted" })))
}
