use std::collections::HashSet;
use std::fs;
use std::path::Path;
use serde_json::Value;
use log::{info, warn};
use crate::Result;
use crate::model::{new_movie_id, Movie};
use crate::schema;

#[allow(unused_imports)]
use crate::engine::MemStore;

const BUILTIN_SEED: &str = include_str!("../../data/movies.json");

/// Loads the initial movie collection for a [`MemStore`] from a JSON file.
///
/// The file must hold a JSON array of movie objects. See [`from_slice`] for
/// how individual entries are treated.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Movie>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let movies = from_slice(&bytes)?;
    info!("Loaded {} movies from {:?}", movies.len(), path);
    Ok(movies)
}

/// Parses the seed bundled with the crate (`data/movies.json`).
pub fn builtin() -> Result<Vec<Movie>> {
    from_slice(BUILTIN_SEED.as_bytes())
}

/// Parses a seed document.
///
/// Every entry goes through full schema validation so the store never starts
/// with a record it would have rejected. Entries that fail validation, or
/// that reuse an id seen earlier in the document, are skipped with a warning.
/// A string `id` on an entry is kept; entries without one get a fresh id.
pub fn from_slice(bytes: &[u8]) -> Result<Vec<Movie>> {
    let entries: Vec<Value> = serde_json::from_slice(bytes)?;
    let mut seen = HashSet::new();
    let mut movies = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let draft = match schema::validate(entry) {
            Ok(d) => d,
            Err(e) => {
                warn!("Skipping seed entry {}: {}", index, e);
                continue;
            }
        };

        let id = match entry.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            _ => new_movie_id(),
        };
        if !seen.insert(id.clone()) {
            warn!("Skipping seed entry {}: duplicate id {}", index, id);
            continue;
        }

        movies.push(Movie::from_draft(id, draft));
    }

    Ok(movies)
}
