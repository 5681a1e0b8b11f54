use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use crate::{Result, Error, MovieReader, MovieWriter};
use crate::model::{new_movie_id, Movie, MovieDraft, MoviePatch};

pub struct MemStore {
    movies: RwLock<Vec<Movie>>,
}

impl MemStore {
    pub fn new(initial_movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(initial_movies),
        }
    }

    /// Number of movies currently stored.
    pub fn count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Movie>>> {
        self.movies.read().map_err(|_| Error::Internal("movie store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Movie>>> {
        self.movies.write().map_err(|_| Error::Internal("movie store lock poisoned".to_string()))
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl MovieReader for MemStore {
    async fn list(&self, genre: Option<&str>) -> Result<Vec<Movie>> {
        let movies = self.read()?;
        Ok(match genre {
            Some(filter) => movies.iter().filter(|m| m.has_genre(filter)).cloned().collect(),
            None => movies.clone(),
        })
    }

    async fn get(&self, id: &str) -> Result<Movie> {
        let movies = self.read()?;
        movies.iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(Error::MovieNotFound)
    }
}

#[async_trait]
impl MovieWriter for MemStore {
    async fn insert(&self, draft: MovieDraft) -> Result<Movie> {
        let mut movies = self.write()?;
        let mut id = new_movie_id();
        while movies.iter().any(|m| m.id == id) {
            id = new_movie_id();
        }
        let movie = Movie::from_draft(id, draft);
        movies.push(movie.clone());
        Ok(movie)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut movies = self.write()?;
        let index = movies.iter()
            .position(|m| m.id == id)
            .ok_or(Error::MovieNotFound)?;
        movies.remove(index);
        Ok(())
    }

    async fn replace(&self, id: &str, patch: MoviePatch) -> Result<Movie> {
        let mut movies = self.write()?;
        let movie = movies.iter_mut()
            .find(|m| m.id == id)
            .ok_or(Error::MovieNotFound)?;
        movie.apply(patch);
        Ok(movie.clone())
    }
}
