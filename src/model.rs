use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of genres a movie may be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Comedy,
    Crime,
    Drama,
    Fantasy,
    Horror,
    Thriller,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    pub const ALL: [Genre; 9] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Comedy,
        Genre::Crime,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Thriller,
        Genre::SciFi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Thriller => "Thriller",
            Genre::SciFi => "Sci-Fi",
        }
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Genre> {
        Genre::ALL.iter().copied().find(|g| g.as_str() == name)
    }

    /// Case-insensitive comparison used by genre filters.
    pub fn matches(&self, filter: &str) -> bool {
        self.as_str().to_lowercase() == filter.to_lowercase()
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored movie record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: u16,
    pub director: String,
    pub duration: u64,
    pub rate: f64,
    pub poster: String,
    pub genre: Vec<Genre>,
}

/// A fully validated movie that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDraft {
    pub title: String,
    pub year: u16,
    pub director: String,
    pub duration: u64,
    pub rate: f64,
    pub poster: String,
    pub genre: Vec<Genre>,
}

/// The validated subset of fields carried by a partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoviePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<Genre>>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        *self == MoviePatch::default()
    }
}

impl Movie {
    pub fn from_draft(id: String, draft: MovieDraft) -> Self {
        Self {
            id,
            title: draft.title,
            year: draft.year,
            director: draft.director,
            duration: draft.duration,
            rate: draft.rate,
            poster: draft.poster,
            genre: draft.genre,
        }
    }

    /// Overwrites every field present in `patch`. The merged record is not
    /// re-validated as a whole; each incoming field was checked on its own.
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = patch.director {
            self.director = director;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
        if let Some(poster) = patch.poster {
            self.poster = poster;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
    }

    pub fn has_genre(&self, filter: &str) -> bool {
        self.genre.iter().any(|g| g.matches(filter))
    }
}

/// Generates a fresh opaque movie id.
pub fn new_movie_id() -> String {
    Uuid::new_v4().to_string()
}
