use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{GenreId, MovieId};

/// Movie metadata shared by every review of the movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// TMDB genre ids; ids outside the known genre table are ignored when scoring
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    /// Community rating counters across all users
    #[serde(default)]
    pub num_ratings: u32,
    #[serde(default)]
    pub sum_ratings: f64,
}

/// A user's review merged with the movie it refers to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserMovieReview {
    pub movie: Movie,
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// All of one user's reviews, keyed and ordered by movie id
pub type ReviewMap = BTreeMap<MovieId, UserMovieReview>;

impl UserMovieReview {
    pub fn movie_id(&self) -> MovieId {
        self.movie.id
    }

    pub fn genre_ids(&self) -> &[GenreId] {
        &self.movie.genre_ids
    }

    /// Mean rating given to this movie by all users, if anyone rated it
    pub fn community_average(&self) -> Option<f64> {
        (self.movie.num_ratings > 0).then(|| self.movie.sum_ratings / self.movie.num_ratings as f64)
    }
}
