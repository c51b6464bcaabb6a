use serde::Deserialize;
use std::{collections::HashMap, path::Path};

use crate::{
    error::{AppError, AppResult},
    models::{GenreId, Movie, MovieId, ReviewMap, UserId, UserMovieReview},
    services::{genres::genre_by_name, reviews::ReviewStore},
};

/// Review store held entirely in memory
///
/// Backs the JSON fixture mode and the test suites.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewStore {
    users: HashMap<UserId, ReviewMap>,
}

/// One review as written in a fixture file
///
/// Genres may be given as TMDB ids, display names, or both.
#[derive(Debug, Deserialize)]
struct ReviewRecord {
    rating: f64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    genre_ids: Vec<GenreId>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    favorite: bool,
    #[serde(default)]
    reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    num_ratings: u32,
    #[serde(default)]
    sum_ratings: f64,
}

impl ReviewRecord {
    fn into_review(self, id: MovieId) -> UserMovieReview {
        let mut genre_ids = self.genre_ids;
        for name in &self.genres {
            match genre_by_name(name) {
                Some(genre) if !genre_ids.contains(&genre.id) => genre_ids.push(genre.id),
                Some(_) => {}
                None => {
                    tracing::trace!(genre = %name, movie_id = %id, "Skipping unknown genre name")
                }
            }
        }

        UserMovieReview {
            movie: Movie {
                id,
                title: self.title,
                description: self.description,
                genre_ids,
                num_ratings: self.num_ratings,
                sum_ratings: self.sum_ratings,
            },
            rating: self.rating,
            comment: self.comment,
            favorite: self.favorite,
            reviewed_at: self.reviewed_at,
        }
    }
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a user's reviews
    pub fn with_user(mut self, user_id: impl Into<UserId>, reviews: Vec<UserMovieReview>) -> Self {
        let reviews = reviews
            .into_iter()
            .map(|review| (review.movie_id(), review))
            .collect();
        self.users.insert(user_id.into(), reviews);
        self
    }

    /// Parses fixture JSON: user id → movie id → review
    ///
    /// Movie ids are JSON object keys and must parse as integers.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let raw: HashMap<String, HashMap<String, ReviewRecord>> = serde_json::from_str(json)
            .map_err(|e| AppError::Internal(format!("Invalid review fixture: {}", e)))?;

        let mut users = HashMap::with_capacity(raw.len());
        for (user_id, records) in raw {
            let mut reviews = ReviewMap::new();
            for (movie_key, record) in records {
                let movie_id: MovieId = movie_key.parse().map_err(|_| {
                    AppError::Internal(format!(
                        "Invalid movie id {:?} in reviews of user {}",
                        movie_key, user_id
                    ))
                })?;
                reviews.insert(movie_id, record.into_review(movie_id));
            }
            users.insert(UserId(user_id), reviews);
        }

        Ok(Self { users })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let store = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            users = store.users.len(),
            "Loaded review fixture"
        );

        Ok(store)
    }
}

#[async_trait::async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn get_all_user_movie_reviews(&self, user_id: &UserId) -> AppResult<ReviewMap> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| {
                AppError::DataUnavailable(format!("No reviews found for user {}", user_id))
            })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
