use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId, ReviewMap, UserId, UserMovieReview},
    services::reviews::ReviewStore,
};

/// Joined review + movie row
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    movie_id: i64,
    rating: f64,
    comment: Option<String>,
    favorite: bool,
    reviewed_at: Option<DateTime<Utc>>,
    title: String,
    description: Option<String>,
    genre_ids: Vec<i32>,
    num_ratings: i32,
    sum_ratings: f64,
}

impl TryFrom<ReviewRow> for UserMovieReview {
    type Error = AppError;

    fn try_from(row: ReviewRow) -> AppResult<Self> {
        let id = u64::try_from(row.movie_id)
            .map(MovieId)
            .map_err(|_| AppError::Internal(format!("Negative movie id {}", row.movie_id)))?;

        let num_ratings = u32::try_from(row.num_ratings).map_err(|_| {
            AppError::Internal(format!(
                "Negative rating count {} for movie {}",
                row.num_ratings, row.movie_id
            ))
        })?;

        let genre_ids = row
            .genre_ids
            .into_iter()
            .filter_map(|genre| u32::try_from(genre).ok())
            .collect();

        Ok(UserMovieReview {
            movie: Movie {
                id,
                title: row.title,
                description: row.description,
                genre_ids,
                num_ratings,
                sum_ratings: row.sum_ratings,
            },
            rating: row.rating,
            comment: row.comment,
            favorite: row.favorite,
            reviewed_at: row.reviewed_at,
        })
    }
}

/// Reads reviews from the `user_reviews` and `movies` tables
#[derive(Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a PostgreSQL connection pool and wraps it
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }
}

#[async_trait::async_trait]
impl ReviewStore for PgReviewStore {
    async fn get_all_user_movie_reviews(&self, user_id: &UserId) -> AppResult<ReviewMap> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT r.movie_id, r.rating, r.comment, r.favorite, r.reviewed_at,
                   m.title, m.description, m.genre_ids, m.num_ratings, m.sum_ratings
            FROM user_reviews r
            JOIN movies m ON m.id = r.movie_id
            WHERE r.user_id = $1
            "#,
        )
        .bind(&user_id.0)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(user_id = %user_id, rows = rows.len(), "Fetched reviews from database");

        rows.into_iter()
            .map(|row| UserMovieReview::try_from(row).map(|review| (review.movie_id(), review)))
            .collect()
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
