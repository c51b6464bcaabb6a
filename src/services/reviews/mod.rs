/// Review store abstraction
///
/// The comparison engine only ever reads: it asks a store for every review a
/// user has written, merged with the reviewed movie's metadata. Stores are
/// pluggable so the engine can run against Postgres in production and
/// in-memory fixtures in tests.
use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    models::{ReviewMap, UserId},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryReviewStore;
pub use postgres::PgReviewStore;

/// Read port for a user's reviews
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReviewStore: Send + Sync {
    /// Fetch a point-in-time snapshot of all reviews written by `user_id`
    ///
    /// Returns `DataUnavailable` when the store does not know the user.
    async fn get_all_user_movie_reviews(&self, user_id: &UserId) -> AppResult<ReviewMap>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Selects the review store from configuration
///
/// Postgres wins when `DATABASE_URL` is set, then the JSON fixture file;
/// with neither, the store is empty.
pub async fn build_review_store(config: &Config) -> anyhow::Result<Arc<dyn ReviewStore>> {
    let store: Arc<dyn ReviewStore> = if let Some(database_url) = &config.database_url {
        Arc::new(PgReviewStore::connect(database_url).await?)
    } else if let Some(path) = &config.reviews_fixture {
        Arc::new(InMemoryReviewStore::from_json_file(path)?)
    } else {
        tracing::warn!("No DATABASE_URL or REVIEWS_FIXTURE configured, using an empty review store");
        Arc::new(InMemoryReviewStore::new())
    };

    tracing::info!(store = store.name(), "Review store ready");

    Ok(store)
}
