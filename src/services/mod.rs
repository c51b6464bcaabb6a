pub mod comparison;
pub mod divergence;
pub mod genres;
pub mod grading;
pub mod ranking;
pub mod reviews;
pub mod similarity;

pub use comparison::{compare_reviews, compare_users, CompareOptions};
pub use reviews::{InMemoryReviewStore, PgReviewStore, ReviewStore};
