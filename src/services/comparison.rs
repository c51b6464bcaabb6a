use crate::{
    error::{AppError, AppResult},
    models::{
        ComparisonResult, DiffReport, OverlapReport, ReviewDiff, ReviewMap, UserId,
        UserMovieReview,
    },
    services::{
        divergence::{DivergenceScorer, RatedMovie, ScoredPair, DEFAULT_SIM_MIN},
        genres::{CorrelationMatrix, GenreVector},
        grading::grade_for,
        ranking::{RankedList, Rankings, DEFAULT_TOP_K},
        reviews::ReviewStore,
        similarity::SimilarityMatrix,
    },
};

/// Tuning knobs for a comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    /// Entries per ranked list
    pub k: usize,
    /// Minimum genre similarity for a pair to count
    pub sim_min: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            k: DEFAULT_TOP_K,
            sim_min: DEFAULT_SIM_MIN,
        }
    }
}

impl CompareOptions {
    pub fn validate(&self) -> AppResult<()> {
        if self.k == 0 {
            return Err(AppError::InvalidInput("k must be at least 1".to_string()));
        }
        if !self.sim_min.is_finite() || !(0.0..=1.0).contains(&self.sim_min) {
            return Err(AppError::InvalidInput(format!(
                "sim_min must be within [0, 1], got {}",
                self.sim_min
            )));
        }
        Ok(())
    }
}

/// Compares two users' rating histories
///
/// Both review sets are fetched concurrently; if either fetch fails or the
/// user has no reviews, the comparison fails with `DataUnavailable`. Everything
/// after the fetch is synchronous.
pub async fn compare_users(
    store: &dyn ReviewStore,
    user_a: &UserId,
    user_b: &UserId,
    options: CompareOptions,
) -> AppResult<ComparisonResult> {
    options.validate()?;

    let (reviews_a, reviews_b) = tokio::try_join!(
        fetch_reviews(store, user_a),
        fetch_reviews(store, user_b)
    )?;

    let result = compare_reviews(&reviews_a, &reviews_b, &options);

    tracing::info!(
        user_a = %user_a,
        user_b = %user_b,
        reviews_a = reviews_a.len(),
        reviews_b = reviews_b.len(),
        grade = ?result.grade,
        "Comparison completed"
    );

    Ok(result)
}

async fn fetch_reviews(store: &dyn ReviewStore, user_id: &UserId) -> AppResult<ReviewMap> {
    let reviews = store
        .get_all_user_movie_reviews(user_id)
        .await
        .map_err(|e| {
            tracing::warn!(
                user_id = %user_id,
                store = store.name(),
                error = %e,
                "Review fetch failed"
            );
            match e {
                AppError::DataUnavailable(_) => e,
                other => AppError::DataUnavailable(format!(
                    "Failed to fetch reviews for user {}: {}",
                    user_id, other
                )),
            }
        })?;

    if reviews.is_empty() {
        tracing::warn!(user_id = %user_id, "User has no reviews");
        return Err(AppError::DataUnavailable(format!(
            "No reviews found for user {}",
            user_id
        )));
    }

    Ok(reviews)
}

/// Running sums over admitted pairs
#[derive(Debug, Default)]
struct DivergenceTotals {
    total: f64,
    abs: f64,
    same: f64,
    diff: f64,
    admitted: usize,
}

impl DivergenceTotals {
    fn add(&mut self, pair: &ScoredPair) {
        self.total += pair.divergence;
        self.abs += pair.divergence.abs();
        if pair.same_movie {
            self.same += pair.divergence;
        } else {
            self.diff += pair.divergence;
        }
        self.admitted += 1;
    }
}

fn ratio(numerator: f64, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator / denominator as f64)
}

/// Scores `a`'s reviews against `b`'s
///
/// Rows follow `a` and columns follow `b`, both in movie id order, so the
/// same inputs always produce the same report.
pub fn compare_reviews(a: &ReviewMap, b: &ReviewMap, options: &CompareOptions) -> ComparisonResult {
    let rows: Vec<&UserMovieReview> = a.values().collect();
    let cols: Vec<&UserMovieReview> = b.values().collect();

    let shared = a.keys().filter(|id| b.contains_key(*id)).count();
    let union = a.len() + b.len() - shared;
    let pair_count = a.len() * b.len();

    let row_vectors: Vec<GenreVector> = rows
        .iter()
        .map(|review| GenreVector::from_genres(review.genre_ids()))
        .collect();
    let col_vectors: Vec<GenreVector> = cols
        .iter()
        .map(|review| GenreVector::from_genres(review.genre_ids()))
        .collect();
    let sims = SimilarityMatrix::build(CorrelationMatrix::reference(), &row_vectors, &col_vectors);

    let scored = DivergenceScorer::new(options.sim_min).score(
        &sims,
        &rated_movies(&rows),
        &rated_movies(&cols),
    );

    let mut totals = DivergenceTotals::default();
    let mut rankings = Rankings::new(options.k, shared);
    for row in &scored {
        row.iter().for_each(|pair| totals.add(pair));
        rankings.offer_row(row);
    }

    tracing::debug!(
        pairs = pair_count,
        admitted = totals.admitted,
        shared,
        "Scored review pairs"
    );

    let abs_avg = ratio(totals.abs, pair_count);
    let materialize = |list: RankedList<ScoredPair>| -> Vec<ReviewDiff> {
        list.into_items()
            .into_iter()
            .map(|pair| ReviewDiff {
                source: rows[pair.row].clone(),
                target: cols[pair.col].clone(),
                similarity: pair.similarity,
                divergence: pair.divergence,
                same_movie: pair.same_movie,
            })
            .collect()
    };

    ComparisonResult {
        overlap_pct: ratio(shared as f64, union),
        avg: ratio(totals.total, pair_count),
        abs_avg,
        grade: abs_avg.map(grade_for),
        overlap: OverlapReport {
            avg: ratio(totals.same, shared),
            min: materialize(rankings.overlap_min),
            max: materialize(rankings.overlap_max),
        },
        diff: DiffReport {
            avg: ratio(totals.diff, pair_count - shared),
            min: materialize(rankings.diff_min),
            max: materialize(rankings.diff_max),
            zero: materialize(rankings.diff_zero),
        },
    }
}

fn rated_movies(reviews: &[&UserMovieReview]) -> Vec<RatedMovie> {
    reviews
        .iter()
        .map(|review| RatedMovie {
            movie_id: review.movie_id(),
            rating: review.rating,
        })
        .collect()
}
