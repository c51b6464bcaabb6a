use crate::models::MovieId;

use super::similarity::SimilarityMatrix;

/// Default minimum similarity for a pair to be scored
pub const DEFAULT_SIM_MIN: f64 = 0.75;

/// An admitted pairing of row review `row` with column review `col`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPair {
    pub row: usize,
    pub col: usize,
    pub similarity: f64,
    pub divergence: f64,
    pub same_movie: bool,
}

/// Rating and movie of one review, as seen by the scorer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatedMovie {
    pub movie_id: MovieId,
    pub rating: f64,
}

/// Weights rating differences by genre similarity
///
/// Pairs whose similarity falls below `sim_min` are dropped outright: they
/// are never ranked and never counted in any aggregate.
#[derive(Debug, Clone, Copy)]
pub struct DivergenceScorer {
    sim_min: f64,
}

impl Default for DivergenceScorer {
    fn default() -> Self {
        Self::new(DEFAULT_SIM_MIN)
    }
}

impl DivergenceScorer {
    pub fn new(sim_min: f64) -> Self {
        Self { sim_min }
    }

    pub fn admits(&self, similarity: f64) -> bool {
        similarity >= self.sim_min
    }

    /// Scores every admitted pair, grouped by row
    ///
    /// `sims` must have one row per entry of `rows` and one column per entry
    /// of `cols`.
    pub fn score(
        &self,
        sims: &SimilarityMatrix,
        rows: &[RatedMovie],
        cols: &[RatedMovie],
    ) -> Vec<Vec<ScoredPair>> {
        debug_assert_eq!(sims.rows(), rows.len());
        debug_assert_eq!(sims.cols(), cols.len());

        rows.iter()
            .enumerate()
            .map(|(i, source)| {
                sims.row(i)
                    .iter()
                    .zip(cols)
                    .enumerate()
                    .filter(|(_, (similarity, _))| self.admits(**similarity))
                    .map(|(j, (&similarity, target))| ScoredPair {
                        row: i,
                        col: j,
                        similarity,
                        divergence: (source.rating - target.rating) * similarity,
                        same_movie: source.movie_id == target.movie_id,
                    })
                    .collect()
            })
            .collect()
    }
}
