use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::UserMovieReview;

/// Compatibility letter grade, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One scored pairing of a review from each user
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDiff {
    /// Review by the user requesting the comparison
    pub source: UserMovieReview,
    /// Review by the user being compared against
    pub target: UserMovieReview,
    pub similarity: f64,
    /// `(source.rating - target.rating) * similarity`
    pub divergence: f64,
    pub same_movie: bool,
}

/// Statistics over pairs where both users reviewed the same movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OverlapReport {
    /// `None` when the users share no movies
    pub avg: Option<f64>,
    pub min: Vec<ReviewDiff>,
    pub max: Vec<ReviewDiff>,
}

/// Statistics over pairs of different movies
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiffReport {
    /// `None` when every possible pair is a same-movie pair
    pub avg: Option<f64>,
    pub min: Vec<ReviewDiff>,
    pub max: Vec<ReviewDiff>,
    /// Pairs whose divergence is closest to zero
    pub zero: Vec<ReviewDiff>,
}

/// Compatibility report between two users
///
/// Aggregates whose denominator is zero are reported as `None` (JSON `null`)
/// instead of NaN or infinity.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Jaccard overlap of the two users' reviewed movie sets
    pub overlap_pct: Option<f64>,
    pub avg: Option<f64>,
    pub abs_avg: Option<f64>,
    pub grade: Option<Grade>,
    pub overlap: OverlapReport,
    pub diff: DiffReport,
}
