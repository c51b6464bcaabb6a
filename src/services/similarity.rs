//! Genre-based similarity between movies
//!
//! The raw affinity between two genre vectors is the quadratic form
//! `v_in · M · v_outᵀ` over the correlation matrix `M`, clamped to [-1, 1]
//! and mapped onto [0, 1]:
//!
//!   similarity = (clamp(raw, -1, 1) + 1) / 2
//!
//! 0 means maximally opposed genres, 0.5 neutral (including movies with no
//! known genres) and 1 identical or fully correlated genres.

use super::genres::{CorrelationMatrix, GenreVector};

/// Normalized similarity between two genre vectors, in [0, 1]
pub fn similarity(matrix: &CorrelationMatrix, v_in: &GenreVector, v_out: &GenreVector) -> f64 {
    let mut raw = 0.0;

    for (i, &w_in) in v_in.weights().iter().enumerate() {
        if w_in == 0.0 {
            continue;
        }
        let projected: f64 = matrix
            .row(i)
            .iter()
            .zip(v_out.weights())
            .map(|(m, w_out)| m * w_out)
            .sum();
        raw += w_in * projected;
    }

    (raw.clamp(-1.0, 1.0) + 1.0) / 2.0
}

/// Similarities between every movie of one list and every movie of another
///
/// Cell `(i, j)` holds the similarity of row movie `i` to column movie `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn build(matrix: &CorrelationMatrix, rows: &[GenreVector], cols: &[GenreVector]) -> Self {
        let mut values = Vec::with_capacity(rows.len() * cols.len());
        for v_in in rows {
            for v_out in cols {
                values.push(similarity(matrix, v_in, v_out));
            }
        }

        Self {
            rows: rows.len(),
            cols: cols.len(),
            values,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::genres::{GENRES, GENRE_COUNT};

    const EPSILON: f64 = 1e-9;

    fn vector(ids: &[u32]) -> GenreVector {
        GenreVector::from_genres(ids)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_single_genre_self_similarity_is_one() {
        let matrix = CorrelationMatrix::reference();
        for genre in GENRES {
            let v = vector(&[genre.id]);
            assert_close(similarity(matrix, &v, &v), 1.0);
        }
    }

    #[test]
    fn test_reference_examples() {
        let matrix = CorrelationMatrix::reference();
        let action = vector(&[28]);
        let adventure = vector(&[12]);
        let documentary = vector(&[99]);

        assert_close(similarity(matrix, &action, &adventure), 0.95);
        assert_close(similarity(matrix, &documentary, &action), 0.25);
    }

    #[test]
    fn test_multi_genre_matches_full_quadratic_form() {
        let matrix = CorrelationMatrix::reference();
        let v_in = vector(&[28, 99, 10749]);
        let v_out = vector(&[35, 18]);

        let mut raw = 0.0;
        for i in 0..GENRE_COUNT {
            for j in 0..GENRE_COUNT {
                raw += v_in.weights()[i] * matrix.get(i, j) * v_out.weights()[j];
            }
        }

        assert_close(similarity(matrix, &v_in, &v_out), (raw + 1.0) / 2.0);
    }

    #[test]
    fn test_zero_vector_is_neutral() {
        let matrix = CorrelationMatrix::reference();
        let empty = vector(&[]);
        assert_close(similarity(matrix, &empty, &vector(&[28])), 0.5);
        assert_close(similarity(matrix, &vector(&[28]), &empty), 0.5);
    }

    #[test]
    fn test_similarity_is_bounded() {
        let matrix = CorrelationMatrix::reference();
        let vectors: Vec<GenreVector> = GENRES.iter().map(|g| vector(&[g.id])).collect();
        for a in &vectors {
            for b in &vectors {
                let s = similarity(matrix, a, b);
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn test_matrix_layout() {
        let matrix = CorrelationMatrix::reference();
        let rows = [vector(&[28]), vector(&[99])];
        let cols = [vector(&[28]), vector(&[12]), vector(&[])];

        let sims = SimilarityMatrix::build(matrix, &rows, &cols);

        assert_eq!(sims.rows(), 2);
        assert_eq!(sims.cols(), 3);
        assert_close(sims.get(0, 0), 1.0);
        assert_close(sims.get(0, 1), 0.95);
        assert_close(sims.get(1, 0), 0.25);
        assert_close(sims.get(1, 2), 0.5);
        assert_eq!(sims.row(1).len(), 3);
    }

    #[test]
    fn test_empty_lists() {
        let matrix = CorrelationMatrix::reference();
        let sims = SimilarityMatrix::build(matrix, &[], &[vector(&[28])]);
        assert_eq!(sims.rows(), 0);
        assert_eq!(sims.cols(), 1);
    }
}
