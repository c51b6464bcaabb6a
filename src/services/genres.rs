//! Genre taxonomy and genre-to-genre affinity
//!
//! The genre set and the correlation values are fixed configuration: they are
//! compiled in and shared read-only by every comparison. Each genre has a
//! position in the table (its index) and a TMDB identifier used by stores.

use crate::models::GenreId;

/// Number of genres in the table
pub const GENRE_COUNT: usize = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: &'static str,
}

/// Known genres, in table index order
pub static GENRES: [Genre; GENRE_COUNT] = [
    Genre { id: 28, name: "Action" },
    Genre { id: 12, name: "Adventure" },
    Genre { id: 16, name: "Animation" },
    Genre { id: 35, name: "Comedy" },
    Genre { id: 80, name: "Crime" },
    Genre { id: 99, name: "Documentary" },
    Genre { id: 18, name: "Drama" },
    Genre { id: 10751, name: "Family" },
    Genre { id: 14, name: "Fantasy" },
    Genre { id: 36, name: "History" },
    Genre { id: 27, name: "Horror" },
    Genre { id: 10402, name: "Music" },
    Genre { id: 9648, name: "Mystery" },
    Genre { id: 10749, name: "Romance" },
    Genre { id: 878, name: "Science Fiction" },
    Genre { id: 10770, name: "TV Movie" },
    Genre { id: 53, name: "Thriller" },
    Genre { id: 10752, name: "War" },
    Genre { id: 37, name: "Western" },
];

#[rustfmt::skip]
const REFERENCE_CORRELATIONS: [[f64; GENRE_COUNT]; GENRE_COUNT] = [
    // Action
    [1.0, 0.9, 0.2, 0.3, 0.6, -0.5, 0.4, 0.3, 0.7, 0.5, 0.6, 0.2, 0.5, 0.3, 0.8, 0.2, 0.9, 0.7, 0.8],
    // Adventure
    [0.9, 1.0, 0.4, 0.3, 0.4, -0.4, 0.5, 0.6, 0.9, 0.5, 0.5, 0.3, 0.4, 0.4, 0.8, 0.3, 0.6, 0.6, 0.7],
    // Animation
    [0.2, 0.4, 1.0, 0.7, -0.2, -0.6, 0.5, 0.8, 0.6, -0.3, 0.1, 0.5, 0.2, 0.6, 0.3, 0.4, 0.2, -0.4, 0.1],
    // Comedy
    [0.3, 0.3, 0.7, 1.0, 0.2, -0.5, 0.6, 0.7, 0.4, -0.2, 0.1, 0.6, 0.2, 0.7, 0.2, 0.5, 0.3, -0.3, 0.2],
    // Crime
    [0.6, 0.4, -0.2, 0.2, 1.0, -0.7, 0.7, -0.2, 0.1, 0.3, 0.5, -0.3, 0.8, 0.2, 0.3, 0.1, 0.9, 0.4, 0.2],
    // Documentary
    [-0.5, -0.4, -0.6, -0.5, -0.7, 1.0, 0.3, 0.2, -0.6, 0.8, -0.6, 0.4, -0.5, 0.1, -0.7, -0.3, -0.6, 0.5, -0.6],
    // Drama
    [0.4, 0.5, 0.5, 0.6, 0.7, 0.3, 1.0, 0.6, 0.5, 0.7, 0.4, 0.5, 0.6, 0.8, 0.4, 0.5, 0.6, 0.7, 0.5],
    // Family
    [0.3, 0.6, 0.8, 0.7, -0.2, 0.2, 0.6, 1.0, 0.7, -0.3, 0.1, 0.6, 0.2, 0.7, 0.3, 0.5, 0.2, -0.4, 0.2],
    // Fantasy
    [0.7, 0.9, 0.6, 0.4, 0.1, -0.6, 0.5, 0.7, 1.0, 0.3, 0.5, 0.3, 0.4, 0.5, 0.9, 0.3, 0.6, 0.4, 0.6],
    // History
    [0.5, 0.5, -0.3, -0.2, 0.3, 0.8, 0.7, -0.3, 0.3, 1.0, -0.2, 0.2, 0.3, 0.4, 0.2, 0.1, 0.3, 0.9, 0.4],
    // Horror
    [0.6, 0.5, 0.1, 0.1, 0.5, -0.6, 0.4, 0.1, 0.5, -0.2, 1.0, -0.2, 0.6, 0.1, 0.5, 0.2, 0.8, 0.2, 0.3],
    // Music
    [0.2, 0.3, 0.5, 0.6, -0.3, 0.4, 0.5, 0.6, 0.3, 0.2, -0.2, 1.0, 0.2, 0.6, 0.2, 0.4, 0.2, -0.2, 0.3],
    // Mystery
    [0.5, 0.4, 0.2, 0.2, 0.8, -0.5, 0.6, 0.2, 0.4, 0.3, 0.6, 0.2, 1.0, 0.3, 0.4, 0.2, 0.9, 0.3, 0.3],
    // Romance
    [0.3, 0.4, 0.6, 0.7, 0.2, 0.1, 0.8, 0.7, 0.5, 0.4, 0.1, 0.6, 0.3, 1.0, 0.3, 0.5, 0.3, 0.4, 0.3],
    // Science Fiction
    [0.8, 0.8, 0.3, 0.2, 0.3, -0.7, 0.4, 0.3, 0.9, 0.2, 0.5, 0.2, 0.4, 0.3, 1.0, 0.3, 0.6, 0.3, 0.6],
    // TV Movie
    [0.2, 0.3, 0.4, 0.5, 0.1, -0.3, 0.5, 0.5, 0.3, 0.1, 0.2, 0.4, 0.2, 0.5, 0.3, 1.0, 0.3, 0.2, 0.2],
    // Thriller
    [0.9, 0.6, 0.2, 0.3, 0.9, -0.6, 0.6, 0.2, 0.6, 0.3, 0.8, 0.2, 0.9, 0.3, 0.6, 0.3, 1.0, 0.4, 0.4],
    // War
    [0.7, 0.6, -0.4, -0.3, 0.4, 0.5, 0.7, -0.4, 0.4, 0.9, 0.2, -0.2, 0.3, 0.4, 0.3, 0.2, 0.4, 1.0, 0.5],
    // Western
    [0.8, 0.7, 0.1, 0.2, 0.2, -0.6, 0.5, 0.2, 0.6, 0.4, 0.3, 0.3, 0.3, 0.3, 0.6, 0.2, 0.4, 0.5, 1.0],
];

static REFERENCE_MATRIX: CorrelationMatrix = CorrelationMatrix {
    values: REFERENCE_CORRELATIONS,
};

/// Symmetric genre affinity table with unit diagonal, values in [-1, 1]
#[derive(Debug, PartialEq)]
pub struct CorrelationMatrix {
    values: [[f64; GENRE_COUNT]; GENRE_COUNT],
}

impl CorrelationMatrix {
    /// The process-wide correlation table
    pub fn reference() -> &'static CorrelationMatrix {
        &REFERENCE_MATRIX
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn row(&self, i: usize) -> &[f64; GENRE_COUNT] {
        &self.values[i]
    }
}

/// Table index of a TMDB genre id
pub fn genre_index(id: GenreId) -> Option<usize> {
    GENRES.iter().position(|genre| genre.id == id)
}

/// Case-insensitive lookup by display name
pub fn genre_by_name(name: &str) -> Option<&'static Genre> {
    let name = name.trim();
    GENRES
        .iter()
        .find(|genre| genre.name.eq_ignore_ascii_case(name))
}

/// Normalized genre weights for one movie
///
/// Each recognized genre gets weight `1 / n` where `n` is the number of
/// distinct recognized genres. A movie with no recognized genres is the zero
/// vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenreVector([f64; GENRE_COUNT]);

impl GenreVector {
    pub fn from_genres(ids: &[GenreId]) -> Self {
        let mut present = [false; GENRE_COUNT];
        for &id in ids {
            match genre_index(id) {
                Some(index) => present[index] = true,
                None => tracing::trace!(genre_id = id, "Skipping unknown genre"),
            }
        }

        let count = present.iter().filter(|p| **p).count();
        let mut weights = [0.0; GENRE_COUNT];
        if count > 0 {
            let weight = 1.0 / count as f64;
            for (slot, _) in weights.iter_mut().zip(present).filter(|(_, p)| *p) {
                *slot = weight;
            }
        }

        Self(weights)
    }

    pub fn weights(&self) -> &[f64; GENRE_COUNT] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|w| *w == 0.0)
    }
}
