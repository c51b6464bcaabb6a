//! Bounded top-K rankings of scored pairs
//!
//! Each row of the comparison (one review of the requesting user) nominates
//! at most one representative per category: the locally best admitted pair
//! for that category. Only those representatives compete for the global
//! lists, so a single row can never fill a list on its own.

use super::divergence::ScoredPair;

/// Default number of entries per ranked list
pub const DEFAULT_TOP_K: usize = 5;

/// Ordering of a ranked list, best entry first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Largest divergence first
    Max,
    /// Smallest divergence first
    Min,
    /// Divergence closest to zero first
    Zero,
}

impl RankOrder {
    /// Whether `candidate` strictly outranks `incumbent`
    ///
    /// Ties never outrank, so the earlier entry keeps its place.
    pub fn beats(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            RankOrder::Max => candidate > incumbent,
            RankOrder::Min => candidate < incumbent,
            RankOrder::Zero => candidate.abs() < incumbent.abs(),
        }
    }
}

/// Anything ranked by its divergence score
pub trait Ranked {
    fn divergence(&self) -> f64;
}

impl Ranked for f64 {
    fn divergence(&self) -> f64 {
        *self
    }
}

impl Ranked for ScoredPair {
    fn divergence(&self) -> f64 {
        self.divergence
    }
}

/// Fixed-capacity list kept sorted by a [`RankOrder`]
#[derive(Debug, Clone, PartialEq)]
pub struct RankedList<T> {
    order: RankOrder,
    capacity: usize,
    items: Vec<T>,
}

impl<T: Ranked> RankedList<T> {
    pub fn new(order: RankOrder, capacity: usize) -> Self {
        Self {
            order,
            capacity,
            items: Vec::new(),
        }
    }

    /// Offers a candidate, returning whether it was kept
    ///
    /// Scans from the tail for the last entry the candidate does not beat and
    /// inserts right after it, or at the head if it beats everything. The
    /// tail entry is dropped when the list overflows.
    pub fn offer(&mut self, candidate: T) -> bool {
        let score = candidate.divergence();
        let position = self
            .items
            .iter()
            .rposition(|item| !self.order.beats(score, item.divergence()))
            .map_or(0, |index| index + 1);

        if position >= self.capacity {
            return false;
        }

        self.items.insert(position, candidate);
        self.items.truncate(self.capacity);
        true
    }

    pub fn order(&self) -> RankOrder {
        self.order
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Best pair of one row per category
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowRepresentatives {
    pub diff_max: Option<ScoredPair>,
    pub diff_min: Option<ScoredPair>,
    pub diff_zero: Option<ScoredPair>,
    pub overlap_max: Option<ScoredPair>,
    pub overlap_min: Option<ScoredPair>,
}

fn keep_best(slot: &mut Option<ScoredPair>, candidate: &ScoredPair, order: RankOrder) {
    let replace = match slot {
        Some(best) => order.beats(candidate.divergence, best.divergence),
        None => true,
    };
    if replace {
        *slot = Some(*candidate);
    }
}

impl RowRepresentatives {
    /// Picks the representatives among one row's admitted pairs
    ///
    /// The first pair found wins ties.
    pub fn pick(pairs: &[ScoredPair]) -> Self {
        let mut reps = Self::default();
        for pair in pairs {
            if pair.same_movie {
                keep_best(&mut reps.overlap_max, pair, RankOrder::Max);
                keep_best(&mut reps.overlap_min, pair, RankOrder::Min);
            } else {
                keep_best(&mut reps.diff_max, pair, RankOrder::Max);
                keep_best(&mut reps.diff_min, pair, RankOrder::Min);
                keep_best(&mut reps.diff_zero, pair, RankOrder::Zero);
            }
        }
        reps
    }
}

/// The five global ranked lists of a comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Rankings {
    pub overlap_max: RankedList<ScoredPair>,
    pub overlap_min: RankedList<ScoredPair>,
    pub diff_max: RankedList<ScoredPair>,
    pub diff_min: RankedList<ScoredPair>,
    pub diff_zero: RankedList<ScoredPair>,
}

impl Rankings {
    /// Overlap lists hold at least one slot per shared movie
    pub fn new(k: usize, shared_movies: usize) -> Self {
        let overlap_capacity = k.max(shared_movies);
        Self {
            overlap_max: RankedList::new(RankOrder::Max, overlap_capacity),
            overlap_min: RankedList::new(RankOrder::Min, overlap_capacity),
            diff_max: RankedList::new(RankOrder::Max, k),
            diff_min: RankedList::new(RankOrder::Min, k),
            diff_zero: RankedList::new(RankOrder::Zero, k),
        }
    }

    pub fn offer_row(&mut self, pairs: &[ScoredPair]) {
        let reps = RowRepresentatives::pick(pairs);
        let offers = [
            (&mut self.diff_max, reps.diff_max),
            (&mut self.diff_min, reps.diff_min),
            (&mut self.diff_zero, reps.diff_zero),
            (&mut self.overlap_max, reps.overlap_max),
            (&mut self.overlap_min, reps.overlap_min),
        ];
        for (list, candidate) in offers {
            if let Some(candidate) = candidate {
                list.offer(candidate);
            }
        }
    }
}
