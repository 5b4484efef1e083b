//! Sparse feature vectors.

use serde::{Deserialize, Serialize};

/// A sparse vector of `(index, weight)` pairs sorted by index.
///
/// Only non-zero weights are stored, so an utterance that shares no terms
/// with the vocabulary is the empty vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build a vector from entries, sorting them and dropping zeros.
    pub fn new(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, weight)| weight != 0.0);
        entries.sort_by_key(|&(index, _)| index);
        SparseVector { entries }
    }

    /// Iterate over the stored `(index, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether every weight is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at `index`, zero when absent.
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit Euclidean norm. Zero vectors stay zero.
    pub fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
        self
    }

    /// Largest stored index, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.entries.last().map(|&(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_drops_zeros() {
        let vector = SparseVector::new(vec![(3, 1.0), (1, 0.0), (0, 2.0)]);
        assert_eq!(vector.iter().collect::<Vec<_>>(), [(0, 2.0), (3, 1.0)]);
        assert_eq!(vector.nnz(), 2);
        assert_eq!(vector.get(3), 1.0);
        assert_eq!(vector.get(1), 0.0);
        assert_eq!(vector.max_index(), Some(3));
    }

    #[test]
    fn test_l2_normalized() {
        let vector = SparseVector::new(vec![(0, 3.0), (1, 4.0)]).l2_normalized();
        assert!((vector.get(0) - 0.6).abs() < 1e-12);
        assert!((vector.get(1) - 0.8).abs() < 1e-12);
        assert!((vector.norm() - 1.0).abs() < 1e-12);

        let zero = SparseVector::default().l2_normalized();
        assert!(zero.is_zero());
    }
}
