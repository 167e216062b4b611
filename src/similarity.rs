// src/similarity.rs

use log::debug;
use ndarray::Array2;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{RecommendError, Result};
use crate::utils::matrix::cosine_similarity;

/// Square cosine-similarity matrix keyed by entity id on both axes.
///
/// Invariants: symmetric, diagonal exactly 1.0, entries in [-1, 1]. The
/// matrix must be rebuilt whenever the underlying entity set changes; a
/// lookup for an id outside the matrix fails loudly instead of defaulting.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix<K> {
    axis: &'static str,
    labels: Vec<K>,
    index: HashMap<K, usize>,
    values: Array2<f64>,
}

impl<K> SimilarityMatrix<K>
where
    K: Copy + Eq + Hash + fmt::Display,
{
    /// Pairwise cosine similarity over the rows of `features`; row `i`
    /// belongs to `labels[i]`. The diagonal is pinned to exactly 1.0 and
    /// each off-diagonal pair is computed once and mirrored.
    pub fn from_features(axis: &'static str, labels: Vec<K>, features: &Array2<f64>) -> Self {
        let n = labels.len();
        debug_assert_eq!(n, features.nrows());

        let mut values = Array2::zeros((n, n));
        for i in 0..n {
            values[[i, i]] = 1.0;
            for j in (i + 1)..n {
                let similarity = cosine_similarity(features.row(i), features.row(j));
                values[[i, j]] = similarity;
                values[[j, i]] = similarity;
            }
        }

        debug!("Built {} similarity matrix over {} entities", axis, n);
        Self::from_parts(axis, labels, values)
    }

    /// Wraps an already-computed square matrix. The caller owns the §3
    /// invariants; this is the seam for hosts that cache matrices between
    /// requests.
    pub fn from_parts(axis: &'static str, labels: Vec<K>, values: Array2<f64>) -> Self {
        debug_assert_eq!(labels.len(), values.nrows());
        debug_assert_eq!(labels.len(), values.ncols());

        let index = labels
            .iter()
            .copied()
            .enumerate()
            .map(|(i, label)| (label, i))
            .collect();
        Self {
            axis,
            labels,
            index,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, id: K) -> bool {
        self.index.contains_key(&id)
    }

    /// Similarity between two ids.
    pub fn get(&self, a: K, b: K) -> Result<f64> {
        let row = self.position(a)?;
        let col = self.position(b)?;
        Ok(self.values[[row, col]])
    }

    /// The up-to-`k` most similar OTHER entities to `id`, similarity
    /// descending. The sort is stable, so ties keep original label order
    /// and the result is reproducible for a fixed snapshot.
    pub fn top_neighbors(&self, id: K, k: usize) -> Result<Vec<(K, f64)>> {
        let row = self.position(id)?;

        let mut neighbors: Vec<(K, f64)> = self
            .labels
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, _)| i != row)
            .map(|(i, label)| (label, self.values[[row, i]]))
            .collect();

        neighbors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        neighbors.truncate(k);
        Ok(neighbors)
    }

    fn position(&self, id: K) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or_else(|| RecommendError::MissingSimilarityEntry {
                axis: self.axis,
                id: id.to_string(),
            })
    }
}
