//! Category store: the ordered, append-only prototype collection of one space.
//!
//! Indices are positions at creation time and are never reused. Categories
//! are never removed individually; only [`CategoryStore::clear`] discards
//! them, all at once.

use crate::error::{ArtError, Result};
use crate::kernel::complement::ComplementCoder;
use serde::{Deserialize, Serialize};

/// One learned category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    index: usize,
    weights: Vec<f64>,
    /// Number of inputs committed to this category, including its seed.
    resonances: u64,
}

impl Category {
    pub(crate) fn new(index: usize, weights: Vec<f64>) -> Self {
        Self {
            index,
            weights,
            resonances: 1,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Prototype weights (complement-coded for fuzzy boxes).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn resonances(&self) -> u64 {
        self.resonances
    }

    /// Per-dimension `(lo, hi)` box for a complement-coded prototype.
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        ComplementCoder::bounds(&self.weights)
    }

    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    pub(crate) fn record_resonance(&mut self) {
        self.resonances = self.resonances.saturating_add(1);
    }
}

impl AsRef<[f64]> for Category {
    fn as_ref(&self) -> &[f64] {
        &self.weights
    }
}

/// Bounded, ordered collection of categories for one space.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryStore {
    dim: usize,
    max_categories: usize,
    categories: Vec<Category>,
}

impl CategoryStore {
    /// Create an empty store for prototypes of length `dim`.
    pub fn new(dim: usize, max_categories: usize) -> Self {
        Self {
            dim,
            max_categories,
            categories: Vec::new(),
        }
    }

    /// Prototype length.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn max_categories(&self) -> usize {
        self.max_categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.categories.len() >= self.max_categories
    }

    /// Append a category and return its index, or `None` when at capacity.
    pub(crate) fn push(&mut self, weights: Vec<f64>) -> Result<Option<usize>> {
        if weights.len() != self.dim {
            return Err(ArtError::DimensionMismatch {
                expected: self.dim,
                got: weights.len(),
            });
        }
        if self.is_full() {
            return Ok(None);
        }
        let index = self.categories.len();
        self.categories.push(Category::new(index, weights));
        Ok(Some(index))
    }

    /// Restore a category with a known resonance count (snapshot path).
    pub(crate) fn restore(&mut self, weights: Vec<f64>, resonances: u64) -> Result<usize> {
        let index = self.push(weights)?.ok_or_else(|| {
            ArtError::CorruptSnapshot(format!(
                "more categories than max_categories ({})",
                self.max_categories
            ))
        })?;
        self.categories[index].resonances = resonances;
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    /// Like [`get`](Self::get) but reports unknown indices as an error.
    pub fn category(&self, index: usize) -> Result<&Category> {
        self.categories.get(index).ok_or(ArtError::UnknownCategory {
            index,
            count: self.categories.len(),
        })
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Result<&mut Category> {
        let count = self.categories.len();
        self.categories
            .get_mut(index)
            .ok_or(ArtError::UnknownCategory { index, count })
    }

    /// All categories in index order.
    pub fn as_slice(&self) -> &[Category] {
        &self.categories
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.categories.clear();
    }
}
