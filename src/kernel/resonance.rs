//! Resonance kernel: choice and match scores, vigilance, winner selection.
//!
//! For a coded input `x` and a prototype `w`:
//!
//! | Score  | Formula                             | Use                 |
//! |--------|-------------------------------------|---------------------|
//! | choice | `|x ∧ w| / (α + |w|)`               | rank candidates     |
//! | match  | `|x ∧ w| / |x|`                     | vigilance test      |
//!
//! where `∧` is the component-wise minimum and `|·|` the L1 norm.
//!
//! Winner selection is deterministic: the strictly highest choice among
//! admissible categories wins, and exact ties go to the lowest index.
//!
//! When compiled with the `parallel` feature, per-category scores are
//! computed on the rayon pool. Selection is always a sequential reduction
//! in index order, so both builds pick the same winner.

use crate::kernel::geometry::CategoryGeometry;

/// Scores of one category against one input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryScore {
    pub index: usize,
    pub choice: f64,
    pub match_score: f64,
}

/// Resonance computations for complement-coded vectors.
pub struct Resonance;

impl Resonance {
    /// Fuzzy AND norm: `Σ min(x_i, w_i)`.
    pub fn fuzzy_and_norm(input: &[f64], weights: &[f64]) -> f64 {
        debug_assert_eq!(input.len(), weights.len(), "Dimension mismatch in fuzzy AND");
        input
            .iter()
            .zip(weights.iter())
            .map(|(&x, &w)| x.min(w))
            .sum()
    }

    /// Choice score `|x ∧ w| / (α + |w|)`. Higher is preferred.
    ///
    /// The bias `α` keeps the denominator positive and favours specific
    /// (small-box, large-norm) categories over general ones.
    pub fn choice(input: &[f64], weights: &[f64], bias: f64) -> f64 {
        let w_norm: f64 = weights.iter().sum();
        Self::fuzzy_and_norm(input, weights) / (bias + w_norm)
    }

    /// Match score `|x ∧ w| / |x|`, always in `[0, 1]`.
    ///
    /// An all-zero input cannot be matched and scores 0.
    pub fn match_score(input: &[f64], weights: &[f64]) -> f64 {
        let x_norm: f64 = input.iter().sum();
        if x_norm <= 0.0 {
            return 0.0;
        }
        (Self::fuzzy_and_norm(input, weights) / x_norm).clamp(0.0, 1.0)
    }

    /// Vigilance test.
    #[inline]
    pub fn is_admissible(match_score: f64, vigilance: f64) -> bool {
        match_score >= vigilance
    }

    /// Score every prototype against `input`, in index order.
    #[cfg(not(feature = "parallel"))]
    pub fn evaluate<G, P>(geometry: &G, input: &[f64], prototypes: &[P]) -> Vec<CategoryScore>
    where
        G: CategoryGeometry,
        P: AsRef<[f64]> + Sync,
    {
        prototypes
            .iter()
            .enumerate()
            .map(|(index, p)| Self::score(geometry, input, index, p.as_ref()))
            .collect()
    }

    /// Score every prototype against `input`, in index order.
    #[cfg(feature = "parallel")]
    pub fn evaluate<G, P>(geometry: &G, input: &[f64], prototypes: &[P]) -> Vec<CategoryScore>
    where
        G: CategoryGeometry,
        P: AsRef<[f64]> + Sync,
    {
        use rayon::prelude::*;
        prototypes
            .par_iter()
            .enumerate()
            .map(|(index, p)| Self::score(geometry, input, index, p.as_ref()))
            .collect()
    }

    fn score<G: CategoryGeometry>(
        geometry: &G,
        input: &[f64],
        index: usize,
        weights: &[f64],
    ) -> CategoryScore {
        CategoryScore {
            index,
            choice: geometry.choice(input, weights),
            match_score: geometry.match_score(input, weights),
        }
    }

    /// Winning admissible category: highest choice, ties to the lowest index.
    pub fn winner(scores: &[CategoryScore], vigilance: f64) -> Option<CategoryScore> {
        let mut best: Option<CategoryScore> = None;
        for s in scores {
            if !Self::is_admissible(s.match_score, vigilance) {
                continue;
            }
            match best {
                Some(b) if s.choice <= b.choice => {}
                _ => best = Some(*s),
            }
        }
        best
    }

    /// Category with the highest match score regardless of vigilance.
    ///
    /// Ties go to the lowest index.
    pub fn closest(scores: &[CategoryScore]) -> Option<CategoryScore> {
        let mut best: Option<CategoryScore> = None;
        for s in scores {
            match best {
                Some(b) if s.match_score <= b.match_score => {}
                _ => best = Some(*s),
            }
        }
        best
    }

    /// Admissible categories ordered best-first (choice descending, index ascending).
    pub fn ranked(scores: &[CategoryScore], vigilance: f64) -> Vec<CategoryScore> {
        let mut admissible: Vec<CategoryScore> = scores
            .iter()
            .filter(|s| Self::is_admissible(s.match_score, vigilance))
            .copied()
            .collect();
        admissible.sort_by(|a, b| {
            b.choice
                .partial_cmp(&a.choice)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        admissible
    }
}
