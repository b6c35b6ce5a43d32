//! Fuzzy ART: the single-module learner.
//!
//! One learning step runs `Searching → {Matched, Created, Exhausted}`:
//!
//! 1. Encode the input (complement coding for [`FuzzyBox`]).
//! 2. Score every category; keep those whose match passes vigilance.
//! 3. The admissible category with the highest choice wins (ties → lowest
//!    index) and learns the input. With nothing admissible a new category is
//!    seeded from the input, unless the store is full.
//!
//! The search ([`FuzzyArt::resolve`]) is pure; [`FuzzyArt::commit`] is the
//! only place a step writes. ARTMAP's match tracking relies on that split to
//! search repeatedly without touching any prototype.
//!
//! # Example
//!
//! ```rust
//! use artmap::{ArtConfig, FuzzyArt, Vector};
//!
//! let mut art = FuzzyArt::new(ArtConfig::default().with_vigilance(0.9), 3).unwrap();
//! let first = art.learn(&Vector::new(vec![1.0, 0.0, 0.0]).unwrap()).unwrap();
//! assert!(first.was_new_category());
//!
//! let probe = Vector::new(vec![0.9, 0.1, 0.0]).unwrap();
//! let hit = art.predict(&probe).unwrap().expect("resonates with category 0");
//! assert_eq!(hit.category, 0);
//! ```

use crate::config::{check_unit, ArtConfig};
use crate::error::{ArtError, Result};
use crate::kernel::geometry::{CategoryGeometry, FuzzyBox};
use crate::kernel::resonance::{CategoryScore, Resonance};
use crate::kernel::vector::Vector;
use crate::memory::category::{Category, CategoryStore};
use crate::memory::snapshot::{ArtSnapshot, SpaceSnapshot};
use std::path::Path;
use tracing::{debug, trace, warn};

/// A category that resonated with an input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryMatch {
    pub category: usize,
    pub match_score: f64,
    pub choice: f64,
}

impl From<CategoryScore> for CategoryMatch {
    fn from(s: CategoryScore) -> Self {
        Self {
            category: s.index,
            match_score: s.match_score,
            choice: s.choice,
        }
    }
}

/// Search decision, computed without mutating anything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    /// An existing category passed vigilance and won the choice competition.
    Matched(CategoryMatch),
    /// Nothing passed vigilance; a category with this index would be created.
    Create { category: usize },
    /// Nothing passed vigilance and the store is full.
    Exhausted,
}

impl Resolution {
    /// Category the decision points at, if any.
    pub fn category(&self) -> Option<usize> {
        match self {
            Resolution::Matched(m) => Some(m.category),
            Resolution::Create { category } => Some(*category),
            Resolution::Exhausted => None,
        }
    }

    /// Match score of the decision. A new category matches its seed perfectly.
    pub fn match_score(&self) -> Option<f64> {
        match self {
            Resolution::Matched(m) => Some(m.match_score),
            Resolution::Create { .. } => Some(1.0),
            Resolution::Exhausted => None,
        }
    }
}

/// Outcome of one learning step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LearnOutcome {
    Matched(CategoryMatch),
    Created { category: usize },
    /// Capacity reached and no category resonated. Nothing was written.
    Exhausted,
}

impl LearnOutcome {
    pub fn category(&self) -> Option<usize> {
        match self {
            LearnOutcome::Matched(m) => Some(m.category),
            LearnOutcome::Created { category } => Some(*category),
            LearnOutcome::Exhausted => None,
        }
    }

    /// Match score of the winning or created category.
    pub fn score(&self) -> Option<f64> {
        match self {
            LearnOutcome::Matched(m) => Some(m.match_score),
            LearnOutcome::Created { .. } => Some(1.0),
            LearnOutcome::Exhausted => None,
        }
    }

    pub fn was_new_category(&self) -> bool {
        matches!(self, LearnOutcome::Created { .. })
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, LearnOutcome::Exhausted)
    }
}

/// A single Fuzzy ART module over one input space.
#[derive(Clone, Debug)]
pub struct FuzzyArt<G: CategoryGeometry = FuzzyBox> {
    config: ArtConfig,
    input_dim: usize,
    geometry: G,
    store: CategoryStore,
}

impl FuzzyArt<FuzzyBox> {
    /// Create a fuzzy-box module for inputs of `input_dim` components.
    pub fn new(config: ArtConfig, input_dim: usize) -> Result<Self> {
        Self::with_geometry(config, input_dim)
    }

    /// Rebuild a fuzzy-box module from a snapshot.
    pub fn from_snapshot(snapshot: &ArtSnapshot) -> Result<Self> {
        Self::from_snapshot_with_geometry(snapshot)
    }

    /// Load a fuzzy-box module from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_geometry(path)
    }
}

impl<G: CategoryGeometry> FuzzyArt<G> {
    /// Create a module with an explicit geometry type.
    pub fn with_geometry(config: ArtConfig, input_dim: usize) -> Result<Self> {
        config.validate()?;
        if input_dim == 0 {
            return Err(ArtError::invalid("input_dim", "must be at least 1"));
        }
        let geometry = G::from_config(&config);
        let store = CategoryStore::new(geometry.encoded_dim(input_dim), config.max_categories);
        Ok(Self {
            config,
            input_dim,
            geometry,
            store,
        })
    }

    // --- Accessors ---

    pub fn config(&self) -> &ArtConfig {
        &self.config
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn category_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_full(&self) -> bool {
        self.store.is_full()
    }

    /// Read-only view of one category.
    pub fn category(&self, index: usize) -> Result<&Category> {
        self.store.category(index)
    }

    /// All categories in index order.
    pub fn categories(&self) -> &[Category] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    // --- Search and commit ---

    /// Validate the input dimension and encode it.
    pub fn encode(&self, input: &Vector) -> Result<Vec<f64>> {
        if input.dimensions() != self.input_dim {
            return Err(ArtError::DimensionMismatch {
                expected: self.input_dim,
                got: input.dimensions(),
            });
        }
        Ok(self.geometry.encode(input))
    }

    /// Scores of every category against an encoded input, in index order.
    pub fn scores(&self, coded: &[f64]) -> Vec<CategoryScore> {
        Resonance::evaluate(&self.geometry, coded, self.store.as_slice())
    }

    /// Decide what a learning step at `vigilance` would do. Never mutates.
    ///
    /// `coded` must come from [`encode`](Self::encode).
    pub fn resolve(&self, coded: &[f64], vigilance: f64) -> Resolution {
        let scores = self.scores(coded);
        match Resonance::winner(&scores, vigilance) {
            Some(best) => Resolution::Matched(best.into()),
            None if self.store.is_full() => Resolution::Exhausted,
            None => Resolution::Create {
                category: self.store.len(),
            },
        }
    }

    /// Apply a resolution: the single mutation point of a learning step.
    pub fn commit(&mut self, coded: &[f64], resolution: Resolution) -> Result<LearnOutcome> {
        if coded.len() != self.store.dim() {
            return Err(ArtError::DimensionMismatch {
                expected: self.store.dim(),
                got: coded.len(),
            });
        }
        match resolution {
            Resolution::Matched(m) => {
                let learning_rate = self.config.learning_rate;
                let category = self.store.get_mut(m.category)?;
                self.geometry
                    .update(coded, category.weights_mut(), learning_rate);
                category.record_resonance();
                trace!(
                    category = m.category,
                    match_score = m.match_score,
                    choice = m.choice,
                    "category resonated"
                );
                Ok(LearnOutcome::Matched(m))
            }
            Resolution::Create { .. } => {
                let prototype = self.geometry.create(coded);
                match self.store.push(prototype)? {
                    Some(category) => {
                        debug!(category, total = self.store.len(), "created category");
                        Ok(LearnOutcome::Created { category })
                    }
                    None => Ok(self.exhausted()),
                }
            }
            Resolution::Exhausted => Ok(self.exhausted()),
        }
    }

    fn exhausted(&self) -> LearnOutcome {
        warn!(
            max_categories = self.config.max_categories,
            "category capacity exhausted; input not learned"
        );
        LearnOutcome::Exhausted
    }

    /// Category with the highest match score, ignoring vigilance.
    pub fn closest(&self, coded: &[f64]) -> Option<CategoryMatch> {
        Resonance::closest(&self.scores(coded)).map(CategoryMatch::from)
    }

    // --- Learning ---

    /// Learn one input at the configured vigilance.
    pub fn learn(&mut self, input: &Vector) -> Result<LearnOutcome> {
        self.learn_with_vigilance(input, self.config.vigilance)
    }

    /// Learn one input at an explicit vigilance.
    pub fn learn_with_vigilance(&mut self, input: &Vector, vigilance: f64) -> Result<LearnOutcome> {
        check_unit("vigilance", vigilance)?;
        let coded = self.encode(input)?;
        let resolution = self.resolve(&coded, vigilance);
        self.commit(&coded, resolution)
    }

    /// Learn a sequence of inputs in order.
    pub fn learn_batch(&mut self, inputs: &[Vector]) -> Result<Vec<LearnOutcome>> {
        inputs.iter().map(|x| self.learn(x)).collect()
    }

    // --- Prediction ---

    /// Best resonating category at the configured vigilance, if any.
    pub fn predict(&self, input: &Vector) -> Result<Option<CategoryMatch>> {
        self.predict_with_vigilance(input, self.config.vigilance)
    }

    pub fn predict_with_vigilance(
        &self,
        input: &Vector,
        vigilance: f64,
    ) -> Result<Option<CategoryMatch>> {
        check_unit("vigilance", vigilance)?;
        let coded = self.encode(input)?;
        Ok(Resonance::winner(&self.scores(&coded), vigilance).map(CategoryMatch::from))
    }

    /// Every category's scores for `input`, in index order.
    pub fn evaluate(&self, input: &Vector) -> Result<Vec<CategoryScore>> {
        let coded = self.encode(input)?;
        Ok(self.scores(&coded))
    }

    /// Discard every category.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    // --- Persistence ---

    pub fn snapshot(&self) -> ArtSnapshot {
        ArtSnapshot::new(
            self.config.clone(),
            SpaceSnapshot::capture(self.input_dim, &self.store),
        )
    }

    /// Rebuild a module with an explicit geometry type from a snapshot.
    pub fn from_snapshot_with_geometry(snapshot: &ArtSnapshot) -> Result<Self> {
        if !snapshot.verify() {
            return Err(ArtError::CorruptSnapshot("checksum mismatch".into()));
        }
        Self::restore(snapshot.config.clone(), &snapshot.space)
    }

    /// Rebuild a module from a space snapshot, validating every prototype.
    pub(crate) fn restore(config: ArtConfig, space: &SpaceSnapshot) -> Result<Self> {
        let mut art = Self::with_geometry(config, space.input_dim)?;
        let dim = art.store.dim();
        for (i, c) in space.categories.iter().enumerate() {
            if c.weights.len() != dim {
                return Err(ArtError::CorruptSnapshot(format!(
                    "category {} has {} weights, expected {}",
                    i,
                    c.weights.len(),
                    dim
                )));
            }
            if c.weights.iter().any(|w| !w.is_finite() || *w < 0.0 || *w > 1.0) {
                return Err(ArtError::CorruptSnapshot(format!(
                    "category {} has weights outside [0, 1]",
                    i
                )));
            }
            art.store.restore(c.weights.clone(), c.resonances)?;
        }
        Ok(art)
    }

    /// Persist to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string(&self.snapshot())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a module with an explicit geometry type from a JSON file.
    pub fn load_with_geometry(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let snapshot: ArtSnapshot = serde_json::from_str(&json)?;
        Self::from_snapshot_with_geometry(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::snapshot::CategorySnapshot;

    fn v(values: &[f64]) -> Vector {
        Vector::from_slice(values).unwrap()
    }

    fn art(vigilance: f64) -> FuzzyArt {
        FuzzyArt::new(ArtConfig::default().with_vigilance(vigilance), 3).unwrap()
    }

    #[test]
    fn test_first_input_creates_category() {
        let mut a = art(0.9);
        let out = a.learn(&v(&[0.0, 0.0, 1.0])).unwrap();
        assert!(out.was_new_category());
        assert_eq!(out.category(), Some(0));
        assert_eq!(out.score(), Some(1.0));
        assert_eq!(a.category_count(), 1);
    }

    #[test]
    fn test_similar_input_resonates_and_learns() {
        let mut a = art(0.9);
        a.learn(&v(&[1.0, 0.0, 0.0])).unwrap();
        let out = a.learn(&v(&[0.9, 0.1, 0.0])).unwrap();
        match out {
            LearnOutcome::Matched(m) => {
                assert_eq!(m.category, 0);
                assert!(m.match_score > 0.9, "match {}", m.match_score);
            }
            other => panic!("expected a match, got {:?}", other),
        }
        // Box now spans x ∈ [0.9, 1.0], y ∈ [0.0, 0.1].
        let bounds = a.category(0).unwrap().bounds();
        assert!((bounds[0].0 - 0.9).abs() < 1e-12);
        assert!((bounds[1].1 - 0.1).abs() < 1e-12);
        assert_eq!(a.category(0).unwrap().resonances(), 2);
    }

    #[test]
    fn test_dissimilar_input_creates_new_category() {
        let mut a = art(0.9);
        a.learn(&v(&[1.0, 0.0, 0.0])).unwrap();
        let out = a.learn(&v(&[0.0, 1.0, 0.0])).unwrap();
        assert_eq!(out, LearnOutcome::Created { category: 1 });
    }

    #[test]
    fn test_exhausted_at_capacity_without_mutation() {
        let cfg = ArtConfig::default().with_vigilance(0.9).with_max_categories(1);
        let mut a = FuzzyArt::new(cfg, 3).unwrap();
        a.learn(&v(&[1.0, 0.0, 0.0])).unwrap();
        let before = a.category(0).unwrap().clone();
        let out = a.learn(&v(&[0.0, 1.0, 0.0])).unwrap();
        assert!(out.is_exhausted());
        assert_eq!(out.category(), None);
        assert_eq!(a.category_count(), 1);
        assert_eq!(a.category(0).unwrap(), &before);
    }

    #[test]
    fn test_predict_is_read_only() {
        let mut a = art(0.9);
        a.learn(&v(&[1.0, 0.0, 0.0])).unwrap();
        let before = a.categories().to_vec();
        let hit = a.predict(&v(&[0.9, 0.1, 0.0])).unwrap().unwrap();
        assert_eq!(hit.category, 0);
        assert!(hit.match_score > 0.85);
        assert!(a.predict(&v(&[0.0, 0.0, 1.0])).unwrap().is_none());
        assert_eq!(a.categories(), before.as_slice());
    }

    #[test]
    fn test_predict_on_empty_store_is_no_match() {
        let a = art(0.5);
        assert!(a.predict(&v(&[0.5, 0.5, 0.5])).unwrap().is_none());
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut a = art(0.5);
        let err = a.learn(&v(&[0.5, 0.5])).unwrap_err();
        assert!(matches!(err, ArtError::DimensionMismatch { expected: 3, got: 2 }));
    }

    #[test]
    fn test_invalid_vigilance_rejected() {
        let mut a = art(0.5);
        assert!(a.learn_with_vigilance(&v(&[0.5, 0.5, 0.5]), 1.5).is_err());
        assert!(a.predict_with_vigilance(&v(&[0.5, 0.5, 0.5]), -0.1).is_err());
    }

    #[test]
    fn test_resolve_does_not_mutate() {
        let mut a = art(0.9);
        a.learn(&v(&[1.0, 0.0, 0.0])).unwrap();
        let coded = a.encode(&v(&[0.9, 0.1, 0.0])).unwrap();
        let before = a.categories().to_vec();
        let r = a.resolve(&coded, 0.9);
        assert_eq!(r.category(), Some(0));
        assert_eq!(a.categories(), before.as_slice());
        assert_eq!(a.resolve(&coded, 0.99), Resolution::Create { category: 1 });
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        // Two identical prototypes can only come from a restored store.
        let proto = CategorySnapshot {
            weights: vec![0.2, 0.2, 0.2, 0.6, 0.6, 0.6],
            resonances: 1,
        };
        let space = SpaceSnapshot {
            input_dim: 3,
            categories: vec![proto.clone(), proto],
        };
        let snap = ArtSnapshot::new(ArtConfig::default().with_vigilance(0.5), space);
        let a = FuzzyArt::from_snapshot(&snap).unwrap();
        for _ in 0..3 {
            let hit = a.predict(&v(&[0.3, 0.3, 0.3])).unwrap().unwrap();
            assert_eq!(hit.category, 0);
        }
    }

    #[test]
    fn test_learn_batch_and_clear() {
        let mut a = art(0.95);
        let inputs = vec![v(&[1.0, 0.0, 0.0]), v(&[0.0, 1.0, 0.0]), v(&[0.0, 0.0, 1.0])];
        let outcomes = a.learn_batch(&inputs).unwrap();
        assert!(outcomes.iter().all(|o| o.was_new_category()));
        a.clear();
        assert_eq!(a.category_count(), 0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut a = art(0.8);
        for x in [[0.1, 0.2, 0.3], [0.15, 0.2, 0.35], [0.9, 0.8, 0.1]] {
            a.learn(&v(&x)).unwrap();
        }
        let restored = FuzzyArt::from_snapshot(&a.snapshot()).unwrap();
        assert_eq!(restored.categories(), a.categories());
        let generic = FuzzyArt::<FuzzyBox>::from_snapshot_with_geometry(&a.snapshot()).unwrap();
        assert_eq!(generic.categories(), a.categories());

        let mut tampered = a.snapshot();
        tampered.space.categories[0].weights[0] = 0.0;
        assert!(matches!(
            FuzzyArt::from_snapshot(&tampered),
            Err(ArtError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let mut a = art(0.8);
        a.learn(&v(&[0.3, 0.6, 0.9])).unwrap();
        let path = std::env::temp_dir()
            .join(format!("artmap_test_fuzzy_art_{}.json", std::process::id()));
        a.save(&path).expect("save failed");
        let b = FuzzyArt::load(&path).expect("load failed");
        assert_eq!(b.categories(), a.categories());
        let _ = std::fs::remove_file(path);
    }
}
