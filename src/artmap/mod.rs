//! Fuzzy ARTMAP: supervised learning across two paired spaces.
//!
//! An [`ArtMap`] session owns two [`FuzzyArt`] modules (input space A,
//! target space B) and the [`MapField`] linking their categories. Training
//! learns the target on B first; its category becomes the expected
//! association, and [`MatchTracker`] drives A until its winning category maps
//! there.
//!
//! # Example
//!
//! ```rust
//! use artmap::{ArtConfig, ArtMap, ArtMapConfig, Vector};
//!
//! let cfg = ArtMapConfig::default().with_input(ArtConfig::default().with_vigilance(0.9));
//! let mut session = ArtMap::new(cfg, 3, 2).unwrap();
//!
//! let label_a = Vector::new(vec![1.0, 0.0]).unwrap();
//! let label_b = Vector::new(vec![0.0, 1.0]).unwrap();
//! session.train(&Vector::new(vec![1.0, 0.0, 0.0]).unwrap(), &label_a).unwrap();
//! session.train(&Vector::new(vec![0.0, 1.0, 0.0]).unwrap(), &label_b).unwrap();
//!
//! let probe = Vector::new(vec![0.9, 0.1, 0.0]).unwrap();
//! let hit = session.predict_association(&probe).unwrap().expect("known region");
//! assert_eq!(session.target_prototype(hit.b_index).unwrap(), label_a);
//! ```

pub mod fit;
pub mod tracking;

pub use fit::{FitOptions, FitReport};
pub use tracking::{MatchTracker, SearchStep, SearchTrace, Space, TrainOutcome};

use crate::art::{CategoryMatch, FuzzyArt};
use crate::config::ArtMapConfig;
use crate::error::{ArtError, Result};
use crate::kernel::complement::ComplementCoder;
use crate::kernel::geometry::{CategoryGeometry, FuzzyBox};
use crate::kernel::vector::Vector;
use crate::memory::category::Category;
use crate::memory::map_field::{Association, MapField};
use crate::memory::snapshot::{ArtMapSnapshot, SpaceSnapshot};
use std::path::Path;
use tracing::info;

/// A predicted input → target association.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    pub a_index: usize,
    pub b_index: usize,
    /// Match score of the input against `a_index`.
    pub match_score: f64,
}

/// A supervised ARTMAP session.
#[derive(Clone, Debug)]
pub struct ArtMap<G: CategoryGeometry = FuzzyBox> {
    config: ArtMapConfig,
    input: FuzzyArt<G>,
    target: FuzzyArt<G>,
    map_field: MapField,
    tracker: MatchTracker,
    /// Operating input-space vigilance; reset to the baseline by every `train`.
    vigilance: f64,
    closed: bool,
}

impl ArtMap<FuzzyBox> {
    /// Create a fuzzy-box session.
    pub fn new(config: ArtMapConfig, input_dim: usize, target_dim: usize) -> Result<Self> {
        Self::with_geometry(config, input_dim, target_dim)
    }

    /// Rebuild a fuzzy-box session from a snapshot.
    pub fn from_snapshot(snapshot: &ArtMapSnapshot) -> Result<Self> {
        Self::from_snapshot_with_geometry(snapshot)
    }

    /// Load a fuzzy-box session from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_geometry(path)
    }
}

impl<G: CategoryGeometry> ArtMap<G> {
    /// Create a session with an explicit geometry type.
    pub fn with_geometry(config: ArtMapConfig, input_dim: usize, target_dim: usize) -> Result<Self> {
        config.validate()?;
        let input = FuzzyArt::with_geometry(config.input.clone(), input_dim)?;
        let target = FuzzyArt::with_geometry(config.target.clone(), target_dim)?;
        Ok(Self::assemble(config, input, target, MapField::new()))
    }

    fn assemble(
        config: ArtMapConfig,
        input: FuzzyArt<G>,
        target: FuzzyArt<G>,
        map_field: MapField,
    ) -> Self {
        let tracker = MatchTracker::from_config(&config);
        Self {
            vigilance: tracker.baseline_vigilance,
            config,
            input,
            target,
            map_field,
            tracker,
            closed: false,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(ArtError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn module(&self, space: Space) -> &FuzzyArt<G> {
        match space {
            Space::Input => &self.input,
            Space::Target => &self.target,
        }
    }

    // --- Accessors ---

    pub fn config(&self) -> Result<&ArtMapConfig> {
        self.ensure_open()?;
        Ok(&self.config)
    }

    /// Input-space vigilance left by the most recent `train` call.
    pub fn current_vigilance(&self) -> Result<f64> {
        self.ensure_open()?;
        Ok(self.vigilance)
    }

    pub fn input_module(&self) -> Result<&FuzzyArt<G>> {
        self.ensure_open()?;
        Ok(&self.input)
    }

    pub fn target_module(&self) -> Result<&FuzzyArt<G>> {
        self.ensure_open()?;
        Ok(&self.target)
    }

    pub fn category_count(&self, space: Space) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.module(space).category_count())
    }

    /// Read-only view of one category.
    pub fn category(&self, space: Space, index: usize) -> Result<&Category> {
        self.ensure_open()?;
        self.module(space).category(index)
    }

    pub fn categories(&self, space: Space) -> Result<&[Category]> {
        self.ensure_open()?;
        Ok(self.module(space).categories())
    }

    /// Read-only view of the map field.
    pub fn map_field(&self) -> Result<&MapField> {
        self.ensure_open()?;
        Ok(&self.map_field)
    }

    // --- Training ---

    /// Supervised step: learn `target` on B, then match-track `input` on A.
    pub fn train(&mut self, input: &Vector, target: &Vector) -> Result<TrainOutcome> {
        self.ensure_open()?;
        // Validate both sides before anything is written.
        let coded = self.input.encode(input)?;
        self.target.encode(target)?;

        let target_index = match self.target.learn(target)?.category() {
            Some(index) => index,
            None => {
                self.vigilance = self.tracker.baseline_vigilance;
                return Ok(TrainOutcome::CapacityExhausted {
                    space: Space::Target,
                    search_trace: SearchTrace::default(),
                });
            }
        };

        self.tracker.run(
            &mut self.input,
            &mut self.map_field,
            &coded,
            target_index,
            &mut self.vigilance,
        )
    }

    // --- Prediction ---

    /// Best resonating input category at the baseline vigilance.
    pub fn predict(&self, input: &Vector) -> Result<Option<CategoryMatch>> {
        self.ensure_open()?;
        self.input.predict(input)
    }

    /// Input category and the target category it maps to.
    pub fn predict_association(&self, input: &Vector) -> Result<Option<Prediction>> {
        self.ensure_open()?;
        Ok(self.input.predict(input)?.and_then(|m| {
            self.map_field.lookup(m.category).map(|b_index| Prediction {
                a_index: m.category,
                b_index,
                match_score: m.match_score,
            })
        }))
    }

    /// Predict many inputs under one borrow.
    pub fn predict_batch(&self, inputs: &[Vector]) -> Result<Vec<Option<Prediction>>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            inputs.par_iter().map(|x| self.predict_association(x)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            inputs.iter().map(|x| self.predict_association(x)).collect()
        }
    }

    /// Target prototype of a B category, decoded to target space.
    ///
    /// For fast-learned categories that only ever saw one target this is
    /// that target exactly; otherwise it is the lower corner of the box.
    pub fn target_prototype(&self, b_index: usize) -> Result<Vector> {
        self.ensure_open()?;
        ComplementCoder::decode(self.target.category(b_index)?.weights())
    }

    /// Predicted target vector for `input`, if any category resonates.
    pub fn predict_target(&self, input: &Vector) -> Result<Option<Vector>> {
        match self.predict_association(input)? {
            Some(p) => Ok(Some(self.target_prototype(p.b_index)?)),
            None => Ok(None),
        }
    }

    // --- Lifecycle ---

    /// Discard every category and map entry and reset vigilance.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.input.clear();
        self.target.clear();
        self.map_field.clear();
        self.vigilance = self.tracker.baseline_vigilance;
        info!("artmap session cleared");
        Ok(())
    }

    /// Tear the session down. Every later call fails with `SessionClosed`.
    pub fn close(&mut self) {
        if !self.closed {
            self.input.clear();
            self.target.clear();
            self.map_field.clear();
            self.closed = true;
            info!("artmap session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // --- Persistence ---

    pub fn snapshot(&self) -> Result<ArtMapSnapshot> {
        self.ensure_open()?;
        Ok(ArtMapSnapshot::new(
            self.config.clone(),
            SpaceSnapshot::capture(self.input.input_dim(), self.input.store()),
            SpaceSnapshot::capture(self.target.input_dim(), self.target.store()),
            self.map_field.entries(),
        ))
    }

    /// Rebuild a session exactly, validating config, prototypes and entries.
    pub fn from_snapshot_with_geometry(snapshot: &ArtMapSnapshot) -> Result<Self> {
        if !snapshot.verify() {
            return Err(ArtError::CorruptSnapshot("checksum mismatch".into()));
        }
        snapshot.config.validate()?;
        let input: FuzzyArt<G> = FuzzyArt::restore(snapshot.config.input.clone(), &snapshot.input)?;
        let target: FuzzyArt<G> =
            FuzzyArt::restore(snapshot.config.target.clone(), &snapshot.target)?;

        let mut map_field = MapField::new();
        for &(a, b) in &snapshot.map_field {
            if a >= input.category_count() || b >= target.category_count() {
                return Err(ArtError::CorruptSnapshot(format!(
                    "map entry {} -> {} references a missing category",
                    a, b
                )));
            }
            if map_field.associate(a, b) != Association::Created {
                return Err(ArtError::CorruptSnapshot(format!(
                    "duplicate map entry for input category {}",
                    a
                )));
            }
        }

        info!(
            input_categories = input.category_count(),
            target_categories = target.category_count(),
            mappings = map_field.len(),
            "artmap session restored"
        );
        Ok(Self::assemble(snapshot.config.clone(), input, target, map_field))
    }

    /// Persist to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string(&self.snapshot()?)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a session with an explicit geometry type from a JSON file.
    pub fn load_with_geometry(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let snapshot: ArtMapSnapshot = serde_json::from_str(&json)?;
        Self::from_snapshot_with_geometry(&snapshot)
    }
}
