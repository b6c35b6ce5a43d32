//! # artmap: Fuzzy ART and Fuzzy ARTMAP
//!
//! Online, incremental category learning with adaptive resonance. Inputs are
//! complement coded into hyper-box prototypes; a vigilance test decides
//! whether an input refines an existing category or seeds a new one, so
//! learning new patterns never erodes old ones beyond what vigilance allows.
//!
//! ## Quick Start
//!
//! ```rust
//! use artmap::{ArtConfig, ArtMap, ArtMapConfig, Space, TrainOutcome, Vector};
//!
//! let config = ArtMapConfig::default()
//!     .with_input(ArtConfig::default().with_vigilance(0.9));
//! let mut session = ArtMap::new(config, 3, 2)?;
//!
//! let x = Vector::new(vec![1.0, 0.0, 0.0])?;
//! let y = Vector::new(vec![1.0, 0.0])?;
//! let outcome = session.train(&x, &y)?;
//! assert!(matches!(outcome, TrainOutcome::Success { was_new_mapping: true, .. }));
//!
//! let probe = Vector::new(vec![0.9, 0.1, 0.0])?;
//! let hit = session.predict_association(&probe)?.expect("resonates");
//! assert_eq!(session.target_prototype(hit.b_index)?, y);
//! assert_eq!(session.category_count(Space::Input)?, 1);
//! # Ok::<(), artmap::ArtError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Complement coding**: `x ↦ [x, 1 − x]`, so every coded input has norm `n`
//! - **Choice**: `|x ∧ w| / (α + |w|)` ranks categories
//! - **Match**: `|x ∧ w| / |x|` is checked against vigilance `ρ`
//! - **Learning**: `w' = β(x ∧ w) + (1 − β)w`; boxes only grow
//! - **Match tracking**: on a wrong label, raise `ρ` and search again
//!
//! ## Layers
//!
//! - [`kernel`]: vectors, coding, scoring and the learning rule
//! - [`memory`]: category stores, the map field and snapshots
//! - [`art`]: the unsupervised single-space learner
//! - [`artmap`]: the supervised two-space session
//! - [`highlevel`]: a thread-safe session handle

pub mod art;
pub mod artmap;
pub mod config;
pub mod error;
pub mod highlevel;
pub mod kernel;
pub mod memory;

// Re-exports for convenience
pub use art::{CategoryMatch, FuzzyArt, LearnOutcome, Resolution};
pub use artmap::{
    ArtMap, FitOptions, FitReport, MatchTracker, Prediction, SearchStep, SearchTrace, Space,
    TrainOutcome,
};
pub use config::{ArtConfig, ArtMapConfig};
pub use error::{ArtError, Result};
pub use highlevel::SharedArtMap;
pub use kernel::{CategoryGeometry, CategoryScore, ComplementCoder, FuzzyBox, Resonance, Vector};
pub use memory::{
    ArtMapSnapshot, ArtSnapshot, Association, Category, CategoryStore, MapField, SpaceSnapshot,
};
