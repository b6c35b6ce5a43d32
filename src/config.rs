//! Configuration for Fuzzy ART spaces and ARTMAP sessions.
//!
//! Every constructor validates its configuration and fails fast; nothing in
//! the learning loop re-checks these ranges.
//!
//! ```rust
//! use artmap::{ArtConfig, ArtMapConfig};
//!
//! let cfg = ArtMapConfig::default()
//!     .with_input(ArtConfig::default().with_vigilance(0.8))
//!     .with_vigilance_increment(0.001);
//! cfg.validate().unwrap();
//!
//! let json = cfg.to_json().unwrap();
//! assert_eq!(ArtMapConfig::from_json(&json).unwrap(), cfg);
//! ```

use crate::error::{ArtError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default vigilance for both spaces.
pub const DEFAULT_VIGILANCE: f64 = 0.75;

/// Default choice bias `α`.
pub const DEFAULT_CHOICE_BIAS: f64 = 0.001;

/// Default capacity of one category store.
pub const DEFAULT_MAX_CATEGORIES: usize = 1024;

/// Parameters of a single Fuzzy ART space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtConfig {
    /// Baseline vigilance `ρ ∈ [0, 1]`; higher means more, smaller categories.
    pub vigilance: f64,
    /// Learning rate `β ∈ [0, 1]`; 1.0 is fast learning.
    pub learning_rate: f64,
    /// Choice bias `α > 0`.
    pub choice_bias: f64,
    /// Upper bound on the number of categories in the space.
    pub max_categories: usize,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            vigilance: DEFAULT_VIGILANCE,
            learning_rate: 1.0,
            choice_bias: DEFAULT_CHOICE_BIAS,
            max_categories: DEFAULT_MAX_CATEGORIES,
        }
    }
}

impl ArtConfig {
    pub fn with_vigilance(mut self, vigilance: f64) -> Self {
        self.vigilance = vigilance;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_choice_bias(mut self, choice_bias: f64) -> Self {
        self.choice_bias = choice_bias;
        self
    }

    pub fn with_max_categories(mut self, max_categories: usize) -> Self {
        self.max_categories = max_categories;
        self
    }

    /// Check every parameter against its admissible range.
    pub fn validate(&self) -> Result<()> {
        check_unit("vigilance", self.vigilance)?;
        check_unit("learning_rate", self.learning_rate)?;
        if !(self.choice_bias.is_finite() && self.choice_bias > 0.0) {
            return Err(ArtError::invalid(
                "choice_bias",
                format!("must be finite and > 0, got {}", self.choice_bias),
            ));
        }
        if self.max_categories == 0 {
            return Err(ArtError::invalid("max_categories", "must be at least 1"));
        }
        Ok(())
    }
}

/// Parameters of a supervised ARTMAP session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtMapConfig {
    /// Input space (A). Its vigilance is the match-tracking baseline.
    pub input: ArtConfig,
    /// Target space (B).
    pub target: ArtConfig,
    /// Minimum acceptable map-field confidence, in `(0, 1]`.
    ///
    /// Confidence is one-hot: 1.0 when the input category is unmapped or
    /// already maps to the target, 0.0 on a conflict. Every value in the
    /// admissible range therefore accepts exactly the same cases.
    pub map_vigilance: f64,
    /// Match-tracking step `ε > 0`.
    pub vigilance_increment: f64,
    /// Ceiling for match tracking, in `[input.vigilance, 1]`.
    pub max_vigilance: f64,
    /// Circuit breaker on match-tracking iterations.
    pub max_search_attempts: usize,
    /// Allow overwriting the closest category's label when the input space
    /// is full. Off by default: it can destroy earlier associations.
    pub relaxed_reassignment: bool,
}

impl Default for ArtMapConfig {
    fn default() -> Self {
        Self {
            input: ArtConfig::default(),
            target: ArtConfig::default().with_vigilance(1.0),
            map_vigilance: 1.0,
            vigilance_increment: 0.001,
            max_vigilance: 1.0,
            max_search_attempts: 1000,
            relaxed_reassignment: false,
        }
    }
}

impl ArtMapConfig {
    pub fn with_input(mut self, input: ArtConfig) -> Self {
        self.input = input;
        self
    }

    pub fn with_target(mut self, target: ArtConfig) -> Self {
        self.target = target;
        self
    }

    pub fn with_map_vigilance(mut self, map_vigilance: f64) -> Self {
        self.map_vigilance = map_vigilance;
        self
    }

    pub fn with_vigilance_increment(mut self, increment: f64) -> Self {
        self.vigilance_increment = increment;
        self
    }

    pub fn with_max_vigilance(mut self, max_vigilance: f64) -> Self {
        self.max_vigilance = max_vigilance;
        self
    }

    pub fn with_max_search_attempts(mut self, attempts: usize) -> Self {
        self.max_search_attempts = attempts;
        self
    }

    pub fn with_relaxed_reassignment(mut self, enabled: bool) -> Self {
        self.relaxed_reassignment = enabled;
        self
    }

    /// Check both spaces and the match-tracking parameters.
    pub fn validate(&self) -> Result<()> {
        self.input.validate()?;
        self.target.validate()?;
        if !(self.map_vigilance.is_finite() && self.map_vigilance > 0.0 && self.map_vigilance <= 1.0)
        {
            return Err(ArtError::invalid(
                "map_vigilance",
                format!("must be in (0, 1], got {}", self.map_vigilance),
            ));
        }
        if !(self.vigilance_increment.is_finite() && self.vigilance_increment > 0.0) {
            return Err(ArtError::invalid(
                "vigilance_increment",
                format!("must be finite and > 0, got {}", self.vigilance_increment),
            ));
        }
        check_unit("max_vigilance", self.max_vigilance)?;
        if self.max_vigilance < self.input.vigilance {
            return Err(ArtError::invalid(
                "max_vigilance",
                format!(
                    "must be >= input vigilance {}, got {}",
                    self.input.vigilance, self.max_vigilance
                ),
            ));
        }
        if self.max_search_attempts == 0 {
            return Err(ArtError::invalid("max_search_attempts", "must be at least 1"));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub(crate) fn check_unit(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ArtError::invalid(name, format!("must be in [0, 1], got {}", value)))
    }
}
