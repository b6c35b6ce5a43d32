//! Category geometry: the capability interface the learners are written against.
//!
//! A geometry decides how an input is prepared, how it is compared with a
//! prototype, and how a prototype learns. [`FuzzyBox`] is the hyper-rectangle
//! geometry of Fuzzy ART. Other shapes (hyperspheres, Gaussians) plug in by
//! implementing [`CategoryGeometry`]; [`FuzzyArt`](crate::art::FuzzyArt) and
//! [`ArtMap`](crate::artmap::ArtMap) never look past this trait.

use crate::config::ArtConfig;
use crate::kernel::complement::ComplementCoder;
use crate::kernel::learning::fuzzy_min_update;
use crate::kernel::resonance::Resonance;
use crate::kernel::vector::Vector;
use std::fmt::Debug;

/// Per-variant resonance and learning behaviour.
pub trait CategoryGeometry: Clone + Debug + Send + Sync {
    /// Build the geometry from a space's configuration.
    fn from_config(config: &ArtConfig) -> Self;

    /// Length of an encoded input (and of every prototype) for `input_dim`.
    fn encoded_dim(&self, input_dim: usize) -> usize;

    /// Prepare a raw input for comparison.
    fn encode(&self, input: &Vector) -> Vec<f64>;

    /// Ranking score; higher is preferred.
    fn choice(&self, input: &[f64], weights: &[f64]) -> f64;

    /// Acceptance score in `[0, 1]`, compared against vigilance.
    fn match_score(&self, input: &[f64], weights: &[f64]) -> f64;

    /// Learn `input` into `weights` in place.
    fn update(&self, input: &[f64], weights: &mut [f64], learning_rate: f64);

    /// Prototype for a brand-new category seeded by `input`.
    fn create(&self, input: &[f64]) -> Vec<f64>;
}

/// Fuzzy ART hyper-rectangle categories over complement-coded inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuzzyBox {
    choice_bias: f64,
}

impl FuzzyBox {
    pub fn new(choice_bias: f64) -> Self {
        Self { choice_bias }
    }

    pub fn choice_bias(&self) -> f64 {
        self.choice_bias
    }
}

impl CategoryGeometry for FuzzyBox {
    fn from_config(config: &ArtConfig) -> Self {
        Self::new(config.choice_bias)
    }

    fn encoded_dim(&self, input_dim: usize) -> usize {
        input_dim * 2
    }

    fn encode(&self, input: &Vector) -> Vec<f64> {
        ComplementCoder::encode(input)
    }

    fn choice(&self, input: &[f64], weights: &[f64]) -> f64 {
        Resonance::choice(input, weights, self.choice_bias)
    }

    fn match_score(&self, input: &[f64], weights: &[f64]) -> f64 {
        Resonance::match_score(input, weights)
    }

    fn update(&self, input: &[f64], weights: &mut [f64], learning_rate: f64) {
        fuzzy_min_update(input, weights, learning_rate);
    }

    fn create(&self, input: &[f64]) -> Vec<f64> {
        input.to_vec()
    }
}
