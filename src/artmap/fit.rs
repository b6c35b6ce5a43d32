//! Multi-epoch training driver.

use super::{ArtMap, Space, TrainOutcome};
use crate::error::{ArtError, Result};
use crate::kernel::geometry::CategoryGeometry;
use crate::kernel::vector::Vector;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Options for [`ArtMap::fit`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Maximum number of passes over the samples.
    pub epochs: usize,
    /// Shuffle the presentation order every epoch with this seed.
    /// `None` keeps the given order.
    pub shuffle_seed: Option<u64>,
    /// Stop after an epoch that created no category and had no failures.
    pub stop_when_stable: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            epochs: 1,
            shuffle_seed: None,
            stop_when_stable: true,
        }
    }
}

impl FitOptions {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn with_stop_when_stable(mut self, stop: bool) -> Self {
        self.stop_when_stable = stop;
        self
    }
}

/// Totals over a [`ArtMap::fit`] run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub epochs_run: usize,
    pub successes: usize,
    pub new_mappings: usize,
    pub mismatches: usize,
    pub exhausted: usize,
    pub reassignments: usize,
    pub input_categories: usize,
    pub target_categories: usize,
}

impl FitReport {
    fn record(&mut self, outcome: &TrainOutcome) {
        match outcome {
            TrainOutcome::Success {
                was_new_mapping,
                reassigned_from,
                ..
            } => {
                self.successes += 1;
                if *was_new_mapping {
                    self.new_mappings += 1;
                }
                if reassigned_from.is_some() {
                    self.reassignments += 1;
                }
            }
            TrainOutcome::MapFieldMismatch { .. } => self.mismatches += 1,
            TrainOutcome::CapacityExhausted { .. } => self.exhausted += 1,
        }
    }

    fn failures(&self) -> usize {
        self.mismatches + self.exhausted
    }
}

impl<G: CategoryGeometry> ArtMap<G> {
    /// Train on `(input, target)` pairs for up to `options.epochs` passes.
    pub fn fit(&mut self, samples: &[(Vector, Vector)], options: &FitOptions) -> Result<FitReport> {
        if samples.is_empty() {
            return Err(ArtError::EmptyInput("fit requires at least one sample".into()));
        }
        if options.epochs == 0 {
            return Err(ArtError::invalid("epochs", "must be at least 1"));
        }

        let mut order: Vec<usize> = (0..samples.len()).collect();
        let mut rng = options.shuffle_seed.map(ChaCha8Rng::seed_from_u64);
        let mut report = FitReport::default();

        for epoch in 1..=options.epochs {
            if let Some(rng) = rng.as_mut() {
                order.shuffle(rng);
            }
            let before = (
                self.category_count(Space::Input)?,
                self.category_count(Space::Target)?,
            );
            let failures_before = report.failures();

            for &i in &order {
                let (input, target) = &samples[i];
                let outcome = self.train(input, target)?;
                report.record(&outcome);
            }

            report.epochs_run = epoch;
            report.input_categories = self.category_count(Space::Input)?;
            report.target_categories = self.category_count(Space::Target)?;
            let grew = (report.input_categories, report.target_categories) != before;
            let failed = report.failures() > failures_before;
            info!(
                epoch,
                input_categories = report.input_categories,
                target_categories = report.target_categories,
                failures = report.failures() - failures_before,
                "fit epoch complete"
            );

            if options.stop_when_stable && !grew && !failed {
                break;
            }
        }
        Ok(report)
    }
}
