//! Match tracking: the supervised search that reconciles an input's category
//! with the target category it must map to.
//!
//! # Algorithm
//!
//! Starting from the input space's baseline vigilance, each attempt
//! resolves the input against the A-side categories without writing
//! anything, records `(vigilance, category, match)` in the search trace, and
//! checks the map field:
//!
//! - new category, unmapped category, or agreeing entry → commit and succeed;
//! - conflicting entry → raise vigilance by `ε` (capped at the maximum) and
//!   search again.
//!
//! The search gives up when a conflict persists at maximum vigilance or when
//! the attempt budget runs out. On that path the final attempt's weight
//! update is still committed, so the category may specialize even though the
//! label could not be resolved, and the map field is left untouched. Earlier
//! failed attempts never write.
//!
//! Vigilance only rises within one call and is reset to the baseline at the
//! start of the next.

use crate::art::{FuzzyArt, Resolution};
use crate::config::ArtMapConfig;
use crate::error::Result;
use crate::kernel::geometry::CategoryGeometry;
use crate::memory::map_field::{Association, MapField};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Which side of an ARTMAP session an outcome refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Space {
    /// The input space (A).
    Input,
    /// The target space (B).
    Target,
}

/// One match-tracking attempt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchStep {
    /// Vigilance the attempt ran at.
    pub vigilance: f64,
    /// Winning or newly created input category; `None` when the input
    /// space was full and nothing resonated.
    pub category: Option<usize>,
    /// Match score of `category` (1.0 for a new category, 0.0 for none).
    pub match_score: f64,
}

/// Ordered record of every attempt of one training call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchTrace {
    steps: Vec<SearchStep>,
}

impl SearchTrace {
    pub fn steps(&self) -> &[SearchStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&SearchStep> {
        self.steps.last()
    }

    /// Vigilance of the final attempt.
    pub fn final_vigilance(&self) -> Option<f64> {
        self.steps.last().map(|s| s.vigilance)
    }

    /// True when vigilance never decreased across attempts.
    pub fn is_monotonic(&self) -> bool {
        self.steps.windows(2).all(|w| w[0].vigilance <= w[1].vigilance)
    }

    pub(crate) fn push(&mut self, step: SearchStep) {
        self.steps.push(step);
    }
}

/// Result of one supervised training call.
#[derive(Clone, Debug, PartialEq)]
pub enum TrainOutcome {
    /// The input's category maps to the target's category.
    Success {
        a_index: usize,
        b_index: usize,
        map_field_confidence: f64,
        was_new_mapping: bool,
        /// Previous target of `a_index` when relaxed reassignment overwrote it.
        reassigned_from: Option<usize>,
        search_trace: SearchTrace,
    },
    /// Match tracking could not find a category consistent with the target.
    MapFieldMismatch {
        expected_index: usize,
        actual_index: usize,
        search_trace: SearchTrace,
    },
    /// A space ran out of capacity before the input could be placed.
    CapacityExhausted {
        space: Space,
        search_trace: SearchTrace,
    },
}

impl TrainOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TrainOutcome::Success { .. })
    }

    pub fn search_trace(&self) -> &SearchTrace {
        match self {
            TrainOutcome::Success { search_trace, .. }
            | TrainOutcome::MapFieldMismatch { search_trace, .. }
            | TrainOutcome::CapacityExhausted { search_trace, .. } => search_trace,
        }
    }

    /// Input category the outcome settled on, if any.
    pub fn a_index(&self) -> Option<usize> {
        match self {
            TrainOutcome::Success { a_index, .. } => Some(*a_index),
            TrainOutcome::MapFieldMismatch { search_trace, .. } => {
                search_trace.last().and_then(|s| s.category)
            }
            TrainOutcome::CapacityExhausted { .. } => None,
        }
    }
}

enum Failure {
    Exhausted,
    Conflict {
        resolution: Resolution,
        actual_index: usize,
    },
}

/// Match-tracking parameters and search loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchTracker {
    pub baseline_vigilance: f64,
    pub vigilance_increment: f64,
    pub max_vigilance: f64,
    pub max_search_attempts: usize,
    pub map_vigilance: f64,
    pub relaxed_reassignment: bool,
}

impl MatchTracker {
    pub fn from_config(config: &ArtMapConfig) -> Self {
        Self {
            baseline_vigilance: config.input.vigilance,
            vigilance_increment: config.vigilance_increment,
            max_vigilance: config.max_vigilance,
            max_search_attempts: config.max_search_attempts,
            map_vigilance: config.map_vigilance,
            relaxed_reassignment: config.relaxed_reassignment,
        }
    }

    /// Vigilance for the attempt after a conflict at `current`.
    pub fn next_vigilance(&self, current: f64) -> f64 {
        (current + self.vigilance_increment).min(self.max_vigilance)
    }

    /// Drive `art` until the coded input lands on a category consistent
    /// with `target_index`.
    ///
    /// `vigilance` is the session's operating vigilance: reset to the
    /// baseline here and left at the final attempt's value.
    pub fn run<G: CategoryGeometry>(
        &self,
        art: &mut FuzzyArt<G>,
        map: &mut MapField,
        coded: &[f64],
        target_index: usize,
        vigilance: &mut f64,
    ) -> Result<TrainOutcome> {
        *vigilance = self.baseline_vigilance;
        let mut search_trace = SearchTrace::default();
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            let resolution = art.resolve(coded, *vigilance);
            let step = SearchStep {
                vigilance: *vigilance,
                category: resolution.category(),
                match_score: resolution.match_score().unwrap_or(0.0),
            };
            search_trace.push(step);
            trace!(
                attempt,
                vigilance = step.vigilance,
                category = ?step.category,
                match_score = step.match_score,
                "match tracking step"
            );

            let Some(category) = resolution.category() else {
                return self.fail(art, map, coded, target_index, search_trace, Failure::Exhausted);
            };

            let confidence = map.confidence(category, target_index);
            if confidence >= self.map_vigilance {
                art.commit(coded, resolution)?;
                let association = map.associate(category, target_index);
                return Ok(TrainOutcome::Success {
                    a_index: category,
                    b_index: target_index,
                    map_field_confidence: confidence,
                    was_new_mapping: association == Association::Created,
                    reassigned_from: None,
                    search_trace,
                });
            }

            let actual_index = map.lookup(category).unwrap_or(target_index);
            debug!(
                attempt,
                category,
                expected = target_index,
                actual = actual_index,
                vigilance = *vigilance,
                "map field conflict"
            );

            if *vigilance >= self.max_vigilance || attempt >= self.max_search_attempts {
                return self.fail(
                    art,
                    map,
                    coded,
                    target_index,
                    search_trace,
                    Failure::Conflict {
                        resolution,
                        actual_index,
                    },
                );
            }
            *vigilance = self.next_vigilance(*vigilance);
        }
    }

    fn fail<G: CategoryGeometry>(
        &self,
        art: &mut FuzzyArt<G>,
        map: &mut MapField,
        coded: &[f64],
        target_index: usize,
        search_trace: SearchTrace,
        failure: Failure,
    ) -> Result<TrainOutcome> {
        if self.relaxed_reassignment && art.is_full() && !map.has_target(target_index) {
            if let Some(closest) = art.closest(coded) {
                art.commit(coded, Resolution::Matched(closest))?;
                let had_entry = map.lookup(closest.category).is_some();
                let previous = map.reassign(closest.category, target_index);
                warn!(
                    category = closest.category,
                    target = target_index,
                    previous = ?previous,
                    match_score = closest.match_score,
                    "relaxed reassignment overwrote map field entry"
                );
                return Ok(TrainOutcome::Success {
                    a_index: closest.category,
                    b_index: target_index,
                    map_field_confidence: map.confidence(closest.category, target_index),
                    was_new_mapping: !had_entry,
                    reassigned_from: previous,
                    search_trace,
                });
            }
        }

        match failure {
            Failure::Exhausted => Ok(TrainOutcome::CapacityExhausted {
                space: Space::Input,
                search_trace,
            }),
            Failure::Conflict {
                resolution,
                actual_index,
            } => {
                // The final attempt still learns; the label stays unresolved.
                art.commit(coded, resolution)?;
                warn!(
                    expected = target_index,
                    actual = actual_index,
                    attempts = search_trace.len(),
                    "match tracking exhausted"
                );
                Ok(TrainOutcome::MapFieldMismatch {
                    expected_index: target_index,
                    actual_index,
                    search_trace,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArtConfig;
    use crate::kernel::vector::Vector;

    fn tracker(config: &ArtMapConfig) -> MatchTracker {
        MatchTracker::from_config(config)
    }

    fn coded(art: &FuzzyArt, values: &[f64]) -> Vec<f64> {
        art.encode(&Vector::from_slice(values).unwrap()).unwrap()
    }

    #[test]
    fn test_next_vigilance_is_capped() {
        let cfg = ArtMapConfig::default()
            .with_vigilance_increment(0.1)
            .with_max_vigilance(0.9);
        let t = tracker(&cfg);
        assert!((t.next_vigilance(0.75) - 0.85).abs() < 1e-12);
        assert_eq!(t.next_vigilance(0.85), 0.9);
        assert_eq!(t.next_vigilance(0.9), 0.9);
    }

    #[test]
    fn test_new_category_is_new_mapping() {
        let cfg = ArtMapConfig::default();
        let mut art = FuzzyArt::new(cfg.input.clone(), 2).unwrap();
        let mut map = MapField::new();
        let mut rho = 0.0;
        let x = coded(&art, &[0.2, 0.8]);
        let out = tracker(&cfg).run(&mut art, &mut map, &x, 4, &mut rho).unwrap();
        match out {
            TrainOutcome::Success {
                a_index,
                b_index,
                was_new_mapping,
                map_field_confidence,
                ref search_trace,
                ..
            } => {
                assert_eq!((a_index, b_index), (0, 4));
                assert!(was_new_mapping);
                assert_eq!(map_field_confidence, 1.0);
                assert_eq!(search_trace.len(), 1);
            }
            other => panic!("expected success, got {:?}", other),
        }
        assert_eq!(rho, cfg.input.vigilance);
        assert_eq!(map.lookup(0), Some(4));
    }

    #[test]
    fn test_conflict_raises_vigilance_until_new_category() {
        let cfg = ArtMapConfig::default()
            .with_input(ArtConfig::default().with_vigilance(0.5))
            .with_vigilance_increment(0.05);
        let mut art = FuzzyArt::new(cfg.input.clone(), 2).unwrap();
        let mut map = MapField::new();
        let mut rho = 0.0;
        let t = tracker(&cfg);

        let a = coded(&art, &[0.2, 0.2]);
        t.run(&mut art, &mut map, &a, 0, &mut rho).unwrap();

        // Close enough to resonate at 0.5, but labelled differently.
        let b = coded(&art, &[0.4, 0.4]);
        let out = t.run(&mut art, &mut map, &b, 1, &mut rho).unwrap();
        let trace = out.search_trace().clone();
        assert!(out.is_success(), "got {:?}", out);
        assert_eq!(out.a_index(), Some(1));
        assert!(trace.len() > 1);
        assert!(trace.is_monotonic());
        assert_eq!(trace.steps()[0].category, Some(0));
        assert_eq!(trace.last().unwrap().category, Some(1));
        assert!(rho > 0.5);

        // The conflicting category was never written by the failed attempts.
        assert_eq!(art.category(0).unwrap().weights(), a.as_slice());
        assert_eq!(map.lookup(0), Some(0));
        assert_eq!(map.lookup(1), Some(1));
    }

    #[test]
    fn test_mismatch_at_max_vigilance_retains_final_update() {
        let cfg = ArtMapConfig::default()
            .with_input(ArtConfig::default().with_vigilance(0.5))
            .with_vigilance_increment(0.05)
            .with_max_vigilance(0.6);
        let mut art = FuzzyArt::new(cfg.input.clone(), 2).unwrap();
        let mut map = MapField::new();
        let mut rho = 0.0;
        let t = tracker(&cfg);

        let a = coded(&art, &[0.2, 0.2]);
        t.run(&mut art, &mut map, &a, 0, &mut rho).unwrap();

        // match = 0.8 against category 0, above the 0.6 ceiling.
        let b = coded(&art, &[0.4, 0.4]);
        let out = t.run(&mut art, &mut map, &b, 1, &mut rho).unwrap();
        match out {
            TrainOutcome::MapFieldMismatch {
                expected_index,
                actual_index,
                ref search_trace,
            } => {
                assert_eq!(expected_index, 1);
                assert_eq!(actual_index, 0);
                assert!(search_trace.is_monotonic());
                for s in search_trace.steps() {
                    assert!(s.vigilance <= 0.6 + 1e-12, "vigilance {} above ceiling", s.vigilance);
                }
                assert_eq!(search_trace.final_vigilance(), Some(0.6));
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
        assert_eq!(art.category_count(), 1);
        // Box grew to cover the mismatched input.
        let bounds = art.category(0).unwrap().bounds();
        assert!((bounds[0].1 - 0.4).abs() < 1e-12);
        assert_eq!(map.lookup(0), Some(0));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_attempt_budget_is_a_circuit_breaker() {
        let cfg = ArtMapConfig::default()
            .with_input(ArtConfig::default().with_vigilance(0.5))
            .with_vigilance_increment(1e-6)
            .with_max_search_attempts(3);
        let mut art = FuzzyArt::new(cfg.input.clone(), 2).unwrap();
        let mut map = MapField::new();
        let mut rho = 0.0;
        let t = tracker(&cfg);

        let a = coded(&art, &[0.2, 0.2]);
        t.run(&mut art, &mut map, &a, 0, &mut rho).unwrap();
        let b = coded(&art, &[0.4, 0.4]);
        let out = t.run(&mut art, &mut map, &b, 1, &mut rho).unwrap();
        assert!(matches!(out, TrainOutcome::MapFieldMismatch { .. }));
        assert_eq!(out.search_trace().len(), 3);
    }

    #[test]
    fn test_exhausted_input_space() {
        let cfg = ArtMapConfig::default()
            .with_input(ArtConfig::default().with_vigilance(0.9).with_max_categories(1));
        let mut art = FuzzyArt::new(cfg.input.clone(), 2).unwrap();
        let mut map = MapField::new();
        let mut rho = 0.0;
        let t = tracker(&cfg);

        let a = coded(&art, &[0.0, 0.0]);
        t.run(&mut art, &mut map, &a, 0, &mut rho).unwrap();
        let b = coded(&art, &[1.0, 1.0]);
        let out = t.run(&mut art, &mut map, &b, 1, &mut rho).unwrap();
        match out {
            TrainOutcome::CapacityExhausted {
                space,
                ref search_trace,
            } => {
                assert_eq!(space, Space::Input);
                assert_eq!(search_trace.last().unwrap().category, None);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_relaxed_reassignment_overwrites_closest() {
        let cfg = ArtMapConfig::default()
            .with_input(ArtConfig::default().with_vigilance(0.9).with_max_categories(1))
            .with_relaxed_reassignment(true);
        let mut art = FuzzyArt::new(cfg.input.clone(), 2).unwrap();
        let mut map = MapField::new();
        let mut rho = 0.0;
        let t = tracker(&cfg);

        let a = coded(&art, &[0.0, 0.0]);
        t.run(&mut art, &mut map, &a, 0, &mut rho).unwrap();
        let b = coded(&art, &[1.0, 1.0]);
        let out = t.run(&mut art, &mut map, &b, 7, &mut rho).unwrap();
        match out {
            TrainOutcome::Success {
                a_index,
                b_index,
                reassigned_from,
                was_new_mapping,
                ..
            } => {
                assert_eq!((a_index, b_index), (0, 7));
                assert_eq!(reassigned_from, Some(0));
                assert!(!was_new_mapping);
            }
            other => panic!("expected relaxed success, got {:?}", other),
        }
        assert_eq!(map.lookup(0), Some(7));
    }

    fn relaxed_conflict_config(max_categories: usize) -> ArtMapConfig {
        ArtMapConfig::default()
            .with_input(
                ArtConfig::default()
                    .with_vigilance(0.5)
                    .with_max_categories(max_categories),
            )
            .with_vigilance_increment(0.05)
            .with_max_vigilance(0.6)
            .with_relaxed_reassignment(true)
    }

    #[test]
    fn test_relaxed_reassignment_on_conflict_at_max_vigilance() {
        let cfg = relaxed_conflict_config(1);
        let mut art = FuzzyArt::new(cfg.input.clone(), 2).unwrap();
        let mut map = MapField::new();
        let mut rho = 0.0;
        let t = tracker(&cfg);

        let a = coded(&art, &[0.2, 0.2]);
        t.run(&mut art, &mut map, &a, 0, &mut rho).unwrap();
        // match = 0.8 keeps resonating up to the 0.6 ceiling.
        let b = coded(&art, &[0.4, 0.4]);
        let out = t.run(&mut art, &mut map, &b, 1, &mut rho).unwrap();
        match out {
            TrainOutcome::Success {
                a_index,
                b_index,
                reassigned_from,
                ref search_trace,
                ..
            } => {
                assert_eq!((a_index, b_index), (0, 1));
                assert_eq!(reassigned_from, Some(0));
                let rhos: Vec<f64> = search_trace.steps().iter().map(|s| s.vigilance).collect();
                assert_eq!(rhos.len(), 3);
                assert_eq!(rhos[0], 0.5);
                assert!((rhos[1] - 0.55).abs() < 1e-12);
                assert_eq!(rhos[2], 0.6);
            }
            other => panic!("expected relaxed success, got {:?}", other),
        }
        assert_eq!(map.entries(), vec![(0, 1)]);
        assert_eq!(art.category_count(), 1);
    }

    #[test]
    fn test_relaxed_reassignment_skipped_when_target_already_mapped() {
        let cfg = relaxed_conflict_config(2);
        let mut art = FuzzyArt::new(cfg.input.clone(), 2).unwrap();
        let mut map = MapField::new();
        let mut rho = 0.0;
        let t = tracker(&cfg);

        let a = coded(&art, &[0.2, 0.2]);
        t.run(&mut art, &mut map, &a, 0, &mut rho).unwrap();
        let b = coded(&art, &[0.9, 0.9]);
        t.run(&mut art, &mut map, &b, 1, &mut rho).unwrap();
        assert!(art.is_full());

        // Resonates with category 1 (match 0.9) but is labelled 0, which
        // category 0 already owns.
        let c = coded(&art, &[0.8, 0.8]);
        let out = t.run(&mut art, &mut map, &c, 0, &mut rho).unwrap();
        match out {
            TrainOutcome::MapFieldMismatch {
                expected_index,
                actual_index,
                ..
            } => {
                assert_eq!(expected_index, 0);
                assert_eq!(actual_index, 1);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
        assert_eq!(map.entries(), vec![(0, 0), (1, 1)]);
    }
}
