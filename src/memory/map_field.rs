//! Map field: input-category → target-category associations.
//!
//! Each input category maps to at most one target category. The first
//! association is definitional; after that [`MapField::associate`] only ever
//! confirms or reports a conflict. Overwriting is a separate, explicit call
//! ([`MapField::reassign`]) used by the opt-in relaxed reassignment path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of an [`MapField::associate`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Association {
    /// No entry existed; one was created.
    Created,
    /// The existing entry already pointed at the requested target.
    Unchanged,
    /// The existing entry points elsewhere. Nothing was written.
    Conflict { existing: usize },
}

/// Association table between the two spaces of an ARTMAP session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapField {
    entries: BTreeMap<usize, usize>,
}

impl MapField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, input: usize) -> Option<usize> {
        self.entries.get(&input).copied()
    }

    /// Record `input → target` unless a different entry already exists.
    pub fn associate(&mut self, input: usize, target: usize) -> Association {
        match self.entries.get(&input) {
            None => {
                self.entries.insert(input, target);
                Association::Created
            }
            Some(&existing) if existing == target => Association::Unchanged,
            Some(&existing) => Association::Conflict { existing },
        }
    }

    /// Force `input → target`, returning the previous target if it differed.
    pub fn reassign(&mut self, input: usize, target: usize) -> Option<usize> {
        self.entries
            .insert(input, target)
            .filter(|&previous| previous != target)
    }

    /// Map-field match `|b ∧ w_ab| / |b|` for a one-hot target activation.
    ///
    /// 1.0 when the entry agrees with `target` or does not exist yet (the
    /// first association is definitional), 0.0 on conflict.
    pub fn confidence(&self, input: usize, target: usize) -> f64 {
        match self.entries.get(&input) {
            Some(&existing) if existing != target => 0.0,
            _ => 1.0,
        }
    }

    /// True when any input category maps to `target`.
    pub fn has_target(&self, target: usize) -> bool {
        self.entries.values().any(|&t| t == target)
    }

    /// Input categories mapped to `target`, ascending.
    pub fn inputs_for(&self, target: usize) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|(_, &t)| t == target)
            .map(|(&i, _)| i)
            .collect()
    }

    /// All entries in ascending input order.
    pub fn entries(&self) -> Vec<(usize, usize)> {
        self.entries.iter().map(|(&i, &t)| (i, t)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
