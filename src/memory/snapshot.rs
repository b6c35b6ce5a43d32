//! Serializable snapshots: the persistence boundary.
//!
//! A snapshot holds everything needed to rebuild a session exactly: the
//! configuration, every prototype in original index order, and the map-field
//! entries. A SHA-256 checksum over the learned state guards against
//! truncated or hand-edited files; restore recomputes and compares it.

use super::category::CategoryStore;
use crate::config::{ArtConfig, ArtMapConfig};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One prototype and its resonance count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub weights: Vec<f64>,
    pub resonances: u64,
}

/// Learned state of one space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaceSnapshot {
    pub input_dim: usize,
    /// Index order is significant: position `i` restores category `i`.
    pub categories: Vec<CategorySnapshot>,
}

impl SpaceSnapshot {
    pub(crate) fn capture(input_dim: usize, store: &CategoryStore) -> Self {
        Self {
            input_dim,
            categories: store
                .iter()
                .map(|c| CategorySnapshot {
                    weights: c.weights().to_vec(),
                    resonances: c.resonances(),
                })
                .collect(),
        }
    }

    fn digest_into(&self, hasher: &mut Sha256) {
        hasher.update((self.input_dim as u64).to_le_bytes());
        hasher.update((self.categories.len() as u64).to_le_bytes());
        for c in &self.categories {
            hasher.update(c.resonances.to_le_bytes());
            for w in &c.weights {
                hasher.update(w.to_bits().to_le_bytes());
            }
        }
    }
}

/// Snapshot of a standalone Fuzzy ART module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtSnapshot {
    pub config: ArtConfig,
    pub space: SpaceSnapshot,
    pub checksum: String,
}

impl ArtSnapshot {
    pub(crate) fn new(config: ArtConfig, space: SpaceSnapshot) -> Self {
        let checksum = Self::compute_checksum(&space);
        Self {
            config,
            space,
            checksum,
        }
    }

    pub fn compute_checksum(space: &SpaceSnapshot) -> String {
        let mut hasher = Sha256::new();
        space.digest_into(&mut hasher);
        format!("{:x}", hasher.finalize())
    }

    pub fn verify(&self) -> bool {
        Self::compute_checksum(&self.space) == self.checksum
    }
}

/// Snapshot of a full ARTMAP session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtMapSnapshot {
    pub config: ArtMapConfig,
    pub input: SpaceSnapshot,
    pub target: SpaceSnapshot,
    /// `(input category, target category)` pairs, ascending by input.
    pub map_field: Vec<(usize, usize)>,
    pub checksum: String,
}

impl ArtMapSnapshot {
    pub(crate) fn new(
        config: ArtMapConfig,
        input: SpaceSnapshot,
        target: SpaceSnapshot,
        map_field: Vec<(usize, usize)>,
    ) -> Self {
        let checksum = Self::compute_checksum(&input, &target, &map_field);
        Self {
            config,
            input,
            target,
            map_field,
            checksum,
        }
    }

    pub fn compute_checksum(
        input: &SpaceSnapshot,
        target: &SpaceSnapshot,
        map_field: &[(usize, usize)],
    ) -> String {
        let mut hasher = Sha256::new();
        input.digest_into(&mut hasher);
        target.digest_into(&mut hasher);
        hasher.update((map_field.len() as u64).to_le_bytes());
        for &(a, b) in map_field {
            hasher.update((a as u64).to_le_bytes());
            hasher.update((b as u64).to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn verify(&self) -> bool {
        Self::compute_checksum(&self.input, &self.target, &self.map_field) == self.checksum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(weights: Vec<f64>) -> SpaceSnapshot {
        SpaceSnapshot {
            input_dim: weights.len() / 2,
            categories: vec![CategorySnapshot {
                weights,
                resonances: 3,
            }],
        }
    }

    #[test]
    fn test_checksum_detects_weight_edit() {
        let mut snap = ArtSnapshot::new(ArtConfig::default(), space(vec![0.1, 0.2, 0.8, 0.7]));
        assert!(snap.verify());
        snap.space.categories[0].weights[1] = 0.25;
        assert!(!snap.verify());
    }

    #[test]
    fn test_checksum_covers_map_field() {
        let mut snap = ArtMapSnapshot::new(
            ArtMapConfig::default(),
            space(vec![0.1, 0.9]),
            space(vec![1.0, 0.0]),
            vec![(0, 0)],
        );
        assert!(snap.verify());
        snap.map_field[0].1 = 1;
        assert!(!snap.verify());
    }

    #[test]
    fn test_checksum_is_hex_sha256() {
        let snap = ArtSnapshot::new(ArtConfig::default(), space(vec![0.5, 0.5]));
        assert_eq!(snap.checksum.len(), 64);
        assert!(snap.checksum.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
