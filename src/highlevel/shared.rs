//! Thread-safe handle over an ARTMAP session.
//!
//! Training takes the write lock, so it is serialized; predictions take the
//! read lock and may run concurrently with each other. A prediction never
//! observes a half-applied training step.

use crate::artmap::{ArtMap, FitOptions, FitReport, Prediction, Space, TrainOutcome};
use crate::config::ArtMapConfig;
use crate::error::{ArtError, Result};
use crate::kernel::vector::Vector;
use crate::memory::snapshot::ArtMapSnapshot;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, shareable ARTMAP session.
#[derive(Clone, Debug)]
pub struct SharedArtMap {
    inner: Arc<RwLock<ArtMap>>,
}

impl SharedArtMap {
    pub fn new(config: ArtMapConfig, input_dim: usize, target_dim: usize) -> Result<Self> {
        Ok(Self::from_session(ArtMap::new(config, input_dim, target_dim)?))
    }

    pub fn from_session(session: ArtMap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ArtMap>> {
        self.inner
            .read()
            .map_err(|_| ArtError::LockPoisoned("artmap session"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ArtMap>> {
        self.inner
            .write()
            .map_err(|_| ArtError::LockPoisoned("artmap session"))
    }

    pub fn train(&self, input: &Vector, target: &Vector) -> Result<TrainOutcome> {
        self.write()?.train(input, target)
    }

    pub fn fit(&self, samples: &[(Vector, Vector)], options: &FitOptions) -> Result<FitReport> {
        self.write()?.fit(samples, options)
    }

    pub fn predict_association(&self, input: &Vector) -> Result<Option<Prediction>> {
        self.read()?.predict_association(input)
    }

    pub fn predict_target(&self, input: &Vector) -> Result<Option<Vector>> {
        self.read()?.predict_target(input)
    }

    pub fn predict_batch(&self, inputs: &[Vector]) -> Result<Vec<Option<Prediction>>> {
        self.read()?.predict_batch(inputs)
    }

    pub fn category_count(&self, space: Space) -> Result<usize> {
        self.read()?.category_count(space)
    }

    pub fn clear(&self) -> Result<()> {
        self.write()?.clear()
    }

    pub fn close(&self) -> Result<()> {
        self.write()?.close();
        Ok(())
    }

    pub fn snapshot(&self) -> Result<ArtMapSnapshot> {
        self.read()?.snapshot()
    }

    /// Run `f` with shared access to the session.
    pub fn with_session<T>(&self, f: impl FnOnce(&ArtMap) -> T) -> Result<T> {
        Ok(f(&*self.read()?))
    }
}
