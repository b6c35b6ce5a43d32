//! Vector type for artmap.
//!
//! Inputs are fixed-length sequences of reals in `[0, 1]`. Callers are
//! expected to normalize before constructing a [`Vector`]; construction
//! rejects anything outside the unit interval so the resonance kernel never
//! sees a value it cannot reason about.

use crate::error::{ArtError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An immutable, validated input vector with elements in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Create a vector, validating that every element is finite and in `[0, 1]`.
    pub fn new(data: Vec<f64>) -> Result<Self> {
        if data.is_empty() {
            return Err(ArtError::EmptyInput("vector has no components".into()));
        }
        if let Some((index, &value)) = data
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(ArtError::ValueOutOfRange { index, value });
        }
        Ok(Self { data })
    }

    /// Create a vector from a slice.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        Self::new(values.to_vec())
    }

    /// Min-max normalize raw values into `[0, 1]` and build a vector.
    ///
    /// Values are clamped to `[min, max]` first, so outliers saturate
    /// instead of failing validation.
    pub fn from_unnormalized(values: &[f64], min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || max <= min {
            return Err(ArtError::invalid(
                "range",
                format!("expected finite min < max, got [{}, {}]", min, max),
            ));
        }
        let span = max - min;
        let data = values
            .iter()
            .map(|&v| (v.clamp(min, max) - min) / span)
            .collect();
        Self::new(data)
    }

    /// Get the dimensionality.
    pub fn dimensions(&self) -> usize {
        self.data.len()
    }

    /// Get the raw data as a slice.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sum of components (the fuzzy norm `|x|`).
    pub fn l1_norm(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Consume the vector and return its data.
    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl TryFrom<Vec<f64>> for Vector {
    type Error = ArtError;

    fn try_from(data: Vec<f64>) -> Result<Self> {
        Self::new(data)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(v: Vector) -> Self {
        v.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_unit_interval() {
        let v = Vector::new(vec![0.0, 0.5, 1.0]).unwrap();
        assert_eq!(v.dimensions(), 3);
        assert_eq!(v[1], 0.5);
        assert!((v.l1_norm() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        match Vector::new(vec![0.2, 1.5]) {
            Err(ArtError::ValueOutOfRange { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, 1.5);
            }
            other => panic!("expected ValueOutOfRange, got {:?}", other),
        }
        assert!(Vector::new(vec![f64::NAN]).is_err());
        assert!(Vector::new(vec![-0.01]).is_err());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(Vector::new(vec![]), Err(ArtError::EmptyInput(_))));
    }

    #[test]
    fn test_from_unnormalized() {
        let v = Vector::from_unnormalized(&[10.0, 15.0, 20.0, 99.0], 10.0, 20.0).unwrap();
        assert_eq!(v.data(), &[0.0, 0.5, 1.0, 1.0]);
        assert!(Vector::from_unnormalized(&[1.0], 5.0, 5.0).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let v: Vector = serde_json::from_str("[0.25, 0.75]").unwrap();
        assert_eq!(v.data(), &[0.25, 0.75]);
        assert!(serde_json::from_str::<Vector>("[2.0]").is_err());
    }
}
