//! Complement coding.
//!
//! Doubles a vector's dimension by appending `1 - x_i` for every component.
//! With complement coding every input has the same fuzzy norm (`n`), which is
//! what lets a fuzzy-box category only ever grow its box (shrink its weights)
//! under the fuzzy-min learning rule.

use crate::error::{ArtError, Result};
use crate::kernel::vector::Vector;

/// Stateless complement coder.
pub struct ComplementCoder;

impl ComplementCoder {
    /// Encode `x` as `[x_0 .. x_{n-1}, 1 - x_0 .. 1 - x_{n-1}]`.
    pub fn encode(input: &Vector) -> Vec<f64> {
        let data = input.data();
        let mut coded = Vec::with_capacity(data.len() * 2);
        coded.extend_from_slice(data);
        coded.extend(data.iter().map(|&x| 1.0 - x));
        coded
    }

    /// Recover the original vector from the first half of a coded slice.
    ///
    /// The complement half is ignored; for a category prototype this yields
    /// the lower corner of its box.
    pub fn decode(coded: &[f64]) -> Result<Vector> {
        if coded.is_empty() {
            return Err(ArtError::EmptyInput("coded vector has no components".into()));
        }
        if coded.len() % 2 != 0 {
            return Err(ArtError::DimensionMismatch {
                expected: coded.len() + 1,
                got: coded.len(),
            });
        }
        Vector::from_slice(&coded[..coded.len() / 2])
    }

    /// Per-dimension `(lo, hi)` box described by a coded prototype.
    ///
    /// `lo = w_i`, `hi = 1 - w_{i+n}`. A freshly created category is a
    /// point box (`lo == hi`).
    pub fn bounds(coded: &[f64]) -> Vec<(f64, f64)> {
        let n = coded.len() / 2;
        (0..n).map(|i| (coded[i], 1.0 - coded[i + n])).collect()
    }
}
