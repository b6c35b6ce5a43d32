//! Kernel layer: vector arithmetic for fuzzy adaptive resonance.
//!
//! - Validated input vectors ([`Vector`])
//! - Complement coding ([`ComplementCoder`])
//! - Choice and match functions ([`Resonance`])
//! - The fuzzy-min learning rule ([`fuzzy_min_update`])
//! - The category geometry seam ([`CategoryGeometry`], [`FuzzyBox`])
//!
//! This layer has no dependencies on [`memory`](crate::memory) or the
//! learners built on top of it.
//!
//! # Example
//!
//! ```rust
//! use artmap::kernel::{ComplementCoder, Resonance, Vector};
//!
//! let x = ComplementCoder::encode(&Vector::new(vec![0.9, 0.1]).unwrap());
//! let w = ComplementCoder::encode(&Vector::new(vec![1.0, 0.0]).unwrap());
//! assert!((Resonance::match_score(&x, &w) - 0.9).abs() < 1e-12);
//! ```

pub mod complement;
pub mod geometry;
pub mod learning;
pub mod resonance;
pub mod vector;

pub use complement::ComplementCoder;
pub use geometry::{CategoryGeometry, FuzzyBox};
pub use learning::fuzzy_min_update;
pub use resonance::{CategoryScore, Resonance};
pub use vector::Vector;
