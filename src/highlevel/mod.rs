//! High-level convenience API.
//!
//! [`SharedArtMap`] wraps an [`ArtMap`](crate::artmap::ArtMap) for use from
//! several threads. Single-threaded code should use the session directly.

pub mod shared;

pub use shared::SharedArtMap;
