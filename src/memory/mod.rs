//! Memory layer: category storage, the map field and snapshots.
//!
//! - [`CategoryStore`] owns the prototypes of one space in creation order.
//!   Indices are dense and stable for the lifetime of a session.
//! - [`MapField`] links input categories to target categories.
//! - [`snapshot`] holds the serializable form of both, with checksums.

pub mod category;
pub mod map_field;
pub mod snapshot;

pub use category::{Category, CategoryStore};
pub use map_field::{Association, MapField};
pub use snapshot::{ArtMapSnapshot, ArtSnapshot, CategorySnapshot, SpaceSnapshot};
