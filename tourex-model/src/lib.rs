//! Core data model definitions shared across Tourex crates.
#![allow(missing_docs)]

pub mod ids;
pub mod tour;
pub mod update;

// Intentionally curated re-exports for downstream consumers.
pub use ids::TourId;
pub use tour::{Difficulty, Tour, TourImageRefs};
pub use update::TourUpdate;
