//! Genetic operators
//!
//! Mutation operators and selection for tour genomes.

pub mod mutation;
pub mod selection;
pub mod traits;

pub use mutation::{PointMutation, SegmentShuffle};
pub use selection::TruncationSelection;
pub use traits::TourMutation;
