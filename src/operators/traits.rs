//! Operator traits

use std::ops::Range;

use rand::Rng;

use crate::genome::Tour;

/// Mutation operator for tour genomes
///
/// Operators are pure transforms: tour in, new tour out, the input never
/// mutated in place. That keeps duplicate tours in a population from aliasing
/// each other through a shared buffer. The free region restricts which
/// positions the operator may rearrange; anchored positions lie outside it.
pub trait TourMutation: Send + Sync {
    /// Produce a mutated copy of the tour
    ///
    /// The result must be a permutation of the same waypoint set, with every
    /// position outside `region` unchanged.
    fn mutate<R: Rng>(&self, tour: &Tour, region: &Range<usize>, rng: &mut R) -> Tour;
}
