//! Mutation operators
//!
//! Two operators drive the search: point mutation for fine-grained moves and
//! segment shuffle for relocating whole sub-routes past local optima.

use std::ops::Range;

use rand::Rng;

use crate::genome::Tour;
use crate::operators::traits::TourMutation;

/// Point mutation: a handful of random position swaps
///
/// Draws a swap count uniformly from `[1, max_swaps]`, then performs that
/// many independent swaps of two distinct positions within the free region.
/// Swaps never duplicate or drop elements, so the permutation invariant
/// holds by construction.
#[derive(Clone, Debug)]
pub struct PointMutation {
    /// Upper bound on the number of swaps per application
    pub max_swaps: usize,
}

impl PointMutation {
    /// Create a point mutation with the given swap budget
    pub fn new(max_swaps: usize) -> Self {
        assert!(max_swaps >= 1, "max_swaps must be at least 1");
        Self { max_swaps }
    }
}

impl Default for PointMutation {
    fn default() -> Self {
        Self::new(3)
    }
}

impl TourMutation for PointMutation {
    fn mutate<R: Rng>(&self, tour: &Tour, region: &Range<usize>, rng: &mut R) -> Tour {
        let mut order = tour.order().to_vec();
        if region.len() < 2 {
            return Tour::new_unchecked(order);
        }

        let swaps = rng.gen_range(1..=self.max_swaps);
        for _ in 0..swaps {
            let i = rng.gen_range(region.clone());
            let mut j = rng.gen_range(region.clone());
            while j == i {
                j = rng.gen_range(region.clone());
            }
            order.swap(i, j);
        }
        Tour::new_unchecked(order)
    }
}

/// Segment shuffle: relocate a contiguous sub-route
///
/// Picks a random start within the free region and a random segment length
/// drawn from `len_range` (clamped to the region), extracts the segment
/// intact, and reinserts it at a uniformly random valid position in the
/// remaining free sequence. The segment's internal order and everything
/// outside the free region are preserved.
#[derive(Clone, Debug)]
pub struct SegmentShuffle {
    /// Inclusive bounds on the segment length
    pub len_range: (usize, usize),
}

impl SegmentShuffle {
    /// Create a segment shuffle with the given length bounds
    pub fn new(min_len: usize, max_len: usize) -> Self {
        assert!(
            2 <= min_len && min_len <= max_len,
            "segment length range must satisfy 2 <= min <= max"
        );
        Self {
            len_range: (min_len, max_len),
        }
    }
}

impl Default for SegmentShuffle {
    fn default() -> Self {
        Self::new(2, 15)
    }
}

impl TourMutation for SegmentShuffle {
    fn mutate<R: Rng>(&self, tour: &Tour, region: &Range<usize>, rng: &mut R) -> Tour {
        let order = tour.order().to_vec();
        if region.len() < 2 {
            return Tour::new_unchecked(order);
        }

        let (min_len, max_len) = self.len_range;
        let max_len = max_len.min(region.len());
        let min_len = min_len.min(max_len);

        let seg_len = rng.gen_range(min_len..=max_len);
        let seg_start = rng.gen_range(region.start..=region.end - seg_len);

        let segment: Vec<usize> = order[seg_start..seg_start + seg_len].to_vec();
        let mut remaining: Vec<usize> = order[region.start..seg_start]
            .iter()
            .chain(order[seg_start + seg_len..region.end].iter())
            .copied()
            .collect();

        let insert_at = rng.gen_range(0..=remaining.len());
        remaining.splice(insert_at..insert_at, segment);

        let mut result = order;
        result[region.clone()].copy_from_slice(&remaining);
        Tour::new_unchecked(result)
    }
}
