//! Tour genome
//!
//! A tour is a permutation of roster indices representing one candidate
//! visiting order. Anchors pin the first and/or last position for multi-leg
//! trips with a required start or end; the remaining positions form the free
//! region that initialization and mutation may rearrange.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;

/// One candidate visiting order over the working set
///
/// Always a permutation of `0..n`: every waypoint index appears exactly once.
/// Any operation producing something else is a defect, not a state to repair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// Create a tour, validating the permutation invariant
    pub fn try_new(order: Vec<usize>) -> Result<Self, GenomeError> {
        let tour = Self { order };
        if tour.is_valid_permutation() {
            Ok(tour)
        } else {
            Err(GenomeError::InvalidPermutation(
                "sequence is not a permutation of 0..n".to_string(),
            ))
        }
    }

    /// Create a tour without validation
    ///
    /// The caller must ensure the input is a permutation of `0..n`. Operators
    /// that only rearrange an existing tour use this.
    pub(crate) fn new_unchecked(order: Vec<usize>) -> Self {
        debug_assert!(
            Self { order: order.clone() }.is_valid_permutation(),
            "tour must be a permutation of 0..n"
        );
        Self { order }
    }

    /// The identity tour `[0, 1, ..., n-1]`
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// A uniformly random tour respecting the anchors
    ///
    /// Free positions get a uniform random permutation of the free waypoints;
    /// anchored waypoints sit at their fixed positions.
    pub fn random<R: Rng>(n: usize, anchors: &Anchors, rng: &mut R) -> Self {
        let mut free: Vec<usize> = (0..n)
            .filter(|i| Some(*i) != anchors.start && Some(*i) != anchors.end)
            .collect();
        free.shuffle(rng);

        let mut order = Vec::with_capacity(n);
        if let Some(s) = anchors.start {
            order.push(s);
        }
        order.extend(free);
        if let Some(e) = anchors.end {
            order.push(e);
        }
        Self::new_unchecked(order)
    }

    /// Number of waypoints in the tour
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the tour is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The visiting order as roster indices
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consecutive edges of the cyclic tour, including the wrap-around edge
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.order.len();
        (0..n).map(move |i| (self.order[i], self.order[(i + 1) % n]))
    }

    /// Whether the order is a permutation of `0..n`
    pub fn is_valid_permutation(&self) -> bool {
        let n = self.order.len();
        let mut seen = vec![false; n];
        for &idx in &self.order {
            if idx >= n || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }

    /// The underlying order
    pub fn into_inner(self) -> Vec<usize> {
        self.order
    }
}

impl std::ops::Index<usize> for Tour {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.order[index]
    }
}

/// Fixed start and/or end waypoints, by roster index
///
/// An anchored waypoint keeps its position through initialization and every
/// mutation; it still participates in fitness like any other stop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchors {
    /// Waypoint pinned to the first position
    pub start: Option<usize>,
    /// Waypoint pinned to the last position
    pub end: Option<usize>,
}

impl Anchors {
    /// No anchored positions
    pub fn none() -> Self {
        Self::default()
    }

    /// Pin the tour start to the given roster index
    pub fn with_start(start: usize) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// The positions mutation may touch, as a half-open range
    ///
    /// A start anchor occupies position 0 and an end anchor position `n - 1`;
    /// everything between is free.
    pub fn free_region(&self, n: usize) -> std::ops::Range<usize> {
        let lo = usize::from(self.start.is_some());
        let hi = n - usize::from(self.end.is_some());
        lo..hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tour_try_new() {
        assert!(Tour::try_new(vec![2, 0, 1, 3]).is_ok());
        assert!(Tour::try_new(vec![0, 1, 1, 3]).is_err());
        assert!(Tour::try_new(vec![0, 1, 5, 3]).is_err());
    }

    #[test]
    fn test_tour_identity() {
        let t = Tour::identity(4);
        assert_eq!(t.order(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_tour_random_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let t = Tour::random(10, &Anchors::none(), &mut rng);
            assert!(t.is_valid_permutation());
            assert_eq!(t.len(), 10);
        }
    }

    #[test]
    fn test_tour_random_respects_anchors() {
        let mut rng = StdRng::seed_from_u64(7);
        let anchors = Anchors {
            start: Some(3),
            end: Some(0),
        };
        for _ in 0..50 {
            let t = Tour::random(8, &anchors, &mut rng);
            assert!(t.is_valid_permutation());
            assert_eq!(t[0], 3);
            assert_eq!(t[7], 0);
        }
    }

    #[test]
    fn test_tour_edges_wrap_around() {
        let t = Tour::try_new(vec![2, 0, 1]).unwrap();
        let edges: Vec<(usize, usize)> = t.edges().collect();
        assert_eq!(edges, vec![(2, 0), (0, 1), (1, 2)]);
    }

    #[test]
    fn test_anchors_free_region() {
        assert_eq!(Anchors::none().free_region(5), 0..5);
        assert_eq!(Anchors::with_start(2).free_region(5), 1..5);

        let both = Anchors {
            start: Some(0),
            end: Some(4),
        };
        assert_eq!(both.free_region(5), 1..4);
    }

    #[test]
    fn test_tour_serialization() {
        let t = Tour::try_new(vec![3, 1, 0, 2]).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        let back: Tour = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
