//! Tour fitness
//!
//! The cost of a tour is the sum of pairwise driving distances over its
//! consecutive edges, including the wrap-around edge from the last stop back
//! to the first. Lower is better. Evaluation is a pure function of the tour
//! and the matrix, so distinct tours are memoized within a round.

use std::collections::HashMap;

use crate::error::MetricError;
use crate::genome::Tour;
use crate::metric::DistanceMatrix;
use crate::waypoint::Roster;

/// Total cyclic driving distance of a tour
///
/// Fails with [`MetricError::MissingPair`] if any edge of the tour is absent
/// from the matrix; a partial sum is never returned.
pub fn tour_distance(
    tour: &Tour,
    matrix: &DistanceMatrix,
    roster: &Roster,
) -> Result<f64, MetricError> {
    sum_edges(tour, matrix, roster, |m| m.distance)
}

/// Total cyclic driving duration of a tour
pub fn tour_duration(
    tour: &Tour,
    matrix: &DistanceMatrix,
    roster: &Roster,
) -> Result<f64, MetricError> {
    sum_edges(tour, matrix, roster, |m| m.duration)
}

fn sum_edges(
    tour: &Tour,
    matrix: &DistanceMatrix,
    roster: &Roster,
    component: impl Fn(crate::metric::PairMetric) -> f64,
) -> Result<f64, MetricError> {
    let mut total = 0.0;
    for (i, j) in tour.edges() {
        let metric = matrix.get(i, j).ok_or_else(|| {
            MetricError::MissingPair(roster.waypoints()[i].clone(), roster.waypoints()[j].clone())
        })?;
        total += component(metric);
    }
    Ok(total)
}

/// Per-round fitness memo
///
/// Duplicate tours in a population share one computation; the cache is
/// discarded when the round's population is replaced.
#[derive(Debug, Default)]
pub struct FitnessCache {
    scores: HashMap<Tour, f64>,
}

impl FitnessCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitness of the tour, computing it on first sight
    pub fn score(
        &mut self,
        tour: &Tour,
        matrix: &DistanceMatrix,
        roster: &Roster,
    ) -> Result<f64, MetricError> {
        if let Some(&f) = self.scores.get(tour) {
            return Ok(f);
        }
        let f = tour_distance(tour, matrix, roster)?;
        self.scores.insert(tour.clone(), f);
        Ok(f)
    }

    /// Fitness of an already-scored tour
    pub fn get(&self, tour: &Tour) -> Option<f64> {
        self.scores.get(tour).copied()
    }

    /// Insert a precomputed score
    pub fn insert(&mut self, tour: Tour, fitness: f64) {
        self.scores.insert(tour, fitness);
    }

    /// Whether the tour has been scored
    pub fn contains(&self, tour: &Tour) -> bool {
        self.scores.contains_key(tour)
    }

    /// Number of distinct tours scored this round
    pub fn distinct_evaluated(&self) -> usize {
        self.scores.len()
    }
}
