//! Pairwise road metrics
//!
//! Distances and durations between unordered waypoint pairs, the dense
//! symmetric matrix the fitness evaluator reads, and the contract for the
//! external service that supplies the raw data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::waypoint::{PairKey, Roster, Waypoint};

/// Road metric for one unordered pair of waypoints
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairMetric {
    /// Driving distance in meters
    pub distance: f64,
    /// Driving duration in seconds
    pub duration: f64,
}

/// Symmetric lookup table keyed by canonical unordered pairs
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MetricTable {
    entries: HashMap<PairKey, PairMetric>,
}

impl MetricTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the metric for `{a, b}`
    pub fn insert(&mut self, a: Waypoint, b: Waypoint, metric: PairMetric) {
        self.entries.insert(PairKey::new(a, b), metric);
    }

    /// Look up the metric for `{a, b}`
    pub fn get(&self, a: &Waypoint, b: &Waypoint) -> Option<&PairMetric> {
        self.entries.get(&PairKey::new(a.clone(), b.clone()))
    }

    /// Whether the table covers `{a, b}`
    pub fn contains(&self, a: &Waypoint, b: &Waypoint) -> bool {
        self.get(a, b).is_some()
    }

    /// Number of pairs in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &PairMetric)> {
        self.entries.iter()
    }
}

impl FromIterator<(PairKey, PairMetric)> for MetricTable {
    fn from_iter<I: IntoIterator<Item = (PairKey, PairMetric)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Dense symmetric matrix of pair metrics over a roster
///
/// Indexed by roster position; absent pairs stay `None` so a lookup failure
/// surfaces as a hard error instead of a silent zero.
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<Option<PairMetric>>,
}

impl DistanceMatrix {
    /// Build the matrix for the roster from a metric table
    pub fn build(roster: &Roster, table: &MetricTable) -> Self {
        let n = roster.len();
        let mut cells = vec![None; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let metric = table
                    .get(&roster.waypoints()[i], &roster.waypoints()[j])
                    .copied();
                cells[i * n + j] = metric;
                cells[j * n + i] = metric;
            }
        }
        Self { n, cells }
    }

    /// Number of waypoints the matrix covers
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix is empty
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Metric between roster indices `i` and `j`, if known
    pub fn get(&self, i: usize, j: usize) -> Option<PairMetric> {
        self.cells[i * self.n + j]
    }

    /// Whether every off-diagonal pair is covered
    pub fn is_complete(&self) -> bool {
        (0..self.n).all(|i| (0..self.n).all(|j| i == j || self.cells[i * self.n + j].is_some()))
    }
}

/// Result of one metric fetch from the external provider
///
/// Failed pairs are reported, never silently dropped; the caller resolves
/// them through a [`MissingPairPolicy`] before any round runs.
#[derive(Clone, Debug)]
pub struct MetricFetch {
    /// Metrics for every pair the provider resolved
    pub table: MetricTable,
    /// Waypoints with at least one resolved pair
    pub covered: Vec<Waypoint>,
    /// Pairs the provider could not resolve
    pub failed_pairs: Vec<PairKey>,
}

/// External collaborator supplying pairwise road metrics
///
/// Implementations typically wrap a mapping service; tests use fixed tables.
/// The engine calls this once, before the generational loop starts.
pub trait MetricSource {
    /// Fetch metrics for every unordered pair of the given waypoints
    fn fetch(&self, waypoints: &[Waypoint]) -> MetricFetch;
}

/// How to resolve pairs the provider failed to cover
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingPairPolicy {
    /// Drop every waypoint touched by a failed pair from the working set
    ExcludeWaypoints,
    /// Abort the run if any pair is uncovered
    #[default]
    Fail,
}

/// Apply the missing-pair policy to a fetch result
///
/// Returns the effective working set and its table. With `ExcludeWaypoints`,
/// any waypoint appearing in a failed pair is removed; with `Fail`, an
/// incomplete fetch is an error.
pub fn resolve_fetch(
    fetch: MetricFetch,
    policy: MissingPairPolicy,
) -> Result<(Vec<Waypoint>, MetricTable), MetricError> {
    if fetch.failed_pairs.is_empty() {
        return Ok((fetch.covered, fetch.table));
    }
    match policy {
        MissingPairPolicy::Fail => Err(MetricError::IncompleteTable(
            fetch.failed_pairs.len(),
            fetch.failed_pairs[0].clone(),
        )),
        MissingPairPolicy::ExcludeWaypoints => {
            let excluded: Vec<&Waypoint> = fetch
                .failed_pairs
                .iter()
                .flat_map(|p| [p.first(), p.second()])
                .collect();
            let kept: Vec<Waypoint> = fetch
                .covered
                .into_iter()
                .filter(|w| !excluded.contains(&w))
                .collect();
            Ok((kept, fetch.table))
        }
    }
}
