//! Selection
//!
//! Truncation selection: rank the whole population by tour cost and keep the
//! top fraction as the elite set for reproduction.

use crate::error::MetricError;
use crate::fitness::FitnessCache;
use crate::genome::Tour;
use crate::metric::DistanceMatrix;
use crate::waypoint::Roster;

/// Truncation selection at a fixed elite fraction
///
/// Fitness is computed once per distinct tour through the round's cache;
/// duplicate tours share one lookup. The sort is stable, so ties break by
/// position in the population and selection is deterministic for a given
/// seed.
#[derive(Clone, Debug)]
pub struct TruncationSelection {
    /// Fraction of the population kept as elites, in (0, 1]
    pub elite_fraction: f64,
}

impl TruncationSelection {
    /// Create a truncation selection with the given elite fraction
    pub fn new(elite_fraction: f64) -> Self {
        assert!(
            elite_fraction > 0.0 && elite_fraction <= 1.0,
            "Elite fraction must be in (0, 1]"
        );
        Self { elite_fraction }
    }

    /// Number of elites for a population of the given size
    pub fn elite_count(&self, population_size: usize) -> usize {
        ((population_size as f64 * self.elite_fraction).round() as usize).max(1)
    }

    /// The elite subset in rank order (lowest cost first)
    ///
    /// Scores every distinct tour through the cache, then returns the top
    /// `elite_count` entries together with their fitness.
    pub fn select(
        &self,
        population: &[Tour],
        cache: &mut FitnessCache,
        matrix: &DistanceMatrix,
        roster: &Roster,
    ) -> Result<Vec<(Tour, f64)>, MetricError> {
        let mut ranked: Vec<(usize, f64)> = Vec::with_capacity(population.len());
        for (i, tour) in population.iter().enumerate() {
            ranked.push((i, cache.score(tour, matrix, roster)?));
        }
        ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let count = self.elite_count(population.len());
        Ok(ranked
            .into_iter()
            .take(count)
            .map(|(i, f)| (population[i].clone(), f))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{MetricTable, PairMetric};
    use crate::waypoint::Waypoint;

    fn line_world(n: usize) -> (Roster, DistanceMatrix) {
        // Waypoints on a line at x = 0, 1, ..., n-1
        let roster = Roster::new((0..n).map(|i| Waypoint::new(format!("W{i}"))));
        let mut table = MetricTable::new();
        for i in 0..n {
            for j in (i + 1)..n {
                table.insert(
                    Waypoint::new(format!("W{i}")),
                    Waypoint::new(format!("W{j}")),
                    PairMetric {
                        distance: (j - i) as f64,
                        duration: (j - i) as f64 * 60.0,
                    },
                );
            }
        }
        let matrix = DistanceMatrix::build(&roster, &table);
        (roster, matrix)
    }

    #[test]
    fn test_elite_count_rounding() {
        let sel = TruncationSelection::new(0.1);
        assert_eq!(sel.elite_count(100), 10);
        assert_eq!(sel.elite_count(50), 5);
        assert_eq!(sel.elite_count(5), 1);
        assert_eq!(sel.elite_count(1), 1);
    }

    #[test]
    fn test_select_returns_rank_order() {
        let (roster, matrix) = line_world(5);
        let mut cache = FitnessCache::new();

        // Identity walks the line; the others cross back and forth
        let population = vec![
            Tour::try_new(vec![4, 1, 3, 0, 2]).unwrap(),
            Tour::identity(5),
            Tour::try_new(vec![0, 2, 4, 1, 3]).unwrap(),
            Tour::try_new(vec![1, 0, 2, 3, 4]).unwrap(),
        ];

        let sel = TruncationSelection::new(0.5);
        let elites = sel.select(&population, &mut cache, &matrix, &roster).unwrap();

        assert_eq!(elites.len(), 2);
        assert!(elites[0].1 <= elites[1].1);
        assert_eq!(elites[0].0, Tour::identity(5));
    }

    #[test]
    fn test_select_shares_fitness_across_duplicates() {
        let (roster, matrix) = line_world(4);
        let mut cache = FitnessCache::new();

        let tour = Tour::identity(4);
        let population = vec![tour.clone(), tour.clone(), tour];

        let sel = TruncationSelection::new(1.0);
        let elites = sel.select(&population, &mut cache, &matrix, &roster).unwrap();

        assert_eq!(elites.len(), 3);
        assert_eq!(cache.distinct_evaluated(), 1);
    }

    #[test]
    fn test_select_ties_break_by_position() {
        let (roster, matrix) = line_world(4);

        let a = Tour::identity(4);
        let b = Tour::try_new(vec![3, 2, 1, 0]).unwrap(); // same cycle reversed
        let population = vec![b.clone(), a.clone()];

        let sel = TruncationSelection::new(0.5);
        let mut cache = FitnessCache::new();
        let elites = sel.select(&population, &mut cache, &matrix, &roster).unwrap();

        // Equal fitness: the earlier occurrence wins
        assert_eq!(elites.len(), 1);
        assert_eq!(elites[0].0, b);
    }

    #[test]
    fn test_select_propagates_missing_metric() {
        let roster = Roster::new(["A", "B", "C"].map(Waypoint::new));
        let mut table = MetricTable::new();
        table.insert(
            Waypoint::new("A"),
            Waypoint::new("B"),
            PairMetric {
                distance: 1.0,
                duration: 1.0,
            },
        );
        let matrix = DistanceMatrix::build(&roster, &table);

        let sel = TruncationSelection::new(0.5);
        let mut cache = FitnessCache::new();
        let err = sel
            .select(&[Tour::identity(3)], &mut cache, &matrix, &roster)
            .unwrap_err();
        assert!(matches!(err, MetricError::MissingPair(_, _)));
    }
}
