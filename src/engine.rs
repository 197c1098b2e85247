//! Generational controller
//!
//! Drives the evaluate -> select -> reproduce -> replace cycle for a fixed
//! number of rounds and returns the best tour found. All stochastic
//! operations draw from one explicitly seeded generator, so a run is fully
//! reproducible from its configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{RoundStats, RunResult};
use crate::error::{ConfigError, EvolutionError, EvoResult};
use crate::fitness::{tour_duration, FitnessCache};
use crate::genome::Anchors;
use crate::metric::{resolve_fetch, DistanceMatrix, MetricSource, MetricTable, MissingPairPolicy};
use crate::operators::{PointMutation, SegmentShuffle, TourMutation, TruncationSelection};
use crate::population::Population;
use crate::waypoint::{Roster, Waypoint};

/// Anchored start/end waypoints, by value
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Required first stop
    pub start: Option<Waypoint>,
    /// Required last stop
    pub end: Option<Waypoint>,
}

/// Configuration for the engine
///
/// The defaults reproduce the classic setup: 10% elites, each emitting
/// itself plus 2 point-mutation and 7 segment-shuffle offspring, which keeps
/// the population size exactly stable across rounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of generational rounds; the loop always runs all of them
    pub generations: usize,
    /// Number of tours per round
    pub population_size: usize,
    /// Fraction of the population kept as elites, in (0, 1]
    pub elite_fraction: f64,
    /// Point-mutation offspring per elite
    pub point_offspring: usize,
    /// Segment-shuffle offspring per elite
    pub shuffle_offspring: usize,
    /// Upper bound on swaps per point mutation
    pub max_swaps: usize,
    /// Inclusive segment length bounds for segment shuffle
    pub shuffle_len_range: (usize, usize),
    /// Fixed start/end waypoints
    pub anchors: AnchorConfig,
    /// Seed for the run's random generator; unseeded runs are not reproducible
    pub rng_seed: Option<u64>,
    /// Report progress every this many rounds; `None` means every 10% of the run
    pub report_every: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generations: 5000,
            population_size: 100,
            elite_fraction: 0.1,
            point_offspring: 2,
            shuffle_offspring: 7,
            max_swaps: 3,
            shuffle_len_range: (2, 15),
            anchors: AnchorConfig::default(),
            rng_seed: None,
            report_every: None,
        }
    }
}

impl EngineConfig {
    /// Emissions per elite: the elite itself plus its offspring
    fn per_elite(&self) -> usize {
        1 + self.point_offspring + self.shuffle_offspring
    }

    /// Validate the configuration, before any round runs
    fn validate(&self) -> Result<(), ConfigError> {
        if self.generations == 0 {
            return Err(ConfigError::Invalid(
                "generations must be at least 1".to_string(),
            ));
        }
        if self.population_size == 0 {
            return Err(ConfigError::Invalid(
                "population size must be at least 1".to_string(),
            ));
        }
        if !(self.elite_fraction > 0.0 && self.elite_fraction <= 1.0) {
            return Err(ConfigError::EliteFraction(self.elite_fraction));
        }
        if self.max_swaps == 0 {
            return Err(ConfigError::Invalid(
                "max_swaps must be at least 1".to_string(),
            ));
        }
        let (min_len, max_len) = self.shuffle_len_range;
        if min_len < 2 || min_len > max_len {
            return Err(ConfigError::ShuffleLenRange(min_len, max_len));
        }
        if let Some(every) = self.report_every {
            if every == 0 {
                return Err(ConfigError::Invalid(
                    "report_every must be at least 1".to_string(),
                ));
            }
        }

        let elite_count = TruncationSelection::new(self.elite_fraction)
            .elite_count(self.population_size);
        if elite_count * self.per_elite() != self.population_size {
            return Err(ConfigError::PopulationArithmetic {
                population_size: self.population_size,
                elite_count,
                per_elite: self.per_elite(),
            });
        }
        Ok(())
    }
}

/// The genetic-algorithm engine for one working set
#[derive(Debug)]
pub struct Engine {
    roster: Roster,
    matrix: DistanceMatrix,
    anchors: Anchors,
    config: EngineConfig,
    selection: TruncationSelection,
    point_mutation: PointMutation,
    segment_shuffle: SegmentShuffle,
}

impl Engine {
    /// Build an engine from a working set and a pre-populated metric table
    ///
    /// Fails fast on any configuration problem; nothing is validated lazily
    /// inside the loop.
    pub fn new(
        waypoints: Vec<Waypoint>,
        table: &MetricTable,
        config: EngineConfig,
    ) -> EvoResult<Self> {
        config.validate()?;

        let roster = Roster::new(waypoints);
        if roster.len() < 2 {
            return Err(ConfigError::Invalid(
                "working set needs at least two waypoints".to_string(),
            )
            .into());
        }

        let anchors = resolve_anchors(&config.anchors, &roster)?;
        let matrix = DistanceMatrix::build(&roster, table);

        let selection = TruncationSelection::new(config.elite_fraction);
        let point_mutation = PointMutation::new(config.max_swaps);
        let segment_shuffle =
            SegmentShuffle::new(config.shuffle_len_range.0, config.shuffle_len_range.1);

        Ok(Self {
            roster,
            matrix,
            anchors,
            config,
            selection,
            point_mutation,
            segment_shuffle,
        })
    }

    /// Build an engine by fetching metrics from the external provider
    ///
    /// Fetches once, applies the missing-pair policy to the outcome, and
    /// constructs the engine over the effective working set.
    pub fn from_source<S: MetricSource>(
        waypoints: &[Waypoint],
        source: &S,
        policy: MissingPairPolicy,
        config: EngineConfig,
    ) -> EvoResult<Self> {
        let fetch = source.fetch(waypoints);
        if !fetch.failed_pairs.is_empty() {
            tracing::warn!(
                failed = fetch.failed_pairs.len(),
                ?policy,
                "metric fetch left pairs uncovered"
            );
        }
        let (effective, table) = resolve_fetch(fetch, policy)?;
        Self::new(effective, &table, config)
    }

    /// The stable waypoint-to-index mapping for this run
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Run the full round count and return the best tour found
    pub fn run(&self) -> EvoResult<RunResult> {
        let mut rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let n = self.roster.len();
        let region = self.anchors.free_region(n);
        let generations = self.config.generations;
        let cadence = self
            .config
            .report_every
            .unwrap_or_else(|| (generations / 10).max(1));

        let mut population =
            Population::random(self.config.population_size, n, &self.anchors, &mut rng);
        let mut rounds: Vec<RoundStats> = Vec::with_capacity(generations);

        for round in 1..=generations {
            let mut cache = FitnessCache::new();
            self.prime_cache(&population, &mut cache)?;

            let elites = self
                .selection
                .select(population.tours(), &mut cache, &self.matrix, &self.roster)
                .map_err(EvolutionError::from)?;
            let (best_tour, best_fitness) =
                elites.first().cloned().ok_or(EvolutionError::EmptyPopulation)?;

            rounds.push(RoundStats {
                round,
                best_fitness,
                distinct_evaluated: cache.distinct_evaluated(),
                best_tour: best_tour.clone(),
            });

            if round % cadence == 0 || round == generations {
                let route = self.roster.resolve(best_tour.order());
                tracing::info!(
                    round,
                    best_fitness,
                    distinct_evaluated = cache.distinct_evaluated(),
                    best_route = %format_route(&route),
                    "round complete"
                );
            }

            if round == generations {
                break;
            }

            // Next population wholly replaces the current one; nothing
            // survives except the elites the emission carries over.
            let mut next = Population::with_capacity(self.config.population_size);
            for (elite, _) in &elites {
                next.push(elite.clone());
                for _ in 0..self.config.point_offspring {
                    next.push(self.point_mutation.mutate(elite, &region, &mut rng));
                }
                for _ in 0..self.config.shuffle_offspring {
                    next.push(self.segment_shuffle.mutate(elite, &region, &mut rng));
                }
            }
            debug_assert_eq!(next.len(), population.len());
            next.set_round(round);
            population = next;
        }

        let last = rounds.last().ok_or(EvolutionError::EmptyPopulation)?;
        let best_tour = last.best_tour.clone();
        let best_duration = tour_duration(&best_tour, &self.matrix, &self.roster)
            .map_err(EvolutionError::from)?;

        Ok(RunResult {
            best_route: self.roster.resolve(best_tour.order()),
            best_fitness: last.best_fitness,
            best_duration,
            best_tour,
            rounds,
        })
    }

    /// Score every distinct tour of the population into the cache
    ///
    /// Evaluation is a pure function of tour and matrix, so distinct tours
    /// can be scored in parallel and merged; results are identical to the
    /// sequential path.
    #[cfg(feature = "parallel")]
    fn prime_cache(&self, population: &Population, cache: &mut FitnessCache) -> EvoResult<()> {
        use rayon::prelude::*;

        use crate::fitness::tour_distance;
        use crate::genome::Tour;

        let mut seen = std::collections::HashSet::new();
        let distinct: Vec<&Tour> = population.iter().filter(|t| seen.insert(*t)).collect();

        let scores = distinct
            .par_iter()
            .map(|tour| {
                tour_distance(tour, &self.matrix, &self.roster)
                    .map(|f| ((*tour).clone(), f))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(EvolutionError::from)?;

        for (tour, fitness) in scores {
            cache.insert(tour, fitness);
        }
        Ok(())
    }

    /// Sequential fallback; the selector scores through the cache on demand
    #[cfg(not(feature = "parallel"))]
    fn prime_cache(&self, _population: &Population, _cache: &mut FitnessCache) -> EvoResult<()> {
        Ok(())
    }
}

fn resolve_anchors(config: &AnchorConfig, roster: &Roster) -> Result<Anchors, ConfigError> {
    let lookup = |w: &Waypoint| {
        roster
            .index_of(w)
            .ok_or_else(|| ConfigError::UnknownAnchor(w.clone()))
    };
    let start = config.start.as_ref().map(&lookup).transpose()?;
    let end = config.end.as_ref().map(&lookup).transpose()?;
    if let (Some(s), Some(e)) = (start, end) {
        if s == e {
            return Err(ConfigError::DuplicateAnchor(
                roster.waypoints()[s].clone(),
            ));
        }
    }
    Ok(Anchors { start, end })
}

fn format_route(route: &[Waypoint]) -> String {
    route
        .iter()
        .map(Waypoint::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
