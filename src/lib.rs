//! # route-evo
//!
//! A genetic-algorithm engine for low-cost visiting orders over geographic
//! waypoints.
//!
//! The engine evolves permutations of a fixed waypoint set against a
//! symmetric pairwise metric table, scoring each candidate by its total
//! cyclic driving distance. Search runs for a fixed number of generational
//! rounds with truncation selection and two mutation operators, and is fully
//! reproducible from a seed.
//!
//! ## Core Concepts
//!
//! - **Tours as Permutations**: A genome is a permutation of roster indices;
//!   operators preserve the permutation invariant by construction
//! - **Metric-Table Fitness**: Cost comes from a pre-fetched pairwise table,
//!   never from live provider calls inside the loop
//! - **Stable Populations**: Elite count times emissions per elite equals
//!   the population size, validated up front
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use route_evo::prelude::*;
//!
//! let config = EngineConfig {
//!     generations: 500,
//!     rng_seed: Some(42),
//!     ..EngineConfig::default()
//! };
//!
//! let engine = Engine::new(waypoints, &table, config)?;
//! let result = engine.run()?;
//! println!("best: {:?} at {}", result.best_route, result.best_fitness);
//! ```

pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod metric;
pub mod operators;
pub mod population;
pub mod waypoint;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::diagnostics::{RoundStats, RunResult};
    pub use crate::engine::{AnchorConfig, Engine, EngineConfig};
    pub use crate::error::{
        ConfigError, EvoResult, EvolutionError, GenomeError, MetricError,
    };
    pub use crate::fitness::{tour_distance, tour_duration, FitnessCache};
    pub use crate::genome::{Anchors, Tour};
    pub use crate::metric::{
        DistanceMatrix, MetricFetch, MetricSource, MetricTable, MissingPairPolicy, PairMetric,
    };
    pub use crate::operators::{
        PointMutation, SegmentShuffle, TourMutation, TruncationSelection,
    };
    pub use crate::population::Population;
    pub use crate::waypoint::{PairKey, Roster, Waypoint};
}
