//! Error types for route-evo
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

use crate::waypoint::{PairKey, Waypoint};

/// Error type for genome operations
///
/// A genome failing the permutation invariant is a programming defect, never
/// something the engine repairs silently.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// The sequence is not a permutation of the working set
    #[error("Invalid genome: {0}")]
    InvalidPermutation(String),

    /// Wrong number of waypoints for the working set
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Error type for pairwise-metric lookups
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricError {
    /// A pair required by a tour is absent from the metric table
    #[error("Missing metric for pair {{{0}, {1}}}")]
    MissingPair(Waypoint, Waypoint),

    /// The metric fetch left pairs uncovered and the policy forbids excluding them
    #[error("Metric fetch failed for {0} pair(s); first: {1}")]
    IncompleteTable(usize, PairKey),
}

/// Error type for engine configuration
///
/// All of these are surfaced at setup, before any round runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Elite fraction outside (0, 1]
    #[error("Elite fraction must be in (0, 1], got {0}")]
    EliteFraction(f64),

    /// Population size does not divide under the elite/offspring arithmetic
    #[error(
        "Population size {population_size} is not elite_count {elite_count} \
         x {per_elite} emissions per elite; size would drift across rounds"
    )]
    PopulationArithmetic {
        population_size: usize,
        elite_count: usize,
        per_elite: usize,
    },

    /// An anchor waypoint is not part of the working set
    #[error("Anchor waypoint {0} is not in the working set")]
    UnknownAnchor(Waypoint),

    /// Start and end anchors name the same waypoint
    #[error("Start and end anchors must be distinct, both are {0}")]
    DuplicateAnchor(Waypoint),

    /// Segment-shuffle length range is malformed
    #[error("Shuffle length range [{0}, {1}] must satisfy 2 <= min <= max")]
    ShuffleLenRange(usize, usize),

    /// Generic invalid value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level error type for evolution runs
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Metric error
    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
