//! Run diagnostics
//!
//! Per-round statistics and the final result of an engine run.

use serde::{Deserialize, Serialize};

use crate::genome::Tour;
use crate::waypoint::Waypoint;

/// Statistics for one generational round
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundStats {
    /// Round number, starting at 1
    pub round: usize,
    /// Lowest tour cost in the round
    pub best_fitness: f64,
    /// Distinct tours scored this round
    pub distinct_evaluated: usize,
    /// The round's best tour
    pub best_tour: Tour,
}

/// Result of a full engine run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunResult {
    /// Best visiting order found, as waypoints
    pub best_route: Vec<Waypoint>,
    /// Best tour as roster indices
    pub best_tour: Tour,
    /// Total cyclic driving distance of the best tour
    pub best_fitness: f64,
    /// Total cyclic driving duration of the best tour
    pub best_duration: f64,
    /// Per-round history, one entry per configured generation
    pub rounds: Vec<RoundStats>,
}

impl RunResult {
    /// Best fitness per round, in round order
    pub fn fitness_history(&self) -> Vec<f64> {
        self.rounds.iter().map(|r| r.best_fitness).collect()
    }

    /// Stats for a given round number, if recorded
    pub fn round(&self, round: usize) -> Option<&RoundStats> {
        self.rounds.iter().find(|r| r.round == round)
    }
}
