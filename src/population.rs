//! Population container
//!
//! A population is the current round's collection of tours. Fitness lives in
//! the round's cache, not on the tours; each round replaces the collection
//! wholesale rather than mutating it in place.

use rand::Rng;

use crate::genome::{Anchors, Tour};

/// The tours of one generational round
#[derive(Clone, Debug, Default)]
pub struct Population {
    tours: Vec<Tour>,
    round: usize,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a population with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tours: Vec::with_capacity(capacity),
            round: 0,
        }
    }

    /// Create a population from a vector of tours
    pub fn from_tours(tours: Vec<Tour>) -> Self {
        Self { tours, round: 0 }
    }

    /// Create a population of uniformly random tours
    pub fn random<R: Rng>(size: usize, n: usize, anchors: &Anchors, rng: &mut R) -> Self {
        let tours = (0..size).map(|_| Tour::random(n, anchors, rng)).collect();
        Self { tours, round: 0 }
    }

    /// The current round number
    pub fn round(&self) -> usize {
        self.round
    }

    /// Set the round number
    pub fn set_round(&mut self, round: usize) {
        self.round = round;
    }

    /// Number of tours (duplicates included)
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Whether the population is empty
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// Add a tour
    pub fn push(&mut self, tour: Tour) {
        self.tours.push(tour);
    }

    /// Iterate over the tours
    pub fn iter(&self) -> impl Iterator<Item = &Tour> {
        self.tours.iter()
    }

    /// The tours as a slice
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Number of distinct tours
    pub fn distinct(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        self.tours.iter().filter(|t| seen.insert(*t)).count()
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Tour;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tours[index]
    }
}

impl IntoIterator for Population {
    type Item = Tour;
    type IntoIter = std::vec::IntoIter<Tour>;

    fn into_iter(self) -> Self::IntoIter {
        self.tours.into_iter()
    }
}

impl FromIterator<Tour> for Population {
    fn from_iter<I: IntoIterator<Item = Tour>>(iter: I) -> Self {
        Self::from_tours(iter.into_iter().collect())
    }
}
