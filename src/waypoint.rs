//! Waypoint identifiers and canonical pair keys
//!
//! A waypoint is an opaque location identifier (an address string, a place
//! ID). The engine never interprets its contents; equality is by value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque location identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waypoint(String);

impl Waypoint {
    /// Create a waypoint from any string-like identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Waypoint {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Waypoint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Canonical key for an unordered pair of distinct waypoints
///
/// The lexicographically smaller waypoint is always stored first, so
/// `PairKey::new(a, b) == PairKey::new(b, a)` and a symmetric table needs one
/// entry per pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey(Waypoint, Waypoint);

impl PairKey {
    /// Build the canonical key for `{a, b}`
    ///
    /// # Panics
    /// Panics if `a == b`; a tour never travels from a waypoint to itself.
    pub fn new(a: Waypoint, b: Waypoint) -> Self {
        assert!(a != b, "Pair keys require two distinct waypoints");
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The lexicographically smaller waypoint
    pub fn first(&self) -> &Waypoint {
        &self.0
    }

    /// The lexicographically larger waypoint
    pub fn second(&self) -> &Waypoint {
        &self.1
    }

    /// Whether the pair touches the given waypoint
    pub fn contains(&self, w: &Waypoint) -> bool {
        &self.0 == w || &self.1 == w
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.0, self.1)
    }
}

/// Stable waypoint-to-index mapping for one engine run
///
/// Tours store indices into this roster rather than waypoint values, so
/// genomes stay cheap to clone, hash, and compare.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    waypoints: Vec<Waypoint>,
}

impl Roster {
    /// Build a roster from the working set, preserving the given order
    ///
    /// Duplicates are dropped; the first occurrence wins.
    pub fn new(waypoints: impl IntoIterator<Item = Waypoint>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let waypoints = waypoints
            .into_iter()
            .filter(|w| seen.insert(w.clone()))
            .collect();
        Self { waypoints }
    }

    /// Number of waypoints in the working set
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The waypoint at the given index
    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    /// The index of the given waypoint, if it is in the working set
    pub fn index_of(&self, w: &Waypoint) -> Option<usize> {
        self.waypoints.iter().position(|x| x == w)
    }

    /// All waypoints in roster order
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Translate a sequence of indices back into waypoints
    pub fn resolve(&self, indices: &[usize]) -> Vec<Waypoint> {
        indices
            .iter()
            .map(|&i| self.waypoints[i].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_canonical_order() {
        let ab = PairKey::new(Waypoint::new("A"), Waypoint::new("B"));
        let ba = PairKey::new(Waypoint::new("B"), Waypoint::new("A"));
        assert_eq!(ab, ba);
        assert_eq!(ab.first().as_str(), "A");
        assert_eq!(ab.second().as_str(), "B");
    }

    #[test]
    #[should_panic(expected = "distinct")]
    fn test_pair_key_rejects_equal_waypoints() {
        PairKey::new(Waypoint::new("A"), Waypoint::new("A"));
    }

    #[test]
    fn test_pair_key_contains() {
        let key = PairKey::new(Waypoint::new("A"), Waypoint::new("B"));
        assert!(key.contains(&Waypoint::new("A")));
        assert!(key.contains(&Waypoint::new("B")));
        assert!(!key.contains(&Waypoint::new("C")));
    }

    #[test]
    fn test_roster_indexing() {
        let roster = Roster::new(["C", "A", "B"].map(Waypoint::new));
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.get(0), Some(&Waypoint::new("C")));
        assert_eq!(roster.index_of(&Waypoint::new("B")), Some(2));
        assert_eq!(roster.index_of(&Waypoint::new("Z")), None);
    }

    #[test]
    fn test_roster_deduplicates() {
        let roster = Roster::new(["A", "B", "A"].map(Waypoint::new));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_roster_resolve() {
        let roster = Roster::new(["A", "B", "C"].map(Waypoint::new));
        let route = roster.resolve(&[2, 0, 1]);
        assert_eq!(route, ["C", "A", "B"].map(Waypoint::new));
    }

    #[test]
    fn test_waypoint_serialization() {
        let w = Waypoint::new("Grand Canyon Village, AZ 86023");
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, "\"Grand Canyon Village, AZ 86023\"");
        let back: Waypoint = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
