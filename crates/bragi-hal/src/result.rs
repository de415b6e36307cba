//! Measurement result aggregation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts: bitstring → number of shots that produced it.
///
/// The wire carries one bitstring per shot; `Counts` is the aggregated
/// view the workbench displays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create an empty counts map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate per-shot bitstrings into counts.
    pub fn from_shots<I, S>(shots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = Self::new();
        for shot in shots {
            counts.insert(shot.as_ref(), 1);
        }
        counts
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Count for a specific bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of shots across all outcomes.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// The most frequent outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.sorted()
            .first()
            .map(|(bitstring, count)| (bitstring.as_str(), *count))
    }

    /// Outcomes sorted by count descending, ties by bitstring.
    pub fn sorted(&self) -> Vec<(&String, u64)> {
        let mut entries: Vec<_> = self.0.iter().map(|(k, &v)| (k, v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Iterate over (bitstring, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, u64)> {
        self.0.iter().map(|(k, &v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_shots() {
        let counts = Counts::from_shots(["00", "11", "00", "00"]);
        assert_eq!(counts.get("00"), 3);
        assert_eq!(counts.get("11"), 1);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total_shots(), 4);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_sorted_and_most_frequent() {
        let counts = Counts::from_shots(["01", "10", "10", "11", "10"]);
        let sorted = counts.sorted();
        assert_eq!(sorted[0], (&"10".to_string(), 3));
        assert_eq!(counts.most_frequent(), Some(("10", 3)));
    }

    #[test]
    fn test_empty() {
        let counts = Counts::new();
        assert!(counts.is_empty());
        assert_eq!(counts.most_frequent(), None);
    }
}
