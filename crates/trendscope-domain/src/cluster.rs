//! Cluster module - run-local grouping of items

use crate::Item;
use std::collections::BTreeMap;

/// Integer label assigned to an item by one clustering run
pub type ClusterLabel = i32;

/// Reserved label for items that belong to no dense neighborhood
pub const NOISE: ClusterLabel = -1;

/// Mapping from cluster label to the items assigned to it
///
/// Produced fresh for each run and never merged across runs. Every item of the
/// batch appears under exactly one label; member order follows batch order.
/// Labels are run-local and carry no meaning between batches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clusters {
    groups: BTreeMap<ClusterLabel, Vec<Item>>,
}

impl Clusters {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a batch by the labels a clustering run assigned to it
    ///
    /// # Panics
    /// Panics if `items` and `labels` differ in length
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use trendscope_domain::{Clusters, Item, NOISE};
    ///
    /// let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let items = vec![
    ///     Item::new("a", d, "s", "u1").unwrap(),
    ///     Item::new("b", d, "s", "u2").unwrap(),
    ///     Item::new("c", d, "s", "u3").unwrap(),
    /// ];
    /// let clusters = Clusters::from_labels(&items, &[0, NOISE, 0]);
    /// assert_eq!(clusters.get(0).unwrap().len(), 2);
    /// assert_eq!(clusters.noise().len(), 1);
    /// ```
    pub fn from_labels(items: &[Item], labels: &[ClusterLabel]) -> Self {
        assert_eq!(items.len(), labels.len(), "Every item needs exactly one label");

        let mut groups: BTreeMap<ClusterLabel, Vec<Item>> = BTreeMap::new();
        for (item, &label) in items.iter().zip(labels) {
            groups.entry(label).or_default().push(item.clone());
        }
        Self { groups }
    }

    /// Members of one label
    pub fn get(&self, label: ClusterLabel) -> Option<&[Item]> {
        self.groups.get(&label).map(Vec::as_slice)
    }

    /// Items that were not assigned to any cluster
    pub fn noise(&self) -> &[Item] {
        self.get(NOISE).unwrap_or(&[])
    }

    /// Non-noise clusters with at least `min_size` members, in label order
    pub fn candidates(&self, min_size: usize) -> impl Iterator<Item = (ClusterLabel, &[Item])> {
        self.groups
            .iter()
            .filter(move |(label, members)| **label != NOISE && members.len() >= min_size)
            .map(|(label, members)| (*label, members.as_slice()))
    }

    /// Number of distinct non-noise labels
    pub fn cluster_count(&self) -> usize {
        self.groups.keys().filter(|label| **label != NOISE).count()
    }

    /// Total number of items across every label
    pub fn item_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// True if no items were grouped
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn items(n: usize) -> Vec<Item> {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| Item::new(format!("title {}", i), d, "s", format!("u{}", i)).unwrap())
            .collect()
    }

    #[test]
    fn test_from_labels_groups_in_batch_order() {
        let batch = items(4);
        let clusters = Clusters::from_labels(&batch, &[1, 0, 1, NOISE]);

        let one = clusters.get(1).unwrap();
        assert_eq!(one[0].url(), "u0");
        assert_eq!(one[1].url(), "u2");
        assert_eq!(clusters.noise()[0].url(), "u3");
        assert_eq!(clusters.cluster_count(), 2);
        assert_eq!(clusters.item_count(), 4);
    }

    #[test]
    fn test_candidates_skip_noise_and_small() {
        let batch = items(5);
        let clusters = Clusters::from_labels(&batch, &[0, 0, 1, NOISE, NOISE]);
        let labels: Vec<ClusterLabel> = clusters.candidates(2).map(|(l, _)| l).collect();
        assert_eq!(labels, vec![0]);
    }

    #[test]
    fn test_empty() {
        let clusters = Clusters::from_labels(&[], &[]);
        assert!(clusters.is_empty());
        assert!(clusters.noise().is_empty());
        assert_eq!(clusters.cluster_count(), 0);
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        Clusters::from_labels(&items(2), &[0]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    proptest! {
        /// Property: grouping keeps every item exactly once, under its own label
        #[test]
        fn test_from_labels_partitions(labels in prop::collection::vec(-1i32..5, 0..30)) {
            let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let items: Vec<Item> = (0..labels.len())
                .map(|i| Item::new("t", day, "s", format!("u{}", i)).unwrap())
                .collect();
            let clusters = Clusters::from_labels(&items, &labels);

            prop_assert_eq!(clusters.item_count(), items.len());
            for (i, &label) in labels.iter().enumerate() {
                let members = clusters.get(label).unwrap_or(&[]);
                let url = format!("u{}", i);
                prop_assert_eq!(members.iter().filter(|m| m.url() == url).count(), 1);
            }
        }
    }
}
