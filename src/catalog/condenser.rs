//! Condensing-unit capacity tables per brand and orientation.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::types::{Brand, CondenserEntry, Orientation};

/// Condenser entries grouped by `(brand, orientation)`.
///
/// Each group is kept sorted ascending by real capacity, ties broken by
/// model name, so searches can work on the slice directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CondenserTable {
    groups: BTreeMap<(Brand, Orientation), Vec<CondenserEntry>>,
}

fn by_capacity(a: &CondenserEntry, b: &CondenserEntry) -> Ordering {
    a.real_capacity
        .total_cmp(&b.real_capacity)
        .then_with(|| a.model.cmp(&b.model))
}

impl CondenserTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CondenserEntry>) -> Self {
        let mut table = Self::new();
        for e in entries {
            table.insert(e);
        }
        table
    }

    /// Inserts an entry into its group, preserving sort order.
    pub fn insert(&mut self, entry: CondenserEntry) {
        let group = self
            .groups
            .entry((entry.brand, entry.orientation))
            .or_default();
        let at = group.partition_point(|e| by_capacity(e, &entry) != Ordering::Greater);
        group.insert(at, entry);
    }

    /// Entries for one (brand, orientation), ascending by real capacity.
    pub fn entries(&self, brand: Brand, orientation: Orientation) -> &[CondenserEntry] {
        self.groups
            .get(&(brand, orientation))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Largest unit for one (brand, orientation).
    pub fn largest(&self, brand: Brand, orientation: Orientation) -> Option<&CondenserEntry> {
        self.entries(brand, orientation).last()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, grouped and sorted.
    pub fn iter(&self) -> impl Iterator<Item = &CondenserEntry> {
        self.groups.values().flatten()
    }
}
