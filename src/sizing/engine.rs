//! Condenser selection: required capacity and the sorted-table neighbour search.
//!
//! The engine is brand-agnostic. It compares `total_demand` against the real
//! capacities of one `(brand, orientation)` group, so both figures must already
//! be in that brand's unit.

use serde::Serialize;

use crate::catalog::{Brand, CondenserEntry, CondenserTable, Orientation};
use crate::diversity::EffectiveFactor;

/// A catalog entry picked by the engine, annotated with the percentage used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CondenserMatch {
    pub entry: CondenserEntry,
    pub diversity_pct: f64,
}

/// Positions found by [`search`] in an ascending slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    pub ideal: Option<usize>,
    pub below: Option<usize>,
    pub above: Option<usize>,
}

/// Finds the smallest entry with `real_capacity >= required` and its neighbours.
///
/// `entries` must be sorted ascending by real capacity. `above` skips entries
/// with the same capacity as the ideal one, so it is always strictly larger.
/// When nothing fits, `below` is the largest entry and the other two are `None`.
pub fn search(entries: &[CondenserEntry], required: f64) -> Neighbors {
    let ideal = entries.partition_point(|e| e.real_capacity < required);
    if ideal == entries.len() {
        return Neighbors {
            ideal: None,
            below: entries.len().checked_sub(1),
            above: None,
        };
    }
    Neighbors {
        ideal: Some(ideal),
        below: ideal.checked_sub(1),
        above: first_larger(entries, ideal),
    }
}

/// Picks the largest entry (first of its capacity on ties) and its predecessor.
pub fn search_largest(entries: &[CondenserEntry]) -> Neighbors {
    let Some(last) = entries.last() else {
        return Neighbors::default();
    };
    let ideal = entries.partition_point(|e| e.real_capacity < last.real_capacity);
    Neighbors {
        ideal: Some(ideal),
        below: ideal.checked_sub(1),
        above: None,
    }
}

fn first_larger(entries: &[CondenserEntry], index: usize) -> Option<usize> {
    let capacity = entries[index].real_capacity;
    let next = entries.partition_point(|e| e.real_capacity <= capacity);
    (next < entries.len()).then_some(next)
}

/// Result of sizing one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSelection {
    pub brand: Brand,
    pub orientation: Orientation,
    /// Aggregated demand in the brand's capacity unit.
    pub total_demand: f64,
    pub factor: EffectiveFactor,
    /// `total_demand * applied_pct / 100`.
    pub required_minimum_capacity: f64,
    pub ideal_match: Option<CondenserMatch>,
    pub one_below: Option<CondenserMatch>,
    pub one_above: Option<CondenserMatch>,
    /// Number of entries searched for this brand and orientation.
    pub candidates: usize,
}

impl BrandSelection {
    /// Demand exceeds every cataloged unit.
    pub fn no_match(&self) -> bool {
        self.ideal_match.is_none() && self.candidates > 0
    }

    /// The brand has no units in this orientation.
    pub fn empty_catalog(&self) -> bool {
        self.candidates == 0
    }

    /// Ratio of the ideal unit's capacity to the required capacity.
    pub fn headroom(&self) -> Option<f64> {
        let ideal = self.ideal_match.as_ref()?;
        (self.required_minimum_capacity > 0.0)
            .then(|| ideal.entry.real_capacity / self.required_minimum_capacity)
    }
}

/// Sizes one brand and orientation.
///
/// # Arguments
///
/// * `total_demand` - Aggregated evaporator demand, in the brand's unit
/// * `factor` - Effective diversity factor for this brand
/// * `brand` - Brand whose condensers are searched
/// * `orientation` - Installation orientation
/// * `table` - Condenser catalog
///
/// # Returns
///
/// A `BrandSelection`. An absent `ideal_match` with a non-zero candidate
/// count means no unit is large enough.
pub fn select(
    total_demand: f64,
    factor: &EffectiveFactor,
    brand: Brand,
    orientation: Orientation,
    table: &CondenserTable,
) -> BrandSelection {
    let entries = table.entries(brand, orientation);
    let required = total_demand * factor.multiplier();
    let found = if factor.maximum_capacity {
        search_largest(entries)
    } else {
        search(entries, required)
    };

    let pick = |index: Option<usize>| {
        index.map(|i| CondenserMatch {
            entry: entries[i].clone(),
            diversity_pct: factor.applied_pct,
        })
    };

    let result = BrandSelection {
        brand,
        orientation,
        total_demand,
        factor: *factor,
        required_minimum_capacity: required,
        ideal_match: pick(found.ideal),
        one_below: pick(found.below),
        one_above: pick(found.above),
        candidates: entries.len(),
    };

    tracing::debug!(
        %brand,
        %orientation,
        total_demand,
        required,
        ideal = result.ideal_match.as_ref().map(|m| m.entry.model.as_str()),
        "condenser selection"
    );
    result
}
