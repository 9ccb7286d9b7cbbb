//! Evaporator selection list and total demand aggregation.

use serde::{Deserialize, Serialize};

use crate::catalog::{Brand, EvaporatorKind, EvaporatorTable};

/// One line of the evaporator list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaporatorSelection {
    pub kind: EvaporatorKind,
    /// Brand-specific nominal rating.
    pub nominal: u32,
    /// Real capacity per unit, looked up for the active brand.
    pub real_capacity: f64,
    /// Number of units (>= 1).
    pub quantity: u32,
    /// `true` when `real_capacity` is the fallback constant rather than catalog data.
    #[serde(default)]
    pub approximated: bool,
}

impl EvaporatorSelection {
    /// Real capacity times quantity.
    pub fn line_capacity(&self) -> f64 {
        self.real_capacity * f64::from(self.quantity)
    }
}

/// Sums `real_capacity * quantity` over all selections.
///
/// An empty slice yields `0.0`, which the sizing step treats as "no result".
pub fn aggregate(selections: &[EvaporatorSelection]) -> f64 {
    selections.iter().map(EvaporatorSelection::line_capacity).sum()
}

/// The same lines with real capacities looked up in `brand`'s table.
///
/// Misses get the brand's fallback capacity and are flagged approximated.
pub fn lookup_for_brand(
    selections: &[EvaporatorSelection],
    table: &EvaporatorTable,
    brand: Brand,
) -> Vec<EvaporatorSelection> {
    selections
        .iter()
        .map(|s| {
            let lookup = table.lookup(brand, s.kind, s.nominal);
            EvaporatorSelection {
                real_capacity: lookup.value(),
                approximated: lookup.is_fallback(),
                ..s.clone()
            }
        })
        .collect()
}

/// Converts a raw quantity edit to a valid quantity.
///
/// Non-finite input becomes 1; finite input is floored and clamped to `[1, u32::MAX]`.
pub fn clamp_quantity(value: f64) -> u32 {
    if !value.is_finite() {
        return 1;
    }
    let floored = value.floor();
    if floored < 1.0 {
        1
    } else if floored >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        floored as u32
    }
}

/// Ordered evaporator list with unique `(kind, nominal)` lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionList {
    items: Vec<EvaporatorSelection>,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds units, merging into an existing line with the same kind and nominal.
    ///
    /// A `quantity` of 0 is treated as 1. Returns the index of the affected line.
    pub fn add(
        &mut self,
        table: &EvaporatorTable,
        brand: Brand,
        kind: EvaporatorKind,
        nominal: u32,
        quantity: u32,
    ) -> usize {
        let quantity = quantity.max(1);
        if let Some(index) = self
            .items
            .iter()
            .position(|s| s.kind == kind && s.nominal == nominal)
        {
            let line = &mut self.items[index];
            line.quantity = line.quantity.saturating_add(quantity);
            return index;
        }

        let lookup = table.lookup(brand, kind, nominal);
        self.items.push(EvaporatorSelection {
            kind,
            nominal,
            real_capacity: lookup.value(),
            quantity,
            approximated: lookup.is_fallback(),
        });
        self.items.len() - 1
    }

    /// Sets a line's quantity from raw input, see [`clamp_quantity`].
    ///
    /// Returns `false` when `index` is out of range.
    pub fn set_quantity(&mut self, index: usize, value: f64) -> bool {
        match self.items.get_mut(index) {
            Some(line) => {
                line.quantity = clamp_quantity(value);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<EvaporatorSelection> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Re-looks-up every line's real capacity for `brand`, keeping kind and quantity.
    pub fn refresh_for_brand(&mut self, table: &EvaporatorTable, brand: Brand) {
        self.items = lookup_for_brand(&self.items, table, brand);
    }

    pub fn items(&self) -> &[EvaporatorSelection] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total unit count across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|s| u64::from(s.quantity)).sum()
    }

    pub fn total_demand(&self) -> f64 {
        aggregate(&self.items)
    }
}
