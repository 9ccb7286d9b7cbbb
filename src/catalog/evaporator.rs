//! Evaporator nominal-to-real capacity table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{Brand, EvaporatorKind};

/// Outcome of an evaporator capacity lookup.
///
/// A miss does not fail: it yields [`Brand::fallback_real_capacity`], but
/// tagged so callers can surface the approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapacityLookup {
    Cataloged(f64),
    Fallback(f64),
}

impl CapacityLookup {
    pub fn value(self) -> f64 {
        match self {
            CapacityLookup::Cataloged(v) | CapacityLookup::Fallback(v) => v,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, CapacityLookup::Fallback(_))
    }
}

/// One row of an evaporator catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaporatorRow {
    pub brand: Brand,
    pub kind: EvaporatorKind,
    pub nominal: u32,
    pub real: f64,
}

/// Read-only `(brand, kind) -> nominal -> real` mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaporatorTable {
    models: BTreeMap<(Brand, EvaporatorKind), BTreeMap<u32, f64>>,
}

impl EvaporatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a nominal rating. Returns the previous real capacity, if any.
    pub fn insert(&mut self, brand: Brand, kind: EvaporatorKind, nominal: u32, real: f64) -> Option<f64> {
        self.models
            .entry((brand, kind))
            .or_default()
            .insert(nominal, real)
    }

    /// Builds a table from `(kind, &[(nominal, real)])` groups for one brand.
    pub fn with_brand(mut self, brand: Brand, groups: &[(EvaporatorKind, &[(u32, f64)])]) -> Self {
        for (kind, models) in groups {
            for &(nominal, real) in *models {
                self.insert(brand, *kind, nominal, real);
            }
        }
        self
    }

    /// Looks up the real capacity for a nominal rating, falling back to the
    /// brand's fallback capacity on a miss.
    pub fn lookup(&self, brand: Brand, kind: EvaporatorKind, nominal: u32) -> CapacityLookup {
        match self
            .models
            .get(&(brand, kind))
            .and_then(|m| m.get(&nominal))
        {
            Some(&real) => CapacityLookup::Cataloged(real),
            None => {
                let fallback = brand.fallback_real_capacity();
                tracing::warn!(
                    %brand,
                    kind = kind.slug(),
                    nominal,
                    fallback,
                    "evaporator not cataloged, substituting fallback capacity"
                );
                CapacityLookup::Fallback(fallback)
            }
        }
    }

    /// Nominal ratings available for a (brand, kind) pair, ascending, with their real capacities.
    pub fn nominals(&self, brand: Brand, kind: EvaporatorKind) -> Vec<(u32, f64)> {
        self.models
            .get(&(brand, kind))
            .map(|m| m.iter().map(|(&n, &r)| (n, r)).collect())
            .unwrap_or_default()
    }

    /// Total number of cataloged (brand, kind, nominal) triples.
    pub fn len(&self) -> usize {
        self.models.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens the table back into catalog rows.
    pub fn rows(&self) -> Vec<EvaporatorRow> {
        self.models
            .iter()
            .flat_map(|(&(brand, kind), m)| {
                m.iter().map(move |(&nominal, &real)| EvaporatorRow {
                    brand,
                    kind,
                    nominal,
                    real,
                })
            })
            .collect()
    }
}
