//! Read-only product catalog: evaporator capacities and condenser tables.

/// Built-in reference data.
pub mod builtin;
/// Condensing-unit tables.
pub mod condenser;
/// Indoor-unit nominal/real capacity table.
pub mod evaporator;
pub mod types;

pub use builtin::builtin_catalog;
pub use condenser::CondenserTable;
pub use evaporator::{CapacityLookup, EvaporatorRow, EvaporatorTable};
pub use types::{Brand, CondenserEntry, EvaporatorKind, Orientation};

use thiserror::Error;

/// A catalog row that cannot be used for sizing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("condenser row {index}: model is required")]
    MissingModel { index: usize },

    #[error("{what} row {index}: real capacity must be finite and > 0, got {value}")]
    InvalidCapacity {
        what: &'static str,
        index: usize,
        value: f64,
    },

    #[error("evaporator row {index}: nominal must be > 0")]
    ZeroNominal { index: usize },

    #[error("evaporator row {index}: duplicate {brand} {kind} nominal {nominal}")]
    DuplicateEvaporator {
        index: usize,
        brand: Brand,
        kind: EvaporatorKind,
        nominal: u32,
    },
}

/// Complete catalog consumed by the sizing engine.
///
/// Immutable for the duration of a sizing session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub evaporators: EvaporatorTable,
    pub condensers: CondenserTable,
}

impl Catalog {
    /// Builds a catalog from raw rows, rejecting the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` naming the offending row.
    pub fn from_rows(
        evaporators: &[EvaporatorRow],
        condensers: Vec<CondenserEntry>,
    ) -> Result<Self, CatalogError> {
        let mut evap_table = EvaporatorTable::new();
        for (index, row) in evaporators.iter().enumerate() {
            if row.nominal == 0 {
                return Err(CatalogError::ZeroNominal { index });
            }
            if !(row.real.is_finite() && row.real > 0.0) {
                return Err(CatalogError::InvalidCapacity {
                    what: "evaporator",
                    index,
                    value: row.real,
                });
            }
            if evap_table
                .insert(row.brand, row.kind, row.nominal, row.real)
                .is_some()
            {
                return Err(CatalogError::DuplicateEvaporator {
                    index,
                    brand: row.brand,
                    kind: row.kind,
                    nominal: row.nominal,
                });
            }
        }

        for (index, entry) in condensers.iter().enumerate() {
            if entry.model.trim().is_empty() {
                return Err(CatalogError::MissingModel { index });
            }
            if !(entry.real_capacity.is_finite() && entry.real_capacity > 0.0) {
                return Err(CatalogError::InvalidCapacity {
                    what: "condenser",
                    index,
                    value: entry.real_capacity,
                });
            }
        }

        Ok(Self {
            evaporators: evap_table,
            condensers: CondenserTable::from_entries(condensers),
        })
    }

    /// Checks an already-built catalog and returns every problem found.
    pub fn validate(&self) -> Vec<CatalogError> {
        let mut errors = Vec::new();
        for (index, row) in self.evaporators.rows().iter().enumerate() {
            if !(row.real.is_finite() && row.real > 0.0) {
                errors.push(CatalogError::InvalidCapacity {
                    what: "evaporator",
                    index,
                    value: row.real,
                });
            }
        }
        for (index, entry) in self.condensers.iter().enumerate() {
            if entry.model.trim().is_empty() {
                errors.push(CatalogError::MissingModel { index });
            }
            if !(entry.real_capacity.is_finite() && entry.real_capacity > 0.0) {
                errors.push(CatalogError::InvalidCapacity {
                    what: "condenser",
                    index,
                    value: entry.real_capacity,
                });
            }
        }
        errors
    }
}
