//! VRF condensing-unit sizing: catalog, diversity factors and condenser selection.

#[cfg(feature = "api")]
pub mod api;
/// Product catalog: evaporator capacities and condenser tables.
pub mod catalog;
pub mod config;
pub mod diversity;
pub mod io;
pub mod provider;
/// Demand aggregation, condenser selection and sizing sessions.
pub mod sizing;
