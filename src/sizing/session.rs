//! Sizing session state and the pure recompute function.

use super::advisory::Advisory;
use super::demand::{EvaporatorSelection, SelectionList, aggregate, lookup_for_brand};
use super::engine::select;
use super::report::SizingReport;
use crate::catalog::{Brand, Catalog, EvaporatorKind, Orientation};
use crate::diversity::{DiversityToken, FactorSource, FactorTable, resolve};

/// Computes a full report from explicit inputs.
///
/// `selections` carry real capacities for `brand`; every other brand is
/// re-looked-up in its own evaporator table so that each brand's demand is in
/// its own unit. Returns `None` for an empty or non-finite demand.
///
/// # Arguments
///
/// * `selections` - Evaporator list, capacities for `brand`
/// * `token` - Diversity selection
/// * `brand` - Active brand
/// * `orientation` - Installation orientation, shared by all brands
/// * `catalog` - Evaporator and condenser tables
/// * `factors` - Factor table used to resolve `token`
pub fn compute_selection(
    selections: &[EvaporatorSelection],
    token: &DiversityToken,
    brand: Brand,
    orientation: Orientation,
    catalog: &Catalog,
    factors: &FactorTable,
) -> Option<SizingReport> {
    if selections.is_empty() {
        return None;
    }

    let diversity = resolve(token, factors);
    let mut advisories = Vec::new();

    if let FactorSource::FamilyDefault { name, requested } = &diversity.source {
        advisories.push(Advisory::UnrecognizedDiversity {
            requested: requested.clone(),
            used: name.clone(),
            percent: diversity.percent,
        });
    }
    if !diversity.is_maximum_capacity() {
        advisories.extend(Advisory::check_combination(
            orientation,
            diversity.rounded_percent(),
        ));
    }

    let mut brands = Vec::with_capacity(Brand::ALL.len());
    for b in Brand::ALL {
        let lines = if b == brand {
            selections.to_vec()
        } else {
            lookup_for_brand(selections, &catalog.evaporators, b)
        };
        let total_demand = aggregate(&lines);
        if !total_demand.is_finite() {
            tracing::warn!(brand = %b, total_demand, "non-finite demand, no result");
            return None;
        }

        for line in lines.iter().filter(|l| l.approximated) {
            advisories.push(Advisory::ApproximatedCapacity {
                brand: b,
                evaporator: line.kind,
                nominal: line.nominal,
                substituted: line.real_capacity,
            });
        }

        let factor = diversity.for_brand(b);
        if factor.capped {
            advisories.push(Advisory::FactorCapped {
                brand: b,
                selected_pct: factor.selected_pct,
                applied_pct: factor.applied_pct,
            });
        }

        let result = select(total_demand, &factor, b, orientation, &catalog.condensers);
        if result.empty_catalog() {
            advisories.push(Advisory::EmptyCatalog {
                brand: b,
                orientation,
            });
        } else if result.no_match() {
            advisories.push(Advisory::NoMatchFound {
                brand: b,
                orientation,
                required: result.required_minimum_capacity,
                largest: catalog
                    .condensers
                    .largest(b, orientation)
                    .map_or(0.0, |e| e.real_capacity),
            });
        }
        brands.push(result);
    }

    Some(SizingReport {
        active_brand: brand,
        orientation,
        diversity,
        brands,
        advisories,
    })
}

/// Mutable sizing state: data loaded once, plus the user's current inputs.
///
/// Every accessor that produces results goes through [`compute_selection`],
/// so there is no cached output to go stale.
#[derive(Debug, Clone)]
pub struct SizingSession {
    catalog: Catalog,
    factors: FactorTable,
    load_advisories: Vec<Advisory>,
    selections: SelectionList,
    brand: Brand,
    orientation: Orientation,
    diversity: DiversityToken,
}

impl SizingSession {
    /// Starts a session with the family default diversity selection.
    pub fn new(catalog: Catalog, factors: FactorTable) -> Self {
        let default_name = factors
            .default_factor()
            .map(|f| f.name.clone())
            .or_else(|| {
                FactorTable::builtin(factors.family())
                    .default_factor()
                    .map(|f| f.name.clone())
            })
            .unwrap_or_default();
        let diversity = DiversityToken::parse(&default_name);
        Self {
            catalog,
            factors,
            load_advisories: Vec::new(),
            selections: SelectionList::new(),
            brand: Brand::Samsung,
            orientation: Orientation::Vertical,
            diversity,
        }
    }

    /// Attaches advisories produced while loading data, reported once by the caller.
    pub fn with_load_advisories(mut self, advisories: Vec<Advisory>) -> Self {
        self.load_advisories = advisories;
        self
    }

    pub fn load_advisories(&self) -> &[Advisory] {
        &self.load_advisories
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn factors(&self) -> &FactorTable {
        &self.factors
    }

    pub fn brand(&self) -> Brand {
        self.brand
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn diversity(&self) -> &DiversityToken {
        &self.diversity
    }

    pub fn selections(&self) -> &SelectionList {
        &self.selections
    }

    /// Adds evaporators for the active brand. Returns the line index.
    pub fn add_evaporator(&mut self, kind: EvaporatorKind, nominal: u32, quantity: u32) -> usize {
        self.selections
            .add(&self.catalog.evaporators, self.brand, kind, nominal, quantity)
    }

    pub fn set_quantity(&mut self, index: usize, value: f64) -> bool {
        self.selections.set_quantity(index, value)
    }

    pub fn remove_evaporator(&mut self, index: usize) -> Option<EvaporatorSelection> {
        self.selections.remove(index)
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// Switches the active brand and refreshes every line's real capacity.
    pub fn set_brand(&mut self, brand: Brand) {
        if brand != self.brand {
            self.brand = brand;
            self.selections
                .refresh_for_brand(&self.catalog.evaporators, brand);
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_diversity(&mut self, token: DiversityToken) {
        self.diversity = token;
    }

    /// Nominal ratings the active brand offers for `kind`.
    pub fn nominals(&self, kind: EvaporatorKind) -> Vec<(u32, f64)> {
        self.catalog.evaporators.nominals(self.brand, kind)
    }

    /// Current total demand for the active brand.
    pub fn total_demand(&self) -> f64 {
        self.selections.total_demand()
    }

    /// Recomputes the report from the current state.
    pub fn report(&self) -> Option<SizingReport> {
        compute_selection(
            self.selections.items(),
            &self.diversity,
            self.brand,
            self.orientation,
            &self.catalog,
            &self.factors,
        )
    }
}
