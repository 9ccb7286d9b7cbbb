//! Sizing report and its text rendering.

use std::fmt;

use serde::Serialize;

use super::advisory::Advisory;
use super::engine::{BrandSelection, CondenserMatch};
use crate::catalog::{Brand, Orientation};
use crate::diversity::{FactorSource, ResolvedFactor};

/// Output of one computation: a selection per brand plus advisories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingReport {
    /// Brand whose evaporator capacities the selection list holds.
    pub active_brand: Brand,
    pub orientation: Orientation,
    /// Diversity selection after resolution, before any brand ceiling.
    pub diversity: ResolvedFactor,
    /// One entry per brand, in [`Brand::ALL`] order.
    pub brands: Vec<BrandSelection>,
    pub advisories: Vec<Advisory>,
}

impl SizingReport {
    pub fn for_brand(&self, brand: Brand) -> Option<&BrandSelection> {
        self.brands.iter().find(|b| b.brand == brand)
    }

    /// Selection for the active brand.
    pub fn active(&self) -> Option<&BrandSelection> {
        self.for_brand(self.active_brand)
    }

    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }
}

fn diversity_label(factor: &ResolvedFactor) -> String {
    match &factor.source {
        FactorSource::Table { name } => format!("{name} ({}%)", factor.percent),
        FactorSource::Literal => format!("{}%", factor.percent),
        FactorSource::FamilyDefault { name, .. } => {
            format!("{name} ({}%, default)", factor.percent)
        }
        FactorSource::MaximumCapacity => "maximum capacity".to_string(),
    }
}

fn write_match(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    m: Option<&CondenserMatch>,
) -> fmt::Result {
    match m {
        Some(m) => writeln!(f, "  {label:<10} {}", m.entry),
        None => writeln!(f, "  {label:<10} -"),
    }
}

impl fmt::Display for BrandSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.brand.capacity_unit();
        writeln!(
            f,
            "[{}] demand {:.1} {unit} x {}% -> required {:.1} {unit}",
            self.brand, self.total_demand, self.factor.applied_pct, self.required_minimum_capacity
        )?;
        if self.empty_catalog() {
            return writeln!(f, "  no {} units cataloged", self.orientation);
        }
        match &self.ideal_match {
            Some(m) => {
                write!(f, "  {:<10} {}", "Ideal:", m.entry)?;
                match self.headroom() {
                    Some(h) => writeln!(f, " (headroom {:.1}%)", (h - 1.0) * 100.0)?,
                    None => writeln!(f)?,
                }
            }
            None => writeln!(f, "  {:<10} no suitable unit", "Ideal:")?,
        }
        write_match(f, "One below:", self.one_below.as_ref())?;
        write_match(f, "One above:", self.one_above.as_ref())
    }
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sizing Report ---")?;
        writeln!(f, "Diversity:     {}", diversity_label(&self.diversity))?;
        writeln!(f, "Orientation:   {}", self.orientation)?;
        writeln!(f, "Active brand:  {}", self.active_brand)?;
        for selection in &self.brands {
            writeln!(f)?;
            write!(f, "{selection}")?;
        }
        if self.has_advisories() {
            writeln!(f)?;
            writeln!(f, "Advisories:")?;
            for a in &self.advisories {
                writeln!(f, "  - {a}")?;
            }
        }
        Ok(())
    }
}
