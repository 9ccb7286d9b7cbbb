//! Diversity (simultaneity) factor tables.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stored values at or below this are fractions (1.10), above it percents (110).
const FRACTION_LIMIT: f64 = 10.0;

/// Product family owning a factor table. Tables are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductFamily {
    MultiSplit,
    Vrf,
}

impl fmt::Display for ProductFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductFamily::MultiSplit => f.write_str("multi-split"),
            ProductFamily::Vrf => f.write_str("VRF"),
        }
    }
}

/// Canonical usage categories every factor table is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Corporate,
    Residential,
}

impl Category {
    /// Lower-case name prefixes that identify the category in a table.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Category::Corporate => &["corporate", "corporativo"],
            Category::Residential => &["residential", "residencial"],
        }
    }

    pub fn matches_exactly(self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.aliases().iter().any(|a| name == *a)
    }

    pub fn matches_prefix(self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.aliases().iter().any(|a| name.starts_with(a))
    }
}

/// Converts a stored factor value to a percentage.
///
/// Fractions are scaled and snapped to 1e-6 % so that 1.10 maps to exactly 110.
pub fn normalize_percent(value: f64) -> f64 {
    if value > FRACTION_LIMIT {
        value
    } else {
        (value * 100.0 * 1e6).round() / 1e6
    }
}

/// A named diversity factor row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiversityFactor {
    pub name: String,
    /// Stored value, either a fraction or a percentage.
    pub value: f64,
}

impl DiversityFactor {
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }

    /// Value expressed as a percentage (110.0 for 110 %).
    pub fn percent(&self) -> f64 {
        normalize_percent(self.value)
    }
}

/// A factor row rejected on load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactorError {
    #[error("{family} factor \"{name}\": value must be finite, got {value}")]
    NonFinite {
        family: ProductFamily,
        name: String,
        value: f64,
    },

    #[error("{family} factor \"{name}\": value must be > 0, got {value}")]
    NonPositive {
        family: ProductFamily,
        name: String,
        value: f64,
    },

    #[error("{family} factor: name is required")]
    MissingName { family: ProductFamily },

    #[error("{family} factor \"{name}\" is defined more than once")]
    DuplicateName { family: ProductFamily, name: String },
}

/// Factor table of one product family, ordered by value then name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorTable {
    family: ProductFamily,
    factors: Vec<DiversityFactor>,
}

impl FactorTable {
    /// Builds a validated, ordered table.
    ///
    /// # Errors
    ///
    /// Returns a `FactorError` for blank or duplicate names, non-finite
    /// values, and non-positive values in the VRF family.
    pub fn new(family: ProductFamily, mut factors: Vec<DiversityFactor>) -> Result<Self, FactorError> {
        let mut seen = HashSet::new();
        for f in &factors {
            let key = f.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(FactorError::MissingName { family });
            }
            if !f.value.is_finite() {
                return Err(FactorError::NonFinite {
                    family,
                    name: f.name.clone(),
                    value: f.value,
                });
            }
            if family == ProductFamily::Vrf && f.value <= 0.0 {
                return Err(FactorError::NonPositive {
                    family,
                    name: f.name.clone(),
                    value: f.value,
                });
            }
            if !seen.insert(key) {
                return Err(FactorError::DuplicateName {
                    family,
                    name: f.name.clone(),
                });
            }
        }

        factors.sort_by(|a, b| {
            a.percent()
                .total_cmp(&b.percent())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(Self { family, factors })
    }

    /// Built-in table used when no factor source is reachable.
    pub fn builtin(family: ProductFamily) -> Self {
        let factors = match family {
            ProductFamily::MultiSplit => vec![
                DiversityFactor::new("Corporate", 1.10),
                DiversityFactor::new("Residential", 1.40),
            ],
            ProductFamily::Vrf => vec![
                DiversityFactor::new("Corporate", 110.0),
                DiversityFactor::new("Residential", 145.0),
            ],
        };
        Self { family, factors }
    }

    pub fn family(&self) -> ProductFamily {
        self.family
    }

    pub fn factors(&self) -> &[DiversityFactor] {
        &self.factors
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Finds a factor by case-insensitive name.
    pub fn by_name(&self, name: &str) -> Option<&DiversityFactor> {
        let name = name.trim().to_lowercase();
        self.factors.iter().find(|f| f.name.trim().to_lowercase() == name)
    }

    /// Finds the factor for a category: an exact alias match, otherwise the
    /// highest-valued entry whose name starts with an alias.
    pub fn by_category(&self, category: Category) -> Option<&DiversityFactor> {
        self.factors
            .iter()
            .find(|f| category.matches_exactly(&f.name))
            .or_else(|| {
                self.factors
                    .iter()
                    .filter(|f| category.matches_prefix(&f.name))
                    .max_by(|a, b| a.percent().total_cmp(&b.percent()))
            })
    }

    /// The family's default selection.
    ///
    /// VRF defaults to the highest-valued corporate entry, multi-split to the
    /// residential entry; either falls back to the first entry.
    pub fn default_factor(&self) -> Option<&DiversityFactor> {
        let preferred = match self.family {
            ProductFamily::Vrf => self
                .factors
                .iter()
                .filter(|f| Category::Corporate.matches_prefix(&f.name))
                .max_by(|a, b| a.percent().total_cmp(&b.percent())),
            ProductFamily::MultiSplit => self
                .factors
                .iter()
                .find(|f| Category::Residential.matches_exactly(&f.name)),
        };
        preferred.or_else(|| self.factors.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_fractions_and_percents() {
        assert_eq!(normalize_percent(1.1), 110.0);
        assert_eq!(normalize_percent(1.45), 145.0);
        assert_eq!(normalize_percent(145.0), 145.0);
        assert_eq!(normalize_percent(10.0), 1000.0);
    }

    #[test]
    fn table_is_sorted_by_value_then_name() {
        let t = FactorTable::new(
            ProductFamily::Vrf,
            vec![
                DiversityFactor::new("Residencial", 145.0),
                DiversityFactor::new("Corporativo B", 110.0),
                DiversityFactor::new("Corporativo A", 110.0),
            ],
        );
        let names: Vec<String> = t
            .map(|t| t.factors().iter().map(|f| f.name.clone()).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["Corporativo A", "Corporativo B", "Residencial"]);
    }

    #[test]
    fn vrf_default_is_highest_corporate() {
        let t = FactorTable::new(
            ProductFamily::Vrf,
            vec![
                DiversityFactor::new("Residential", 145.0),
                DiversityFactor::new("Corporate (low)", 100.0),
                DiversityFactor::new("Corporate (high)", 120.0),
            ],
        )
        .unwrap_or_else(|_| FactorTable::builtin(ProductFamily::Vrf));
        assert_eq!(t.default_factor().map(|f| f.value), Some(120.0));
    }

    #[test]
    fn multi_split_default_is_residential() {
        let t = FactorTable::builtin(ProductFamily::MultiSplit);
        assert_eq!(t.default_factor().map(|f| f.name.as_str()), Some("Residential"));
    }

    #[test]
    fn default_falls_back_to_first_entry() {
        let t = FactorTable::new(
            ProductFamily::Vrf,
            vec![
                DiversityFactor::new("Hospital", 125.0),
                DiversityFactor::new("Hotel", 115.0),
            ],
        )
        .unwrap_or_else(|_| FactorTable::builtin(ProductFamily::Vrf));
        assert_eq!(t.default_factor().map(|f| f.name.as_str()), Some("Hotel"));
    }

    #[test]
    fn category_lookup_accepts_portuguese_names() {
        let t = FactorTable::new(
            ProductFamily::Vrf,
            vec![
                DiversityFactor::new("Corporativo", 110.0),
                DiversityFactor::new("Residencial", 145.0),
            ],
        )
        .unwrap_or_else(|_| FactorTable::builtin(ProductFamily::Vrf));
        assert_eq!(t.by_category(Category::Residential).map(|f| f.value), Some(145.0));
        assert_eq!(t.by_category(Category::Corporate).map(|f| f.value), Some(110.0));
    }

    #[test]
    fn vrf_rejects_non_positive_values() {
        let err = FactorTable::new(ProductFamily::Vrf, vec![DiversityFactor::new("Zero", 0.0)]);
        assert!(matches!(err, Err(FactorError::NonPositive { .. })));

        let ok = FactorTable::new(
            ProductFamily::MultiSplit,
            vec![DiversityFactor::new("Zero", 0.0)],
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn rejects_duplicate_names_case_insensitively() {
        let err = FactorTable::new(
            ProductFamily::Vrf,
            vec![
                DiversityFactor::new("Corporate", 110.0),
                DiversityFactor::new("corporate ", 120.0),
            ],
        );
        assert!(matches!(err, Err(FactorError::DuplicateName { .. })));
    }

    #[test]
    fn builtin_defaults() {
        let vrf = FactorTable::builtin(ProductFamily::Vrf);
        assert_eq!(vrf.default_factor().map(DiversityFactor::percent), Some(110.0));
        let multi = FactorTable::builtin(ProductFamily::MultiSplit);
        let corp = multi.by_category(Category::Corporate).map(DiversityFactor::percent);
        assert!(corp.is_some_and(|p| (p - 110.0).abs() < 1e-9));

        let vrf_res = vrf.by_category(Category::Residential).map(DiversityFactor::percent);
        assert_eq!(vrf_res, Some(145.0));
        let multi_res = multi.by_category(Category::Residential).map(DiversityFactor::percent);
        assert!(multi_res.is_some_and(|p| (p - 140.0).abs() < 1e-9));
    }
}
