//! Maps a user's diversity selection to the factor each brand computes with.

use std::fmt;

use serde::Serialize;

use super::factor::{Category, FactorTable, normalize_percent};
use crate::catalog::Brand;

/// Percentage applied in maximum-capacity mode (no diversity discount).
pub const UNDISCOUNTED_PCT: f64 = 100.0;

/// A diversity selection as entered by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum DiversityToken {
    /// A named usage category.
    Category(Category),
    /// A literal factor, already normalized to a percentage.
    Numeric(f64),
    /// Size for the largest available unit instead of a discounted minimum.
    MaximumCapacity,
    /// Any other text; matched against table entry names, else the family default.
    Named(String),
}

impl DiversityToken {
    /// Parses free-form input.
    ///
    /// Accepts category names in English or Portuguese, `max`/`maximo`/
    /// `maximum capacity`, and numbers such as `1.1`, `110` or `110%`.
    /// Non-finite and non-positive numbers are unrecognized.
    pub fn parse(input: &str) -> Self {
        let raw = input.trim();
        let lower = raw.to_lowercase();
        match lower.as_str() {
            "max" | "maximum" | "maximum capacity" | "maximo" | "máximo" => {
                return DiversityToken::MaximumCapacity;
            }
            _ => {}
        }
        for category in [Category::Corporate, Category::Residential] {
            if category.matches_exactly(&lower) {
                return DiversityToken::Category(category);
            }
        }

        let (number, is_percent) = match lower.strip_suffix('%') {
            Some(n) => (n.trim(), true),
            None => (lower.as_str(), false),
        };
        match number.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => {
                DiversityToken::Numeric(if is_percent { v } else { normalize_percent(v) })
            }
            _ => DiversityToken::Named(raw.to_string()),
        }
    }
}

impl fmt::Display for DiversityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiversityToken::Category(Category::Corporate) => f.write_str("corporate"),
            DiversityToken::Category(Category::Residential) => f.write_str("residential"),
            DiversityToken::Numeric(v) => write!(f, "{v}%"),
            DiversityToken::MaximumCapacity => f.write_str("maximum capacity"),
            DiversityToken::Named(s) => f.write_str(s),
        }
    }
}

/// Where a resolved factor came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FactorSource {
    /// A named entry of the factor table.
    Table { name: String },
    /// A literal number typed by the user.
    Literal,
    /// The family default, used because the token did not resolve.
    FamilyDefault { name: String, requested: String },
    /// Largest-unit mode.
    MaximumCapacity,
}

/// A diversity selection resolved to a percentage, before brand rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFactor {
    pub percent: f64,
    pub source: FactorSource,
}

impl ResolvedFactor {
    pub fn is_maximum_capacity(&self) -> bool {
        matches!(self.source, FactorSource::MaximumCapacity)
    }

    /// Selected percentage rounded for tier comparisons.
    pub fn rounded_percent(&self) -> i64 {
        self.percent.round() as i64
    }

    /// Applies the brand's ceiling, if any.
    ///
    /// The selected percentage is kept for display; only `applied_pct`
    /// changes.
    pub fn for_brand(&self, brand: Brand) -> EffectiveFactor {
        let selected_pct = self.percent;
        let (applied_pct, capped) = match brand.factor_ceiling_pct() {
            Some(ceiling) if selected_pct > ceiling && !self.is_maximum_capacity() => {
                tracing::warn!(
                    %brand,
                    selected_pct,
                    ceiling,
                    "diversity factor above brand ceiling, capping"
                );
                (ceiling, true)
            }
            _ => (selected_pct, false),
        };
        EffectiveFactor {
            selected_pct,
            applied_pct,
            capped,
            maximum_capacity: self.is_maximum_capacity(),
        }
    }
}

/// The factor one brand's computation actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveFactor {
    /// Percentage the user selected.
    pub selected_pct: f64,
    /// Percentage used for this brand after its ceiling.
    pub applied_pct: f64,
    pub capped: bool,
    /// Largest-unit mode: the minimum-capacity search is bypassed.
    pub maximum_capacity: bool,
}

impl EffectiveFactor {
    /// A plain percentage with no brand rule applied.
    pub fn percent(pct: f64) -> Self {
        Self {
            selected_pct: pct,
            applied_pct: pct,
            capped: false,
            maximum_capacity: false,
        }
    }

    /// Multiplier form of the applied percentage (1.10 for 110 %).
    pub fn multiplier(&self) -> f64 {
        self.applied_pct / 100.0
    }
}

/// Resolves a token against a factor table.
///
/// Categories and names missing from the table fall back to its default;
/// an empty table falls back to the built-in table of the same family.
pub fn resolve(token: &DiversityToken, table: &FactorTable) -> ResolvedFactor {
    let builtin;
    let table = if table.is_empty() {
        builtin = FactorTable::builtin(table.family());
        &builtin
    } else {
        table
    };

    let hit = match token {
        DiversityToken::MaximumCapacity => {
            return ResolvedFactor {
                percent: UNDISCOUNTED_PCT,
                source: FactorSource::MaximumCapacity,
            };
        }
        DiversityToken::Numeric(pct) => {
            return ResolvedFactor {
                percent: *pct,
                source: FactorSource::Literal,
            };
        }
        DiversityToken::Category(category) => table.by_category(*category),
        DiversityToken::Named(name) => table.by_name(name),
    };

    if let Some(f) = hit {
        return ResolvedFactor {
            percent: f.percent(),
            source: FactorSource::Table {
                name: f.name.clone(),
            },
        };
    }

    match table.default_factor() {
        Some(f) => {
            tracing::warn!(
                requested = %token,
                default = %f.name,
                "diversity selection not found, using family default"
            );
            ResolvedFactor {
                percent: f.percent(),
                source: FactorSource::FamilyDefault {
                    name: f.name.clone(),
                    requested: token.to_string(),
                },
            }
        }
        // Built-in tables are never empty.
        None => ResolvedFactor {
            percent: UNDISCOUNTED_PCT,
            source: FactorSource::FamilyDefault {
                name: String::new(),
                requested: token.to_string(),
            },
        },
    }
}
