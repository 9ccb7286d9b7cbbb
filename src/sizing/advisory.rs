//! Non-fatal notices attached to a sizing report.

use std::fmt;

use serde::Serialize;

use crate::catalog::{Brand, EvaporatorKind, Orientation};

/// Diversity tier (percent) only valid for horizontal units.
pub const HORIZONTAL_ONLY_PCT: i64 = 145;

/// Which external data set a `DataUnavailable` notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSet {
    Catalog,
    Factors,
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSet::Catalog => f.write_str("catalog"),
            DataSet::Factors => f.write_str("diversity factors"),
        }
    }
}

/// A business-rule warning or data degradation. Never blocks computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// A provider failed and built-in defaults are in use.
    DataUnavailable { data: DataSet, reason: String },
    /// The selected diversity tier is not valid for the orientation.
    InvalidCombination { orientation: Orientation, percent: i64 },
    /// The brand's ceiling replaced the selected factor.
    FactorCapped {
        brand: Brand,
        selected_pct: f64,
        applied_pct: f64,
    },
    /// An evaporator's real capacity is the fallback constant.
    ApproximatedCapacity {
        brand: Brand,
        evaporator: EvaporatorKind,
        nominal: u32,
        substituted: f64,
    },
    /// Required capacity exceeds the largest unit.
    NoMatchFound {
        brand: Brand,
        orientation: Orientation,
        required: f64,
        largest: f64,
    },
    /// The brand has no units in this orientation.
    EmptyCatalog { brand: Brand, orientation: Orientation },
    /// The diversity input was not understood; the family default was used.
    UnrecognizedDiversity {
        requested: String,
        used: String,
        percent: f64,
    },
}

impl Advisory {
    /// Checks the orientation/tier rule on a rounded selected percentage.
    pub fn check_combination(orientation: Orientation, rounded_pct: i64) -> Option<Self> {
        (orientation == Orientation::Vertical && rounded_pct == HORIZONTAL_ONLY_PCT).then_some(
            Advisory::InvalidCombination {
                orientation,
                percent: rounded_pct,
            },
        )
    }

    /// Brand the notice is about, if it is brand-specific.
    pub fn brand(&self) -> Option<Brand> {
        match self {
            Advisory::FactorCapped { brand, .. }
            | Advisory::ApproximatedCapacity { brand, .. }
            | Advisory::NoMatchFound { brand, .. }
            | Advisory::EmptyCatalog { brand, .. } => Some(*brand),
            _ => None,
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::DataUnavailable { data, reason } => {
                write!(f, "{data} unavailable ({reason}); using built-in defaults")
            }
            Advisory::InvalidCombination {
                orientation,
                percent,
            } => write!(
                f,
                "invalid combination: {percent}% diversity is only valid for horizontal units, \
                 not {orientation}"
            ),
            Advisory::FactorCapped {
                brand,
                selected_pct,
                applied_pct,
            } => write!(
                f,
                "{brand}: diversity {selected_pct}% exceeds the brand limit, computed with {applied_pct}%"
            ),
            Advisory::ApproximatedCapacity {
                brand,
                evaporator,
                nominal,
                substituted,
            } => write!(
                f,
                "{brand}: {evaporator} {nominal} is not cataloged, approximated as {substituted}"
            ),
            Advisory::NoMatchFound {
                brand,
                orientation,
                required,
                largest,
            } => write!(
                f,
                "{brand}: no suitable {orientation} unit, required {required:.1} exceeds largest {largest}"
            ),
            Advisory::EmptyCatalog { brand, orientation } => {
                write!(f, "{brand}: no {orientation} units cataloged")
            }
            Advisory::UnrecognizedDiversity {
                requested,
                used,
                percent,
            } => write!(
                f,
                "diversity \"{requested}\" not found, using \"{used}\" ({percent}%)"
            ),
        }
    }
}
