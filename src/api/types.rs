//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::catalog::{Brand, CondenserEntry, EvaporatorKind, Orientation};
use crate::diversity::{DiversityFactor, ProductFamily};
use crate::sizing::{Advisory, EvaporatorSelection, SizingReport};

/// One requested evaporator line.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaporatorInput {
    pub kind: EvaporatorKind,
    pub nominal: u32,
    /// Raw quantity; floored and clamped to at least 1.
    #[serde(default = "one")]
    pub quantity: f64,
}

fn one() -> f64 {
    1.0
}

/// `POST /selection` body.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionRequest {
    pub brand: Brand,
    pub orientation: Orientation,
    /// Diversity token: a category, a number, or `max`.
    pub diversity: String,
    #[serde(default)]
    pub evaporators: Vec<EvaporatorInput>,
}

/// `POST /selection` response.
///
/// `report` is `null` when the evaporator list is empty.
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    /// The list as interpreted: duplicates merged, capacities looked up.
    pub evaporators: Vec<EvaporatorSelection>,
    pub report: Option<SizingReport>,
    /// Data-load notices, repeated on every response.
    pub load_advisories: Vec<Advisory>,
}

/// Available nominal ratings for one evaporator kind.
#[derive(Debug, Serialize)]
pub struct NominalListing {
    pub kind: EvaporatorKind,
    /// `(nominal, real)` pairs, ascending.
    pub nominals: Vec<(u32, f64)>,
}

/// `GET /catalog/{brand}/{orientation}` response.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub brand: Brand,
    pub orientation: Orientation,
    pub unit: &'static str,
    /// Ascending by real capacity.
    pub condensers: Vec<CondenserEntry>,
    pub evaporators: Vec<NominalListing>,
}

/// One factor row with its normalized percentage.
#[derive(Debug, Serialize)]
pub struct FactorRecord {
    pub name: String,
    pub value: f64,
    pub percent: f64,
}

impl From<&DiversityFactor> for FactorRecord {
    fn from(f: &DiversityFactor) -> Self {
        Self {
            name: f.name.clone(),
            value: f.value,
            percent: f.percent(),
        }
    }
}

/// `GET /factors` response.
#[derive(Debug, Serialize)]
pub struct FactorsResponse {
    pub family: ProductFamily,
    pub default: Option<String>,
    pub factors: Vec<FactorRecord>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_record_carries_percent() {
        let f = DiversityFactor::new("Corporate", 1.10);
        let record = FactorRecord::from(&f);
        assert_eq!(record.value, 1.10);
        assert_eq!(record.percent, 110.0);
    }

    #[test]
    fn request_quantity_defaults_to_one() {
        let body = r#"{"brand":"samsung","orientation":"vertical","diversity":"corporate",
                       "evaporators":[{"kind":"hi-wall","nominal":9}]}"#;
        let req: SelectionRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.evaporators[0].quantity, 1.0);
        assert_eq!(req.evaporators[0].kind, EvaporatorKind::HiWall);
    }
}
