//! Strongly typed catalog keys and condenser rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Condensing-unit manufacturer.
///
/// Each brand carries its own capacity unit: Samsung rates real capacity in
/// BTU/h, Daikin in its relative capacity index. Figures from different
/// brands are never compared with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Samsung,
    Daikin,
}

impl Brand {
    /// All brands, in report order.
    pub const ALL: [Brand; 2] = [Brand::Samsung, Brand::Daikin];

    /// Highest diversity percentage the brand accepts, if capped.
    pub fn factor_ceiling_pct(self) -> Option<f64> {
        match self {
            Brand::Samsung => None,
            Brand::Daikin => Some(130.0),
        }
    }

    /// Display label for the brand's real-capacity unit.
    pub fn capacity_unit(self) -> &'static str {
        match self {
            Brand::Samsung => "BTU/h",
            Brand::Daikin => "Daikin units",
        }
    }

    /// Real capacity substituted for an uncataloged evaporator, in the
    /// brand's unit. Both figures correspond to a 2.2 kW indoor unit.
    pub fn fallback_real_capacity(self) -> f64 {
        match self {
            Brand::Samsung => 7507.0,
            Brand::Daikin => 22.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Brand::Samsung => "Samsung",
            Brand::Daikin => "Daikin",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Brand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "samsung" => Ok(Brand::Samsung),
            "daikin" => Ok(Brand::Daikin),
            other => Err(format!(
                "unknown brand \"{other}\", expected \"samsung\" or \"daikin\""
            )),
        }
    }
}

/// Installation posture of a condensing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Vertical, Orientation::Horizontal];

    pub fn label(self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            other => Err(format!(
                "unknown orientation \"{other}\", expected \"vertical\" or \"horizontal\""
            )),
        }
    }
}

/// Indoor (evaporator) unit form factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaporatorKind {
    HiWall,
    #[serde(rename = "cassette-1-way")]
    Cassette1Way,
    #[serde(rename = "cassette-4-way")]
    Cassette4Way,
    Ducted,
    FloorCeiling,
}

impl EvaporatorKind {
    pub const ALL: [EvaporatorKind; 5] = [
        EvaporatorKind::HiWall,
        EvaporatorKind::Cassette1Way,
        EvaporatorKind::Cassette4Way,
        EvaporatorKind::Ducted,
        EvaporatorKind::FloorCeiling,
    ];

    /// Stable identifier, matching the serialized form.
    pub fn slug(self) -> &'static str {
        match self {
            EvaporatorKind::HiWall => "hi-wall",
            EvaporatorKind::Cassette1Way => "cassette-1-way",
            EvaporatorKind::Cassette4Way => "cassette-4-way",
            EvaporatorKind::Ducted => "ducted",
            EvaporatorKind::FloorCeiling => "floor-ceiling",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EvaporatorKind::HiWall => "Hi Wall",
            EvaporatorKind::Cassette1Way => "Cassette 1 Way",
            EvaporatorKind::Cassette4Way => "Cassette 4 Way",
            EvaporatorKind::Ducted => "Ducted",
            EvaporatorKind::FloorCeiling => "Floor Ceiling",
        }
    }
}

impl fmt::Display for EvaporatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EvaporatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        EvaporatorKind::ALL
            .into_iter()
            .find(|k| k.slug() == needle)
            .ok_or_else(|| {
                let known: Vec<&str> = EvaporatorKind::ALL.iter().map(|k| k.slug()).collect();
                format!(
                    "unknown evaporator kind \"{needle}\", expected one of: {}",
                    known.join(", ")
                )
            })
    }
}

/// One condensing unit from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondenserEntry {
    pub brand: Brand,
    pub orientation: Orientation,
    /// Nominal rating (HP for both brands).
    pub capacity_rating: u32,
    /// Deliverable capacity in the brand's unit (see [`Brand::capacity_unit`]).
    pub real_capacity: f64,
    #[serde(default)]
    pub voltage: Option<String>,
    pub model: String,
}

impl CondenserEntry {
    pub fn new(
        brand: Brand,
        orientation: Orientation,
        capacity_rating: u32,
        real_capacity: f64,
        voltage: Option<&str>,
        model: &str,
    ) -> Self {
        Self {
            brand,
            orientation,
            capacity_rating,
            real_capacity,
            voltage: voltage.map(str::to_string),
            model: model.to_string(),
        }
    }
}

impl fmt::Display for CondenserEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}HP", self.model, self.capacity_rating)?;
        if let Some(v) = &self.voltage {
            write!(f, " ({v}V)")?;
        }
        write!(
            f,
            " - {} {}",
            self.real_capacity,
            self.brand.capacity_unit()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daikin_is_capped_at_130() {
        assert_eq!(Brand::Daikin.factor_ceiling_pct(), Some(130.0));
        assert_eq!(Brand::Samsung.factor_ceiling_pct(), None);
    }

    #[test]
    fn parses_case_insensitive_names() {
        assert_eq!("Samsung".parse::<Brand>(), Ok(Brand::Samsung));
        assert_eq!(" HORIZONTAL ".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert_eq!(
            "Cassette-4-Way".parse::<EvaporatorKind>(),
            Ok(EvaporatorKind::Cassette4Way)
        );
        assert!("lg".parse::<Brand>().is_err());
        assert!("wall".parse::<EvaporatorKind>().is_err());
    }

    #[test]
    fn kind_serializes_as_slug() {
        #[derive(Serialize, Deserialize)]
        struct Wrap {
            kind: EvaporatorKind,
        }
        for kind in EvaporatorKind::ALL {
            let s = toml::to_string(&Wrap { kind }).unwrap_or_default();
            assert_eq!(s.trim(), format!("kind = \"{}\"", kind.slug()));
            let back: Result<Wrap, _> = toml::from_str(&s);
            assert_eq!(back.ok().map(|w| w.kind), Some(kind));
        }
    }

    #[test]
    fn entry_display_includes_voltage() {
        let e = CondenserEntry::new(
            Brand::Samsung,
            Orientation::Vertical,
            8,
            76400.0,
            Some("380"),
            "AM080BXVGGH",
        );
        let s = e.to_string();
        assert!(s.contains("AM080BXVGGH 8HP (380V)"));
        assert!(s.contains("BTU/h"));
    }
}
