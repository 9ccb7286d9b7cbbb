//! Built-in reference catalog, used when no catalog source is available.

use super::condenser::CondenserTable;
use super::evaporator::EvaporatorTable;
use super::types::{Brand, CondenserEntry, EvaporatorKind, Orientation};
use super::Catalog;

/// Samsung indoor units, real capacity in BTU/h.
const SAMSUNG_EVAPORATORS: &[(EvaporatorKind, &[(u32, f64)])] = &[
    (
        EvaporatorKind::HiWall,
        &[(7, 7034.0), (9, 9212.0), (12, 12283.0), (18, 19107.0), (24, 24225.0)],
    ),
    (
        EvaporatorKind::Cassette1Way,
        &[(7, 7507.0), (9, 9554.0), (12, 12283.0), (18, 18425.0)],
    ),
    (
        EvaporatorKind::Cassette4Way,
        &[
            (9, 9554.0),
            (12, 12283.0),
            (18, 19107.0),
            (24, 24566.0),
            (36, 38215.0),
            (48, 47769.0),
        ],
    ),
    (
        EvaporatorKind::Ducted,
        &[
            (7, 7507.0),
            (9, 9554.0),
            (12, 12283.0),
            (18, 19107.0),
            (24, 24225.0),
            (36, 38215.0),
            (48, 47769.0),
        ],
    ),
    (
        EvaporatorKind::FloorCeiling,
        &[(18, 19107.0), (24, 24225.0), (36, 38215.0), (48, 47769.0)],
    ),
];

/// Daikin indoor units, real capacity as capacity index.
const DAIKIN_EVAPORATORS: &[(EvaporatorKind, &[(u32, f64)])] = &[
    (
        EvaporatorKind::HiWall,
        &[(7, 20.0), (9, 25.0), (12, 32.0), (18, 50.0), (24, 63.0)],
    ),
    (
        EvaporatorKind::Cassette1Way,
        &[(7, 20.0), (9, 25.0), (12, 32.0), (18, 50.0)],
    ),
    (
        EvaporatorKind::Cassette4Way,
        &[(9, 25.0), (12, 32.0), (18, 50.0), (24, 63.0), (36, 100.0), (48, 125.0)],
    ),
    (
        EvaporatorKind::Ducted,
        &[
            (7, 20.0),
            (9, 25.0),
            (12, 32.0),
            (18, 50.0),
            (24, 63.0),
            (36, 100.0),
            (48, 125.0),
        ],
    ),
    (
        EvaporatorKind::FloorCeiling,
        &[(12, 32.0), (24, 63.0), (36, 100.0)],
    ),
];

/// `(brand, orientation, hp, real, voltage, model)`
type CondenserRow = (Brand, Orientation, u32, f64, Option<&'static str>, &'static str);

const CONDENSERS: &[CondenserRow] = &[
    (Brand::Samsung, Orientation::Horizontal, 4, 38200.0, Some("220"), "AM040BXMDGH"),
    (Brand::Samsung, Orientation::Horizontal, 5, 47800.0, Some("220"), "AM050BXMDGH"),
    (Brand::Samsung, Orientation::Horizontal, 6, 54600.0, Some("220"), "AM060BXMDGH"),
    (Brand::Samsung, Orientation::Horizontal, 6, 54600.0, Some("380"), "AM060BXMDGR"),
    (Brand::Samsung, Orientation::Horizontal, 8, 76400.0, Some("380"), "AM080BXMDGR"),
    (Brand::Samsung, Orientation::Horizontal, 10, 95500.0, Some("380"), "AM100BXMDGR"),
    (Brand::Samsung, Orientation::Vertical, 8, 76400.0, Some("380"), "AM080BXVGGR"),
    (Brand::Samsung, Orientation::Vertical, 10, 95500.0, Some("380"), "AM100BXVGGR"),
    (Brand::Samsung, Orientation::Vertical, 12, 114600.0, Some("380"), "AM120BXVGGR"),
    (Brand::Samsung, Orientation::Vertical, 14, 133700.0, Some("380"), "AM140BXVGGR"),
    (Brand::Samsung, Orientation::Vertical, 16, 152800.0, Some("380"), "AM160BXVGGR"),
    (Brand::Samsung, Orientation::Vertical, 18, 171900.0, Some("380"), "AM180BXVGGR"),
    (Brand::Samsung, Orientation::Vertical, 20, 191100.0, Some("380"), "AM200BXVGGR"),
    (Brand::Samsung, Orientation::Vertical, 22, 210200.0, Some("380"), "AM220BXVGGR"),
    (Brand::Samsung, Orientation::Vertical, 24, 229300.0, Some("380"), "AM240BXVGGR"),
    (Brand::Samsung, Orientation::Vertical, 26, 248400.0, Some("380"), "AM260BXVGGR"),
    (Brand::Daikin, Orientation::Horizontal, 4, 112.0, Some("220"), "RXYSQ4TVJU"),
    (Brand::Daikin, Orientation::Horizontal, 5, 140.0, Some("220"), "RXYSQ5TVJU"),
    (Brand::Daikin, Orientation::Horizontal, 6, 160.0, Some("220"), "RXYSQ6TVJU"),
    (Brand::Daikin, Orientation::Vertical, 6, 150.0, Some("380"), "RXYQ6TATL"),
    (Brand::Daikin, Orientation::Vertical, 8, 200.0, Some("380"), "RXYQ8TATL"),
    (Brand::Daikin, Orientation::Vertical, 10, 250.0, Some("380"), "RXYQ10TATL"),
    (Brand::Daikin, Orientation::Vertical, 12, 300.0, Some("380"), "RXYQ12TATL"),
    (Brand::Daikin, Orientation::Vertical, 14, 350.0, Some("380"), "RXYQ14TATL"),
    (Brand::Daikin, Orientation::Vertical, 16, 400.0, Some("380"), "RXYQ16TATL"),
    (Brand::Daikin, Orientation::Vertical, 18, 450.0, Some("380"), "RXYQ18TATL"),
    (Brand::Daikin, Orientation::Vertical, 20, 500.0, Some("380"), "RXYQ20TATL"),
];

/// Returns the built-in catalog.
pub fn builtin_catalog() -> Catalog {
    let evaporators = EvaporatorTable::new()
        .with_brand(Brand::Samsung, SAMSUNG_EVAPORATORS)
        .with_brand(Brand::Daikin, DAIKIN_EVAPORATORS);

    let condensers = CondenserTable::from_entries(CONDENSERS.iter().map(
        |&(brand, orientation, hp, real, voltage, model)| {
            CondenserEntry::new(brand, orientation, hp, real, voltage, model)
        },
    ));

    Catalog {
        evaporators,
        condensers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog();
        let errors = catalog.validate();
        assert!(errors.is_empty(), "built-in catalog should validate: {errors:?}");
    }

    #[test]
    fn every_brand_orientation_has_units() {
        let catalog = builtin_catalog();
        for brand in Brand::ALL {
            for orientation in Orientation::ALL {
                assert!(
                    !catalog.condensers.entries(brand, orientation).is_empty(),
                    "{brand}/{orientation} should have condensers"
                );
            }
        }
    }

    #[test]
    fn every_brand_has_every_kind() {
        let catalog = builtin_catalog();
        for brand in Brand::ALL {
            for kind in EvaporatorKind::ALL {
                assert!(!catalog.evaporators.nominals(brand, kind).is_empty());
            }
        }
    }
}
