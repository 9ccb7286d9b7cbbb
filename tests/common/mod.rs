//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::Rng;
use rand::rngs::StdRng;

use vrf_sizer::catalog::{Brand, Catalog, EvaporatorKind, Orientation, builtin_catalog};
use vrf_sizer::diversity::{FactorTable, ProductFamily};
use vrf_sizer::sizing::{EvaporatorSelection, SelectionList};

/// Built-in catalog.
pub fn catalog() -> Catalog {
    builtin_catalog()
}

/// Built-in VRF factor table (Corporate 110 %, Residential 145 %).
pub fn vrf_factors() -> FactorTable {
    FactorTable::builtin(ProductFamily::Vrf)
}

/// Two Samsung hi-wall 7 units (7034 BTU/h each, 14068 total).
pub fn two_hi_wall_7() -> Vec<EvaporatorSelection> {
    let catalog = catalog();
    let mut list = SelectionList::new();
    list.add(&catalog.evaporators, Brand::Samsung, EvaporatorKind::HiWall, 7, 2);
    list.items().to_vec()
}

/// Ten Samsung ducted 48 units, beyond every cataloged condenser.
pub fn oversized() -> Vec<EvaporatorSelection> {
    let catalog = catalog();
    let mut list = SelectionList::new();
    list.add(&catalog.evaporators, Brand::Samsung, EvaporatorKind::Ducted, 48, 10);
    list.items().to_vec()
}

/// Random cataloged selection list for `brand`, 1 to 6 lines.
pub fn random_selections(rng: &mut StdRng, catalog: &Catalog, brand: Brand) -> SelectionList {
    let mut list = SelectionList::new();
    let lines = rng.random_range(1..=6);
    for _ in 0..lines {
        let kind = EvaporatorKind::ALL[rng.random_range(0..EvaporatorKind::ALL.len())];
        let nominals = catalog.evaporators.nominals(brand, kind);
        let (nominal, _) = nominals[rng.random_range(0..nominals.len())];
        let quantity = rng.random_range(1..=8);
        list.add(&catalog.evaporators, brand, kind, nominal, quantity);
    }
    list
}

/// Random brand and orientation.
pub fn random_target(rng: &mut StdRng) -> (Brand, Orientation) {
    (
        Brand::ALL[rng.random_range(0..Brand::ALL.len())],
        Orientation::ALL[rng.random_range(0..Orientation::ALL.len())],
    )
}
