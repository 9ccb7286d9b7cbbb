//! End-to-end sizing scenarios over the built-in catalog.

mod common;

use vrf_sizer::catalog::{Brand, EvaporatorKind, Orientation};
use vrf_sizer::diversity::DiversityToken;
use vrf_sizer::sizing::{Advisory, compute_selection};

#[test]
fn corporate_hi_wall_pair_scenario() {
    let catalog = common::catalog();
    let report = compute_selection(
        &common::two_hi_wall_7(),
        &DiversityToken::parse("corporate"),
        Brand::Samsung,
        Orientation::Horizontal,
        &catalog,
        &common::vrf_factors(),
    )
    .expect("non-empty selection should produce a report");

    let samsung = report.for_brand(Brand::Samsung).expect("samsung result");
    assert_eq!(samsung.total_demand, 14068.0);
    assert!((samsung.required_minimum_capacity - 15474.8).abs() < 1e-6);

    // First horizontal unit with real capacity >= 15474.8
    let expected = catalog
        .condensers
        .entries(Brand::Samsung, Orientation::Horizontal)
        .iter()
        .find(|e| e.real_capacity >= samsung.required_minimum_capacity)
        .map(|e| e.model.clone());
    let ideal = samsung.ideal_match.as_ref().map(|m| m.entry.model.clone());
    assert_eq!(ideal, expected);
    assert!(samsung.one_below.is_none(), "ideal is the smallest unit");
    assert!(samsung.one_above.is_some());
    assert_eq!(samsung.ideal_match.as_ref().map(|m| m.diversity_pct), Some(110.0));
    assert!(report.advisories.is_empty(), "{:?}", report.advisories);
}

#[test]
fn empty_selection_is_no_result() {
    let report = compute_selection(
        &[],
        &DiversityToken::parse("residential"),
        Brand::Daikin,
        Orientation::Vertical,
        &common::catalog(),
        &common::vrf_factors(),
    );
    assert!(report.is_none());
}

#[test]
fn demand_beyond_largest_unit() {
    let catalog = common::catalog();
    let report = compute_selection(
        &common::oversized(),
        &DiversityToken::parse("corporate"),
        Brand::Samsung,
        Orientation::Vertical,
        &catalog,
        &common::vrf_factors(),
    )
    .expect("report");

    for brand in Brand::ALL {
        let r = report.for_brand(brand).expect("brand result");
        let largest = catalog.condensers.largest(brand, Orientation::Vertical);
        assert!(r.ideal_match.is_none());
        assert!(r.one_above.is_none());
        assert_eq!(r.one_below.as_ref().map(|m| &m.entry), largest);
        assert!(r.no_match());
    }
    let no_match = report
        .advisories
        .iter()
        .filter(|a| matches!(a, Advisory::NoMatchFound { .. }))
        .count();
    assert_eq!(no_match, 2);
}

#[test]
fn vertical_with_145_is_flagged_but_computed() {
    let report = compute_selection(
        &common::two_hi_wall_7(),
        &DiversityToken::parse("residential"),
        Brand::Samsung,
        Orientation::Vertical,
        &common::catalog(),
        &common::vrf_factors(),
    )
    .expect("report");

    assert!(
        report
            .advisories
            .iter()
            .any(|a| matches!(a, Advisory::InvalidCombination { percent: 145, .. }))
    );
    let samsung = report.for_brand(Brand::Samsung).expect("samsung");
    assert!(samsung.ideal_match.is_some());
    assert_eq!(samsung.factor.applied_pct, 145.0);
}

#[test]
fn horizontal_with_145_is_not_flagged() {
    let report = compute_selection(
        &common::two_hi_wall_7(),
        &DiversityToken::parse("145"),
        Brand::Samsung,
        Orientation::Horizontal,
        &common::catalog(),
        &common::vrf_factors(),
    )
    .expect("report");
    assert!(
        !report
            .advisories
            .iter()
            .any(|a| matches!(a, Advisory::InvalidCombination { .. }))
    );
}

#[test]
fn one_selection_yields_capped_and_uncapped_factors() {
    let report = compute_selection(
        &common::two_hi_wall_7(),
        &DiversityToken::parse("residential"),
        Brand::Samsung,
        Orientation::Horizontal,
        &common::catalog(),
        &common::vrf_factors(),
    )
    .expect("report");

    let samsung = report.for_brand(Brand::Samsung).expect("samsung");
    let daikin = report.for_brand(Brand::Daikin).expect("daikin");
    assert_eq!(samsung.factor.applied_pct, 145.0);
    assert_eq!(daikin.factor.applied_pct, 130.0);
    assert_eq!(daikin.factor.selected_pct, 145.0);
    assert!((daikin.required_minimum_capacity - daikin.total_demand * 1.30).abs() < 1e-9);
    assert_eq!(daikin.ideal_match.as_ref().map(|m| m.diversity_pct), Some(130.0));
    assert!(report.advisories.iter().any(|a| matches!(
        a,
        Advisory::FactorCapped {
            brand: Brand::Daikin,
            ..
        }
    )));
}

#[test]
fn each_brand_sums_its_own_units() {
    let report = compute_selection(
        &common::two_hi_wall_7(),
        &DiversityToken::parse("corporate"),
        Brand::Samsung,
        Orientation::Horizontal,
        &common::catalog(),
        &common::vrf_factors(),
    )
    .expect("report");
    // Daikin hi-wall 7 is index 20
    let daikin = report.for_brand(Brand::Daikin).expect("daikin");
    assert_eq!(daikin.total_demand, 40.0);
}

#[test]
fn maximum_capacity_picks_largest_unit() {
    let catalog = common::catalog();
    let report = compute_selection(
        &common::two_hi_wall_7(),
        &DiversityToken::parse("max"),
        Brand::Samsung,
        Orientation::Vertical,
        &catalog,
        &common::vrf_factors(),
    )
    .expect("report");

    for brand in Brand::ALL {
        let r = report.for_brand(brand).expect("brand");
        let largest = catalog.condensers.largest(brand, Orientation::Vertical);
        assert_eq!(r.ideal_match.as_ref().map(|m| &m.entry), largest);
        assert!(r.one_above.is_none());
        assert_eq!(r.required_minimum_capacity, r.total_demand);
        assert!(!r.factor.capped);
    }
}

#[test]
fn uncataloged_evaporator_is_reported_as_approximation() {
    let catalog = common::catalog();
    let mut list = vrf_sizer::sizing::SelectionList::new();
    list.add(&catalog.evaporators, Brand::Samsung, EvaporatorKind::HiWall, 99, 1);
    let report = compute_selection(
        list.items(),
        &DiversityToken::parse("corporate"),
        Brand::Samsung,
        Orientation::Horizontal,
        &catalog,
        &common::vrf_factors(),
    )
    .expect("report");

    let approximated: Vec<(Brand, f64)> = report
        .advisories
        .iter()
        .filter_map(|a| match a {
            Advisory::ApproximatedCapacity {
                brand,
                substituted,
                ..
            } => Some((*brand, *substituted)),
            _ => None,
        })
        .collect();
    assert_eq!(approximated, vec![(Brand::Samsung, 7507.0), (Brand::Daikin, 22.0)]);
}

#[test]
fn samsung_only_unit_keeps_daikin_demand_in_index_scale() {
    let catalog = common::catalog();
    let mut list = vrf_sizer::sizing::SelectionList::new();
    list.add(&catalog.evaporators, Brand::Samsung, EvaporatorKind::HiWall, 9, 2);
    // Daikin has no floor-ceiling 48.
    list.add(&catalog.evaporators, Brand::Samsung, EvaporatorKind::FloorCeiling, 48, 1);
    let report = compute_selection(
        list.items(),
        &DiversityToken::parse("corporate"),
        Brand::Samsung,
        Orientation::Vertical,
        &catalog,
        &common::vrf_factors(),
    )
    .expect("report");

    let daikin = report.for_brand(Brand::Daikin).expect("daikin");
    assert_eq!(daikin.total_demand, 2.0 * 25.0 + 22.0);
    assert!(!daikin.no_match());
    assert_eq!(
        daikin.ideal_match.as_ref().map(|m| m.entry.model.as_str()),
        Some("RXYQ6TATL")
    );

    let samsung = report.for_brand(Brand::Samsung).expect("samsung");
    assert_eq!(samsung.total_demand, 2.0 * 9212.0 + 47769.0);
    assert_eq!(
        samsung.ideal_match.as_ref().map(|m| m.entry.model.as_str()),
        Some("AM080BXVGGR")
    );
}

#[test]
fn identical_inputs_give_identical_reports() {
    let catalog = common::catalog();
    let factors = common::vrf_factors();
    let selections = common::two_hi_wall_7();
    let token = DiversityToken::parse("residential");
    let a = compute_selection(
        &selections,
        &token,
        Brand::Samsung,
        Orientation::Vertical,
        &catalog,
        &factors,
    );
    let b = compute_selection(
        &selections,
        &token,
        Brand::Samsung,
        Orientation::Vertical,
        &catalog,
        &factors,
    );
    assert_eq!(a, b);
}
