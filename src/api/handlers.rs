//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{
    CatalogResponse, ErrorResponse, FactorRecord, FactorsResponse, NominalListing,
    SelectionRequest, SelectionResponse,
};
use crate::catalog::{Brand, EvaporatorKind, Orientation};
use crate::diversity::DiversityToken;
use crate::sizing::demand::clamp_quantity;
use crate::sizing::{SelectionList, compute_selection};

/// Sizes the requested evaporator list for every brand.
///
/// `POST /selection` → 200 + `SelectionResponse` JSON (`report` is `null`
/// for an empty list)
pub async fn post_selection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectionRequest>,
) -> Json<SelectionResponse> {
    let mut list = SelectionList::new();
    for e in &req.evaporators {
        list.add(
            &state.catalog.evaporators,
            req.brand,
            e.kind,
            e.nominal,
            clamp_quantity(e.quantity),
        );
    }

    let report = compute_selection(
        list.items(),
        &DiversityToken::parse(&req.diversity),
        req.brand,
        req.orientation,
        &state.catalog,
        &state.factors,
    );

    Json(SelectionResponse {
        evaporators: list.items().to_vec(),
        report,
        load_advisories: state.load_advisories.clone(),
    })
}

/// Returns condensers and evaporator nominals for one brand and orientation.
///
/// `GET /catalog/{brand}/{orientation}` → 200 + `CatalogResponse` JSON
/// `GET /catalog/lg/vertical` → 400 + `ErrorResponse`
pub async fn get_catalog(
    State(state): State<Arc<AppState>>,
    Path((brand, orientation)): Path<(String, String)>,
) -> impl IntoResponse {
    let parsed = brand
        .parse::<Brand>()
        .and_then(|b| orientation.parse::<Orientation>().map(|o| (b, o)));
    let (brand, orientation) = match parsed {
        Ok(pair) => pair,
        Err(error) => return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))),
    };

    let evaporators = EvaporatorKind::ALL
        .into_iter()
        .map(|kind| NominalListing {
            kind,
            nominals: state.catalog.evaporators.nominals(brand, kind),
        })
        .collect();

    Ok(Json(CatalogResponse {
        brand,
        orientation,
        unit: brand.capacity_unit(),
        condensers: state.catalog.condensers.entries(brand, orientation).to_vec(),
        evaporators,
    }))
}

/// Returns the loaded diversity-factor table.
///
/// `GET /factors` → 200 + `FactorsResponse` JSON
pub async fn get_factors(State(state): State<Arc<AppState>>) -> Json<FactorsResponse> {
    Json(FactorsResponse {
        family: state.factors.family(),
        default: state.factors.default_factor().map(|f| f.name.clone()),
        factors: state.factors.factors().iter().map(FactorRecord::from).collect(),
    })
}
