//! Public read-only JSON API.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use partfinder_core::ProductRecord;

use crate::db::ProductRepository;
use crate::state::AppState;

/// Response envelope for the product list.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    /// Catalog items in `(lwc, partner, insulation, length)` order.
    pub items: Vec<ProductRecord>,
}

/// List every product in the catalog.
///
/// A store read failure is never surfaced to the caller: the response
/// degrades to an empty list and the failure is logged.
pub async fn products(State(state): State<AppState>) -> Json<ProductListResponse> {
    let items = match ProductRepository::new(state.pool()).list_all().await {
        Ok(products) => products.into_iter().map(ProductRecord::from).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "product list query failed; returning empty result");
            Vec::new()
        }
    };

    Json(ProductListResponse { items })
}
