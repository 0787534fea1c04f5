//! Catalog endpoints: stores, product detail, stock and variants.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use vitrina_core::alu::{group_variants, total_by_size, ColorVariants, SizeTotal};
use vitrina_core::validation::validate_alu;
use vitrina_core::{Alu, CoreError, ProductAttributes, StockLevel, Store};

use super::parse_store_no;
use crate::error::ApiError;
use crate::AppState;

/// Colors and sizes of one model in stock at a store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantsResponse {
    pub store_no: i64,
    pub model: String,
    pub colors: Vec<ColorVariants>,
    pub available_sizes: Vec<String>,
}

/// Sizes of one model and color in stock at a store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizesResponse {
    pub store_no: i64,
    pub model: String,
    pub color_code: String,
    pub sizes: Vec<SizeTotal>,
}

/// `GET /api/stores`
pub async fn list_stores(State(state): State<AppState>) -> Result<Json<Vec<Store>>, ApiError> {
    Ok(Json(state.db.stores().list_active().await?))
}

/// `GET /api/products/{alu}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(alu): Path<String>,
) -> Result<Json<ProductAttributes>, ApiError> {
    let alu = validate_alu(&alu)?;

    let product = state
        .db
        .products()
        .get_detail(&alu)
        .await?
        .ok_or(CoreError::ProductNotFound(alu))?;

    Ok(Json(product))
}

/// `GET /api/products/{alu}/stores`
pub async fn product_stores(
    State(state): State<AppState>,
    Path(alu): Path<String>,
) -> Result<Json<Vec<StockLevel>>, ApiError> {
    let alu = validate_alu(&alu)?;

    let stock = state.db.products().stock_across_stores(&alu).await?;
    if stock.is_empty() {
        return Err(CoreError::NoStock { alu }.into());
    }

    Ok(Json(stock))
}

/// `GET /api/stores/{store_no}/products/{alu}`
pub async fn store_product(
    State(state): State<AppState>,
    Path((store_no, alu)): Path<(String, String)>,
) -> Result<Json<Vec<StockLevel>>, ApiError> {
    let store_no = parse_store_no(&store_no)?;
    let alu = validate_alu(&alu)?;

    let stock = state.db.products().stock_in_store(store_no, &alu).await?;
    if stock.is_empty() {
        return Err(CoreError::NoStock { alu }.into());
    }

    Ok(Json(stock))
}

/// `GET /api/stores/{store_no}/variants/{alu}`
pub async fn store_variants(
    State(state): State<AppState>,
    Path((store_no, alu)): Path<(String, String)>,
) -> Result<Json<VariantsResponse>, ApiError> {
    let store_no = parse_store_no(&store_no)?;
    let alu = Alu::parse(&validate_alu(&alu)?)?;

    let rows = state.db.products().variants_in_store(store_no, &alu).await?;
    if rows.is_empty() {
        return Err(CoreError::NoVariants {
            model: alu.model().to_string(),
            store_no,
        }
        .into());
    }

    let summary = group_variants(&rows);
    debug!(
        store_no,
        model = %alu.model(),
        colors = summary.colors.len(),
        "Grouped variants"
    );

    Ok(Json(VariantsResponse {
        store_no,
        model: alu.model().to_string(),
        colors: summary.colors,
        available_sizes: summary.available_sizes,
    }))
}

/// `GET /api/stores/{store_no}/sizes/{alu}`
pub async fn store_sizes(
    State(state): State<AppState>,
    Path((store_no, alu)): Path<(String, String)>,
) -> Result<Json<SizesResponse>, ApiError> {
    let store_no = parse_store_no(&store_no)?;
    let alu = Alu::parse(&validate_alu(&alu)?)?;

    let sizes = total_by_size(&state.db.products().sizes_in_store(store_no, &alu).await?);
    if sizes.is_empty() {
        return Err(CoreError::NoVariants {
            model: alu.style().to_string(),
            store_no,
        }
        .into());
    }

    Ok(Json(SizesResponse {
        store_no,
        model: alu.model().to_string(),
        color_code: alu.color_code().to_string(),
        sizes,
    }))
}
