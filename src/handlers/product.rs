// src/handlers/product.rs
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, Span};

use crate::dtos::product::ProductRequest;
use crate::error::AppError;
use crate::models::Product;
use crate::state::AppState;

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.store.list().await?;
    Ok(Json(products))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let Json(payload) = payload?;

    let product = state.store.create(payload.into()).await?;
    info!(id = product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /products/:id - Replace every field of a product
#[instrument(skip_all, fields(id))]
pub async fn update_product(
    path: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let Path(id) = path?;
    Span::current().record("id", id);
    let Json(payload) = payload?;

    let product = state
        .store
        .update(id, payload.into())
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    info!(id, "Product updated");

    Ok(Json(product))
}

// DELETE /products/:id - Delete product
#[instrument(skip_all, fields(id))]
pub async fn delete_product(
    path: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    Span::current().record("id", id);
    if !state.store.delete(id).await? {
        return Err(AppError::not_found("Product not found"));
    }
    info!(id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
