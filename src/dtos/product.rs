// src/dtos/product.rs
use serde::Deserialize;

use crate::models::NewProduct;

/// Body of `POST /products` and `PUT /products/{id}`.
///
/// Nothing is required at this layer; a missing name or price reaches the
/// database and is rejected by its `NOT NULL` constraints.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub description_en: Option<String>,
    pub description_zh: Option<String>,
    pub description_ar: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

// Convert from request DTO to the storage input
impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            description_en: req.description_en,
            description_zh: req.description_zh,
            description_ar: req.description_ar,
            price: req.price,
            image_url: req.image_url,
        }
    }
}
