use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog row. `id` is assigned by storage and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description_en: Option<String>,
    pub description_zh: Option<String>,
    pub description_ar: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
}

/// Every field of a product except `id`. Used for create and full-replace update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: Option<String>,
    pub description_en: Option<String>,
    pub description_zh: Option<String>,
    pub description_ar: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

impl NewProduct {
    pub fn with_id(self, id: i64) -> Option<Product> {
        Some(Product {
            id,
            name: self.name?,
            description_en: self.description_en,
            description_zh: self.description_zh,
            description_ar: self.description_ar,
            price: self.price.filter(|p| p.is_finite())?,
            image_url: self.image_url,
        })
    }
}

impl From<&Product> for NewProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            description_en: product.description_en.clone(),
            description_zh: product.description_zh.clone(),
            description_ar: product.description_ar.clone(),
            price: Some(product.price),
            image_url: product.image_url.clone(),
        }
    }
}
