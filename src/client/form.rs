use thiserror::Error;

use crate::models::{NewProduct, Product};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Product name is required")]
    EmptyName,

    #[error("Price must be a number, got {0:?}")]
    InvalidPrice(String),
}

/// Raw text of the product inputs, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description_en: String,
    pub description_zh: String,
    pub description_ar: String,
    pub price: String,
    pub image_url: String,
}

impl ProductForm {
    /// Pre-fills every input from a fetched record.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description_en: product.description_en.clone().unwrap_or_default(),
            description_zh: product.description_zh.clone().unwrap_or_default(),
            description_ar: product.description_ar.clone().unwrap_or_default(),
            price: product.price.to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }

    /// Checks presence and number shape, then converts to a request body.
    /// Blank optional inputs become null.
    pub fn validate(&self) -> Result<NewProduct, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| FormError::InvalidPrice(self.price.clone()))?;

        Ok(NewProduct {
            name: Some(name.to_string()),
            description_en: optional(&self.description_en),
            description_zh: optional(&self.description_zh),
            description_ar: optional(&self.description_ar),
            price: Some(price),
            image_url: optional(&self.image_url),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
