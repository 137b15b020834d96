// src/store/memory.rs
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProductStore, StoreError, StoreResult};
use crate::models::{NewProduct, Product};

/// In-process table for demos and tests.
///
/// Mirrors the SQL schema's `NOT NULL` constraints on `name` and `price`.
/// Ids start at 1 and are never handed out twice, even after a delete.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Table>,
}

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Product>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn check_constraints(id: i64, product: NewProduct) -> StoreResult<Product> {
    if product.name.is_none() {
        return Err(StoreError::Constraint("null value in column \"name\"".into()));
    }
    if !product.price.is_some_and(f64::is_finite) {
        return Err(StoreError::Constraint("invalid value in column \"price\"".into()));
    }
    product
        .with_id(id)
        .ok_or_else(|| StoreError::Constraint("row rejected".into()))
}

#[async_trait]
impl ProductStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let mut table = self.inner.write().await;
        let row = check_constraints(table.last_id + 1, product)?;
        table.last_id = row.id;
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, product: NewProduct) -> StoreResult<Option<Product>> {
        let mut table = self.inner.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        let row = check_constraints(id, product)?;
        table.rows.insert(id, row.clone());
        Ok(Some(row))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mug() -> NewProduct {
        NewProduct {
            name: Some("Mug".into()),
            price: Some(9.99),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = MemoryStore::new();
        let first = store.create(mug()).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());
        let second = store.create(mug()).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let store = MemoryStore::new();
        let created = store
            .create(NewProduct {
                description_zh: Some("杯子".into()),
                image_url: Some("http://example.com/mug.jpg".into()),
                ..mug()
            })
            .await
            .unwrap();

        let updated = store
            .update(
                created.id,
                NewProduct {
                    name: Some("Cup".into()),
                    price: Some(4.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Cup");
        assert_eq!(updated.description_zh, None);
        assert_eq!(updated.image_url, None);
        assert_eq!(store.list().await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn missing_rows_are_reported_not_created() {
        let store = MemoryStore::new();
        assert_eq!(store.update(42, mug()).await.unwrap(), None);
        assert!(!store.delete(42).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn enforces_not_null_columns() {
        let store = MemoryStore::new();
        let err = store
            .create(NewProduct { name: None, ..mug() })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));

        let err = store
            .create(NewProduct { price: None, ..mug() })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert!(store.is_empty().await);
    }
}
