// src/store/postgres.rs
use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool};
use tracing::{info, instrument};

use super::{ProductStore, StoreError, StoreResult};
use crate::models::{NewProduct, Product};

/// Positional parameter for [`SqlAccessor::query`]. `$1` binds the first entry.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Float(Option<f64>),
    Text(Option<String>),
}

#[derive(Debug)]
pub struct QueryOutcome<T> {
    pub rows: Vec<T>,
    pub rows_affected: u64,
}

/// The single query primitive over the pool.
///
/// Statements that modify rows must end in a `RETURNING` clause; the affected
/// count is the number of rows returned. Errors are handed back untouched.
#[derive(Clone)]
pub struct SqlAccessor {
    pool: PgPool,
}

impl SqlAccessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, params), fields(params = params.len()))]
    pub async fn query<T>(&self, sql: &str, params: Vec<SqlParam>) -> Result<QueryOutcome<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        for param in params {
            query = match param {
                SqlParam::Int(value) => query.bind(value),
                SqlParam::Float(value) => query.bind(value),
                SqlParam::Text(value) => query.bind(value),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(QueryOutcome {
            rows_affected: rows.len() as u64,
            rows,
        })
    }
}

#[derive(Debug, FromRow)]
struct DeletedRow {
    #[allow(dead_code)]
    id: i64,
}

/// `products` table behind a direct SQL connection.
#[derive(Clone)]
pub struct PgProductStore {
    db: SqlAccessor,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { db: SqlAccessor::new(pool) }
    }

    pub fn accessor(&self) -> &SqlAccessor {
        &self.db
    }
}

fn field_params(product: NewProduct) -> Vec<SqlParam> {
    vec![
        SqlParam::Text(product.name),
        SqlParam::Text(product.description_en),
        SqlParam::Text(product.description_zh),
        SqlParam::Text(product.description_ar),
        SqlParam::Float(product.price),
        SqlParam::Text(product.image_url),
    ]
}

#[async_trait]
impl ProductStore for PgProductStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let outcome = self
            .db
            .query::<Product>(
                "SELECT id, name, description_en, description_zh, description_ar,
                        price::FLOAT8 AS price, image_url
                 FROM products ORDER BY id",
                Vec::new(),
            )
            .await?;
        Ok(outcome.rows)
    }

    #[instrument(skip(self, product))]
    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let outcome = self
            .db
            .query::<Product>(
                "INSERT INTO products (name, description_en, description_zh, description_ar, price, image_url)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING id, name, description_en, description_zh, description_ar,
                           price::FLOAT8 AS price, image_url",
                field_params(product),
            )
            .await?;

        let created = outcome
            .rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no row".into()))?;
        info!(id = created.id, "Product inserted");
        Ok(created)
    }

    #[instrument(skip(self, product))]
    async fn update(&self, id: i64, product: NewProduct) -> StoreResult<Option<Product>> {
        let mut params = field_params(product);
        params.push(SqlParam::Int(id));

        let outcome = self
            .db
            .query::<Product>(
                "UPDATE products SET
                    name = $1,
                    description_en = $2,
                    description_zh = $3,
                    description_ar = $4,
                    price = $5,
                    image_url = $6
                 WHERE id = $7
                 RETURNING id, name, description_en, description_zh, description_ar,
                           price::FLOAT8 AS price, image_url",
                params,
            )
            .await?;

        if outcome.rows_affected == 0 {
            return Ok(None);
        }
        Ok(outcome.rows.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let outcome = self
            .db
            .query::<DeletedRow>(
                "DELETE FROM products WHERE id = $1 RETURNING id",
                vec![SqlParam::Int(id)],
            )
            .await?;
        Ok(outcome.rows_affected > 0)
    }
}
