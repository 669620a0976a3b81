//! Product table access and the records-per-product aggregate.

use super::expect_one_row;
use crate::domain::{Product, ProductData, ProductRecordsReport};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Product>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Product>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn exists_product_code(&self, product_code: &str) -> Result<bool, AppError>;
    async fn create(&self, data: &ProductData) -> Result<Product, AppError>;
    async fn update(&self, id: i64, data: &ProductData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Product records per product; `None` covers every product.
    async fn report_records(&self, id: Option<i64>) -> Result<Vec<ProductRecordsReport>, AppError>;
}

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = concat!(
    "id, product_code, description, width, height, length, net_weight, expiration_rate, ",
    "freezing_rate, recommended_freezing_temperature, product_type_id, seller_id"
);

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, AppError> {
        let sql = format!("SELECT {} FROM products ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Product>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn exists_product_code(&self, product_code: &str) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM products WHERE product_code = $1)";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(product_code)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &ProductData) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO products (product_code, description, width, height, length, net_weight, \
             expiration_rate, freezing_rate, recommended_freezing_temperature, \
             product_type_id, seller_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Product>(&sql)
            .bind(&data.product_code)
            .bind(&data.description)
            .bind(data.width)
            .bind(data.height)
            .bind(data.length)
            .bind(data.net_weight)
            .bind(data.expiration_rate)
            .bind(data.freezing_rate)
            .bind(data.recommended_freezing_temperature)
            .bind(data.product_type_id)
            .bind(data.seller_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &ProductData) -> Result<(), AppError> {
        let sql = "UPDATE products SET \
                   product_code = $1, description = $2, width = $3, height = $4, \
                   length = $5, net_weight = $6, expiration_rate = $7, \
                   freezing_rate = $8, recommended_freezing_temperature = $9, \
                   product_type_id = $10, seller_id = $11 \
                   WHERE id = $12";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&data.product_code)
            .bind(&data.description)
            .bind(data.width)
            .bind(data.height)
            .bind(data.length)
            .bind(data.net_weight)
            .bind(data.expiration_rate)
            .bind(data.freezing_rate)
            .bind(data.recommended_freezing_temperature)
            .bind(data.product_type_id)
            .bind(data.seller_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "product", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM products WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "product", id)
    }

    async fn report_records(&self, id: Option<i64>) -> Result<Vec<ProductRecordsReport>, AppError> {
        let sql = r#"
            SELECT p.id AS product_id, p.description,
                   COUNT(pr.id) AS records_count
            FROM products p
            LEFT JOIN product_records pr ON pr.product_id = p.id
            WHERE ($1::BIGINT IS NULL OR p.id = $1)
            GROUP BY p.id
            ORDER BY p.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        Ok(sqlx::query_as::<_, ProductRecordsReport>(sql).bind(id).fetch_all(&self.pool).await?)
    }
}
