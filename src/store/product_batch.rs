//! Product batch table access.

use super::expect_one_row;
use crate::domain::{ProductBatch, ProductBatchData};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductBatchRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<ProductBatch>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<ProductBatch>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn exists_batch_number(&self, batch_number: i32) -> Result<bool, AppError>;
    async fn create(&self, data: &ProductBatchData) -> Result<ProductBatch, AppError>;
    async fn update(&self, id: i64, data: &ProductBatchData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

pub struct PgProductBatchRepository {
    pool: PgPool,
}

impl PgProductBatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = concat!(
    "id, batch_number, current_quantity, initial_quantity, current_temperature, ",
    "minimum_temperature, due_date, manufacturing_date, manufacturing_hour, product_id, ",
    "section_id"
);

#[async_trait]
impl ProductBatchRepository for PgProductBatchRepository {
    async fn get_all(&self) -> Result<Vec<ProductBatch>, AppError> {
        let sql = format!("SELECT {} FROM product_batches ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, ProductBatch>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<ProductBatch>, AppError> {
        let sql = format!("SELECT {} FROM product_batches WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, ProductBatch>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM product_batches WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn exists_batch_number(&self, batch_number: i32) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM product_batches WHERE batch_number = $1)";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(batch_number)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &ProductBatchData) -> Result<ProductBatch, AppError> {
        let sql = format!(
            "INSERT INTO product_batches (batch_number, current_quantity, initial_quantity, current_temperature, \
             minimum_temperature, due_date, manufacturing_date, manufacturing_hour, \
             product_id, section_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, ProductBatch>(&sql)
            .bind(data.batch_number)
            .bind(data.current_quantity)
            .bind(data.initial_quantity)
            .bind(data.current_temperature)
            .bind(data.minimum_temperature)
            .bind(data.due_date)
            .bind(data.manufacturing_date)
            .bind(data.manufacturing_hour)
            .bind(data.product_id)
            .bind(data.section_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &ProductBatchData) -> Result<(), AppError> {
        let sql = "UPDATE product_batches SET \
                   batch_number = $1, current_quantity = $2, initial_quantity = $3, \
                   current_temperature = $4, minimum_temperature = $5, due_date = $6, \
                   manufacturing_date = $7, manufacturing_hour = $8, product_id = $9, \
                   section_id = $10 \
                   WHERE id = $11";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(data.batch_number)
            .bind(data.current_quantity)
            .bind(data.initial_quantity)
            .bind(data.current_temperature)
            .bind(data.minimum_temperature)
            .bind(data.due_date)
            .bind(data.manufacturing_date)
            .bind(data.manufacturing_hour)
            .bind(data.product_id)
            .bind(data.section_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "product batch", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM product_batches WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "product batch", id)
    }
}
