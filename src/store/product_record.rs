//! Product record table access.

use super::expect_one_row;
use crate::domain::{ProductRecord, ProductRecordData};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRecordRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<ProductRecord>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<ProductRecord>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn create(&self, data: &ProductRecordData) -> Result<ProductRecord, AppError>;
    async fn update(&self, id: i64, data: &ProductRecordData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

pub struct PgProductRecordRepository {
    pool: PgPool,
}

impl PgProductRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, last_update_date, purchase_price, sale_price, product_id";

#[async_trait]
impl ProductRecordRepository for PgProductRecordRepository {
    async fn get_all(&self) -> Result<Vec<ProductRecord>, AppError> {
        let sql = format!("SELECT {} FROM product_records ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, ProductRecord>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<ProductRecord>, AppError> {
        let sql = format!("SELECT {} FROM product_records WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, ProductRecord>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM product_records WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &ProductRecordData) -> Result<ProductRecord, AppError> {
        let sql = format!(
            "INSERT INTO product_records (last_update_date, purchase_price, sale_price, product_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, ProductRecord>(&sql)
            .bind(data.last_update_date)
            .bind(data.purchase_price)
            .bind(data.sale_price)
            .bind(data.product_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &ProductRecordData) -> Result<(), AppError> {
        let sql = "UPDATE product_records SET \
                   last_update_date = $1, purchase_price = $2, sale_price = $3, \
                   product_id = $4 \
                   WHERE id = $5";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(data.last_update_date)
            .bind(data.purchase_price)
            .bind(data.sale_price)
            .bind(data.product_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "product record", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM product_records WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "product record", id)
    }
}
