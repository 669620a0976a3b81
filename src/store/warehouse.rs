//! Warehouse table access.

use super::expect_one_row;
use crate::domain::{Warehouse, WarehouseData};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Warehouse>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Warehouse>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn exists_code(&self, warehouse_code: &str) -> Result<bool, AppError>;
    async fn create(&self, data: &WarehouseData) -> Result<Warehouse, AppError>;
    async fn update(&self, id: i64, data: &WarehouseData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

pub struct PgWarehouseRepository {
    pool: PgPool,
}

impl PgWarehouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = concat!(
    "id, warehouse_code, address, telephone, minimum_capacity, minimum_temperature, ",
    "locality_id"
);

#[async_trait]
impl WarehouseRepository for PgWarehouseRepository {
    async fn get_all(&self) -> Result<Vec<Warehouse>, AppError> {
        let sql = format!("SELECT {} FROM warehouses ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Warehouse>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Warehouse>, AppError> {
        let sql = format!("SELECT {} FROM warehouses WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Warehouse>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn exists_code(&self, warehouse_code: &str) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM warehouses WHERE warehouse_code = $1)";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(warehouse_code)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &WarehouseData) -> Result<Warehouse, AppError> {
        let sql = format!(
            "INSERT INTO warehouses (warehouse_code, address, telephone, minimum_capacity, minimum_temperature, \
             locality_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Warehouse>(&sql)
            .bind(&data.warehouse_code)
            .bind(&data.address)
            .bind(&data.telephone)
            .bind(data.minimum_capacity)
            .bind(data.minimum_temperature)
            .bind(data.locality_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &WarehouseData) -> Result<(), AppError> {
        let sql = "UPDATE warehouses SET \
                   warehouse_code = $1, address = $2, telephone = $3, \
                   minimum_capacity = $4, minimum_temperature = $5, locality_id = $6 \
                   WHERE id = $7";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&data.warehouse_code)
            .bind(&data.address)
            .bind(&data.telephone)
            .bind(data.minimum_capacity)
            .bind(data.minimum_temperature)
            .bind(data.locality_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "warehouse", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM warehouses WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "warehouse", id)
    }
}
