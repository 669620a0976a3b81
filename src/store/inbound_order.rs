//! Inbound order table access.

use super::expect_one_row;
use crate::domain::{InboundOrder, InboundOrderData};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InboundOrderRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<InboundOrder>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<InboundOrder>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn exists_order_number(&self, order_number: &str) -> Result<bool, AppError>;
    async fn create(&self, data: &InboundOrderData) -> Result<InboundOrder, AppError>;
    async fn update(&self, id: i64, data: &InboundOrderData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

pub struct PgInboundOrderRepository {
    pool: PgPool,
}

impl PgInboundOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, order_number, order_date, employee_id, product_batch_id, warehouse_id";

#[async_trait]
impl InboundOrderRepository for PgInboundOrderRepository {
    async fn get_all(&self) -> Result<Vec<InboundOrder>, AppError> {
        let sql = format!("SELECT {} FROM inbound_orders ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, InboundOrder>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<InboundOrder>, AppError> {
        let sql = format!("SELECT {} FROM inbound_orders WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, InboundOrder>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM inbound_orders WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn exists_order_number(&self, order_number: &str) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM inbound_orders WHERE order_number = $1)";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(order_number)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &InboundOrderData) -> Result<InboundOrder, AppError> {
        let sql = format!(
            "INSERT INTO inbound_orders (order_number, order_date, employee_id, product_batch_id, warehouse_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, InboundOrder>(&sql)
            .bind(&data.order_number)
            .bind(data.order_date)
            .bind(data.employee_id)
            .bind(data.product_batch_id)
            .bind(data.warehouse_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &InboundOrderData) -> Result<(), AppError> {
        let sql = "UPDATE inbound_orders SET \
                   order_number = $1, order_date = $2, employee_id = $3, \
                   product_batch_id = $4, warehouse_id = $5 \
                   WHERE id = $6";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&data.order_number)
            .bind(data.order_date)
            .bind(data.employee_id)
            .bind(data.product_batch_id)
            .bind(data.warehouse_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "inbound order", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM inbound_orders WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "inbound order", id)
    }
}
