//! Purchase order table access.

use super::expect_one_row;
use crate::domain::{PurchaseOrder, PurchaseOrderData};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseOrderRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<PurchaseOrder>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<PurchaseOrder>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn exists_order_number(&self, order_number: &str) -> Result<bool, AppError>;
    async fn create(&self, data: &PurchaseOrderData) -> Result<PurchaseOrder, AppError>;
    async fn update(&self, id: i64, data: &PurchaseOrderData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

pub struct PgPurchaseOrderRepository {
    pool: PgPool,
}

impl PgPurchaseOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = concat!(
    "id, order_number, order_date, tracking_code, buyer_id, product_record_id, ",
    "order_status_id"
);

#[async_trait]
impl PurchaseOrderRepository for PgPurchaseOrderRepository {
    async fn get_all(&self) -> Result<Vec<PurchaseOrder>, AppError> {
        let sql = format!("SELECT {} FROM purchase_orders ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, PurchaseOrder>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<PurchaseOrder>, AppError> {
        let sql = format!("SELECT {} FROM purchase_orders WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, PurchaseOrder>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM purchase_orders WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn exists_order_number(&self, order_number: &str) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM purchase_orders WHERE order_number = $1)";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(order_number)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &PurchaseOrderData) -> Result<PurchaseOrder, AppError> {
        let sql = format!(
            "INSERT INTO purchase_orders (order_number, order_date, tracking_code, buyer_id, product_record_id, \
             order_status_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, PurchaseOrder>(&sql)
            .bind(&data.order_number)
            .bind(data.order_date)
            .bind(&data.tracking_code)
            .bind(data.buyer_id)
            .bind(data.product_record_id)
            .bind(data.order_status_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &PurchaseOrderData) -> Result<(), AppError> {
        let sql = "UPDATE purchase_orders SET \
                   order_number = $1, order_date = $2, tracking_code = $3, \
                   buyer_id = $4, product_record_id = $5, order_status_id = $6 \
                   WHERE id = $7";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&data.order_number)
            .bind(data.order_date)
            .bind(&data.tracking_code)
            .bind(data.buyer_id)
            .bind(data.product_record_id)
            .bind(data.order_status_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "purchase order", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM purchase_orders WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "purchase order", id)
    }
}
