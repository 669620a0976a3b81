//! Buyer table access and the purchase-orders-per-buyer aggregate.

use super::expect_one_row;
use crate::domain::{Buyer, BuyerData, BuyerPurchaseOrdersReport};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuyerRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Buyer>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Buyer>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn exists_card_number(&self, card_number_id: &str) -> Result<bool, AppError>;
    async fn create(&self, data: &BuyerData) -> Result<Buyer, AppError>;
    async fn update(&self, id: i64, data: &BuyerData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Purchase orders per buyer; `None` covers every buyer.
    async fn report_purchase_orders(&self, id: Option<i64>) -> Result<Vec<BuyerPurchaseOrdersReport>, AppError>;
}

pub struct PgBuyerRepository {
    pool: PgPool,
}

impl PgBuyerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, card_number_id, first_name, last_name";

#[async_trait]
impl BuyerRepository for PgBuyerRepository {
    async fn get_all(&self) -> Result<Vec<Buyer>, AppError> {
        let sql = format!("SELECT {} FROM buyers ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Buyer>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Buyer>, AppError> {
        let sql = format!("SELECT {} FROM buyers WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Buyer>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM buyers WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn exists_card_number(&self, card_number_id: &str) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM buyers WHERE card_number_id = $1)";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(card_number_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &BuyerData) -> Result<Buyer, AppError> {
        let sql = format!(
            "INSERT INTO buyers (card_number_id, first_name, last_name) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Buyer>(&sql)
            .bind(&data.card_number_id)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &BuyerData) -> Result<(), AppError> {
        let sql = "UPDATE buyers SET card_number_id = $1, first_name = $2, last_name = $3 WHERE id = $4";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&data.card_number_id)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "buyer", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM buyers WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "buyer", id)
    }

    async fn report_purchase_orders(&self, id: Option<i64>) -> Result<Vec<BuyerPurchaseOrdersReport>, AppError> {
        let sql = r#"
            SELECT b.id, b.card_number_id, b.first_name, b.last_name,
                   COUNT(po.id) AS purchase_orders_count
            FROM buyers b
            LEFT JOIN purchase_orders po ON po.buyer_id = b.id
            WHERE ($1::BIGINT IS NULL OR b.id = $1)
            GROUP BY b.id
            ORDER BY b.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        Ok(sqlx::query_as::<_, BuyerPurchaseOrdersReport>(sql).bind(id).fetch_all(&self.pool).await?)
    }
}
