//! Carrier table access.

use super::expect_one_row;
use crate::domain::{Carrier, CarrierData};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarrierRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Carrier>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Carrier>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn exists_cid(&self, cid: &str) -> Result<bool, AppError>;
    async fn create(&self, data: &CarrierData) -> Result<Carrier, AppError>;
    async fn update(&self, id: i64, data: &CarrierData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

pub struct PgCarrierRepository {
    pool: PgPool,
}

impl PgCarrierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, cid, company_name, address, telephone, locality_id";

#[async_trait]
impl CarrierRepository for PgCarrierRepository {
    async fn get_all(&self) -> Result<Vec<Carrier>, AppError> {
        let sql = format!("SELECT {} FROM carriers ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Carrier>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Carrier>, AppError> {
        let sql = format!("SELECT {} FROM carriers WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Carrier>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM carriers WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn exists_cid(&self, cid: &str) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM carriers WHERE cid = $1)";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(cid)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &CarrierData) -> Result<Carrier, AppError> {
        let sql = format!(
            "INSERT INTO carriers (cid, company_name, address, telephone, locality_id) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Carrier>(&sql)
            .bind(&data.cid)
            .bind(&data.company_name)
            .bind(&data.address)
            .bind(&data.telephone)
            .bind(data.locality_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &CarrierData) -> Result<(), AppError> {
        let sql = "UPDATE carriers SET \
                   cid = $1, company_name = $2, address = $3, telephone = $4, \
                   locality_id = $5 \
                   WHERE id = $6";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&data.cid)
            .bind(&data.company_name)
            .bind(&data.address)
            .bind(&data.telephone)
            .bind(data.locality_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "carrier", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM carriers WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "carrier", id)
    }
}
