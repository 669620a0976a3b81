//! Locality table access plus the seller and carrier counts per locality.

use super::expect_one_row;
use crate::domain::{Locality, LocalityData, LocalityCarriersReport, LocalitySellersReport};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocalityRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Locality>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Locality>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn exists_name(&self, locality_name: &str, province_name: &str) -> Result<bool, AppError>;
    async fn create(&self, data: &LocalityData) -> Result<Locality, AppError>;
    async fn update(&self, id: i64, data: &LocalityData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Sellers per locality; `None` covers every locality.
    async fn report_sellers(&self, id: Option<i64>) -> Result<Vec<LocalitySellersReport>, AppError>;
    /// Carriers per locality; `None` covers every locality.
    async fn report_carriers(&self, id: Option<i64>) -> Result<Vec<LocalityCarriersReport>, AppError>;
}

pub struct PgLocalityRepository {
    pool: PgPool,
}

impl PgLocalityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, locality_name, province_name, country_name";

#[async_trait]
impl LocalityRepository for PgLocalityRepository {
    async fn get_all(&self) -> Result<Vec<Locality>, AppError> {
        let sql = format!("SELECT {} FROM localities ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Locality>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Locality>, AppError> {
        let sql = format!("SELECT {} FROM localities WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Locality>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM localities WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn exists_name(&self, locality_name: &str, province_name: &str) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM localities WHERE locality_name = $1 AND province_name = $2)";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(locality_name)
            .bind(province_name)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &LocalityData) -> Result<Locality, AppError> {
        let sql = format!(
            "INSERT INTO localities (locality_name, province_name, country_name) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Locality>(&sql)
            .bind(&data.locality_name)
            .bind(&data.province_name)
            .bind(&data.country_name)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &LocalityData) -> Result<(), AppError> {
        let sql = "UPDATE localities SET \
                   locality_name = $1, province_name = $2, country_name = $3 \
                   WHERE id = $4";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&data.locality_name)
            .bind(&data.province_name)
            .bind(&data.country_name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "locality", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM localities WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "locality", id)
    }

    async fn report_sellers(&self, id: Option<i64>) -> Result<Vec<LocalitySellersReport>, AppError> {
        let sql = r#"
            SELECT l.id AS locality_id, l.locality_name,
                   COUNT(s.id) AS sellers_count
            FROM localities l
            LEFT JOIN sellers s ON s.locality_id = l.id
            WHERE ($1::BIGINT IS NULL OR l.id = $1)
            GROUP BY l.id
            ORDER BY l.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        Ok(sqlx::query_as::<_, LocalitySellersReport>(sql).bind(id).fetch_all(&self.pool).await?)
    }

    async fn report_carriers(&self, id: Option<i64>) -> Result<Vec<LocalityCarriersReport>, AppError> {
        let sql = r#"
            SELECT l.id AS locality_id, l.locality_name,
                   COUNT(c.id) AS carriers_count
            FROM localities l
            LEFT JOIN carriers c ON c.locality_id = l.id
            WHERE ($1::BIGINT IS NULL OR l.id = $1)
            GROUP BY l.id
            ORDER BY l.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        Ok(sqlx::query_as::<_, LocalityCarriersReport>(sql).bind(id).fetch_all(&self.pool).await?)
    }
}
