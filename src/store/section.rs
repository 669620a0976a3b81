//! Section table access and the batches-per-section aggregate.

use super::expect_one_row;
use crate::domain::{Section, SectionData, SectionProductsReport};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Section>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Section>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn exists_section_number(&self, section_number: i32) -> Result<bool, AppError>;
    async fn create(&self, data: &SectionData) -> Result<Section, AppError>;
    async fn update(&self, id: i64, data: &SectionData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Product batches per section; `None` covers every section.
    async fn report_products(&self, id: Option<i64>) -> Result<Vec<SectionProductsReport>, AppError>;
}

pub struct PgSectionRepository {
    pool: PgPool,
}

impl PgSectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = concat!(
    "id, section_number, current_temperature, minimum_temperature, current_capacity, ",
    "minimum_capacity, maximum_capacity, warehouse_id, product_type_id"
);

#[async_trait]
impl SectionRepository for PgSectionRepository {
    async fn get_all(&self) -> Result<Vec<Section>, AppError> {
        let sql = format!("SELECT {} FROM sections ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Section>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Section>, AppError> {
        let sql = format!("SELECT {} FROM sections WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Section>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM sections WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn exists_section_number(&self, section_number: i32) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM sections WHERE section_number = $1)";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(section_number)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &SectionData) -> Result<Section, AppError> {
        let sql = format!(
            "INSERT INTO sections (section_number, current_temperature, minimum_temperature, current_capacity, \
             minimum_capacity, maximum_capacity, warehouse_id, product_type_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Section>(&sql)
            .bind(data.section_number)
            .bind(data.current_temperature)
            .bind(data.minimum_temperature)
            .bind(data.current_capacity)
            .bind(data.minimum_capacity)
            .bind(data.maximum_capacity)
            .bind(data.warehouse_id)
            .bind(data.product_type_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &SectionData) -> Result<(), AppError> {
        let sql = "UPDATE sections SET \
                   section_number = $1, current_temperature = $2, \
                   minimum_temperature = $3, current_capacity = $4, \
                   minimum_capacity = $5, maximum_capacity = $6, warehouse_id = $7, \
                   product_type_id = $8 \
                   WHERE id = $9";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(data.section_number)
            .bind(data.current_temperature)
            .bind(data.minimum_temperature)
            .bind(data.current_capacity)
            .bind(data.minimum_capacity)
            .bind(data.maximum_capacity)
            .bind(data.warehouse_id)
            .bind(data.product_type_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "section", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM sections WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "section", id)
    }

    async fn report_products(&self, id: Option<i64>) -> Result<Vec<SectionProductsReport>, AppError> {
        let sql = r#"
            SELECT s.id AS section_id, s.section_number,
                   COUNT(pb.id) AS products_count
            FROM sections s
            LEFT JOIN product_batches pb ON pb.section_id = s.id
            WHERE ($1::BIGINT IS NULL OR s.id = $1)
            GROUP BY s.id
            ORDER BY s.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        Ok(sqlx::query_as::<_, SectionProductsReport>(sql).bind(id).fetch_all(&self.pool).await?)
    }
}
