//! Employee table access and the inbound-orders-per-employee aggregate.

use super::expect_one_row;
use crate::domain::{Employee, EmployeeData, EmployeeInboundOrdersReport};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Employee>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Employee>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    async fn exists_card_number(&self, card_number_id: &str) -> Result<bool, AppError>;
    async fn create(&self, data: &EmployeeData) -> Result<Employee, AppError>;
    async fn update(&self, id: i64, data: &EmployeeData) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Inbound orders per employee; `None` covers every employee.
    async fn report_inbound_orders(&self, id: Option<i64>) -> Result<Vec<EmployeeInboundOrdersReport>, AppError>;
}

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, card_number_id, first_name, last_name, warehouse_id";

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn get_all(&self) -> Result<Vec<Employee>, AppError> {
        let sql = format!("SELECT {} FROM employees ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Employee>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Employee>, AppError> {
        let sql = format!("SELECT {} FROM employees WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Employee>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn exists_card_number(&self, card_number_id: &str) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM employees WHERE card_number_id = $1)";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(card_number_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, data: &EmployeeData) -> Result<Employee, AppError> {
        let sql = format!(
            "INSERT INTO employees (card_number_id, first_name, last_name, warehouse_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Employee>(&sql)
            .bind(&data.card_number_id)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(data.warehouse_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: i64, data: &EmployeeData) -> Result<(), AppError> {
        let sql = "UPDATE employees SET \
                   card_number_id = $1, first_name = $2, last_name = $3, \
                   warehouse_id = $4 \
                   WHERE id = $5";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&data.card_number_id)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(data.warehouse_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "employee", id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM employees WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result, "employee", id)
    }

    async fn report_inbound_orders(&self, id: Option<i64>) -> Result<Vec<EmployeeInboundOrdersReport>, AppError> {
        let sql = r#"
            SELECT e.id, e.card_number_id, e.first_name, e.last_name, e.warehouse_id,
                   COUNT(io.id) AS inbound_orders_count
            FROM employees e
            LEFT JOIN inbound_orders io ON io.employee_id = e.id
            WHERE ($1::BIGINT IS NULL OR e.id = $1)
            GROUP BY e.id
            ORDER BY e.id
        "#;
        tracing::debug!(sql = %sql, id = ?id, "query");
        Ok(sqlx::query_as::<_, EmployeeInboundOrdersReport>(sql).bind(id).fetch_all(&self.pool).await?)
    }
}
