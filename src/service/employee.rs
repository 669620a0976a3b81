//! Employee rules.

use crate::domain::{Employee, EmployeeData, EmployeeInboundOrdersReport, EmployeeRequest};
use crate::error::AppError;
use crate::service::validation::text;
use crate::service::{report_rows, require_parent};
use crate::store::{EmployeeRepository, WarehouseRepository};
use std::sync::Arc;

pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    warehouses: Arc<dyn WarehouseRepository>,
}

fn validate(data: &EmployeeData) -> Result<(), AppError> {
    text(&data.card_number_id, "card_number_id")?;
    text(&data.first_name, "first_name")?;
    text(&data.last_name, "last_name")
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn EmployeeRepository>, warehouses: Arc<dyn WarehouseRepository>) -> Self {
        Self { employees, warehouses }
    }

    pub async fn get_all(&self) -> Result<Vec<Employee>, AppError> {
        self.employees.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Employee, AppError> {
        self.employees
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("employee", id))
    }

    pub async fn create(&self, req: EmployeeRequest) -> Result<Employee, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        if self.employees.exists_card_number(&data.card_number_id).await? {
            return Err(AppError::duplicate("card_number_id", &data.card_number_id));
        }
        require_parent(self.warehouses.exists(data.warehouse_id).await?, "warehouse_id", data.warehouse_id)?;
        let employee = self.employees.create(&data).await?;
        tracing::info!(id = employee.id, "employee created");
        Ok(employee)
    }

    pub async fn update(&self, id: i64, req: EmployeeRequest) -> Result<Employee, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.card_number_id != current.data.card_number_id
            && self.employees.exists_card_number(&data.card_number_id).await?
        {
            return Err(AppError::duplicate("card_number_id", &data.card_number_id));
        }
        if data.warehouse_id != current.data.warehouse_id {
            require_parent(self.warehouses.exists(data.warehouse_id).await?, "warehouse_id", data.warehouse_id)?;
        }
        self.employees.update(id, &data).await?;
        tracing::info!(id, "employee updated");
        Ok(Employee { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.employees.delete(id).await?;
        tracing::info!(id, "employee deleted");
        Ok(())
    }

    pub async fn report_inbound_orders(&self, id: Option<i64>) -> Result<Vec<EmployeeInboundOrdersReport>, AppError> {
        let rows = self.employees.report_inbound_orders(id).await?;
        report_rows(rows, id, "employee")
    }
}
