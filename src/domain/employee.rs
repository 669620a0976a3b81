//! Warehouse employees and the inbound-order count report row.

use crate::error::AppError;
use super::required;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmployeeData {
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: EmployeeData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmployeeRequest {
    pub card_number_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub warehouse_id: Option<i64>,
}

impl EmployeeRequest {
    pub fn into_data(self) -> Result<EmployeeData, AppError> {
        Ok(EmployeeData {
            card_number_id: required(self.card_number_id, "card_number_id")?,
            first_name: required(self.first_name, "first_name")?,
            last_name: required(self.last_name, "last_name")?,
            warehouse_id: required(self.warehouse_id, "warehouse_id")?,
        })
    }

    pub fn merge(self, current: EmployeeData) -> EmployeeData {
        EmployeeData {
            card_number_id: self.card_number_id.unwrap_or(current.card_number_id),
            first_name: self.first_name.unwrap_or(current.first_name),
            last_name: self.last_name.unwrap_or(current.last_name),
            warehouse_id: self.warehouse_id.unwrap_or(current.warehouse_id),
        }
    }
}

/// Inbound orders received per employee.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct EmployeeInboundOrdersReport {
    pub id: i64,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub warehouse_id: i64,
    pub inbound_orders_count: i64,
}
