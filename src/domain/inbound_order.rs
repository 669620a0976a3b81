//! Inbound orders: a product batch received by an employee at a warehouse.

use crate::error::AppError;
use super::required;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InboundOrderData {
    pub order_number: String,
    pub order_date: NaiveDate,
    pub employee_id: i64,
    pub product_batch_id: i64,
    pub warehouse_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InboundOrder {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: InboundOrderData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InboundOrderRequest {
    pub order_number: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub employee_id: Option<i64>,
    pub product_batch_id: Option<i64>,
    pub warehouse_id: Option<i64>,
}

impl InboundOrderRequest {
    pub fn into_data(self) -> Result<InboundOrderData, AppError> {
        Ok(InboundOrderData {
            order_number: required(self.order_number, "order_number")?,
            order_date: required(self.order_date, "order_date")?,
            employee_id: required(self.employee_id, "employee_id")?,
            product_batch_id: required(self.product_batch_id, "product_batch_id")?,
            warehouse_id: required(self.warehouse_id, "warehouse_id")?,
        })
    }

    pub fn merge(self, current: InboundOrderData) -> InboundOrderData {
        InboundOrderData {
            order_number: self.order_number.unwrap_or(current.order_number),
            order_date: self.order_date.unwrap_or(current.order_date),
            employee_id: self.employee_id.unwrap_or(current.employee_id),
            product_batch_id: self.product_batch_id.unwrap_or(current.product_batch_id),
            warehouse_id: self.warehouse_id.unwrap_or(current.warehouse_id),
        }
    }
}
