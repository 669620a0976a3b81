//! Product batches stored in a section.

use crate::error::AppError;
use super::required;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductBatchData {
    pub batch_number: i32,
    pub current_quantity: i32,
    pub initial_quantity: i32,
    pub current_temperature: f64,
    pub minimum_temperature: f64,
    pub due_date: NaiveDate,
    pub manufacturing_date: NaiveDate,
    pub manufacturing_hour: i32,
    pub product_id: i64,
    pub section_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductBatch {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: ProductBatchData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductBatchRequest {
    pub batch_number: Option<i32>,
    pub current_quantity: Option<i32>,
    pub initial_quantity: Option<i32>,
    pub current_temperature: Option<f64>,
    pub minimum_temperature: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub manufacturing_date: Option<NaiveDate>,
    pub manufacturing_hour: Option<i32>,
    pub product_id: Option<i64>,
    pub section_id: Option<i64>,
}

impl ProductBatchRequest {
    pub fn into_data(self) -> Result<ProductBatchData, AppError> {
        Ok(ProductBatchData {
            batch_number: required(self.batch_number, "batch_number")?,
            current_quantity: required(self.current_quantity, "current_quantity")?,
            initial_quantity: required(self.initial_quantity, "initial_quantity")?,
            current_temperature: required(self.current_temperature, "current_temperature")?,
            minimum_temperature: required(self.minimum_temperature, "minimum_temperature")?,
            due_date: required(self.due_date, "due_date")?,
            manufacturing_date: required(self.manufacturing_date, "manufacturing_date")?,
            manufacturing_hour: required(self.manufacturing_hour, "manufacturing_hour")?,
            product_id: required(self.product_id, "product_id")?,
            section_id: required(self.section_id, "section_id")?,
        })
    }

    pub fn merge(self, current: ProductBatchData) -> ProductBatchData {
        ProductBatchData {
            batch_number: self.batch_number.unwrap_or(current.batch_number),
            current_quantity: self.current_quantity.unwrap_or(current.current_quantity),
            initial_quantity: self.initial_quantity.unwrap_or(current.initial_quantity),
            current_temperature: self.current_temperature.unwrap_or(current.current_temperature),
            minimum_temperature: self.minimum_temperature.unwrap_or(current.minimum_temperature),
            due_date: self.due_date.unwrap_or(current.due_date),
            manufacturing_date: self.manufacturing_date.unwrap_or(current.manufacturing_date),
            manufacturing_hour: self.manufacturing_hour.unwrap_or(current.manufacturing_hour),
            product_id: self.product_id.unwrap_or(current.product_id),
            section_id: self.section_id.unwrap_or(current.section_id),
        }
    }
}
