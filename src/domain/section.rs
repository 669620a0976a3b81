//! Warehouse sections and the batch count report row.

use crate::error::AppError;
use super::required;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SectionData {
    pub section_number: i32,
    pub current_temperature: f64,
    pub minimum_temperature: f64,
    pub current_capacity: i32,
    pub minimum_capacity: i32,
    pub maximum_capacity: i32,
    pub warehouse_id: i64,
    pub product_type_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Section {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: SectionData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SectionRequest {
    pub section_number: Option<i32>,
    pub current_temperature: Option<f64>,
    pub minimum_temperature: Option<f64>,
    pub current_capacity: Option<i32>,
    pub minimum_capacity: Option<i32>,
    pub maximum_capacity: Option<i32>,
    pub warehouse_id: Option<i64>,
    pub product_type_id: Option<i64>,
}

impl SectionRequest {
    pub fn into_data(self) -> Result<SectionData, AppError> {
        Ok(SectionData {
            section_number: required(self.section_number, "section_number")?,
            current_temperature: required(self.current_temperature, "current_temperature")?,
            minimum_temperature: required(self.minimum_temperature, "minimum_temperature")?,
            current_capacity: required(self.current_capacity, "current_capacity")?,
            minimum_capacity: required(self.minimum_capacity, "minimum_capacity")?,
            maximum_capacity: required(self.maximum_capacity, "maximum_capacity")?,
            warehouse_id: required(self.warehouse_id, "warehouse_id")?,
            product_type_id: required(self.product_type_id, "product_type_id")?,
        })
    }

    pub fn merge(self, current: SectionData) -> SectionData {
        SectionData {
            section_number: self.section_number.unwrap_or(current.section_number),
            current_temperature: self.current_temperature.unwrap_or(current.current_temperature),
            minimum_temperature: self.minimum_temperature.unwrap_or(current.minimum_temperature),
            current_capacity: self.current_capacity.unwrap_or(current.current_capacity),
            minimum_capacity: self.minimum_capacity.unwrap_or(current.minimum_capacity),
            maximum_capacity: self.maximum_capacity.unwrap_or(current.maximum_capacity),
            warehouse_id: self.warehouse_id.unwrap_or(current.warehouse_id),
            product_type_id: self.product_type_id.unwrap_or(current.product_type_id),
        }
    }
}

/// Product batches stored per section.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct SectionProductsReport {
    pub section_id: i64,
    pub section_number: i32,
    pub products_count: i64,
}
