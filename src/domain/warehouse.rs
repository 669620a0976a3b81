//! Warehouses.

use crate::error::AppError;
use super::required;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WarehouseData {
    pub warehouse_code: String,
    pub address: String,
    pub telephone: String,
    pub minimum_capacity: i32,
    pub minimum_temperature: f64,
    pub locality_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Warehouse {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: WarehouseData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WarehouseRequest {
    pub warehouse_code: Option<String>,
    pub address: Option<String>,
    pub telephone: Option<String>,
    pub minimum_capacity: Option<i32>,
    pub minimum_temperature: Option<f64>,
    pub locality_id: Option<i64>,
}

impl WarehouseRequest {
    pub fn into_data(self) -> Result<WarehouseData, AppError> {
        Ok(WarehouseData {
            warehouse_code: required(self.warehouse_code, "warehouse_code")?,
            address: required(self.address, "address")?,
            telephone: required(self.telephone, "telephone")?,
            minimum_capacity: required(self.minimum_capacity, "minimum_capacity")?,
            minimum_temperature: required(self.minimum_temperature, "minimum_temperature")?,
            locality_id: required(self.locality_id, "locality_id")?,
        })
    }

    pub fn merge(self, current: WarehouseData) -> WarehouseData {
        WarehouseData {
            warehouse_code: self.warehouse_code.unwrap_or(current.warehouse_code),
            address: self.address.unwrap_or(current.address),
            telephone: self.telephone.unwrap_or(current.telephone),
            minimum_capacity: self.minimum_capacity.unwrap_or(current.minimum_capacity),
            minimum_temperature: self.minimum_temperature.unwrap_or(current.minimum_temperature),
            locality_id: self.locality_id.unwrap_or(current.locality_id),
        }
    }
}
