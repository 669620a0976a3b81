//! Products and the record count report row.

use crate::error::AppError;
use super::required;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductData {
    pub product_code: String,
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub net_weight: f64,
    pub expiration_rate: f64,
    pub freezing_rate: f64,
    pub recommended_freezing_temperature: f64,
    pub product_type_id: i64,
    pub seller_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: ProductData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductRequest {
    pub product_code: Option<String>,
    pub description: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub net_weight: Option<f64>,
    pub expiration_rate: Option<f64>,
    pub freezing_rate: Option<f64>,
    pub recommended_freezing_temperature: Option<f64>,
    pub product_type_id: Option<i64>,
    pub seller_id: Option<i64>,
}

impl ProductRequest {
    pub fn into_data(self) -> Result<ProductData, AppError> {
        Ok(ProductData {
            product_code: required(self.product_code, "product_code")?,
            description: required(self.description, "description")?,
            width: required(self.width, "width")?,
            height: required(self.height, "height")?,
            length: required(self.length, "length")?,
            net_weight: required(self.net_weight, "net_weight")?,
            expiration_rate: required(self.expiration_rate, "expiration_rate")?,
            freezing_rate: required(self.freezing_rate, "freezing_rate")?,
            recommended_freezing_temperature: required(
                self.recommended_freezing_temperature,
                "recommended_freezing_temperature",
            )?,
            product_type_id: required(self.product_type_id, "product_type_id")?,
            seller_id: required(self.seller_id, "seller_id")?,
        })
    }

    pub fn merge(self, current: ProductData) -> ProductData {
        ProductData {
            product_code: self.product_code.unwrap_or(current.product_code),
            description: self.description.unwrap_or(current.description),
            width: self.width.unwrap_or(current.width),
            height: self.height.unwrap_or(current.height),
            length: self.length.unwrap_or(current.length),
            net_weight: self.net_weight.unwrap_or(current.net_weight),
            expiration_rate: self.expiration_rate.unwrap_or(current.expiration_rate),
            freezing_rate: self.freezing_rate.unwrap_or(current.freezing_rate),
            recommended_freezing_temperature: self
                .recommended_freezing_temperature
                .unwrap_or(current.recommended_freezing_temperature),
            product_type_id: self.product_type_id.unwrap_or(current.product_type_id),
            seller_id: self.seller_id.unwrap_or(current.seller_id),
        }
    }
}

/// Price records kept per product.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProductRecordsReport {
    pub product_id: i64,
    pub description: String,
    pub records_count: i64,
}
