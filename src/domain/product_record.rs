//! Price records for a product.

use crate::error::AppError;
use super::required;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRecordData {
    pub last_update_date: NaiveDateTime,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub product_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: ProductRecordData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductRecordRequest {
    pub last_update_date: Option<NaiveDateTime>,
    pub purchase_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub product_id: Option<i64>,
}

impl ProductRecordRequest {
    pub fn into_data(self) -> Result<ProductRecordData, AppError> {
        Ok(ProductRecordData {
            last_update_date: required(self.last_update_date, "last_update_date")?,
            purchase_price: required(self.purchase_price, "purchase_price")?,
            sale_price: required(self.sale_price, "sale_price")?,
            product_id: required(self.product_id, "product_id")?,
        })
    }

    pub fn merge(self, current: ProductRecordData) -> ProductRecordData {
        ProductRecordData {
            last_update_date: self.last_update_date.unwrap_or(current.last_update_date),
            purchase_price: self.purchase_price.unwrap_or(current.purchase_price),
            sale_price: self.sale_price.unwrap_or(current.sale_price),
            product_id: self.product_id.unwrap_or(current.product_id),
        }
    }
}
