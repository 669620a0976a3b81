//! Buyers and the purchase-order count report row.

use crate::error::AppError;
use super::required;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BuyerData {
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Buyer {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: BuyerData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BuyerRequest {
    pub card_number_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl BuyerRequest {
    pub fn into_data(self) -> Result<BuyerData, AppError> {
        Ok(BuyerData {
            card_number_id: required(self.card_number_id, "card_number_id")?,
            first_name: required(self.first_name, "first_name")?,
            last_name: required(self.last_name, "last_name")?,
        })
    }

    pub fn merge(self, current: BuyerData) -> BuyerData {
        BuyerData {
            card_number_id: self.card_number_id.unwrap_or(current.card_number_id),
            first_name: self.first_name.unwrap_or(current.first_name),
            last_name: self.last_name.unwrap_or(current.last_name),
        }
    }
}

/// Purchase orders placed per buyer.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct BuyerPurchaseOrdersReport {
    pub id: i64,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub purchase_orders_count: i64,
}
