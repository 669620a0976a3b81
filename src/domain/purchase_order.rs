//! Purchase orders placed by buyers.

use crate::error::AppError;
use super::required;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PurchaseOrderData {
    pub order_number: String,
    pub order_date: NaiveDate,
    pub tracking_code: String,
    pub buyer_id: i64,
    pub product_record_id: i64,
    pub order_status_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PurchaseOrder {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: PurchaseOrderData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PurchaseOrderRequest {
    pub order_number: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub tracking_code: Option<String>,
    pub buyer_id: Option<i64>,
    pub product_record_id: Option<i64>,
    pub order_status_id: Option<i64>,
}

impl PurchaseOrderRequest {
    pub fn into_data(self) -> Result<PurchaseOrderData, AppError> {
        Ok(PurchaseOrderData {
            order_number: required(self.order_number, "order_number")?,
            order_date: required(self.order_date, "order_date")?,
            tracking_code: required(self.tracking_code, "tracking_code")?,
            buyer_id: required(self.buyer_id, "buyer_id")?,
            product_record_id: required(self.product_record_id, "product_record_id")?,
            order_status_id: required(self.order_status_id, "order_status_id")?,
        })
    }

    pub fn merge(self, current: PurchaseOrderData) -> PurchaseOrderData {
        PurchaseOrderData {
            order_number: self.order_number.unwrap_or(current.order_number),
            order_date: self.order_date.unwrap_or(current.order_date),
            tracking_code: self.tracking_code.unwrap_or(current.tracking_code),
            buyer_id: self.buyer_id.unwrap_or(current.buyer_id),
            product_record_id: self.product_record_id.unwrap_or(current.product_record_id),
            order_status_id: self.order_status_id.unwrap_or(current.order_status_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let req: PurchaseOrderRequest = serde_json::from_str(
            r#"{"order_number":"PO-1","order_date":"2021-04-04","tracking_code":"abscf123",
                "buyer_id":1,"product_record_id":1,"order_status_id":1}"#,
        )
        .unwrap();
        let data = req.into_data().unwrap();
        assert_eq!(data.order_date, NaiveDate::from_ymd_opt(2021, 4, 4).unwrap());
    }

    #[test]
    fn rejects_malformed_date() {
        let res: Result<PurchaseOrderRequest, _> = serde_json::from_str(r#"{"order_date":"04/04/2021"}"#);
        assert!(res.is_err());
    }
}
