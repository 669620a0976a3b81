//! Carriers: shipping companies registered per locality.

use crate::error::AppError;
use super::required;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CarrierData {
    pub cid: String,
    pub company_name: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Carrier {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: CarrierData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CarrierRequest {
    pub cid: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub telephone: Option<String>,
    pub locality_id: Option<i64>,
}

impl CarrierRequest {
    pub fn into_data(self) -> Result<CarrierData, AppError> {
        Ok(CarrierData {
            cid: required(self.cid, "cid")?,
            company_name: required(self.company_name, "company_name")?,
            address: required(self.address, "address")?,
            telephone: required(self.telephone, "telephone")?,
            locality_id: required(self.locality_id, "locality_id")?,
        })
    }

    pub fn merge(self, current: CarrierData) -> CarrierData {
        CarrierData {
            cid: self.cid.unwrap_or(current.cid),
            company_name: self.company_name.unwrap_or(current.company_name),
            address: self.address.unwrap_or(current.address),
            telephone: self.telephone.unwrap_or(current.telephone),
            locality_id: self.locality_id.unwrap_or(current.locality_id),
        }
    }
}
