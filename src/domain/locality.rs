//! Localities and their seller/carrier count report rows.

use crate::error::AppError;
use super::required;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LocalityData {
    pub locality_name: String,
    pub province_name: String,
    pub country_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Locality {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub data: LocalityData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LocalityRequest {
    pub locality_name: Option<String>,
    pub province_name: Option<String>,
    pub country_name: Option<String>,
}

impl LocalityRequest {
    pub fn into_data(self) -> Result<LocalityData, AppError> {
        Ok(LocalityData {
            locality_name: required(self.locality_name, "locality_name")?,
            province_name: required(self.province_name, "province_name")?,
            country_name: required(self.country_name, "country_name")?,
        })
    }

    pub fn merge(self, current: LocalityData) -> LocalityData {
        LocalityData {
            locality_name: self.locality_name.unwrap_or(current.locality_name),
            province_name: self.province_name.unwrap_or(current.province_name),
            country_name: self.country_name.unwrap_or(current.country_name),
        }
    }
}

/// Sellers registered per locality.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct LocalitySellersReport {
    pub locality_id: i64,
    pub locality_name: String,
    pub sellers_count: i64,
}

/// Carriers registered per locality.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct LocalityCarriersReport {
    pub locality_id: i64,
    pub locality_name: String,
    pub carriers_count: i64,
}
