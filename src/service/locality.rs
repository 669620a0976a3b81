//! Locality rules: unique name within a province, seller and carrier reports.

use crate::domain::{Locality, LocalityCarriersReport, LocalityData, LocalityRequest, LocalitySellersReport};
use crate::error::AppError;
use crate::service::report_rows;
use crate::service::validation::text;
use crate::store::LocalityRepository;
use std::sync::Arc;

pub struct LocalityService {
    localities: Arc<dyn LocalityRepository>,
}

fn validate(data: &LocalityData) -> Result<(), AppError> {
    text(&data.locality_name, "locality_name")?;
    text(&data.province_name, "province_name")?;
    text(&data.country_name, "country_name")
}

impl LocalityService {
    pub fn new(localities: Arc<dyn LocalityRepository>) -> Self {
        Self { localities }
    }

    pub async fn get_all(&self) -> Result<Vec<Locality>, AppError> {
        self.localities.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Locality, AppError> {
        self.localities
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("locality", id))
    }

    async fn ensure_name_free(&self, data: &LocalityData) -> Result<(), AppError> {
        if self
            .localities
            .exists_name(&data.locality_name, &data.province_name)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "locality '{}' already exists in '{}'",
                data.locality_name, data.province_name
            )));
        }
        Ok(())
    }

    pub async fn create(&self, req: LocalityRequest) -> Result<Locality, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        self.ensure_name_free(&data).await?;
        let locality = self.localities.create(&data).await?;
        tracing::info!(id = locality.id, "locality created");
        Ok(locality)
    }

    pub async fn update(&self, id: i64, req: LocalityRequest) -> Result<Locality, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.locality_name != current.data.locality_name || data.province_name != current.data.province_name {
            self.ensure_name_free(&data).await?;
        }
        self.localities.update(id, &data).await?;
        tracing::info!(id, "locality updated");
        Ok(Locality { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.localities.delete(id).await?;
        tracing::info!(id, "locality deleted");
        Ok(())
    }

    pub async fn report_sellers(&self, id: Option<i64>) -> Result<Vec<LocalitySellersReport>, AppError> {
        let rows = self.localities.report_sellers(id).await?;
        report_rows(rows, id, "locality")
    }

    pub async fn report_carriers(&self, id: Option<i64>) -> Result<Vec<LocalityCarriersReport>, AppError> {
        let rows = self.localities.report_carriers(id).await?;
        report_rows(rows, id, "locality")
    }
}
