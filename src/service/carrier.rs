//! Carrier rules: unique cid, telephone format, existing locality.

use crate::domain::{Carrier, CarrierData, CarrierRequest};
use crate::error::AppError;
use crate::service::require_parent;
use crate::service::validation::{telephone, text};
use crate::store::{CarrierRepository, LocalityRepository};
use std::sync::Arc;

pub struct CarrierService {
    carriers: Arc<dyn CarrierRepository>,
    localities: Arc<dyn LocalityRepository>,
}

fn validate(data: &CarrierData) -> Result<(), AppError> {
    text(&data.cid, "cid")?;
    text(&data.company_name, "company_name")?;
    text(&data.address, "address")?;
    telephone(&data.telephone, "telephone")
}

impl CarrierService {
    pub fn new(carriers: Arc<dyn CarrierRepository>, localities: Arc<dyn LocalityRepository>) -> Self {
        Self { carriers, localities }
    }

    pub async fn get_all(&self) -> Result<Vec<Carrier>, AppError> {
        self.carriers.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Carrier, AppError> {
        self.carriers
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("carrier", id))
    }

    pub async fn create(&self, req: CarrierRequest) -> Result<Carrier, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        if self.carriers.exists_cid(&data.cid).await? {
            return Err(AppError::duplicate("cid", &data.cid));
        }
        require_parent(self.localities.exists(data.locality_id).await?, "locality_id", data.locality_id)?;
        let carrier = self.carriers.create(&data).await?;
        tracing::info!(id = carrier.id, cid = %carrier.data.cid, "carrier created");
        Ok(carrier)
    }

    pub async fn update(&self, id: i64, req: CarrierRequest) -> Result<Carrier, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.cid != current.data.cid && self.carriers.exists_cid(&data.cid).await? {
            return Err(AppError::duplicate("cid", &data.cid));
        }
        if data.locality_id != current.data.locality_id {
            require_parent(self.localities.exists(data.locality_id).await?, "locality_id", data.locality_id)?;
        }
        self.carriers.update(id, &data).await?;
        tracing::info!(id, "carrier updated");
        Ok(Carrier { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.carriers.delete(id).await?;
        tracing::info!(id, "carrier deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockCarrierRepository, MockLocalityRepository};

    fn request() -> CarrierRequest {
        CarrierRequest {
            cid: Some("CID#1".into()),
            company_name: Some("Transportes Norte".into()),
            address: Some("Corrientes 800".into()),
            telephone: Some("4567-4567".into()),
            locality_id: Some(1),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_cid() {
        let mut carriers = MockCarrierRepository::new();
        carriers
            .expect_exists_cid()
            .withf(|cid| cid == "CID#1")
            .returning(|_| Ok(true));
        carriers.expect_create().never();
        let service = CarrierService::new(Arc::new(carriers), Arc::new(MockLocalityRepository::new()));
        let err = service.create(request()).await.unwrap_err();
        assert_eq!(err.to_string(), "conflict: cid 'CID#1' already exists");
    }

    #[tokio::test]
    async fn create_missing_field() {
        let service = CarrierService::new(
            Arc::new(MockCarrierRepository::new()),
            Arc::new(MockLocalityRepository::new()),
        );
        let req = CarrierRequest {
            company_name: None,
            ..request()
        };
        let err = service.create(req).await.unwrap_err();
        assert_eq!(err.to_string(), "validation: company_name is required");
    }

    #[tokio::test]
    async fn create_with_known_locality() {
        let mut carriers = MockCarrierRepository::new();
        carriers.expect_exists_cid().returning(|_| Ok(false));
        carriers
            .expect_create()
            .returning(|d| Ok(Carrier { id: 3, data: d.clone() }));
        let mut localities = MockLocalityRepository::new();
        localities.expect_exists().returning(|_| Ok(true));

        let service = CarrierService::new(Arc::new(carriers), Arc::new(localities));
        let carrier = service.create(request()).await.unwrap();
        assert_eq!(carrier.id, 3);
        assert_eq!(carrier.data.locality_id, 1);
    }
}
