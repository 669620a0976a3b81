//! Warehouse rules.

use crate::domain::{Warehouse, WarehouseData, WarehouseRequest};
use crate::error::AppError;
use crate::service::require_parent;
use crate::service::validation::{at_least, telephone, text};
use crate::store::{LocalityRepository, WarehouseRepository};
use std::sync::Arc;

pub struct WarehouseService {
    warehouses: Arc<dyn WarehouseRepository>,
    localities: Arc<dyn LocalityRepository>,
}

fn validate(data: &WarehouseData) -> Result<(), AppError> {
    text(&data.warehouse_code, "warehouse_code")?;
    text(&data.address, "address")?;
    telephone(&data.telephone, "telephone")?;
    at_least(data.minimum_capacity, 0, "minimum_capacity")
}

impl WarehouseService {
    pub fn new(warehouses: Arc<dyn WarehouseRepository>, localities: Arc<dyn LocalityRepository>) -> Self {
        Self { warehouses, localities }
    }

    pub async fn get_all(&self) -> Result<Vec<Warehouse>, AppError> {
        self.warehouses.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Warehouse, AppError> {
        self.warehouses
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("warehouse", id))
    }

    pub async fn create(&self, req: WarehouseRequest) -> Result<Warehouse, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        if self.warehouses.exists_code(&data.warehouse_code).await? {
            return Err(AppError::duplicate("warehouse_code", &data.warehouse_code));
        }
        require_parent(self.localities.exists(data.locality_id).await?, "locality_id", data.locality_id)?;
        let warehouse = self.warehouses.create(&data).await?;
        tracing::info!(id = warehouse.id, code = %warehouse.data.warehouse_code, "warehouse created");
        Ok(warehouse)
    }

    pub async fn update(&self, id: i64, req: WarehouseRequest) -> Result<Warehouse, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.warehouse_code != current.data.warehouse_code
            && self.warehouses.exists_code(&data.warehouse_code).await?
        {
            return Err(AppError::duplicate("warehouse_code", &data.warehouse_code));
        }
        if data.locality_id != current.data.locality_id {
            require_parent(self.localities.exists(data.locality_id).await?, "locality_id", data.locality_id)?;
        }
        self.warehouses.update(id, &data).await?;
        tracing::info!(id, "warehouse updated");
        Ok(Warehouse { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.warehouses.delete(id).await?;
        tracing::info!(id, "warehouse deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockLocalityRepository, MockWarehouseRepository};

    fn request() -> WarehouseRequest {
        WarehouseRequest {
            warehouse_code: Some("DHM".into()),
            address: Some("Monroe 860".into()),
            telephone: Some("47470000".into()),
            minimum_capacity: Some(10),
            minimum_temperature: Some(-5.0),
            locality_id: Some(1),
        }
    }

    #[tokio::test]
    async fn create_rejects_negative_capacity() {
        let service = WarehouseService::new(
            Arc::new(MockWarehouseRepository::new()),
            Arc::new(MockLocalityRepository::new()),
        );
        let req = WarehouseRequest {
            minimum_capacity: Some(-1),
            ..request()
        };
        let err = service.create(req).await.unwrap_err();
        assert_eq!(err.to_string(), "validation: minimum_capacity must be at least 0");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_code() {
        let mut warehouses = MockWarehouseRepository::new();
        warehouses
            .expect_exists_code()
            .withf(|code| code == "DHM")
            .returning(|_| Ok(true));
        let service = WarehouseService::new(Arc::new(warehouses), Arc::new(MockLocalityRepository::new()));
        assert!(matches!(service.create(request()).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_to_same_code_is_allowed() {
        let mut warehouses = MockWarehouseRepository::new();
        warehouses.expect_get().returning(|id| {
            Ok(Some(Warehouse {
                id,
                data: request().into_data().unwrap(),
            }))
        });
        warehouses.expect_exists_code().never();
        warehouses.expect_update().returning(|_, _| Ok(()));
        let service = WarehouseService::new(Arc::new(warehouses), Arc::new(MockLocalityRepository::new()));

        let req = WarehouseRequest {
            warehouse_code: Some("DHM".into()),
            minimum_temperature: Some(-10.0),
            ..Default::default()
        };
        let updated = service.update(1, req).await.unwrap();
        assert_eq!(updated.data.minimum_temperature, -10.0);
    }
}
