//! Seller rules: unique cid, telephone format, existing locality.

use crate::domain::{Seller, SellerData, SellerRequest};
use crate::error::AppError;
use crate::service::require_parent;
use crate::service::validation::{positive, telephone, text};
use crate::store::{LocalityRepository, SellerRepository};
use std::sync::Arc;

pub struct SellerService {
    sellers: Arc<dyn SellerRepository>,
    localities: Arc<dyn LocalityRepository>,
}

fn validate(data: &SellerData) -> Result<(), AppError> {
    positive(data.cid, "cid")?;
    text(&data.company_name, "company_name")?;
    text(&data.address, "address")?;
    telephone(&data.telephone, "telephone")
}

impl SellerService {
    pub fn new(sellers: Arc<dyn SellerRepository>, localities: Arc<dyn LocalityRepository>) -> Self {
        Self { sellers, localities }
    }

    pub async fn get_all(&self) -> Result<Vec<Seller>, AppError> {
        self.sellers.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Seller, AppError> {
        self.sellers
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("seller", id))
    }

    pub async fn create(&self, req: SellerRequest) -> Result<Seller, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        if self.sellers.exists_cid(data.cid).await? {
            return Err(AppError::duplicate("cid", data.cid));
        }
        let found = self.localities.exists(data.locality_id).await?;
        require_parent(found, "locality_id", data.locality_id)?;
        let seller = self.sellers.create(&data).await?;
        tracing::info!(id = seller.id, cid = seller.data.cid, "seller created");
        Ok(seller)
    }

    pub async fn update(&self, id: i64, req: SellerRequest) -> Result<Seller, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.cid != current.data.cid && self.sellers.exists_cid(data.cid).await? {
            return Err(AppError::duplicate("cid", data.cid));
        }
        if data.locality_id != current.data.locality_id {
            let found = self.localities.exists(data.locality_id).await?;
            require_parent(found, "locality_id", data.locality_id)?;
        }
        self.sellers.update(id, &data).await?;
        tracing::info!(id, "seller updated");
        Ok(Seller { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.sellers.delete(id).await?;
        tracing::info!(id, "seller deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockLocalityRepository, MockSellerRepository};
    use mockall::predicate::*;

    fn request() -> SellerRequest {
        SellerRequest {
            cid: Some(1234),
            company_name: Some("Frigorifico Sur".into()),
            address: Some("Av. Siempre Viva 742".into()),
            telephone: Some("+54 11 4555-1234".into()),
            locality_id: Some(1),
        }
    }

    fn service(sellers: MockSellerRepository, localities: MockLocalityRepository) -> SellerService {
        SellerService::new(Arc::new(sellers), Arc::new(localities))
    }

    #[tokio::test]
    async fn create_requires_existing_locality() {
        let mut sellers = MockSellerRepository::new();
        sellers.expect_exists_cid().with(eq(1234)).returning(|_| Ok(false));
        sellers.expect_create().never();
        let mut localities = MockLocalityRepository::new();
        localities.expect_exists().with(eq(1)).returning(|_| Ok(false));

        let err = service(sellers, localities).create(request()).await.unwrap_err();
        assert_eq!(err.to_string(), "conflict: locality_id 1 does not exist");
    }

    #[tokio::test]
    async fn create_rejects_blank_telephone() {
        let mut sellers = MockSellerRepository::new();
        sellers.expect_create().never();
        let req = SellerRequest {
            telephone: Some("        ".into()),
            ..request()
        };

        let err = service(sellers, MockLocalityRepository::new())
            .create(req)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "validation: telephone must not be blank");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_cid() {
        let mut sellers = MockSellerRepository::new();
        sellers.expect_exists_cid().returning(|_| Ok(true));
        let localities = MockLocalityRepository::new();

        let err = service(sellers, localities).create(request()).await.unwrap_err();
        assert_eq!(err.to_string(), "conflict: cid '1234' already exists");
    }

    #[tokio::test]
    async fn create_validates_telephone_before_touching_the_store() {
        let sellers = MockSellerRepository::new();
        let localities = MockLocalityRepository::new();
        let req = SellerRequest {
            telephone: Some("n/a".into()),
            ..request()
        };
        assert!(matches!(
            service(sellers, localities).create(req).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn create_returns_stored_seller() {
        let mut sellers = MockSellerRepository::new();
        sellers.expect_exists_cid().returning(|_| Ok(false));
        sellers.expect_create().returning(|d| Ok(Seller { id: 10, data: d.clone() }));
        let mut localities = MockLocalityRepository::new();
        localities.expect_exists().returning(|_| Ok(true));

        let seller = service(sellers, localities).create(request()).await.unwrap();
        assert_eq!(seller.id, 10);
        assert_eq!(seller.data.company_name, "Frigorifico Sur");
    }

    #[tokio::test]
    async fn update_checks_new_locality() {
        let mut sellers = MockSellerRepository::new();
        sellers.expect_get().returning(|id| {
            Ok(Some(Seller {
                id,
                data: request().into_data().unwrap(),
            }))
        });
        sellers.expect_update().never();
        let mut localities = MockLocalityRepository::new();
        localities.expect_exists().with(eq(8)).returning(|_| Ok(false));

        let req = SellerRequest {
            locality_id: Some(8),
            ..Default::default()
        };
        assert!(matches!(
            service(sellers, localities).update(1, req).await,
            Err(AppError::Conflict(_))
        ));
    }
}
