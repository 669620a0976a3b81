//! Buyer rules: unique card number, purchase order report.

use crate::domain::{Buyer, BuyerData, BuyerPurchaseOrdersReport, BuyerRequest};
use crate::error::AppError;
use crate::service::report_rows;
use crate::service::validation::text;
use crate::store::BuyerRepository;
use std::sync::Arc;

pub struct BuyerService {
    buyers: Arc<dyn BuyerRepository>,
}

fn validate(data: &BuyerData) -> Result<(), AppError> {
    text(&data.card_number_id, "card_number_id")?;
    text(&data.first_name, "first_name")?;
    text(&data.last_name, "last_name")
}

impl BuyerService {
    pub fn new(buyers: Arc<dyn BuyerRepository>) -> Self {
        Self { buyers }
    }

    pub async fn get_all(&self) -> Result<Vec<Buyer>, AppError> {
        self.buyers.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Buyer, AppError> {
        self.buyers
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("buyer", id))
    }

    pub async fn create(&self, req: BuyerRequest) -> Result<Buyer, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        if self.buyers.exists_card_number(&data.card_number_id).await? {
            return Err(AppError::duplicate("card_number_id", &data.card_number_id));
        }
        let buyer = self.buyers.create(&data).await?;
        tracing::info!(id = buyer.id, "buyer created");
        Ok(buyer)
    }

    pub async fn update(&self, id: i64, req: BuyerRequest) -> Result<Buyer, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.card_number_id != current.data.card_number_id
            && self.buyers.exists_card_number(&data.card_number_id).await?
        {
            return Err(AppError::duplicate("card_number_id", &data.card_number_id));
        }
        self.buyers.update(id, &data).await?;
        tracing::info!(id, "buyer updated");
        Ok(Buyer { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.buyers.delete(id).await?;
        tracing::info!(id, "buyer deleted");
        Ok(())
    }

    pub async fn report_purchase_orders(&self, id: Option<i64>) -> Result<Vec<BuyerPurchaseOrdersReport>, AppError> {
        let rows = self.buyers.report_purchase_orders(id).await?;
        report_rows(rows, id, "buyer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockBuyerRepository;
    use mockall::predicate::*;

    fn data(card: &str) -> BuyerData {
        BuyerData {
            card_number_id: card.into(),
            first_name: "Jhon".into(),
            last_name: "Doe".into(),
        }
    }

    fn request(card: &str) -> BuyerRequest {
        BuyerRequest {
            card_number_id: Some(card.into()),
            first_name: Some("Jhon".into()),
            last_name: Some("Doe".into()),
        }
    }

    #[tokio::test]
    async fn create_inserts_when_card_number_is_free() {
        let mut repo = MockBuyerRepository::new();
        repo.expect_exists_card_number()
            .withf(|card| card == "402323")
            .returning(|_| Ok(false));
        repo.expect_create()
            .withf(|d| d.card_number_id == "402323")
            .returning(|d| Ok(Buyer { id: 1, data: d.clone() }));

        let service = BuyerService::new(Arc::new(repo));
        let buyer = service.create(request("402323")).await.unwrap();
        assert_eq!(buyer.id, 1);
        assert_eq!(buyer.data, data("402323"));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_card_number() {
        let mut repo = MockBuyerRepository::new();
        repo.expect_exists_card_number().returning(|_| Ok(true));
        repo.expect_create().never();

        let service = BuyerService::new(Arc::new(repo));
        let err = service.create(request("402323")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_requires_every_field() {
        let repo = MockBuyerRepository::new();
        let service = BuyerService::new(Arc::new(repo));
        let req = BuyerRequest {
            last_name: None,
            ..request("1")
        };
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "last_name is required"));
    }

    #[tokio::test]
    async fn create_rejects_blank_names() {
        let repo = MockBuyerRepository::new();
        let service = BuyerService::new(Arc::new(repo));
        let req = BuyerRequest {
            first_name: Some("  ".into()),
            ..request("1")
        };
        assert!(matches!(service.create(req).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let mut repo = MockBuyerRepository::new();
        repo.expect_get().with(eq(9)).returning(|_| Ok(None));
        let service = BuyerService::new(Arc::new(repo));
        assert!(matches!(service.get(9).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_merges_and_skips_unchanged_unique_check() {
        let mut repo = MockBuyerRepository::new();
        repo.expect_get()
            .with(eq(3))
            .returning(|id| Ok(Some(Buyer { id, data: data("402323") })));
        repo.expect_exists_card_number().never();
        repo.expect_update()
            .withf(|id, d| *id == 3 && d.last_name == "Smith" && d.first_name == "Jhon")
            .returning(|_, _| Ok(()));

        let service = BuyerService::new(Arc::new(repo));
        let req = BuyerRequest {
            last_name: Some("Smith".into()),
            ..Default::default()
        };
        let buyer = service.update(3, req).await.unwrap();
        assert_eq!(buyer.data.last_name, "Smith");
        assert_eq!(buyer.data.card_number_id, "402323");
    }

    #[tokio::test]
    async fn update_rejects_card_number_taken_by_another_buyer() {
        let mut repo = MockBuyerRepository::new();
        repo.expect_get()
            .returning(|id| Ok(Some(Buyer { id, data: data("402323") })));
        repo.expect_exists_card_number()
            .withf(|card| card == "555")
            .returning(|_| Ok(true));
        repo.expect_update().never();

        let service = BuyerService::new(Arc::new(repo));
        let req = BuyerRequest {
            card_number_id: Some("555".into()),
            ..Default::default()
        };
        assert!(matches!(service.update(3, req).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let mut repo = MockBuyerRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_update().never();
        let service = BuyerService::new(Arc::new(repo));
        let result = service.update(4, BuyerRequest::default()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_propagates_not_found() {
        let mut repo = MockBuyerRepository::new();
        repo.expect_delete()
            .with(eq(5))
            .returning(|id| Err(AppError::not_found("buyer", id)));
        let service = BuyerService::new(Arc::new(repo));
        assert!(matches!(service.delete(5).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn report_for_unknown_buyer_is_not_found() {
        let mut repo = MockBuyerRepository::new();
        repo.expect_report_purchase_orders()
            .with(eq(Some(42)))
            .returning(|_| Ok(vec![]));
        let service = BuyerService::new(Arc::new(repo));
        assert!(matches!(
            service.report_purchase_orders(Some(42)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn report_without_id_may_be_empty() {
        let mut repo = MockBuyerRepository::new();
        repo.expect_report_purchase_orders()
            .with(eq(None))
            .returning(|_| Ok(vec![]));
        let service = BuyerService::new(Arc::new(repo));
        assert!(service.report_purchase_orders(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn report_passes_counts_through() {
        let mut repo = MockBuyerRepository::new();
        repo.expect_report_purchase_orders().returning(|_| {
            Ok(vec![BuyerPurchaseOrdersReport {
                id: 1,
                card_number_id: "402323".into(),
                first_name: "Jhon".into(),
                last_name: "Doe".into(),
                purchase_orders_count: 3,
            }])
        });
        let service = BuyerService::new(Arc::new(repo));
        let rows = service.report_purchase_orders(Some(1)).await.unwrap();
        assert_eq!(rows[0].purchase_orders_count, 3);
    }
}
