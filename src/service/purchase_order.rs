//! Purchase order rules: unique order number, existing buyer and product record.

use crate::domain::{PurchaseOrder, PurchaseOrderData, PurchaseOrderRequest};
use crate::error::AppError;
use crate::service::require_parent;
use crate::service::validation::{positive, text};
use crate::store::{BuyerRepository, ProductRecordRepository, PurchaseOrderRepository};
use std::sync::Arc;

pub struct PurchaseOrderService {
    orders: Arc<dyn PurchaseOrderRepository>,
    buyers: Arc<dyn BuyerRepository>,
    records: Arc<dyn ProductRecordRepository>,
}

fn validate(data: &PurchaseOrderData) -> Result<(), AppError> {
    text(&data.order_number, "order_number")?;
    text(&data.tracking_code, "tracking_code")?;
    positive(data.order_status_id, "order_status_id")
}

impl PurchaseOrderService {
    pub fn new(
        orders: Arc<dyn PurchaseOrderRepository>,
        buyers: Arc<dyn BuyerRepository>,
        records: Arc<dyn ProductRecordRepository>,
    ) -> Self {
        Self { orders, buyers, records }
    }

    pub async fn get_all(&self) -> Result<Vec<PurchaseOrder>, AppError> {
        self.orders.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<PurchaseOrder, AppError> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("purchase order", id))
    }

    pub async fn create(&self, req: PurchaseOrderRequest) -> Result<PurchaseOrder, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        if self.orders.exists_order_number(&data.order_number).await? {
            return Err(AppError::duplicate("order_number", &data.order_number));
        }
        require_parent(self.buyers.exists(data.buyer_id).await?, "buyer_id", data.buyer_id)?;
        let found = self.records.exists(data.product_record_id).await?;
        require_parent(found, "product_record_id", data.product_record_id)?;
        let order = self.orders.create(&data).await?;
        tracing::info!(id = order.id, buyer_id = order.data.buyer_id, "purchase order created");
        Ok(order)
    }

    pub async fn update(&self, id: i64, req: PurchaseOrderRequest) -> Result<PurchaseOrder, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.order_number != current.data.order_number
            && self.orders.exists_order_number(&data.order_number).await?
        {
            return Err(AppError::duplicate("order_number", &data.order_number));
        }
        if data.buyer_id != current.data.buyer_id {
            require_parent(self.buyers.exists(data.buyer_id).await?, "buyer_id", data.buyer_id)?;
        }
        if data.product_record_id != current.data.product_record_id {
            let found = self.records.exists(data.product_record_id).await?;
            require_parent(found, "product_record_id", data.product_record_id)?;
        }
        self.orders.update(id, &data).await?;
        tracing::info!(id, "purchase order updated");
        Ok(PurchaseOrder { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.orders.delete(id).await?;
        tracing::info!(id, "purchase order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockBuyerRepository, MockProductRecordRepository, MockPurchaseOrderRepository};
    use chrono::NaiveDate;
    use mockall::predicate::*;

    fn request() -> PurchaseOrderRequest {
        PurchaseOrderRequest {
            order_number: Some("PO-1".into()),
            order_date: NaiveDate::from_ymd_opt(2021, 4, 4),
            tracking_code: Some("abscf123".into()),
            buyer_id: Some(1),
            product_record_id: Some(1),
            order_status_id: Some(1),
        }
    }

    fn service(
        orders: MockPurchaseOrderRepository,
        buyers: MockBuyerRepository,
        records: MockProductRecordRepository,
    ) -> PurchaseOrderService {
        PurchaseOrderService::new(Arc::new(orders), Arc::new(buyers), Arc::new(records))
    }

    #[tokio::test]
    async fn create_links_buyer_and_record() {
        let mut orders = MockPurchaseOrderRepository::new();
        orders.expect_exists_order_number().returning(|_| Ok(false));
        orders
            .expect_create()
            .returning(|d| Ok(PurchaseOrder { id: 12, data: d.clone() }));
        let mut buyers = MockBuyerRepository::new();
        buyers.expect_exists().with(eq(1)).returning(|_| Ok(true));
        let mut records = MockProductRecordRepository::new();
        records.expect_exists().with(eq(1)).returning(|_| Ok(true));

        let order = service(orders, buyers, records).create(request()).await.unwrap();
        assert_eq!(order.id, 12);
        assert_eq!(order.data.tracking_code, "abscf123");
    }

    #[tokio::test]
    async fn create_with_unknown_buyer_conflicts() {
        let mut orders = MockPurchaseOrderRepository::new();
        orders.expect_exists_order_number().returning(|_| Ok(false));
        orders.expect_create().never();
        let mut buyers = MockBuyerRepository::new();
        buyers.expect_exists().returning(|_| Ok(false));

        let err = service(orders, buyers, MockProductRecordRepository::new())
            .create(request())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "conflict: buyer_id 1 does not exist");
    }

    #[tokio::test]
    async fn create_rejects_zero_status() {
        let req = PurchaseOrderRequest {
            order_status_id: Some(0),
            ..request()
        };
        let result = service(
            MockPurchaseOrderRepository::new(),
            MockBuyerRepository::new(),
            MockProductRecordRepository::new(),
        )
        .create(req)
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_missing_order() {
        let mut orders = MockPurchaseOrderRepository::new();
        orders
            .expect_delete()
            .returning(|id| Err(AppError::not_found("purchase order", id)));
        let err = service(orders, MockBuyerRepository::new(), MockProductRecordRepository::new())
            .delete(99)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "not found: purchase order with id 99 not found");
    }
}
