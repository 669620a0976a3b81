//! Product batch rules: quantity, date and hour bounds, existing product and section.

use crate::domain::{ProductBatch, ProductBatchData, ProductBatchRequest};
use crate::error::AppError;
use crate::service::require_parent;
use crate::service::validation::{at_least, in_range, not_greater, positive};
use crate::store::{ProductBatchRepository, ProductRepository, SectionRepository};
use std::sync::Arc;

pub struct ProductBatchService {
    batches: Arc<dyn ProductBatchRepository>,
    products: Arc<dyn ProductRepository>,
    sections: Arc<dyn SectionRepository>,
}

fn validate(data: &ProductBatchData) -> Result<(), AppError> {
    positive(data.batch_number, "batch_number")?;
    at_least(data.current_quantity, 0, "current_quantity")?;
    at_least(data.initial_quantity, 0, "initial_quantity")?;
    not_greater(data.current_quantity, "current_quantity", data.initial_quantity, "initial_quantity")?;
    in_range(data.manufacturing_hour, 0, 23, "manufacturing_hour")?;
    not_greater(data.manufacturing_date, "manufacturing_date", data.due_date, "due_date")
}

impl ProductBatchService {
    pub fn new(
        batches: Arc<dyn ProductBatchRepository>,
        products: Arc<dyn ProductRepository>,
        sections: Arc<dyn SectionRepository>,
    ) -> Self {
        Self {
            batches,
            products,
            sections,
        }
    }

    pub async fn get_all(&self) -> Result<Vec<ProductBatch>, AppError> {
        self.batches.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<ProductBatch, AppError> {
        self.batches
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("product batch", id))
    }

    async fn check_parents(&self, data: &ProductBatchData, current: Option<&ProductBatchData>) -> Result<(), AppError> {
        if current.map_or(true, |c| c.product_id != data.product_id) {
            require_parent(self.products.exists(data.product_id).await?, "product_id", data.product_id)?;
        }
        if current.map_or(true, |c| c.section_id != data.section_id) {
            require_parent(self.sections.exists(data.section_id).await?, "section_id", data.section_id)?;
        }
        Ok(())
    }

    pub async fn create(&self, req: ProductBatchRequest) -> Result<ProductBatch, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        if self.batches.exists_batch_number(data.batch_number).await? {
            return Err(AppError::duplicate("batch_number", data.batch_number));
        }
        self.check_parents(&data, None).await?;
        let batch = self.batches.create(&data).await?;
        tracing::info!(id = batch.id, batch_number = batch.data.batch_number, "product batch created");
        Ok(batch)
    }

    pub async fn update(&self, id: i64, req: ProductBatchRequest) -> Result<ProductBatch, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.batch_number != current.data.batch_number
            && self.batches.exists_batch_number(data.batch_number).await?
        {
            return Err(AppError::duplicate("batch_number", data.batch_number));
        }
        self.check_parents(&data, Some(&current.data)).await?;
        self.batches.update(id, &data).await?;
        tracing::info!(id, "product batch updated");
        Ok(ProductBatch { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.batches.delete(id).await?;
        tracing::info!(id, "product batch deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockProductBatchRepository, MockProductRepository, MockSectionRepository};
    use chrono::NaiveDate;
    use mockall::predicate::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request() -> ProductBatchRequest {
        ProductBatchRequest {
            batch_number: Some(111),
            current_quantity: Some(200),
            initial_quantity: Some(300),
            current_temperature: Some(20.0),
            minimum_temperature: Some(-5.0),
            due_date: Some(date(2022, 4, 4)),
            manufacturing_date: Some(date(2020, 4, 4)),
            manufacturing_hour: Some(10),
            product_id: Some(1),
            section_id: Some(1),
        }
    }

    fn service(
        batches: MockProductBatchRepository,
        products: MockProductRepository,
        sections: MockSectionRepository,
    ) -> ProductBatchService {
        ProductBatchService::new(Arc::new(batches), Arc::new(products), Arc::new(sections))
    }

    #[test]
    fn dates_and_quantities_are_ordered() {
        let ok = request().into_data().unwrap();
        assert!(validate(&ok).is_ok());
        let expired_before_made = ProductBatchData {
            due_date: date(2019, 1, 1),
            ..ok.clone()
        };
        assert!(validate(&expired_before_made).is_err());
        let grew = ProductBatchData {
            current_quantity: 400,
            ..ok.clone()
        };
        assert!(validate(&grew).is_err());
        let bad_hour = ProductBatchData {
            manufacturing_hour: 24,
            ..ok
        };
        assert!(validate(&bad_hour).is_err());
    }

    #[tokio::test]
    async fn create_checks_product_and_section() {
        let mut batches = MockProductBatchRepository::new();
        batches.expect_exists_batch_number().with(eq(111)).returning(|_| Ok(false));
        batches.expect_create().never();
        let mut products = MockProductRepository::new();
        products.expect_exists().with(eq(1)).returning(|_| Ok(true));
        let mut sections = MockSectionRepository::new();
        sections.expect_exists().with(eq(1)).returning(|_| Ok(false));

        let err = service(batches, products, sections).create(request()).await.unwrap_err();
        assert_eq!(err.to_string(), "conflict: section_id 1 does not exist");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_batch_number() {
        let mut batches = MockProductBatchRepository::new();
        batches.expect_exists_batch_number().returning(|_| Ok(true));
        let err = service(batches, MockProductRepository::new(), MockSectionRepository::new())
            .create(request())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "conflict: batch_number '111' already exists");
    }

    #[tokio::test]
    async fn update_only_rechecks_changed_parent() {
        let mut batches = MockProductBatchRepository::new();
        batches.expect_get().returning(|id| {
            Ok(Some(ProductBatch {
                id,
                data: request().into_data().unwrap(),
            }))
        });
        batches.expect_update().returning(|_, _| Ok(()));
        let mut products = MockProductRepository::new();
        products.expect_exists().never();
        let mut sections = MockSectionRepository::new();
        sections.expect_exists().with(eq(2)).returning(|_| Ok(true));

        let req = ProductBatchRequest {
            section_id: Some(2),
            current_quantity: Some(150),
            ..Default::default()
        };
        let batch = service(batches, products, sections).update(9, req).await.unwrap();
        assert_eq!(batch.id, 9);
        assert_eq!(batch.data.section_id, 2);
        assert_eq!(batch.data.current_quantity, 150);
    }
}
