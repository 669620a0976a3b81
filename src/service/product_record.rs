//! Product record rules.

use crate::domain::{ProductRecord, ProductRecordData, ProductRecordRequest};
use crate::error::AppError;
use crate::service::require_parent;
use crate::service::validation::at_least;
use crate::store::{ProductRecordRepository, ProductRepository};
use std::sync::Arc;

pub struct ProductRecordService {
    records: Arc<dyn ProductRecordRepository>,
    products: Arc<dyn ProductRepository>,
}

fn validate(data: &ProductRecordData) -> Result<(), AppError> {
    at_least(data.purchase_price, 0.0, "purchase_price")?;
    at_least(data.sale_price, 0.0, "sale_price")
}

impl ProductRecordService {
    pub fn new(records: Arc<dyn ProductRecordRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { records, products }
    }

    pub async fn get_all(&self) -> Result<Vec<ProductRecord>, AppError> {
        self.records.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<ProductRecord, AppError> {
        self.records
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("product record", id))
    }

    pub async fn create(&self, req: ProductRecordRequest) -> Result<ProductRecord, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        require_parent(self.products.exists(data.product_id).await?, "product_id", data.product_id)?;
        let record = self.records.create(&data).await?;
        tracing::info!(id = record.id, product_id = record.data.product_id, "product record created");
        Ok(record)
    }

    pub async fn update(&self, id: i64, req: ProductRecordRequest) -> Result<ProductRecord, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.product_id != current.data.product_id {
            require_parent(self.products.exists(data.product_id).await?, "product_id", data.product_id)?;
        }
        self.records.update(id, &data).await?;
        tracing::info!(id, "product record updated");
        Ok(ProductRecord { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.records.delete(id).await?;
        tracing::info!(id, "product record deleted");
        Ok(())
    }
}
