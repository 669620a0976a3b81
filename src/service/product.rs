//! Product rules: unique code, positive dimensions, existing seller.

use crate::domain::{Product, ProductData, ProductRecordsReport, ProductRequest};
use crate::error::AppError;
use crate::service::validation::{at_least, positive, text};
use crate::service::{report_rows, require_parent};
use crate::store::{ProductRepository, SellerRepository};
use std::sync::Arc;

pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    sellers: Arc<dyn SellerRepository>,
}

fn validate(data: &ProductData) -> Result<(), AppError> {
    text(&data.product_code, "product_code")?;
    text(&data.description, "description")?;
    positive(data.width, "width")?;
    positive(data.height, "height")?;
    positive(data.length, "length")?;
    positive(data.net_weight, "net_weight")?;
    at_least(data.expiration_rate, 0.0, "expiration_rate")?;
    at_least(data.freezing_rate, 0.0, "freezing_rate")?;
    positive(data.product_type_id, "product_type_id")
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, sellers: Arc<dyn SellerRepository>) -> Self {
        Self { products, sellers }
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, AppError> {
        self.products.get_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Product, AppError> {
        self.products
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("product", id))
    }

    pub async fn create(&self, req: ProductRequest) -> Result<Product, AppError> {
        let data = req.into_data()?;
        validate(&data)?;
        if self.products.exists_product_code(&data.product_code).await? {
            return Err(AppError::duplicate("product_code", &data.product_code));
        }
        require_parent(self.sellers.exists(data.seller_id).await?, "seller_id", data.seller_id)?;
        let product = self.products.create(&data).await?;
        tracing::info!(id = product.id, code = %product.data.product_code, "product created");
        Ok(product)
    }

    pub async fn update(&self, id: i64, req: ProductRequest) -> Result<Product, AppError> {
        let current = self.get(id).await?;
        let data = req.merge(current.data.clone());
        validate(&data)?;
        if data.product_code != current.data.product_code
            && self.products.exists_product_code(&data.product_code).await?
        {
            return Err(AppError::duplicate("product_code", &data.product_code));
        }
        if data.seller_id != current.data.seller_id {
            require_parent(self.sellers.exists(data.seller_id).await?, "seller_id", data.seller_id)?;
        }
        self.products.update(id, &data).await?;
        tracing::info!(id, "product updated");
        Ok(Product { id, data })
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.products.delete(id).await?;
        tracing::info!(id, "product deleted");
        Ok(())
    }

    pub async fn report_records(&self, id: Option<i64>) -> Result<Vec<ProductRecordsReport>, AppError> {
        let rows = self.products.report_records(id).await?;
        report_rows(rows, id, "product")
    }
}
