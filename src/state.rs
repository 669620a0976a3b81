//! Shared application state for the API routes: one service per resource.

use crate::service::{
    BuyerService, CarrierService, EmployeeService, InboundOrderService, LocalityService, ProductBatchService,
    ProductRecordService, ProductService, PurchaseOrderService, SectionService, SellerService, WarehouseService,
};
use crate::store::Repositories;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub localities: Arc<LocalityService>,
    pub sellers: Arc<SellerService>,
    pub warehouses: Arc<WarehouseService>,
    pub sections: Arc<SectionService>,
    pub products: Arc<ProductService>,
    pub product_records: Arc<ProductRecordService>,
    pub product_batches: Arc<ProductBatchService>,
    pub carriers: Arc<CarrierService>,
    pub employees: Arc<EmployeeService>,
    pub inbound_orders: Arc<InboundOrderService>,
    pub buyers: Arc<BuyerService>,
    pub purchase_orders: Arc<PurchaseOrderService>,
}

impl AppState {
    /// Wire every service to its repository and the parents it validates against.
    pub fn new(repos: Repositories) -> Self {
        AppState {
            localities: Arc::new(LocalityService::new(repos.localities.clone())),
            sellers: Arc::new(SellerService::new(repos.sellers.clone(), repos.localities.clone())),
            warehouses: Arc::new(WarehouseService::new(repos.warehouses.clone(), repos.localities.clone())),
            sections: Arc::new(SectionService::new(repos.sections.clone(), repos.warehouses.clone())),
            products: Arc::new(ProductService::new(repos.products.clone(), repos.sellers.clone())),
            product_records: Arc::new(ProductRecordService::new(repos.product_records.clone(), repos.products.clone())),
            product_batches: Arc::new(ProductBatchService::new(
                repos.product_batches.clone(),
                repos.products.clone(),
                repos.sections.clone(),
            )),
            carriers: Arc::new(CarrierService::new(repos.carriers.clone(), repos.localities.clone())),
            employees: Arc::new(EmployeeService::new(repos.employees.clone(), repos.warehouses.clone())),
            inbound_orders: Arc::new(InboundOrderService::new(
                repos.inbound_orders.clone(),
                repos.employees.clone(),
                repos.product_batches.clone(),
                repos.warehouses.clone(),
            )),
            buyers: Arc::new(BuyerService::new(repos.buyers.clone())),
            purchase_orders: Arc::new(PurchaseOrderService::new(
                repos.purchase_orders.clone(),
                repos.buyers.clone(),
                repos.product_records.clone(),
            )),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::new(Repositories::postgres(pool))
    }
}
