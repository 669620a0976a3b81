//! Resource services: validation, uniqueness and parent checks in front of the store.

mod buyer;
mod carrier;
mod employee;
mod inbound_order;
mod locality;
mod product;
mod product_batch;
mod product_record;
mod purchase_order;
mod section;
mod seller;
pub mod validation;
mod warehouse;

pub use buyer::BuyerService;
pub use carrier::CarrierService;
pub use employee::EmployeeService;
pub use inbound_order::InboundOrderService;
pub use locality::LocalityService;
pub use product::ProductService;
pub use product_batch::ProductBatchService;
pub use product_record::ProductRecordService;
pub use purchase_order::PurchaseOrderService;
pub use section::SectionService;
pub use seller::SellerService;
pub use warehouse::WarehouseService;

use crate::error::AppError;

/// A referenced row must exist before a child can point at it.
pub(crate) fn require_parent(found: bool, field: &str, id: i64) -> Result<(), AppError> {
    if !found {
        return Err(AppError::missing_parent(field, id));
    }
    Ok(())
}

/// A report filtered by id with no rows means the id is unknown.
pub(crate) fn report_rows<T>(rows: Vec<T>, id: Option<i64>, kind: &str) -> Result<Vec<T>, AppError> {
    match id {
        Some(id) if rows.is_empty() => Err(AppError::not_found(kind, id)),
        _ => Ok(rows),
    }
}
