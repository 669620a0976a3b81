//! Resource records, request bodies and report rows.
//!
//! Every resource follows the same split: `XData` holds the writable
//! columns, `X` adds the database id, and `XRequest` is the JSON body
//! accepted by both create (all fields required) and update (fields
//! optional, merged over the stored row).

pub mod buyer;
pub mod carrier;
pub mod employee;
pub mod inbound_order;
pub mod locality;
pub mod product;
pub mod product_batch;
pub mod product_record;
pub mod purchase_order;
pub mod section;
pub mod seller;
pub mod warehouse;

pub use buyer::*;
pub use carrier::*;
pub use employee::*;
pub use inbound_order::*;
pub use locality::*;
pub use product::*;
pub use product_batch::*;
pub use product_record::*;
pub use purchase_order::*;
pub use section::*;
pub use seller::*;
pub use warehouse::*;

use crate::error::AppError;

/// Unwrap a field that must be present on create.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_names_missing_field() {
        let err = required::<String>(None, "first_name").unwrap_err();
        assert_eq!(err.to_string(), "validation: first_name is required");
        assert_eq!(required(Some(3), "x").unwrap(), 3);
    }
}
