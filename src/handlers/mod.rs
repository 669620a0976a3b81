//! HTTP handlers: decode path, query and body, call the resource service, wrap the envelope.

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

use crate::error::AppError;
use crate::response::{success_many, success_one};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

pub(crate) fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::BadRequest("invalid id".into()))
}

/// `?id=` on report routes. Kept as text so a malformed value becomes our own 400.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub id: Option<String>,
}

impl ReportQuery {
    pub fn id(&self) -> Result<Option<i64>, AppError> {
        self.id.as_deref().map(parse_id).transpose()
    }
}

/// Filtered reports answer with the single row, unfiltered ones with the list.
pub(crate) fn report_response<T: Serialize>(mut rows: Vec<T>, id: Option<i64>) -> Response {
    match id {
        Some(_) if rows.len() == 1 => success_one(rows.remove(0)).into_response(),
        _ => success_many(rows).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("1.5"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn report_query_id_is_optional() {
        assert_eq!(ReportQuery::default().id().unwrap(), None);
        let q = ReportQuery { id: Some("7".into()) };
        assert_eq!(q.id().unwrap(), Some(7));
        let q = ReportQuery { id: Some("seven".into()) };
        assert!(q.id().is_err());
    }
}
