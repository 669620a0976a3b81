//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn not_found(kind: &str, id: i64) -> Self {
        AppError::NotFound(format!("{} with id {} not found", kind, id))
    }

    pub fn missing_parent(field: &str, id: i64) -> Self {
        AppError::Conflict(format!("{} {} does not exist", field, id))
    }

    pub fn duplicate(field: &str, value: impl std::fmt::Display) -> Self {
        AppError::Conflict(format!("{} '{}' already exists", field, value))
    }

    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Db(e) => classify_db_error(e),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        }
    }
}

fn classify_db_error(e: &sqlx::Error) -> (StatusCode, &'static str) {
    match e {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "not_found"),
        sqlx::Error::Database(db) => match db.code().as_deref() {
            Some(code) => status_for_sqlstate(code),
            None => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        },
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
    }
}

/// Integrity violations surface as conflicts: a unique key raced past the
/// service check, or a delete is blocked by rows that still reference it.
pub fn status_for_sqlstate(code: &str) -> (StatusCode, &'static str) {
    match code {
        UNIQUE_VIOLATION | FOREIGN_KEY_VIOLATION => (StatusCode::CONFLICT, "conflict"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Database errors carrying a chosen SQLSTATE, for exercising the mapping without a server.
#[cfg(test)]
pub(crate) mod testing {
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;

    #[derive(Debug)]
    struct SqlState(&'static str);

    impl std::fmt::Display for SqlState {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "sqlstate {}", self.0)
        }
    }

    impl StdError for SqlState {}

    impl DatabaseError for SqlState {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                "23505" => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    pub(crate) fn sqlstate_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(SqlState(code)))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::sqlstate_error;
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn maps_domain_errors_to_statuses() {
        assert_eq!(AppError::not_found("buyer", 1).status_and_code().0, StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Validation("x".into()).status_and_code(),
            (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
        );
        assert_eq!(AppError::duplicate("cid", 7).status_and_code().0, StatusCode::CONFLICT);
        assert_eq!(AppError::missing_parent("locality_id", 3).status_and_code().0, StatusCode::CONFLICT);
        assert_eq!(AppError::BadRequest("x".into()).status_and_code().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn row_not_found_is_404() {
        let err = AppError::Db(sqlx::Error::RowNotFound);
        assert_eq!(err.status_and_code(), (StatusCode::NOT_FOUND, "not_found"));
    }

    #[test]
    fn integrity_sqlstates_are_conflicts() {
        assert_eq!(status_for_sqlstate("23505").0, StatusCode::CONFLICT);
        assert_eq!(status_for_sqlstate("23503").0, StatusCode::CONFLICT);
        assert_eq!(status_for_sqlstate("42P01").0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn pool_errors_are_500() {
        let err = AppError::Db(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_and_code(), (StatusCode::INTERNAL_SERVER_ERROR, "database_error"));
    }

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            AppError::duplicate("card_number_id", "402").to_string(),
            "conflict: card_number_id '402' already exists"
        );
        assert_eq!(
            AppError::missing_parent("warehouse_id", 9).to_string(),
            "conflict: warehouse_id 9 does not exist"
        );
    }

    #[test]
    fn database_integrity_errors_map_to_conflict() {
        let fk = AppError::Db(sqlstate_error("23503"));
        assert_eq!(fk.status_and_code(), (StatusCode::CONFLICT, "conflict"));
        let unique = AppError::Db(sqlstate_error("23505"));
        assert_eq!(unique.status_and_code(), (StatusCode::CONFLICT, "conflict"));
        let other = AppError::Db(sqlstate_error("42P01"));
        assert_eq!(other.status_and_code(), (StatusCode::INTERNAL_SERVER_ERROR, "database_error"));
    }

    #[tokio::test]
    async fn foreign_key_violation_renders_conflict_envelope() {
        let resp = AppError::Db(sqlstate_error("23503")).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "conflict");
        assert!(json["error"].get("details").is_none());
    }
}
