use crate::services::catalog_service::CatalogError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// A lightweight wrapper for general errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 400 Bad Request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// Shortcut for 401 Unauthorized
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}

/// Malformed or incomplete request bodies keep the JSON error shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let status = match &err {
            CatalogError::ArtistNotFound(_)
            | CatalogError::SongNotFound(_)
            | CatalogError::UserNotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::UnknownActor(_) => StatusCode::UNAUTHORIZED,
            CatalogError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            CatalogError::Validation { .. } => StatusCode::BAD_REQUEST,
            CatalogError::Sqlx(db_err) => {
                tracing::error!("database error: {}", db_err);
                return AppError::internal("internal database error");
            }
        };
        AppError::new(status, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn catalog_errors_map_to_statuses() {
        let cases = [
            (CatalogError::SongNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (CatalogError::UnknownActor(Uuid::nil()), StatusCode::UNAUTHORIZED),
            (CatalogError::UserAlreadyExists("a@b".into()), StatusCode::CONFLICT),
            (
                CatalogError::Validation {
                    field: "title",
                    reason: "must not be empty".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (CatalogError::Sqlx(sqlx::Error::PoolTimedOut), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn database_details_stay_out_of_the_message() {
        let err = AppError::from(CatalogError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(err.message, "internal database error");
    }
}
