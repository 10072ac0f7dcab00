//! The acting user for a request.
//!
//! Authentication itself happens upstream; by the time a request reaches
//! this service the caller's id travels in the `x-user-id` header. Handlers
//! receive it as an explicit `CurrentUser` and pass the id down.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

fn parse_header(parts: &Parts) -> Option<Result<Uuid, AppError>> {
    let value = parts.headers.get(USER_ID_HEADER)?;
    Some(
        value
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or_else(|| AppError::unauthorized(format!("malformed {} header", USER_ID_HEADER))),
    )
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parse_header(parts) {
            Some(id) => id.map(CurrentUser),
            None => Err(AppError::unauthorized(format!(
                "missing {} header",
                USER_ID_HEADER
            ))),
        }
    }
}

/// Anonymous requests are allowed; a malformed header is still rejected.
impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        parse_header(parts).transpose().map(|id| id.map(CurrentUser))
    }
}
