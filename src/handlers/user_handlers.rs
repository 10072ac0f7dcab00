//! Minimal user registration and lookup.

use crate::{
    errors::AppError,
    models::{song::Song, user::User},
    services::catalog_service::CatalogService,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateUserReq {
    pub email: String,
}

/// POST `/users`
pub async fn create_user(
    State(service): State<CatalogService>,
    payload: Result<Json<CreateUserReq>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let Json(payload) = payload?;
    let user = service.create_user(&payload.email).await?;
    tracing::info!("registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET `/users/{id}`
pub async fn get_user(
    State(service): State<CatalogService>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(service.get_user(id).await?))
}

/// GET `/users/{id}/favorites`, most recently favorited first.
pub async fn list_user_favorites(
    State(service): State<CatalogService>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Song>>, AppError> {
    Ok(Json(service.list_favorites(id).await?))
}

/// DELETE `/users/{id}`. The user's favorites are removed with them.
pub async fn delete_user(
    State(service): State<CatalogService>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
