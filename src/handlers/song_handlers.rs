//! Song CRUD. Creation and listing are nested under the owning artist.

use crate::{
    errors::AppError,
    models::song::{Song, SongInput},
    services::catalog_service::CatalogService,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use uuid::Uuid;

/// GET `/artists/{id}/songs`
pub async fn list_songs(
    State(service): State<CatalogService>,
    Path(artist_id): Path<Uuid>,
) -> Result<Json<Vec<Song>>, AppError> {
    Ok(Json(service.list_songs(artist_id).await?))
}

/// POST `/artists/{id}/songs`
pub async fn create_song(
    State(service): State<CatalogService>,
    Path(artist_id): Path<Uuid>,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Song>), AppError> {
    let Json(payload) = payload?;
    let song = service.create_song(artist_id, payload).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

/// GET `/songs/{id}`
pub async fn get_song(
    State(service): State<CatalogService>,
    Path(id): Path<Uuid>,
) -> Result<Json<Song>, AppError> {
    Ok(Json(service.get_song(id).await?))
}

/// PUT `/songs/{id}`
pub async fn update_song(
    State(service): State<CatalogService>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> Result<Json<Song>, AppError> {
    let Json(payload) = payload?;
    Ok(Json(service.update_song(id, payload).await?))
}

/// DELETE `/songs/{id}`. Favorites of the song are removed with it.
pub async fn delete_song(
    State(service): State<CatalogService>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service.delete_song(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
