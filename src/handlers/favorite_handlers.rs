//! Favorite toggles.
//!
//! Both actions answer with `303 See Other` pointing at the song's artist so
//! a browser lands back on the page that shows the updated favorite state.
//! The outcome is also reported in the `x-favorite-change` header.

use crate::{
    auth::CurrentUser,
    errors::AppError,
    models::{favorite::FavoriteChange, song::Song},
    services::catalog_service::CatalogService,
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use uuid::Uuid;

pub const FAVORITE_CHANGE_HEADER: &str = "x-favorite-change";

/// POST `/songs/{id}/add_favorite`
pub async fn add_favorite(
    State(service): State<CatalogService>,
    CurrentUser(user_id): CurrentUser,
    Path(song_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (song, change) = service.add_favorite(user_id, song_id).await?;
    Ok(back_to_artist(&song, change))
}

/// DELETE `/songs/{id}/remove_favorite`
pub async fn remove_favorite(
    State(service): State<CatalogService>,
    CurrentUser(user_id): CurrentUser,
    Path(song_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (song, change) = service.remove_favorite(user_id, song_id).await?;
    Ok(back_to_artist(&song, change))
}

fn back_to_artist(song: &Song, change: FavoriteChange) -> ([(&'static str, &'static str); 1], Redirect) {
    (
        [(FAVORITE_CHANGE_HEADER, change.as_str())],
        Redirect::to(&format!("/artists/{}", song.artist_id)),
    )
}
