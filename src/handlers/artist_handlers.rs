//! HTTP handlers for artists.
//! Listing is keyset-paginated with an opaque cursor; the detail view carries
//! the requesting user's favorite flags for every song.

use crate::{
    auth::CurrentUser,
    errors::AppError,
    models::artist::{Artist, ArtistDetail, ArtistInput},
    services::catalog_service::{
        ArtistCursor, CatalogService, DEFAULT_PAGE_SIZE, ListArtistsParams,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query params accepted by `GET /artists`.
#[derive(Debug, Deserialize)]
pub struct ListArtistsQuery {
    pub limit: Option<usize>,
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListArtistsResponse {
    pub artists: Vec<Artist>,
    pub next_cursor: Option<String>,
}

/// GET `/artists`. Supports `?limit=&cursor=`.
pub async fn list_artists(
    State(service): State<CatalogService>,
    Query(q): Query<ListArtistsQuery>,
) -> Result<Json<ListArtistsResponse>, AppError> {
    let after = q
        .cursor
        .as_deref()
        .map(|c| {
            decode_cursor(c).ok_or_else(|| AppError::bad_request("invalid cursor"))
        })
        .transpose()?;

    let params = ListArtistsParams {
        limit: q.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        after,
    };
    let result = service.list_artists(params).await?;

    Ok(Json(ListArtistsResponse {
        artists: result.artists,
        next_cursor: result.next.as_ref().map(encode_cursor),
    }))
}

/// POST `/artists`
pub async fn create_artist(
    State(service): State<CatalogService>,
    payload: Result<Json<ArtistInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Artist>), AppError> {
    let Json(payload) = payload?;
    let artist = service.create_artist(payload).await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

/// GET `/artists/{id}`. Anonymous viewers see every song as not favorited.
pub async fn get_artist(
    State(service): State<CatalogService>,
    viewer: Option<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtistDetail>, AppError> {
    let detail = service
        .get_artist_detail(id, viewer.map(|CurrentUser(user_id)| user_id))
        .await?;
    Ok(Json(detail))
}

/// PUT `/artists/{id}`
pub async fn update_artist(
    State(service): State<CatalogService>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ArtistInput>, JsonRejection>,
) -> Result<Json<Artist>, AppError> {
    let Json(payload) = payload?;
    Ok(Json(service.update_artist(id, payload).await?))
}

/// DELETE `/artists/{id}`. Songs and their favorites go with it.
pub async fn delete_artist(
    State(service): State<CatalogService>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service.delete_artist(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Cursor layout before encoding: "<uuid>:<name>". The uuid has a fixed
// width, so the name may contain ':' freely.
fn encode_cursor(cursor: &ArtistCursor) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(format!("{}:{}", cursor.id, cursor.name))
}

fn decode_cursor(token: &str) -> Option<ArtistCursor> {
    let bytes = general_purpose::URL_SAFE_NO_PAD.decode(token).ok()?;
    let raw = String::from_utf8(bytes).ok()?;
    let (id, name) = raw.split_once(':')?;
    Some(ArtistCursor {
        id: Uuid::parse_str(id).ok()?,
        name: name.to_string(),
    })
}
