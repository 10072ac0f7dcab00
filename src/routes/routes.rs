//! Defines routes for the catalog and the favorite toggles.
//!
//! ## Structure
//! - **Users**
//!   - `POST   /users`                      register
//!   - `GET    /users/{id}`                 lookup
//!   - `DELETE /users/{id}`                 delete (drops their favorites)
//!   - `GET    /users/{id}/favorites`       favorited songs
//!
//! - **Artists**
//!   - `GET    /artists`                    list (`?limit=&cursor=`)
//!   - `POST   /artists`                    create
//!   - `GET    /artists/{id}`               detail with songs and favorite flags
//!   - `PUT    /artists/{id}`               replace
//!   - `DELETE /artists/{id}`               delete (cascades)
//!   - `GET    /artists/{id}/songs`         list songs
//!   - `POST   /artists/{id}/songs`         create song
//!
//! - **Songs**
//!   - `GET|PUT|DELETE /songs/{id}`
//!   - `POST   /songs/{id}/add_favorite`    requires `x-user-id`
//!   - `DELETE /songs/{id}/remove_favorite` requires `x-user-id`

use crate::{
    handlers::{
        artist_handlers::{create_artist, delete_artist, get_artist, list_artists, update_artist},
        favorite_handlers::{add_favorite, remove_favorite},
        health_handlers::{healthz, readyz},
        song_handlers::{create_song, delete_song, get_song, list_songs, update_song},
        user_handlers::{create_user, delete_user, get_user, list_user_favorites},
    },
    services::catalog_service::CatalogService,
};
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

/// Build the router for every endpoint.
///
/// The router carries shared state (`CatalogService`) to all handlers.
pub fn routes() -> Router<CatalogService> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/users/{id}/favorites", get(list_user_favorites))
        .route("/artists", get(list_artists).post(create_artist))
        .route(
            "/artists/{id}",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
        .route("/artists/{id}/songs", get(list_songs).post(create_song))
        .route(
            "/songs/{id}",
            get(get_song).put(update_song).delete(delete_song),
        )
        .route("/songs/{id}/add_favorite", post(add_favorite))
        .route("/songs/{id}/remove_favorite", delete(remove_favorite))
}

/// The complete application: routes, request tracing and state.
pub fn app(service: CatalogService) -> Router {
    routes().layer(TraceLayer::new_for_http()).with_state(service)
}
