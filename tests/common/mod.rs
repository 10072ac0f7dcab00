#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tunr::auth::USER_ID_HEADER;
use tunr::db;
use tunr::routes::routes::app;
use tunr::services::catalog_service::CatalogService;

/// Build the full application router over a fresh in-memory database.
pub async fn build_test_app() -> Router {
    let pool = db::connect_in_memory().await.unwrap();
    app(CatalogService::new(Arc::new(pool)))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a user and return its id.
pub async fn create_user(app: &Router, email: &str) -> String {
    let json = body_json(post_json(app, "/users", serde_json::json!({ "email": email })).await).await;
    json["id"].as_str().unwrap().to_string()
}

/// Create an artist with one song per title; returns (artist_id, song_ids).
pub async fn create_artist_with_songs(
    app: &Router,
    name: &str,
    titles: &[&str],
) -> (String, Vec<String>) {
    let artist = body_json(post_json(app, "/artists", serde_json::json!({ "name": name })).await).await;
    let artist_id = artist["id"].as_str().unwrap().to_string();

    let mut song_ids = Vec::new();
    for title in titles {
        let song = body_json(
            post_json(
                app,
                &format!("/artists/{artist_id}/songs"),
                serde_json::json!({ "title": title, "album": "25" }),
            )
            .await,
        )
        .await;
        song_ids.push(song["id"].as_str().unwrap().to_string());
    }
    (artist_id, song_ids)
}
