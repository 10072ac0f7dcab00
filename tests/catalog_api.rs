//! Integration tests for health, users, artists and songs.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, create_artist_with_songs, get, post_json, send};
use serde_json::json;

#[tokio::test]
async fn health_endpoints_report_ok() {
    let app = build_test_app().await;

    let live = get(&app, "/healthz").await;
    assert_eq!(live.status(), StatusCode::OK);
    assert_eq!(body_json(live).await["status"], "ok");

    let ready = get(&app, "/readyz").await;
    assert_eq!(ready.status(), StatusCode::OK);
    let json = body_json(ready).await;
    assert_eq!(json["checks"]["sqlite"]["ok"], true);
}

#[tokio::test]
async fn duplicate_user_email_conflicts() {
    let app = build_test_app().await;

    let first = post_json(&app, "/users", json!({ "email": "fan@example.com" })).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = post_json(&app, "/users", json!({ "email": "FAN@example.com" })).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let bad = post_json(&app, "/users", json!({ "email": "nope" })).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn artist_crud_and_song_listing() {
    let app = build_test_app().await;
    let (artist, _) = create_artist_with_songs(&app, "Adele", &["Skyfall", "Hello"]).await;

    let songs = body_json(get(&app, &format!("/artists/{artist}/songs")).await).await;
    let titles: Vec<_> = songs
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Hello", "Skyfall"]);

    let updated = send(
        &app,
        Method::PUT,
        &format!("/artists/{artist}"),
        None,
        Some(json!({ "name": "Adele Adkins", "nationality": "British" })),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["nationality"], "British");

    let deleted = send(&app, Method::DELETE, &format!("/artists/{artist}"), None, None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        get(&app, &format!("/artists/{artist}")).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn song_for_missing_artist_is_404_and_blank_title_is_400() {
    let app = build_test_app().await;
    let missing = uuid::Uuid::new_v4();

    let response = post_json(
        &app,
        &format!("/artists/{missing}/songs"),
        json!({ "title": "Hello" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (artist, _) = create_artist_with_songs(&app, "Adele", &[]).await;
    let response = post_json(&app, &format!("/artists/{artist}/songs"), json!({ "title": "  " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn artist_listing_follows_cursor() {
    let app = build_test_app().await;
    for name in ["Coldplay", "Adele", "Beyonce"] {
        create_artist_with_songs(&app, name, &[]).await;
    }

    let first = body_json(get(&app, "/artists?limit=2").await).await;
    assert_eq!(first["artists"][0]["name"], "Adele");
    assert_eq!(first["artists"][1]["name"], "Beyonce");
    let cursor = first["next_cursor"].as_str().unwrap().to_string();

    let second = body_json(get(&app, &format!("/artists?limit=2&cursor={cursor}")).await).await;
    assert_eq!(second["artists"].as_array().unwrap().len(), 1);
    assert_eq!(second["artists"][0]["name"], "Coldplay");
    assert!(second["next_cursor"].is_null());

    let bad = get(&app, "/artists?cursor=garbage!").await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let app = build_test_app().await;

    let missing_name = post_json(&app, "/artists", json!({ "nationality": "British" })).await;
    assert_eq!(missing_name.status(), StatusCode::BAD_REQUEST);
    let json = body_json(missing_name).await;
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("name"));

    let no_content_type = send(&app, Method::POST, "/users", None, None).await;
    assert_eq!(no_content_type.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(no_content_type).await["status"], 400);
}
