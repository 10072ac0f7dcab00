//! Represents a song owned by an artist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single song in the catalog.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct Song {
    pub id: Uuid,

    /// Foreign key linking to the owning artist.
    pub artist_id: Uuid,

    pub title: String,
    pub album: Option<String>,

    /// Link to a short audio preview.
    pub preview_url: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating or replacing a song.
#[derive(Deserialize, Clone, Debug)]
pub struct SongInput {
    pub title: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// A song annotated with favorite state for the requesting user.
#[derive(Serialize, Clone, FromRow, Debug)]
pub struct SongView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub song: Song,

    /// Whether the viewer has favorited this song. Always false for anonymous viewers.
    pub favorited: bool,

    /// How many users have favorited this song.
    pub favorite_count: i64,
}
