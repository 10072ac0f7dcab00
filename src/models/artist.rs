//! Represents an artist, the owner of a collection of songs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::song::SongView;

#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Artist {
    pub id: Uuid,
    pub name: String,
    pub nationality: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating or replacing an artist.
#[derive(Deserialize, Clone, Debug)]
pub struct ArtistInput {
    pub name: String,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// An artist together with its songs, as seen by a particular viewer.
#[derive(Serialize, Debug)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub songs: Vec<SongView>,
}
