//! The join row linking one user to one song.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's favorite song. At most one row exists per (user, song) pair.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub song_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a favorite toggle.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteChange {
    Added,
    AlreadyFavorited,
    Removed,
    NotFavorited,
}

impl FavoriteChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteChange::Added => "added",
            FavoriteChange::AlreadyFavorited => "already_favorited",
            FavoriteChange::Removed => "removed",
            FavoriteChange::NotFavorited => "not_favorited",
        }
    }
}
