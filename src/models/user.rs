//! Represents an actor that can favorite songs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
///
/// Credentials and sessions live outside this service; a user here is only
/// an identity that favorites point at.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct User {
    pub id: Uuid,

    /// Normalized (trimmed, lowercase) email address. Unique.
    pub email: String,

    pub created_at: DateTime<Utc>,
}
