//! Core data models for the music catalog.
//!
//! These entities map to the `users`, `artists`, `songs` and `favorites`
//! tables via `sqlx::FromRow` and serialize as JSON via `serde`.

pub mod artist;
pub mod favorite;
pub mod song;
pub mod user;
