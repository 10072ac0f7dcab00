//! src/services/catalog_service.rs
//!
//! CatalogService: artists, songs, users and the favorites join table, all
//! backed by SQLite. Favorites are the only many-to-many relation; every
//! favorite operation takes the acting user explicitly.

use crate::models::{
    artist::{Artist, ArtistDetail, ArtistInput},
    favorite::{Favorite, FavoriteChange},
    song::{Song, SongInput, SongView},
    user::User,
};
use chrono::Utc;
use sqlx::{QueryBuilder, SqlitePool, sqlite::Sqlite};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("artist `{0}` not found")]
    ArtistNotFound(Uuid),
    #[error("song `{0}` not found")]
    SongNotFound(Uuid),
    #[error("user `{0}` not found")]
    UserNotFound(Uuid),
    #[error("acting user `{0}` is not registered")]
    UnknownActor(Uuid),
    #[error("user with email `{0}` already exists")]
    UserAlreadyExists(String),
    #[error("`{field}` invalid: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Keyset cursor for artist listing: the last (name, id) already returned.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtistCursor {
    pub name: String,
    pub id: Uuid,
}

#[derive(Clone, Debug)]
pub struct ListArtistsParams {
    pub limit: usize,
    pub after: Option<ArtistCursor>,
}

#[derive(Debug)]
pub struct ListArtistsResult {
    pub artists: Vec<Artist>,
    pub next: Option<ArtistCursor>,
}

const MAX_TEXT_LEN: usize = 255;
pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 100;

const SONG_COLUMNS: &str = "id, artist_id, title, album, preview_url, created_at";
const ARTIST_COLUMNS: &str = "id, name, nationality, photo_url, created_at";

#[derive(Clone)]
pub struct CatalogService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl CatalogService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    // ----- users -----

    /// Register a user by email. Emails are compared case-insensitively.
    pub async fn create_user(&self, email: &str) -> CatalogResult<User> {
        let email = normalize_email(email)?;
        let user = User {
            id: Uuid::new_v4(),
            email,
            created_at: Utc::now(),
        };

        match sqlx::query("INSERT INTO users (id, email, created_at) VALUES (?, ?, ?)")
            .bind(user.id)
            .bind(&user.email)
            .bind(user.created_at)
            .execute(&*self.db)
            .await
        {
            Ok(_) => Ok(user),
            Err(err) if is_unique_violation(&err) => Err(CatalogError::UserAlreadyExists(user.email)),
            Err(err) => Err(CatalogError::Sqlx(err)),
        }
    }

    pub async fn get_user(&self, id: Uuid) -> CatalogResult<User> {
        sqlx::query_as::<_, User>("SELECT id, email, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.db)
            .await?
            .ok_or(CatalogError::UserNotFound(id))
    }

    /// Remove a user. Their favorites go with them.
    pub async fn delete_user(&self, id: Uuid) -> CatalogResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(CatalogError::UserNotFound(id));
        }
        Ok(())
    }

    /// Resolve the acting user. An id that does not map to a user is an
    /// authentication failure rather than a missing resource.
    async fn ensure_actor(&self, user_id: Uuid) -> CatalogResult<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(user_id)
            .fetch_one(&*self.db)
            .await?;
        if exists {
            Ok(())
        } else {
            Err(CatalogError::UnknownActor(user_id))
        }
    }

    // ----- artists -----

    pub async fn create_artist(&self, input: ArtistInput) -> CatalogResult<Artist> {
        let input = validate_artist(input)?;
        let artist = sqlx::query_as::<_, Artist>(&format!(
            "INSERT INTO artists (id, name, nationality, photo_url, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {ARTIST_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.nationality)
        .bind(&input.photo_url)
        .bind(Utc::now())
        .fetch_one(&*self.db)
        .await?;

        debug!("created artist {} ({})", artist.name, artist.id);
        Ok(artist)
    }

    pub async fn get_artist(&self, id: Uuid) -> CatalogResult<Artist> {
        sqlx::query_as::<_, Artist>(&format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = ?"))
            .bind(id)
            .fetch_optional(&*self.db)
            .await?
            .ok_or(CatalogError::ArtistNotFound(id))
    }

    /// List artists ordered by name, then id.
    ///
    /// Fetches one row past `limit` to learn whether another page exists; the
    /// returned cursor points at the last artist of this page.
    pub async fn list_artists(&self, params: ListArtistsParams) -> CatalogResult<ListArtistsResult> {
        let limit = params.limit.clamp(1, MAX_PAGE_SIZE);
        let fetch_limit = limit + 1;

        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT {ARTIST_COLUMNS} FROM artists"));
        if let Some(after) = &params.after {
            builder.push(" WHERE name > ");
            builder.push_bind(after.name.clone());
            builder.push(" OR (name = ");
            builder.push_bind(after.name.clone());
            builder.push(" AND id > ");
            builder.push_bind(after.id);
            builder.push(")");
        }
        builder.push(" ORDER BY name ASC, id ASC LIMIT ");
        builder.push_bind(fetch_limit as i64);

        let mut artists: Vec<Artist> = builder.build_query_as().fetch_all(&*self.db).await?;

        let mut next = None;
        if artists.len() == fetch_limit {
            artists.pop();
            next = artists.last().map(|a| ArtistCursor {
                name: a.name.clone(),
                id: a.id,
            });
        }

        Ok(ListArtistsResult { artists, next })
    }

    pub async fn update_artist(&self, id: Uuid, input: ArtistInput) -> CatalogResult<Artist> {
        let input = validate_artist(input)?;
        sqlx::query_as::<_, Artist>(&format!(
            "UPDATE artists SET name = ?, nationality = ?, photo_url = ?
             WHERE id = ?
             RETURNING {ARTIST_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.nationality)
        .bind(&input.photo_url)
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(CatalogError::ArtistNotFound(id))
    }

    /// Delete an artist. Songs and the favorites pointing at them cascade.
    pub async fn delete_artist(&self, id: Uuid) -> CatalogResult<()> {
        let result = sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(CatalogError::ArtistNotFound(id));
        }
        debug!("deleted artist {}", id);
        Ok(())
    }

    /// Artist plus its songs, each flagged with the viewer's favorite state.
    pub async fn get_artist_detail(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> CatalogResult<ArtistDetail> {
        let artist = self.get_artist(id).await?;

        // NULL viewer never matches a stored user_id, so anonymous viewers see false.
        let songs = sqlx::query_as::<_, SongView>(
            "SELECT s.id, s.artist_id, s.title, s.album, s.preview_url, s.created_at,
                    EXISTS(SELECT 1 FROM favorites f
                           WHERE f.song_id = s.id AND f.user_id = ?) AS favorited,
                    (SELECT COUNT(*) FROM favorites f WHERE f.song_id = s.id) AS favorite_count
             FROM songs s
             WHERE s.artist_id = ?
             ORDER BY s.title ASC, s.id ASC",
        )
        .bind(viewer)
        .bind(id)
        .fetch_all(&*self.db)
        .await?;

        Ok(ArtistDetail { artist, songs })
    }

    // ----- songs -----

    pub async fn create_song(&self, artist_id: Uuid, input: SongInput) -> CatalogResult<Song> {
        let input = validate_song(input)?;
        self.get_artist(artist_id).await?;

        let song = sqlx::query_as::<_, Song>(&format!(
            "INSERT INTO songs (id, artist_id, title, album, preview_url, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {SONG_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(artist_id)
        .bind(&input.title)
        .bind(&input.album)
        .bind(&input.preview_url)
        .bind(Utc::now())
        .fetch_one(&*self.db)
        .await?;

        debug!("created song {} ({}) for artist {}", song.title, song.id, artist_id);
        Ok(song)
    }

    pub async fn get_song(&self, id: Uuid) -> CatalogResult<Song> {
        sqlx::query_as::<_, Song>(&format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?"))
            .bind(id)
            .fetch_optional(&*self.db)
            .await?
            .ok_or(CatalogError::SongNotFound(id))
    }

    pub async fn list_songs(&self, artist_id: Uuid) -> CatalogResult<Vec<Song>> {
        self.get_artist(artist_id).await?;
        let songs = sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE artist_id = ? ORDER BY title ASC, id ASC"
        ))
        .bind(artist_id)
        .fetch_all(&*self.db)
        .await?;
        Ok(songs)
    }

    pub async fn update_song(&self, id: Uuid, input: SongInput) -> CatalogResult<Song> {
        let input = validate_song(input)?;
        sqlx::query_as::<_, Song>(&format!(
            "UPDATE songs SET title = ?, album = ?, preview_url = ?
             WHERE id = ?
             RETURNING {SONG_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.album)
        .bind(&input.preview_url)
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(CatalogError::SongNotFound(id))
    }

    pub async fn delete_song(&self, id: Uuid) -> CatalogResult<()> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(CatalogError::SongNotFound(id));
        }
        Ok(())
    }

    // ----- favorites -----

    /// Mark `song_id` as a favorite of `user_id`.
    ///
    /// Idempotent: favoriting an already-favorited song leaves the single
    /// existing row in place. Returns the song so callers can navigate to its
    /// artist.
    pub async fn add_favorite(
        &self,
        user_id: Uuid,
        song_id: Uuid,
    ) -> CatalogResult<(Song, FavoriteChange)> {
        self.ensure_actor(user_id).await?;
        let song = self.get_song(song_id).await?;

        let result = sqlx::query(
            "INSERT INTO favorites (id, user_id, song_id, created_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(user_id, song_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(song_id)
        .bind(Utc::now())
        .execute(&*self.db)
        .await?;

        let change = if result.rows_affected() == 0 {
            FavoriteChange::AlreadyFavorited
        } else {
            FavoriteChange::Added
        };
        info!(%user_id, %song_id, outcome = change.as_str(), "add favorite");
        Ok((song, change))
    }

    /// Remove `song_id` from the favorites of `user_id`.
    ///
    /// Idempotent: removing a favorite that does not exist is a no-op.
    pub async fn remove_favorite(
        &self,
        user_id: Uuid,
        song_id: Uuid,
    ) -> CatalogResult<(Song, FavoriteChange)> {
        self.ensure_actor(user_id).await?;
        let song = self.get_song(song_id).await?;

        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND song_id = ?")
            .bind(user_id)
            .bind(song_id)
            .execute(&*self.db)
            .await?;

        let change = if result.rows_affected() == 0 {
            FavoriteChange::NotFavorited
        } else {
            FavoriteChange::Removed
        };
        info!(%user_id, %song_id, outcome = change.as_str(), "remove favorite");
        Ok((song, change))
    }

    pub async fn find_favorite(&self, user_id: Uuid, song_id: Uuid) -> CatalogResult<Option<Favorite>> {
        let favorite = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, song_id, created_at
             FROM favorites WHERE user_id = ? AND song_id = ?",
        )
        .bind(user_id)
        .bind(song_id)
        .fetch_optional(&*self.db)
        .await?;
        Ok(favorite)
    }

    pub async fn is_favorited(&self, user_id: Uuid, song_id: Uuid) -> CatalogResult<bool> {
        Ok(self.find_favorite(user_id, song_id).await?.is_some())
    }

    /// Songs favorited by a user, most recently favorited first.
    pub async fn list_favorites(&self, user_id: Uuid) -> CatalogResult<Vec<Song>> {
        self.get_user(user_id).await?;
        let songs = sqlx::query_as::<_, Song>(
            "SELECT s.id, s.artist_id, s.title, s.album, s.preview_url, s.created_at
             FROM favorites f
             JOIN songs s ON s.id = f.song_id
             WHERE f.user_id = ?
             ORDER BY f.created_at DESC, s.title ASC",
        )
        .bind(user_id)
        .fetch_all(&*self.db)
        .await?;
        Ok(songs)
    }

    pub async fn count_favorites(&self, song_id: Uuid) -> CatalogResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE song_id = ?")
            .bind(song_id)
            .fetch_one(&*self.db)
            .await?;
        Ok(count)
    }
}

/// Return true if SQLx error indicates a unique constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.is_unique_violation()
    )
}

fn required_text(field: &'static str, value: &str) -> CatalogResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::Validation {
            field,
            reason: "must not be empty".into(),
        });
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(CatalogError::Validation {
            field,
            reason: format!("must be at most {} characters", MAX_TEXT_LEN),
        });
    }
    Ok(trimmed.to_string())
}

/// Blank optional text collapses to `None`.
fn optional_text(field: &'static str, value: Option<String>) -> CatalogResult<Option<String>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required_text(field, v).map(Some),
    }
}

fn optional_url(field: &'static str, value: Option<String>) -> CatalogResult<Option<String>> {
    let url = optional_text(field, value)?;
    if let Some(u) = &url {
        if !(u.starts_with("http://") || u.starts_with("https://")) {
            return Err(CatalogError::Validation {
                field,
                reason: "must be an http or https URL".into(),
            });
        }
    }
    Ok(url)
}

fn validate_artist(input: ArtistInput) -> CatalogResult<ArtistInput> {
    Ok(ArtistInput {
        name: required_text("name", &input.name)?,
        nationality: optional_text("nationality", input.nationality)?,
        photo_url: optional_url("photo_url", input.photo_url)?,
    })
}

fn validate_song(input: SongInput) -> CatalogResult<SongInput> {
    Ok(SongInput {
        title: required_text("title", &input.title)?,
        album: optional_text("album", input.album)?,
        preview_url: optional_url("preview_url", input.preview_url)?,
    })
}

fn normalize_email(email: &str) -> CatalogResult<String> {
    let email = required_text("email", email)?.to_lowercase();
    let invalid = || CatalogError::Validation {
        field: "email",
        reason: "must look like local@domain".into(),
    };
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    Ok(email)
}
