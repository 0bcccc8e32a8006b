//! Repository for the `videos` table.

use academy_core::types::DbId;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::video::{CreateVideo, Video};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, external_id, title, description, channel_id, channel_title, thumbnail_url, created_at";

/// Provides lookup, dedup-insert, and delete operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Find a video by its internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = ?1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a video by its source-catalog identifier.
    pub async fn find_by_external_id(
        tx: &mut Transaction<'_, Sqlite>,
        external_id: &str,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE external_id = ?1");
        sqlx::query_as::<_, Video>(&query)
            .bind(external_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Look up a video by external identifier, inserting it from `input`
    /// when absent. First writer wins: an existing row is returned as-is,
    /// its metadata untouched.
    ///
    /// Losing an insert race against `uq_videos_external_id` (another
    /// course adding the same new video) is handled by re-reading the
    /// winner's row, so the operation is idempotent.
    pub async fn find_or_create(
        tx: &mut Transaction<'_, Sqlite>,
        input: &CreateVideo,
    ) -> Result<Video, sqlx::Error> {
        if let Some(existing) = Self::find_by_external_id(tx, &input.external_id).await? {
            return Ok(existing);
        }

        let query = format!(
            "INSERT INTO videos
                (external_id, title, description, channel_id, channel_title, thumbnail_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Video>(&query)
            .bind(&input.external_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.channel_id)
            .bind(&input.channel_title)
            .bind(&input.thumbnail_url)
            .fetch_one(&mut **tx)
            .await;

        match inserted {
            Ok(video) => Ok(video),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                let winner = Self::find_by_external_id(tx, &input.external_id).await?;
                winner.ok_or(sqlx::Error::RowNotFound)
            }
            Err(err) => Err(err),
        }
    }

    /// Delete a video row outright. Membership rows referencing it follow
    /// via `ON DELETE CASCADE`. Returns `true` if a row was deleted.
    pub async fn delete(tx: &mut Transaction<'_, Sqlite>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = ?1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a video from one course, deleting the video outright when
    /// that course holds the only reference.
    ///
    /// With exactly one membership left, the video row is deleted and the
    /// membership cascades with it; otherwise only `membership_id` goes
    /// and the video stays for its other courses. Returns whether the
    /// video itself was deleted.
    pub async fn delete_if_orphaned(
        tx: &mut Transaction<'_, Sqlite>,
        video_id: DbId,
        membership_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (references,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM memberships WHERE video_id = ?1")
                .bind(video_id)
                .fetch_one(&mut **tx)
                .await?;

        if references == 1 {
            Self::delete(tx, video_id).await?;
            return Ok(true);
        }

        sqlx::query("DELETE FROM memberships WHERE id = ?1")
            .bind(membership_id)
            .execute(&mut **tx)
            .await?;
        Ok(false)
    }
}
