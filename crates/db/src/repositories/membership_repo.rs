//! Repository for the `memberships` table: the course video ledger.
//!
//! Every mutating method here takes an open transaction. The caller (the
//! service layer) brackets each logical operation in one transaction per
//! course so a failure at any step rolls the whole ledger back to the
//! previous contiguous state.

use academy_core::sequencing::SWAP_SENTINEL;
use academy_core::types::DbId;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::membership::{CourseVideo, Membership};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, video_id, position, created_at";

/// Column list for the joined course-video listing.
const LISTING_COLUMNS: &str = "m.id AS membership_id, m.position, v.id AS video_id, \
    v.external_id, v.title, v.description, v.channel_id, v.channel_title, v.thumbnail_url";

/// Provides the sequenced membership operations for courses.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Append a membership at the end of the course's sequence.
    ///
    /// The position is computed as `COUNT(course) + 1` inside the same
    /// statement, so under the caller's transaction the appended row
    /// always lands at the current tail.
    pub async fn append(
        tx: &mut Transaction<'_, Sqlite>,
        course_id: DbId,
        video_id: DbId,
    ) -> Result<Membership, sqlx::Error> {
        let query = format!(
            "INSERT INTO memberships (course_id, video_id, position)
             VALUES (?1, ?2, (SELECT COUNT(*) + 1 FROM memberships WHERE course_id = ?1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(course_id)
            .bind(video_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a membership by its surrogate ID.
    pub async fn find_by_id(
        tx: &mut Transaction<'_, Sqlite>,
        id: DbId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM memberships WHERE id = ?1");
        sqlx::query_as::<_, Membership>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find the membership linking a course and a video, if any.
    pub async fn find_by_course_and_video(
        tx: &mut Transaction<'_, Sqlite>,
        course_id: DbId,
        video_id: DbId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM memberships WHERE course_id = ?1 AND video_id = ?2");
        sqlx::query_as::<_, Membership>(&query)
            .bind(course_id)
            .bind(video_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find the membership occupying `position` in a course, if any.
    pub async fn find_by_course_and_position(
        tx: &mut Transaction<'_, Sqlite>,
        course_id: DbId,
        position: i64,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM memberships WHERE course_id = ?1 AND position = ?2");
        sqlx::query_as::<_, Membership>(&query)
            .bind(course_id)
            .bind(position)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List a course's memberships, position ascending.
    pub async fn list_for_course(
        pool: &SqlitePool,
        course_id: DbId,
    ) -> Result<Vec<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships
             WHERE course_id = ?1
             ORDER BY position ASC"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// The canonical ordered read: memberships joined with video
    /// metadata, position ascending.
    pub async fn list_course_videos(
        pool: &SqlitePool,
        course_id: DbId,
    ) -> Result<Vec<CourseVideo>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS}
             FROM memberships m
             JOIN videos v ON v.id = m.video_id
             WHERE m.course_id = ?1
             ORDER BY m.position ASC"
        );
        sqlx::query_as::<_, CourseVideo>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Count memberships in a course.
    pub async fn count_for_course(
        tx: &mut Transaction<'_, Sqlite>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM memberships WHERE course_id = ?1")
            .bind(course_id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.0)
    }

    /// Count how many courses reference a video.
    pub async fn count_for_video(
        tx: &mut Transaction<'_, Sqlite>,
        video_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM memberships WHERE video_id = ?1")
            .bind(video_id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.0)
    }

    /// Exchange the positions of two memberships in the same course.
    ///
    /// SQLite enforces `uq_memberships_course_position` per statement, so
    /// a direct exchange would collide midway. The target parks at
    /// [`SWAP_SENTINEL`] first, the neighbor takes the target's old
    /// position, then the target takes the neighbor's. The caller's
    /// transaction makes the intermediate state invisible.
    pub async fn swap_positions(
        tx: &mut Transaction<'_, Sqlite>,
        target: &Membership,
        neighbor: &Membership,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE memberships SET position = ?1 WHERE id = ?2")
            .bind(SWAP_SENTINEL)
            .bind(target.id)
            .execute(&mut **tx)
            .await?;

        sqlx::query("UPDATE memberships SET position = ?1 WHERE id = ?2")
            .bind(target.position)
            .bind(neighbor.id)
            .execute(&mut **tx)
            .await?;

        sqlx::query("UPDATE memberships SET position = ?1 WHERE id = ?2")
            .bind(neighbor.position)
            .bind(target.id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Delete a membership by its surrogate ID. Returns `true` if a row
    /// was deleted.
    pub async fn delete_by_id(
        tx: &mut Transaction<'_, Sqlite>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = ?1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Close the gap left by a removal: decrement every position above
    /// `removed_position` by one.
    ///
    /// Rows are updated one at a time in ascending position order; each
    /// decrement moves into the slot just vacated, so the live unique
    /// index on `(course_id, position)` never sees a duplicate. Returns
    /// the number of rows shifted.
    pub async fn compact_after_removal(
        tx: &mut Transaction<'_, Sqlite>,
        course_id: DbId,
        removed_position: i64,
    ) -> Result<u64, sqlx::Error> {
        let ids: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM memberships
             WHERE course_id = ?1 AND position > ?2
             ORDER BY position ASC",
        )
        .bind(course_id)
        .bind(removed_position)
        .fetch_all(&mut **tx)
        .await?;

        for (id,) in &ids {
            sqlx::query("UPDATE memberships SET position = position - 1 WHERE id = ?1")
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(ids.len() as u64)
    }
}
