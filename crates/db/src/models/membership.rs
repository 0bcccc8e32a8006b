//! Membership entity model: one video's placement in one course.

use academy_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `memberships` table.
///
/// Within a course, positions form the contiguous run `1..=N` between
/// transactions. The surrogate `id` exists for lookup convenience; the
/// row's identity is the `(course_id, video_id)` pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Membership {
    pub id: DbId,
    pub course_id: DbId,
    pub video_id: DbId,
    pub position: i64,
    pub created_at: Timestamp,
}

/// One entry of a course's ordered video listing: membership position
/// joined with the video's metadata. The canonical read model for
/// rendering and editing a course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseVideo {
    pub membership_id: DbId,
    pub position: i64,
    pub video_id: DbId,
    pub external_id: String,
    pub title: String,
    pub description: Option<String>,
    pub channel_id: String,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
}
