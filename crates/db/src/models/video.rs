//! Video entity model and DTOs.
//!
//! Videos are a deduplicated cache of metadata handed over by the source
//! catalog, keyed by `external_id`. Rows are immutable after insert
//! (first writer wins) and deleted only once no course references them.

use academy_core::types::{DbId, Timestamp};
use academy_core::video_search::VideoCandidate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub external_id: String,
    pub title: String,
    pub description: Option<String>,
    pub channel_id: String,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new video.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub external_id: String,
    pub title: String,
    pub description: Option<String>,
    pub channel_id: String,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl From<VideoCandidate> for CreateVideo {
    fn from(candidate: VideoCandidate) -> Self {
        Self {
            external_id: candidate.external_id,
            title: candidate.title,
            description: candidate.description,
            channel_id: candidate.channel_id,
            channel_title: candidate.channel_title,
            thumbnail_url: candidate.thumbnail_url,
        }
    }
}
