use crate::sequencing::MoveDirection;
use crate::types::DbId;

/// Expected, typed outcomes of the curriculum operations.
///
/// Every variant here is a recoverable domain condition the calling layer
/// is expected to present to the user; none of them indicates a bug or a
/// storage fault. Unexpected database failures stay `sqlx::Error` at the
/// repository boundary and are wrapped by the service layer instead.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("creator {creator_id} already has a course titled \"{title}\"")]
    DuplicateTitle { creator_id: DbId, title: String },

    #[error("video {video_id} is already a member of course {course_id}")]
    AlreadyMember { course_id: DbId, video_id: DbId },

    #[error("membership {membership_id} cannot move {direction}: no neighbor at the target position")]
    InvalidMove {
        membership_id: DbId,
        direction: MoveDirection,
    },

    #[error("validation failed: {0}")]
    Validation(String),

    /// An integrity race detected at the storage layer that could not be
    /// attributed to a more specific variant above.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl CoreError {
    /// Unauthorized with the standard creator-gate message.
    pub fn not_creator(course_id: DbId) -> Self {
        CoreError::Unauthorized(format!(
            "acting user is not the creator of course {course_id}"
        ))
    }
}
