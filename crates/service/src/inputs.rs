//! Validated inputs for the operations that accept free-form text.
//!
//! Field rules mirror the signup and course forms of the original
//! frontend; validation failures surface as [`CoreError::Validation`]
//! before any storage call.

use academy_core::error::CoreError;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "a valid e-mail address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    pub image_url: Option<String>,
}

/// Input for creating a course. The creator comes from the acting user,
/// never from the payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCourse {
    #[validate(length(min = 1, message = "course title is required"))]
    pub title: String,
    pub description: Option<String>,
}

/// Run validator checks, folding failures into the domain error type.
pub(crate) fn check<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|err| CoreError::Validation(err.to_string()))
}
