//! The authorization gate: only a course's creator may mutate it.
//!
//! Identity itself is resolved by the external session layer; this module
//! only enforces the ownership check on an already-resolved [`Actor`].

use academy_core::error::CoreError;
use academy_core::identity::Actor;
use academy_db::models::course::Course;

/// Reject the operation unless `actor` is the course's creator.
///
/// Anonymous actors always fail. Called before any state change so a
/// rejected request provably leaves the ledger untouched.
pub fn require_creator(course: &Course, actor: Actor) -> Result<(), CoreError> {
    match actor.user_id() {
        Some(user_id) if user_id == course.creator_id => Ok(()),
        _ => Err(CoreError::not_creator(course.id)),
    }
}
