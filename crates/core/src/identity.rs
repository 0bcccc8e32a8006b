//! Acting-user identity as resolved by the session collaborator.
//!
//! The service never inspects a session itself: the frontend request
//! layer resolves each incoming request to an [`Actor`] and threads it
//! through every mutating call explicitly.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Who is performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Actor {
    /// No authenticated session.
    Anonymous,
    /// An authenticated user.
    User(DbId),
}

impl Actor {
    /// The acting user's id, or `None` for anonymous requests.
    pub fn user_id(&self) -> Option<DbId> {
        match self {
            Actor::Anonymous => None,
            Actor::User(id) => Some(*id),
        }
    }
}
