//! Operations layer for the Access Academy curriculum service.
//!
//! This is the surface a thin request-handling frontend calls: course
//! creation and search, and the sequenced add/move/remove operations on a
//! course's video curriculum. Every mutation is authorized against the
//! course's creator, serialized per course, and applied in one database
//! transaction.

pub mod auth;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod inputs;
pub mod locks;

pub use config::Settings;
pub use curriculum::CurriculumService;
pub use error::{ServiceError, ServiceResult};
