use academy_core::error::CoreError;

/// Operation-level error type for the service surface.
///
/// Wraps [`CoreError`] for the expected domain outcomes and keeps
/// unexpected storage failures separate so callers can distinguish "the
/// user did something invalid" from "the database broke".
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A typed domain outcome from `academy_core`.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// An unexpected database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failure during bootstrap.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Convenience alias for service operation results.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// If `err` is a unique-index violation, return the database message
/// (which names the violated columns) for narrow translation at the call
/// site. Anything else returns `None` and should be propagated raw.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Some(db_err.message().to_string())
        }
        _ => None,
    }
}
