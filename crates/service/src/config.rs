//! Service configuration loaded from environment variables.

use academy_core::video_search::{DEFAULT_MAX_RESULTS, MAX_RESULTS_CEILING};

/// Configuration for an embedding process.
///
/// All fields have defaults suitable for local development; override via
/// environment variables (a `.env` file is honored if present).
#[derive(Debug, Clone)]
pub struct Settings {
    /// SQLite connection string (default: `sqlite://academy.db`).
    pub database_url: String,
    /// Candidate cap handed to the video-metadata search collaborator
    /// (default 20, clamped to 50).
    pub search_max_results: usize,
}

impl Settings {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default               |
    /// |----------------------|-----------------------|
    /// | `DATABASE_URL`       | `sqlite://academy.db` |
    /// | `SEARCH_MAX_RESULTS` | `20`                  |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://academy.db".into());

        let search_max_results: usize = std::env::var("SEARCH_MAX_RESULTS")
            .unwrap_or_else(|_| DEFAULT_MAX_RESULTS.to_string())
            .parse()
            .expect("SEARCH_MAX_RESULTS must be a valid usize");

        Self {
            database_url,
            search_max_results: search_max_results.min(MAX_RESULTS_CEILING),
        }
    }
}
