//! Video-metadata search contract.
//!
//! The curriculum service persists whatever metadata the search
//! collaborator hands it; the HTTP proxy to the real source catalog is out
//! of scope. [`FixtureVideoSearch`] is the deterministic in-memory
//! implementation used by tests and wiring examples.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default number of candidates returned for a keyword search.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Hard ceiling on candidates per search, whatever the caller asks for.
pub const MAX_RESULTS_CEILING: usize = 50;

/// Metadata for one candidate video, as supplied by the source catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCandidate {
    /// Stable identifier in the source catalog (e.g. a YouTube video id).
    pub external_id: String,
    pub title: String,
    pub description: Option<String>,
    pub channel_id: String,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Keyword search against the external source catalog.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Return up to `max_results` candidates for `keyword`.
    ///
    /// Implementations clamp `max_results` to [`MAX_RESULTS_CEILING`].
    async fn search(
        &self,
        keyword: &str,
        max_results: usize,
    ) -> Result<Vec<VideoCandidate>, CoreError>;
}

/// In-memory search over a fixed candidate list.
///
/// Matches case-insensitively against title and channel title, preserving
/// fixture order.
#[derive(Debug, Default, Clone)]
pub struct FixtureVideoSearch {
    candidates: Vec<VideoCandidate>,
}

impl FixtureVideoSearch {
    pub fn new(candidates: Vec<VideoCandidate>) -> Self {
        Self { candidates }
    }
}

#[async_trait]
impl VideoSearch for FixtureVideoSearch {
    async fn search(
        &self,
        keyword: &str,
        max_results: usize,
    ) -> Result<Vec<VideoCandidate>, CoreError> {
        let keyword = keyword.to_lowercase();
        let limit = max_results.min(MAX_RESULTS_CEILING);

        let hits = self
            .candidates
            .iter()
            .filter(|c| {
                c.title.to_lowercase().contains(&keyword)
                    || c.channel_title
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains(&keyword))
            })
            .take(limit)
            .cloned()
            .collect();

        Ok(hits)
    }
}
