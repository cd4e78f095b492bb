//! The remote quality profile service seam.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::properties::PropertyStore;
use crate::rule::ProfileRule;

/// Errors reported by a [`QualityProfileService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The quality profile does not exist.
    #[error("Unknown quality profile `{0}`")]
    UnknownQualityProfile(String),

    /// IO error reading local data.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The service returned data that could not be decoded.
    #[error("Failed to parse service data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Any other failure reported by the remote side.
    #[error("{0}")]
    Remote(String),
}

/// Source of server properties and quality profile rules.
///
/// Implementations own transport, retries and cancellation; the export
/// logic only awaits the results.
#[async_trait]
pub trait QualityProfileService: Send + Sync {
    /// Fetches every server property, unfiltered.
    async fn fetch_all_properties(&self) -> Result<PropertyStore, ServiceError>;

    /// Fetches the active (`active = true`) or inactive rules of a profile.
    async fn fetch_rules(
        &self,
        active: bool,
        quality_profile_key: &str,
    ) -> Result<Vec<ProfileRule>, ServiceError>;
}
