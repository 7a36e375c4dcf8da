//! Trait definitions for the music catalog and its credentials.
//!
//! The presence loop only talks to these traits, so tests can swap the
//! TIDAL clients for in-memory fakes.

use std::future::Future;

use tidalcord_detect::TrackIdentity;

use crate::tidal::TidalError;

/// Supplies bearer tokens for catalog requests.
pub trait TokenProvider {
    /// Fetch a fresh access token. Failures are fatal to the caller.
    fn access_token(&self) -> impl Future<Output = Result<String, TidalError>>;
}

/// Catalog lookups used to enrich a detected track.
///
/// Neither operation fails: lookup problems are logged and degrade to
/// `None` / empty metadata.
pub trait MusicCatalog {
    /// Best-matching track id for `identity`, if the catalog has one.
    fn search(
        &self,
        identity: &TrackIdentity,
        token: &str,
    ) -> impl Future<Output = Option<String>>;

    /// Duration and cover art for `track_id`.
    fn fetch_metadata(
        &self,
        track_id: &str,
        token: &str,
    ) -> impl Future<Output = TrackMetadata>;
}

/// Catalog data for a single track.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrackMetadata {
    pub track_id: String,
    pub duration_secs: u64,
    pub image_url: Option<String>,
}

impl TrackMetadata {
    /// Metadata with no duration and no cover, used when details are unavailable.
    pub fn empty(track_id: impl Into<String>) -> Self {
        Self {
            track_id: track_id.into(),
            duration_secs: 0,
            image_url: None,
        }
    }
}
