use serde::{Deserialize, Serialize};

use tidalcord_api::TrackMetadata;
use tidalcord_detect::TrackIdentity;

/// What is currently shown on the presence display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceState {
    pub identity: TrackIdentity,
    pub metadata: TrackMetadata,
    /// Unix seconds when the track was detected.
    pub start_epoch: i64,
    /// `start_epoch` plus the track duration.
    pub end_epoch: i64,
}

impl PresenceState {
    pub fn new(identity: TrackIdentity, metadata: TrackMetadata, start_epoch: i64) -> Self {
        let duration = i64::try_from(metadata.duration_secs).unwrap_or(i64::MAX);
        Self {
            end_epoch: start_epoch.saturating_add(duration),
            identity,
            metadata,
            start_epoch,
        }
    }

    /// Sink payload for this state, substituting `default_image` for missing cover art.
    pub fn to_update(&self, default_image: &str) -> PresenceUpdate {
        PresenceUpdate {
            details: self.identity.title.clone(),
            state: self.identity.artist.clone(),
            start: self.start_epoch,
            end: self.end_epoch,
            large_image: self
                .metadata
                .image_url
                .clone()
                .unwrap_or_else(|| default_image.to_string()),
            large_text: self.identity.title.clone(),
        }
    }
}

/// Fields pushed to the presence display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceUpdate {
    /// Track title.
    pub details: String,
    /// Artist.
    pub state: String,
    pub start: i64,
    pub end: i64,
    pub large_image: String,
    pub large_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_is_start_plus_duration() {
        let state = PresenceState::new(
            TrackIdentity::new("Song A", "Artist A"),
            TrackMetadata {
                track_id: "t1".into(),
                duration_secs: 200,
                image_url: None,
            },
            1_700_000_000,
        );
        assert_eq!(state.end_epoch, 1_700_000_200);
    }

    #[test]
    fn test_update_fields() {
        let state = PresenceState::new(
            TrackIdentity::new("Song A", "Artist A"),
            TrackMetadata {
                track_id: "t1".into(),
                duration_secs: 180,
                image_url: Some("https://img/cover.jpg".into()),
            },
            100,
        );
        let update = state.to_update("https://img/default.png");
        assert_eq!(update.details, "Song A");
        assert_eq!(update.state, "Artist A");
        assert_eq!(update.large_text, "Song A");
        assert_eq!(update.large_image, "https://img/cover.jpg");
        assert_eq!((update.start, update.end), (100, 280));
    }

    #[test]
    fn test_update_default_image() {
        let state = PresenceState::new(
            TrackIdentity::unknown(),
            TrackMetadata::empty("t9"),
            100,
        );
        let update = state.to_update("https://img/default.png");
        assert_eq!(update.large_image, "https://img/default.png");
        assert_eq!(update.end, update.start);
    }
}
