//! The presence polling loop.
//!
//! Every tick probes the player; when the detected track differs from the
//! last probe, the catalog is queried with a fresh token and the new presence
//! is pushed to the sink. Lookup failures leave the current presence standing
//! until the next track change.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use tidalcord_api::{MusicCatalog, TokenProvider};
use tidalcord_detect::{NowPlayingProbe, TrackIdentity};

use crate::config::AppConfig;
use crate::error::TidalcordError;
use crate::models::{PresenceState, PresenceUpdate};

/// The presence display.
///
/// Connected once; any error from either call is fatal to the loop.
pub trait PresenceSink {
    fn connect(&mut self) -> Result<(), TidalcordError>;
    fn update(&mut self, update: &PresenceUpdate) -> Result<(), TidalcordError>;
}

/// Outcome of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickResult {
    /// Same track as the previous poll; nothing was sent.
    Unchanged,
    /// New track looked up and pushed to the sink.
    Refreshed(TrackIdentity),
    /// New track, but the catalog had no match. The old presence stays up.
    NotFound(TrackIdentity),
}

pub struct PresenceSync<P, T, C, S> {
    probe: P,
    tokens: T,
    catalog: C,
    sink: S,
    default_image: String,
    interval: Duration,
    last_probed: Option<TrackIdentity>,
    state: Option<PresenceState>,
}

impl<P, T, C, S> PresenceSync<P, T, C, S>
where
    P: NowPlayingProbe,
    T: TokenProvider,
    C: MusicCatalog,
    S: PresenceSink,
{
    pub fn new(config: &AppConfig, probe: P, tokens: T, catalog: C, sink: S) -> Self {
        Self {
            probe,
            tokens,
            catalog,
            sink,
            default_image: config.presence.default_image_url.clone(),
            interval: config.poll_interval(),
            last_probed: None,
            state: None,
        }
    }

    /// Presence currently on display, if any lookup has succeeded yet.
    pub fn state(&self) -> Option<&PresenceState> {
        self.state.as_ref()
    }

    /// Connect the sink and publish the initial presence.
    ///
    /// An initial track with no catalog match is not fatal: the loop starts
    /// with nothing on display and waits for the next track change.
    pub async fn start(&mut self) -> Result<TickResult, TidalcordError> {
        self.sink.connect()?;
        info!("Connected to presence sink");

        let result = self.tick().await?;
        if let TickResult::NotFound(identity) = &result {
            warn!(%identity, "Track not found, starting without presence");
        }
        Ok(result)
    }

    /// Poll once, refreshing the presence if the track changed.
    pub async fn tick(&mut self) -> Result<TickResult, TidalcordError> {
        let identity = self.probe.current_identity();
        if self.last_probed.as_ref() == Some(&identity) {
            return Ok(TickResult::Unchanged);
        }

        debug!(%identity, "Track changed");
        self.last_probed = Some(identity.clone());
        self.refresh(identity).await
    }

    /// Start, then tick forever with the configured sleep between ticks.
    ///
    /// Only returns on a fatal error.
    pub async fn run(&mut self) -> Result<(), TidalcordError> {
        self.start().await?;
        loop {
            self.tick().await?;
            tokio::time::sleep(self.interval).await;
        }
    }

    async fn refresh(&mut self, identity: TrackIdentity) -> Result<TickResult, TidalcordError> {
        // One token per refresh; they are not reused across refreshes.
        let token = self.tokens.access_token().await?;

        let Some(track_id) = self.catalog.search(&identity, &token).await else {
            warn!(%identity, "No catalog match, keeping current presence");
            return Ok(TickResult::NotFound(identity));
        };

        let metadata = self.catalog.fetch_metadata(&track_id, &token).await;
        let state = PresenceState::new(identity.clone(), metadata, Utc::now().timestamp());
        self.push_presence(&state)?;
        self.state = Some(state);

        Ok(TickResult::Refreshed(identity))
    }

    fn push_presence(&mut self, state: &PresenceState) -> Result<(), TidalcordError> {
        let update = state.to_update(&self.default_image);
        debug!(
            title = %update.details,
            artist = %update.state,
            duration = state.metadata.duration_secs,
            image = %update.large_image,
            "Updating presence"
        );
        self.sink.update(&update)
    }
}
