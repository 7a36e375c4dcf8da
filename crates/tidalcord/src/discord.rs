//! Discord Rich Presence sink.
//!
//! Wraps a `DiscordIpcClient` connected once at startup. IPC calls block,
//! which is fine for the single-task loop that drives this sink.

use discord_rich_presence::{activity, DiscordIpc, DiscordIpcClient};

use tidalcord_core::{PresenceSink, PresenceUpdate, TidalcordError};

pub struct DiscordSink {
    client: DiscordIpcClient,
    connected: bool,
}

impl DiscordSink {
    /// `app_id` is the numeric Discord application id.
    pub fn new(app_id: &str) -> Self {
        Self {
            client: DiscordIpcClient::new(app_id),
            connected: false,
        }
    }
}

impl PresenceSink for DiscordSink {
    fn connect(&mut self) -> Result<(), TidalcordError> {
        self.client
            .connect()
            .map_err(|e| TidalcordError::Sink(format!("failed to connect to Discord: {e}")))?;
        self.connected = true;
        tracing::info!("Connected to Discord IPC");
        Ok(())
    }

    fn update(&mut self, update: &PresenceUpdate) -> Result<(), TidalcordError> {
        if !self.connected {
            return Err(TidalcordError::Sink("Discord IPC is not connected".into()));
        }

        let payload = activity::Activity::new()
            .details(&update.details)
            .state(&update.state)
            .timestamps(
                activity::Timestamps::new()
                    .start(update.start)
                    .end(update.end),
            )
            .assets(
                activity::Assets::new()
                    .large_image(&update.large_image)
                    .large_text(&update.large_text),
            );

        self.client
            .set_activity(payload)
            .map_err(|e| TidalcordError::Sink(format!("failed to set Discord activity: {e}")))
    }
}

impl Drop for DiscordSink {
    fn drop(&mut self) {
        if self.connected {
            let _ = self.client.clear_activity();
            let _ = self.client.close();
        }
    }
}
