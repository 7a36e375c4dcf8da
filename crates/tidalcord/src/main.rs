mod discord;

use tidalcord_api::{ClientCredentials, TidalClient};
use tidalcord_core::{AppConfig, Credentials, PresenceSync, TidalcordError};
use tidalcord_detect::WindowTitleProbe;
use tracing_subscriber::EnvFilter;

use crate::discord::DiscordSink;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), TidalcordError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tidalcord=debug")),
        )
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let config = AppConfig::load()?;
    let credentials = Credentials::from_env()?;
    tracing::debug!(?config, ?credentials, "Starting");

    let probe = WindowTitleProbe::new(config.general.player_process.as_str());
    let tokens = ClientCredentials::with_token_url(
        credentials.client_id,
        credentials.client_secret,
        config.catalog.token_url.as_str(),
    );
    let catalog = TidalClient::with_base_url(
        config.catalog.api_base_url.as_str(),
        config.catalog.country_code.as_str(),
        config.catalog.popularity.as_str(),
    );
    let sink = DiscordSink::new(&credentials.discord_client_id);

    let mut sync = PresenceSync::new(&config, probe, tokens, catalog, sink);
    let result = sync.run().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Presence loop stopped");
    }
    result
}
