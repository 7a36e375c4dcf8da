use thiserror::Error;

use tidalcord_api::TidalError;

#[derive(Debug, Error)]
pub enum TidalcordError {
    #[error("config error: {0}")]
    Config(String),

    #[error("missing or invalid credential: {0}")]
    Credentials(String),

    #[error("token request failed: {0}")]
    Token(#[from] TidalError),

    #[error("presence sink error: {0}")]
    Sink(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
