pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::ClientCredentials;
pub use client::TidalClient;
pub use error::TidalError;
