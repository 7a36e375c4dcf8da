pub mod config;
pub mod error;
pub mod models;
pub mod sync;

pub use config::{AppConfig, Credentials};
pub use error::TidalcordError;
pub use models::{PresenceState, PresenceUpdate};
pub use sync::{PresenceSink, PresenceSync, TickResult};
