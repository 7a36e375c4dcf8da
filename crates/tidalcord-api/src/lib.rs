pub mod tidal;
pub mod traits;

pub use tidal::{ClientCredentials, TidalClient, TidalError};
pub use traits::{MusicCatalog, TokenProvider, TrackMetadata};
