pub mod parse;
pub mod platform;
pub mod process;

use serde::{Deserialize, Serialize};

pub use parse::parse_window_title;
pub use process::ProcessFinder;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// The (title, artist) pair of the track a player is showing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackIdentity {
    pub title: String,
    pub artist: String,
}

impl TrackIdentity {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Fallback identity used whenever nothing sensible could be detected.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_TITLE, UNKNOWN_ARTIST)
    }

    pub fn is_unknown(&self) -> bool {
        self.title == UNKNOWN_TITLE && self.artist == UNKNOWN_ARTIST
    }
}

impl std::fmt::Display for TrackIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}

/// Something that can tell which track is playing right now.
///
/// Implementations never fail: anything that goes wrong degrades to
/// [`TrackIdentity::unknown`].
pub trait NowPlayingProbe {
    fn current_identity(&mut self) -> TrackIdentity;
}

/// Probe that reads the window title of a running player process.
pub struct WindowTitleProbe {
    finder: ProcessFinder,
}

impl WindowTitleProbe {
    /// `process_match` is matched case-insensitively against process names.
    pub fn new(process_match: impl Into<String>) -> Self {
        Self {
            finder: ProcessFinder::new(process_match),
        }
    }

    /// Raw window title of the player, if the player is running and has one.
    pub fn window_title(&mut self) -> Option<String> {
        let pid = self.finder.find_pid()?;
        let title = platform::window_title(pid);
        match &title {
            Some(t) => tracing::debug!(pid, title = %t, "Player window title"),
            None => tracing::warn!(pid, "Unable to retrieve player window title"),
        }
        title
    }
}

impl NowPlayingProbe for WindowTitleProbe {
    fn current_identity(&mut self) -> TrackIdentity {
        let title = self.window_title();
        parse_window_title(title.as_deref())
    }
}
