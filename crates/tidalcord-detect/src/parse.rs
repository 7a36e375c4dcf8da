use crate::TrackIdentity;

/// Separator the player puts between title and artist in its window title.
pub const SEPARATOR: &str = " - ";

/// Split a player window title into a [`TrackIdentity`].
///
/// Exactly one separator is required; anything else (no title, no separator,
/// or a title that itself contains the separator) yields the sentinel.
pub fn parse_window_title(raw: Option<&str>) -> TrackIdentity {
    let Some(raw) = raw else {
        tracing::warn!("No window title to extract song info from");
        return TrackIdentity::unknown();
    };

    let mut parts = raw.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(title), Some(artist), None) => {
            tracing::debug!(title, artist, "Extracted song info");
            TrackIdentity::new(title, artist)
        }
        _ => {
            tracing::warn!(raw, "Unable to extract song info from window title");
            TrackIdentity::unknown()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_separator() {
        let id = parse_window_title(Some("Song A - Artist A"));
        assert_eq!(id, TrackIdentity::new("Song A", "Artist A"));
    }

    #[test]
    fn test_parts_kept_verbatim() {
        let id = parse_window_title(Some("  Hello-World  -  The Band "));
        assert_eq!(id.title, "  Hello-World ");
        assert_eq!(id.artist, " The Band ");
    }

    #[test]
    fn test_no_separator_is_unknown() {
        let id = parse_window_title(Some("NoSeparatorHere"));
        assert!(id.is_unknown());
        assert_eq!(id.title, "Unknown Title");
        assert_eq!(id.artist, "Unknown Artist");
    }

    #[test]
    fn test_two_separators_is_unknown() {
        let id = parse_window_title(Some("Song - Artist - Remastered"));
        assert_eq!(id, TrackIdentity::unknown());
    }

    #[test]
    fn test_hyphen_without_spaces_is_not_a_separator() {
        let id = parse_window_title(Some("Anti-Hero"));
        assert!(id.is_unknown());
    }

    #[test]
    fn test_missing_title() {
        assert!(parse_window_title(None).is_unknown());
        assert!(parse_window_title(Some("")).is_unknown());
    }

    #[test]
    fn test_unicode_title() {
        let id = parse_window_title(Some("夜に駆ける - YOASOBI"));
        assert_eq!(id.title, "夜に駆ける");
        assert_eq!(id.artist, "YOASOBI");
    }
}
