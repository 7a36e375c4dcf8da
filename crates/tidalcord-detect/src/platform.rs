#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

/// Platform-specific window title lookup for a process id.
pub fn window_title(pid: u32) -> Option<String> {
    #[cfg(target_os = "macos")]
    {
        macos::front_window_title(pid)
    }
    #[cfg(target_os = "windows")]
    {
        windows::main_window_title(pid)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        tracing::debug!(pid, "Window title lookup is not supported on this platform");
        None
    }
}

/// Trim a raw title and drop it when nothing is left.
pub(crate) fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  Song - Artist\n").as_deref(), Some("Song - Artist"));
        assert_eq!(non_empty(" \n"), None);
        assert_eq!(non_empty(""), None);
    }
}
