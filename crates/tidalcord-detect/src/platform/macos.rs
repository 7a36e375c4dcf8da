use std::process::Command;

use tracing::{debug, warn};

use super::non_empty;

fn front_window_script(pid: u32) -> String {
    format!(
        r#"tell application "System Events"
    set frontmostProcess to first process whose unix id is {pid}
    set windowName to name of front window of frontmostProcess
end tell
return windowName"#
    )
}

/// Name of the front window of `pid`, via System Events.
pub fn front_window_title(pid: u32) -> Option<String> {
    let output = match Command::new("osascript")
        .arg("-e")
        .arg(front_window_script(pid))
        .output()
    {
        Ok(o) => o,
        Err(e) => {
            warn!(error = %e, "Failed to run osascript");
            return None;
        }
    };

    if !output.status.success() {
        debug!(
            status = ?output.status,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "osascript returned an error"
        );
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    debug!(result = %stdout.trim(), "AppleScript result");
    non_empty(&stdout)
}
