use tracing::debug;

use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::non_empty;

struct Search {
    pid: u32,
    title: Option<String>,
}

/// Title of the first visible, titled top-level window owned by `pid`.
pub fn main_window_title(pid: u32) -> Option<String> {
    let mut search = Search { pid, title: None };

    unsafe {
        // Returns an error when the callback stops early; that is the found case.
        let _ = EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut search as *mut Search as isize),
        );
    }

    debug!(pid, title = ?search.title, "Windows window title lookup");
    search.title
}

unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let search = &mut *(lparam.0 as *mut Search);

    if !IsWindowVisible(hwnd).as_bool() {
        return TRUE;
    }

    let mut owner = 0u32;
    GetWindowThreadProcessId(hwnd, Some(&mut owner));
    if owner != search.pid {
        return TRUE;
    }

    let mut title = [0u16; 512];
    let len = GetWindowTextW(hwnd, &mut title);
    if len <= 0 {
        return TRUE;
    }

    match non_empty(&String::from_utf16_lossy(&title[..len as usize])) {
        Some(t) => {
            search.title = Some(t);
            FALSE
        }
        None => TRUE,
    }
}
