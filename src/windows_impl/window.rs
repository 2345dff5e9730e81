//! Windows window enumeration using Win32 API

use super::display::rect_from_win32;
use crate::config::WindowFilter;
use crate::error::{Error, Result};
use crate::platform::RawWindow;
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetDesktopWindow, GetShellWindow, GetWindowRect, GetWindowTextLengthW,
    GetWindowTextW, GetWindowThreadProcessId, IsIconic, IsWindowVisible,
};

struct EnumState {
    filter: WindowFilter,
    desktop: HWND,
    shell: HWND,
    windows: Vec<RawWindow>,
}

/// Get all top-level windows matching `filter`
pub fn get_windows(filter: WindowFilter) -> Result<Vec<RawWindow>> {
    let mut state = unsafe {
        EnumState {
            filter,
            desktop: GetDesktopWindow(),
            shell: GetShellWindow(),
            windows: Vec::new(),
        }
    };

    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut state as *mut EnumState as isize),
        )
        .map_err(|e| Error::OsQueryFailed {
            call: "EnumWindows",
            code: e.code().0,
        })?;
    }

    Ok(state.windows)
}

unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let state = &mut *(lparam.0 as *mut EnumState);

    let keep = match state.filter {
        WindowFilter::All => true,
        WindowFilter::OnScreenOnly => IsWindowVisible(hwnd).as_bool() && !IsIconic(hwnd).as_bool(),
        WindowFilter::ExcludeDesktopElements => hwnd != state.desktop && hwnd != state.shell,
    };
    if !keep {
        return BOOL(1);
    }

    let mut pid: u32 = 0;
    GetWindowThreadProcessId(hwnd, Some(&mut pid));

    // The window may have been destroyed since EnumWindows saw it
    let mut rect = RECT::default();
    if GetWindowRect(hwnd, &mut rect).is_err() {
        tracing::trace!("Skipping window {:?}: no rect", hwnd);
        return BOOL(1);
    }

    state.windows.push(RawWindow {
        pid: Some(pid as i32),
        title: window_title(hwnd),
        bounds: Some(rect_from_win32(&rect)),
    });

    BOOL(1)
}

fn window_title(hwnd: HWND) -> Option<String> {
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len <= 0 {
            return None;
        }

        let mut title_buf = vec![0u16; len as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut title_buf);
        if copied <= 0 {
            return None;
        }

        Some(
            OsString::from_wide(&title_buf[..copied as usize])
                .to_string_lossy()
                .to_string(),
        )
    }
}
