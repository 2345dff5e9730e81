//! Platform window server abstraction

use crate::config::WindowFilter;
use crate::display::DisplayId;
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// One window entry as decoded from the OS, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawWindow {
    pub pid: Option<i32>,
    pub title: Option<String>,
    pub bounds: Option<Rect>,
}

/// Trait for platform-specific display and window queries.
///
/// Implementations re-query the OS on every call.
pub trait WindowServer {
    fn active_displays(&self) -> Result<Vec<DisplayId>>;

    fn active_display_count(&self) -> Result<usize> {
        Ok(self.active_displays()?.len())
    }

    fn main_display(&self) -> Result<DisplayId>;

    fn display_bounds(&self, id: DisplayId) -> Result<Rect>;

    fn windows(&self, filter: WindowFilter) -> Result<Vec<RawWindow>>;

    fn window_count(&self, filter: WindowFilter) -> Result<usize> {
        Ok(self.windows(filter)?.len())
    }

    /// Whether window titles are readable (screen recording access)
    fn screen_capture_allowed(&self) -> bool;
}

#[cfg(target_os = "macos")]
pub type SystemServer = crate::macos::CoreGraphicsServer;

#[cfg(target_os = "windows")]
pub type SystemServer = crate::windows_impl::Win32Server;

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub type SystemServer = UnsupportedServer;

/// Backend for targets without a window server integration
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedServer;

impl WindowServer for UnsupportedServer {
    fn active_displays(&self) -> Result<Vec<DisplayId>> {
        Err(Error::Unsupported)
    }

    fn main_display(&self) -> Result<DisplayId> {
        Err(Error::Unsupported)
    }

    fn display_bounds(&self, _id: DisplayId) -> Result<Rect> {
        Err(Error::Unsupported)
    }

    fn windows(&self, _filter: WindowFilter) -> Result<Vec<RawWindow>> {
        Err(Error::Unsupported)
    }

    fn screen_capture_allowed(&self) -> bool {
        false
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_server_reports_unsupported() {
        let server = UnsupportedServer;
        assert_eq!(server.active_displays(), Err(Error::Unsupported));
        assert_eq!(server.active_display_count(), Err(Error::Unsupported));
        assert_eq!(server.window_count(WindowFilter::All), Err(Error::Unsupported));
        assert!(!server.screen_capture_allowed());
    }
}
