//! macOS implementation on the CoreGraphics window server

pub mod display;
pub mod permissions;
pub mod window;

use crate::config::WindowFilter;
use crate::display::DisplayId;
use crate::error::Result;
use crate::geometry::Rect;
use crate::platform::{RawWindow, WindowServer};

/// Queries the CoreGraphics display and window services
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreGraphicsServer;

impl WindowServer for CoreGraphicsServer {
    fn active_displays(&self) -> Result<Vec<DisplayId>> {
        display::active_displays()
    }

    fn active_display_count(&self) -> Result<usize> {
        display::active_display_count()
    }

    fn main_display(&self) -> Result<DisplayId> {
        Ok(display::main_display())
    }

    fn display_bounds(&self, id: DisplayId) -> Result<Rect> {
        display::display_bounds(id)
    }

    fn windows(&self, filter: WindowFilter) -> Result<Vec<RawWindow>> {
        window::get_windows(filter)
    }

    fn window_count(&self, filter: WindowFilter) -> Result<usize> {
        window::window_count(filter)
    }

    fn screen_capture_allowed(&self) -> bool {
        permissions::check_screen_recording()
    }
}
