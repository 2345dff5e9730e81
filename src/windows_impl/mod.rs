//! Windows implementation on Win32

pub mod display;
pub mod window;

use crate::config::WindowFilter;
use crate::display::DisplayId;
use crate::error::Result;
use crate::geometry::Rect;
use crate::platform::{RawWindow, WindowServer};

/// Queries monitors and top-level windows through Win32
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Server;

impl WindowServer for Win32Server {
    fn active_displays(&self) -> Result<Vec<DisplayId>> {
        Ok(display::monitors()?.into_iter().map(|m| m.id).collect())
    }

    fn main_display(&self) -> Result<DisplayId> {
        display::primary_monitor()
    }

    fn display_bounds(&self, id: DisplayId) -> Result<Rect> {
        display::monitor_bounds(id)
    }

    fn windows(&self, filter: WindowFilter) -> Result<Vec<RawWindow>> {
        window::get_windows(filter)
    }

    // Titles are readable without extra entitlements
    fn screen_capture_allowed(&self) -> bool {
        true
    }
}
