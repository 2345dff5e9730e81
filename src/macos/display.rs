//! macOS display enumeration using CoreGraphics

use crate::display::DisplayId;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use core_graphics::display::CGDisplay;

pub fn active_displays() -> Result<Vec<DisplayId>> {
    let ids = CGDisplay::active_displays().map_err(|code| Error::OsQueryFailed {
        call: "CGGetActiveDisplayList",
        code,
    })?;
    Ok(ids.into_iter().map(DisplayId).collect())
}

pub fn active_display_count() -> Result<usize> {
    let count = CGDisplay::active_display_count().map_err(|code| Error::OsQueryFailed {
        call: "CGGetActiveDisplayList",
        code,
    })?;
    Ok(count as usize)
}

pub fn main_display() -> DisplayId {
    DisplayId(CGDisplay::main().id)
}

/// CGDisplayBounds returns an empty rect for stale ids, so check the
/// active list first.
pub fn display_bounds(id: DisplayId) -> Result<Rect> {
    if !active_displays()?.contains(&id) {
        return Err(Error::UnknownDisplay(id));
    }
    let r = CGDisplay::new(id.0).bounds();
    Ok(Rect::new(r.origin.x, r.origin.y, r.size.width, r.size.height))
}
