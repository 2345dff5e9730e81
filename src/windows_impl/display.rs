//! Windows monitor enumeration using GDI

use crate::display::DisplayId;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use windows::Win32::Foundation::{BOOL, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{EnumDisplayMonitors, HDC, HMONITOR};

pub struct Monitor {
    pub id: DisplayId,
    pub bounds: Rect,
}

/// Every attached monitor in enumeration order
pub fn monitors() -> Result<Vec<Monitor>> {
    let mut monitors: Vec<Monitor> = Vec::new();

    let ok = unsafe {
        EnumDisplayMonitors(
            HDC::default(),
            None,
            Some(enum_monitor_callback),
            LPARAM(&mut monitors as *mut Vec<Monitor> as isize),
        )
    };
    if !ok.as_bool() {
        return Err(Error::malformed("EnumDisplayMonitors"));
    }

    Ok(monitors)
}

unsafe extern "system" fn enum_monitor_callback(
    hmonitor: HMONITOR,
    _hdc: HDC,
    rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let monitors = &mut *(lparam.0 as *mut Vec<Monitor>);
    let bounds = rect.as_ref().map(rect_from_win32).unwrap_or_default();

    monitors.push(Monitor {
        id: DisplayId::from_handle(hmonitor.0 as usize),
        bounds,
    });

    BOOL(1)
}

/// The primary monitor is the one whose origin is (0, 0)
pub fn primary_monitor() -> Result<DisplayId> {
    monitors()?
        .into_iter()
        .find(|m| m.bounds.x == 0.0 && m.bounds.y == 0.0)
        .map(|m| m.id)
        .ok_or(Error::malformed("primary monitor"))
}

pub fn monitor_bounds(id: DisplayId) -> Result<Rect> {
    monitors()?
        .into_iter()
        .find(|m| m.id == id)
        .map(|m| m.bounds)
        .ok_or(Error::UnknownDisplay(id))
}

pub(crate) fn rect_from_win32(r: &RECT) -> Rect {
    Rect::new(
        r.left as f64,
        r.top as f64,
        (r.right - r.left) as f64,
        (r.bottom - r.top) as f64,
    )
}
