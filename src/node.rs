//! Node-API bindings for the Electron host

use crate::config::{EnumerateOptions, WindowFilter};
use crate::display::DisplayId;
use crate::enumerator::{saturating_u32, Enumerator};
use crate::geometry::Rect;
use crate::window::WindowRecord;
use napi::bindgen_prelude::*;
use napi_derive::napi;

#[napi(object)]
pub struct JsRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for JsRect {
    fn from(r: Rect) -> Self {
        JsRect {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

/// Window information returned from native APIs
#[napi(object)]
pub struct JsWindowRecord {
    pub pid: i32,
    pub title: String,
    pub title_truncated: bool,
    pub bounds: JsRect,
}

impl From<WindowRecord> for JsWindowRecord {
    fn from(w: WindowRecord) -> Self {
        JsWindowRecord {
            pid: w.pid,
            title: w.title,
            title_truncated: w.title_truncated,
            bounds: w.bounds.into(),
        }
    }
}

/// Enumeration options; every field falls back to its default
#[napi(object)]
pub struct JsEnumerateOptions {
    /// "all" | "onScreenOnly" | "excludeDesktopElements"
    pub window_filter: Option<String>,
    /// Set to 0 to keep titles whole
    pub title_limit: Option<u32>,
    pub require_titles: Option<bool>,
}

fn to_options(opts: Option<JsEnumerateOptions>) -> Result<EnumerateOptions> {
    let mut options = EnumerateOptions::default();
    let Some(opts) = opts else {
        return Ok(options);
    };

    if let Some(filter) = opts.window_filter {
        options.window_filter = match filter.as_str() {
            "all" => WindowFilter::All,
            "onScreenOnly" => WindowFilter::OnScreenOnly,
            "excludeDesktopElements" => WindowFilter::ExcludeDesktopElements,
            other => return Err(Error::from_reason(format!("Unknown window filter: {}", other))),
        };
    }
    if let Some(limit) = opts.title_limit {
        options.title_limit = (limit > 0).then_some(limit as usize);
    }
    if let Some(require) = opts.require_titles {
        options.require_titles = require;
    }
    Ok(options)
}

fn js_error(err: crate::Error) -> Error {
    Error::from_reason(err.to_string())
}

#[napi]
pub fn count_active_displays() -> Result<u32> {
    Enumerator::system().count_active_displays().map_err(js_error)
}

#[napi]
pub fn list_active_displays() -> Result<Vec<u32>> {
    let list = Enumerator::system().list_active_displays().map_err(js_error)?;
    Ok(list.into_vec().into_iter().map(|id| id.0).collect())
}

#[napi]
pub fn get_display_at(displays: Vec<u32>, index: u32) -> Result<u32> {
    let list = crate::DisplayList::new(displays.into_iter().map(DisplayId).collect());
    list.get_display_at(index as usize)
        .map(|id| id.0)
        .map_err(js_error)
}

#[napi]
pub fn get_display_bounds(display: u32) -> Result<JsRect> {
    Enumerator::system()
        .display_bounds(DisplayId(display))
        .map(Into::into)
        .map_err(js_error)
}

/// Takes the same options as `listWindowInfo` so both see one filter
#[napi]
pub fn count_visible_windows(options: Option<JsEnumerateOptions>) -> Result<u32> {
    let count = Enumerator::system_with(to_options(options)?)
        .count_visible_windows()
        .map_err(js_error)?;
    Ok(saturating_u32(count))
}

#[napi]
pub fn list_window_info(options: Option<JsEnumerateOptions>) -> Result<Vec<JsWindowRecord>> {
    let list = Enumerator::system_with(to_options(options)?)
        .list_window_info()
        .map_err(js_error)?;
    Ok(list.into_vec().into_iter().map(Into::into).collect())
}

#[napi]
pub fn get_window_at(windows: Vec<JsWindowRecord>, index: u32) -> Result<JsWindowRecord> {
    let len = windows.len();
    windows
        .into_iter()
        .nth(index as usize)
        .ok_or_else(|| {
            js_error(crate::Error::IndexOutOfRange {
                index: index as usize,
                len,
            })
        })
}

/// Bounding rectangle of every on-screen window owned by `pid`, or null
#[napi]
pub fn get_capture_rect(pid: i32) -> Result<Option<JsRect>> {
    let rect = Enumerator::system().capture_rect(pid).map_err(js_error)?;
    Ok(rect.map(Into::into))
}

/// Check if screen recording permission is granted (macOS)
#[napi]
pub fn check_screen_recording_permission() -> bool {
    Enumerator::system().screen_capture_allowed()
}
