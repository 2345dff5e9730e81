//! Active display and on-screen window enumeration for native hosts.
//!
//! Each query goes straight to the OS window server; nothing is cached.
//! Results are owned values, and the accessors are bounds checked. The C ABI
//! lives in [`ffi`]; Node-API bindings are behind the `node` feature.

#![allow(unexpected_cfgs)]

mod config;
mod display;
mod enumerator;
mod error;
mod geometry;
mod logging;
mod platform;
mod snapshot;
mod window;

pub mod ffi;

#[cfg(feature = "node")]
mod node;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows_impl;

pub use config::{EnumerateOptions, WindowFilter, MAX_DISPLAYS, TITLE_BUFFER_BYTES};
pub use display::{DisplayId, DisplayList};
pub use enumerator::Enumerator;
pub use error::{Error, Result};
pub use geometry::Rect;
pub use logging::{init_logging, LOG_ENV};
pub use platform::{RawWindow, SystemServer, UnsupportedServer, WindowServer};
pub use snapshot::{DisplayInfo, Snapshot};
pub use window::{truncate_title, WindowList, WindowRecord};

/// Number of active displays on the system
pub fn count_active_displays() -> Result<u32> {
    Enumerator::system().count_active_displays()
}

/// Active display identifiers on the system
pub fn list_active_displays() -> Result<DisplayList> {
    Enumerator::system().list_active_displays()
}

/// Element `index` of `list`, or `IndexOutOfRange`
pub fn get_display_at(list: &DisplayList, index: usize) -> Result<DisplayId> {
    display::get_display_at(list, index)
}

/// Number of windows, excluding desktop elements
pub fn count_visible_windows() -> Result<usize> {
    Enumerator::system().count_visible_windows()
}

/// Every window, excluding desktop elements
pub fn list_window_info() -> Result<WindowList> {
    Enumerator::system().list_window_info()
}

/// Record `index` of `list`, or `IndexOutOfRange`
pub fn get_window_at(list: &WindowList, index: usize) -> Result<&WindowRecord> {
    window::get_window_at(list, index)
}
