//! macOS window enumeration using CoreGraphics

use crate::config::WindowFilter;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::platform::RawWindow;
use core_foundation::array::CFArray;
use core_foundation::base::{CFType, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_graphics::display::{
    kCGNullWindowID, kCGWindowListExcludeDesktopElements, kCGWindowListOptionAll,
    kCGWindowListOptionOnScreenOnly, CGWindowListCopyWindowInfo, CGWindowListOption,
};

type WindowDict = CFDictionary<CFString, CFType>;

fn list_option(filter: WindowFilter) -> CGWindowListOption {
    match filter {
        WindowFilter::All => kCGWindowListOptionAll,
        WindowFilter::OnScreenOnly => kCGWindowListOptionOnScreenOnly,
        WindowFilter::ExcludeDesktopElements => kCGWindowListExcludeDesktopElements,
    }
}

fn copy_window_list(filter: WindowFilter) -> Result<CFArray<WindowDict>> {
    unsafe {
        let window_list = CGWindowListCopyWindowInfo(list_option(filter), kCGNullWindowID);
        if window_list.is_null() {
            return Err(Error::malformed("CGWindowListCopyWindowInfo"));
        }
        Ok(CFArray::wrap_under_create_rule(window_list))
    }
}

pub fn window_count(filter: WindowFilter) -> Result<usize> {
    Ok(copy_window_list(filter)?.len() as usize)
}

/// Get all windows the window server reports under `filter`
pub fn get_windows(filter: WindowFilter) -> Result<Vec<RawWindow>> {
    let array = copy_window_list(filter)?;
    Ok(array.iter().map(|dict| parse_window_dict(&dict)).collect())
}

fn parse_window_dict(dict: &WindowDict) -> RawWindow {
    let key_pid = CFString::new("kCGWindowOwnerPID");
    let key_name = CFString::new("kCGWindowName");
    let key_bounds = CFString::new("kCGWindowBounds");

    let pid = dict
        .find(&key_pid)
        .and_then(|v| v.downcast::<CFNumber>())
        .and_then(|n| n.to_i32());

    // Absent without screen recording access
    let title = dict
        .find(&key_name)
        .and_then(|v| v.downcast::<CFString>())
        .map(|s| s.to_string());

    let bounds = dict.find(&key_bounds).and_then(|v| parse_bounds(&v));

    RawWindow { pid, title, bounds }
}

/// Decode the `{X, Y, Width, Height}` dictionary representation of a CGRect
fn parse_bounds(value: &CFType) -> Option<Rect> {
    if value.type_of() != WindowDict::type_id() {
        return None;
    }
    let dict: WindowDict =
        unsafe { CFDictionary::wrap_under_get_rule(value.as_CFTypeRef() as CFDictionaryRef) };

    let field = |name: &'static str| {
        dict.find(&CFString::from_static_string(name))
            .and_then(|v| v.downcast::<CFNumber>())
            .and_then(|n| n.to_f64())
    };

    Some(Rect {
        x: field("X")?,
        y: field("Y")?,
        width: field("Width")?,
        height: field("Height")?,
    })
}
