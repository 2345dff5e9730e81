//! C ABI for cgo and other C hosts.
//!
//! Every query returns an [`AsStatus`] and writes its result through an out
//! pointer. Lists are heap allocated and owned by the caller until passed to
//! the matching `*_free` function. Title pointers inside an
//! [`AsWindowRecord`] borrow from their list and stay valid until that list
//! is freed.

use crate::display::DisplayList;
use crate::enumerator::Enumerator;
use crate::error::Error;
use crate::geometry::Rect;
use crate::platform::WindowServer;
use crate::snapshot::Snapshot;
use crate::window::WindowList;
use std::cell::RefCell;
use std::ffi::{c_char, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsStatus {
    Ok = 0,
    PermissionDenied = 1,
    OsQueryFailed = 2,
    IndexOutOfRange = 3,
    Unsupported = 4,
    NullArgument = 5,
    Internal = 6,
}

impl From<&Error> for AsStatus {
    fn from(err: &Error) -> Self {
        match err {
            Error::PermissionDenied => AsStatus::PermissionDenied,
            Error::OsQueryFailed { .. } | Error::UnknownDisplay(_) => AsStatus::OsQueryFailed,
            Error::IndexOutOfRange { .. } => AsStatus::IndexOutOfRange,
            Error::Unsupported => AsStatus::Unsupported,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AsRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for AsRect {
    fn from(r: Rect) -> Self {
        AsRect {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AsWindowRecord {
    pub pid: i32,
    /// NUL-terminated UTF-8, owned by the list
    pub title: *const c_char,
    pub title_truncated: bool,
    pub bounds: AsRect,
}

impl Default for AsWindowRecord {
    fn default() -> Self {
        AsWindowRecord {
            pid: 0,
            title: ptr::null(),
            title_truncated: false,
            bounds: AsRect::default(),
        }
    }
}

/// Opaque display list handle
pub struct AsDisplayList {
    ids: Vec<u32>,
}

/// Opaque window list handle
pub struct AsWindowList {
    records: Vec<AsWindowRecord>,
    // Backing storage for `records[i].title`
    _titles: Vec<CString>,
}

impl From<DisplayList> for AsDisplayList {
    fn from(list: DisplayList) -> Self {
        AsDisplayList {
            ids: list.into_vec().into_iter().map(|id| id.0).collect(),
        }
    }
}

impl From<WindowList> for AsWindowList {
    fn from(list: WindowList) -> Self {
        let mut titles = Vec::with_capacity(list.len());
        let mut records = Vec::with_capacity(list.len());
        for w in list.into_vec() {
            let title = c_string_lossy(w.title);
            records.push(AsWindowRecord {
                pid: w.pid,
                // Heap buffer address is stable across the move below
                title: title.as_ptr(),
                title_truncated: w.title_truncated,
                bounds: w.bounds.into(),
            });
            titles.push(title);
        }
        AsWindowList {
            records,
            _titles: titles,
        }
    }
}

/// Interior NULs cannot cross the boundary; drop them
fn c_string_lossy(s: String) -> CString {
    CString::new(s).unwrap_or_else(|e| {
        let bytes: Vec<u8> = e.into_vec().into_iter().filter(|&b| b != 0).collect();
        CString::new(bytes).unwrap_or_default()
    })
}

thread_local! {
    // Per-thread message of the last failing call
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: String) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(c_string_lossy(msg)));
}

fn fail(err: Error) -> AsStatus {
    tracing::debug!("FFI call failed: {}", err);
    let status = AsStatus::from(&err);
    set_last_error(err.to_string());
    status
}

/// Run `f`, turning panics into `Internal` so they never unwind into C
fn guard(f: impl FnOnce() -> AsStatus) -> AsStatus {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(status) => status,
        Err(_) => {
            set_last_error("panic in appstream-native".to_string());
            AsStatus::Internal
        }
    }
}

fn write_out<T>(out: *mut T, value: T) -> AsStatus {
    // SAFETY: callers check `out` for null first
    unsafe { out.write(value) };
    AsStatus::Ok
}

pub(crate) fn count_active_displays_with<S: WindowServer>(
    en: &Enumerator<S>,
    out: *mut u32,
) -> AsStatus {
    if out.is_null() {
        return AsStatus::NullArgument;
    }
    match en.count_active_displays() {
        Ok(n) => write_out(out, n),
        Err(e) => fail(e),
    }
}

pub(crate) fn list_active_displays_with<S: WindowServer>(
    en: &Enumerator<S>,
    out: *mut *mut AsDisplayList,
) -> AsStatus {
    if out.is_null() {
        return AsStatus::NullArgument;
    }
    match en.list_active_displays() {
        Ok(list) => write_out(out, Box::into_raw(Box::new(AsDisplayList::from(list)))),
        Err(e) => {
            write_out(out, ptr::null_mut());
            fail(e)
        }
    }
}

pub(crate) fn count_visible_windows_with<S: WindowServer>(
    en: &Enumerator<S>,
    out: *mut usize,
) -> AsStatus {
    if out.is_null() {
        return AsStatus::NullArgument;
    }
    match en.count_visible_windows() {
        Ok(n) => write_out(out, n),
        Err(e) => fail(e),
    }
}

pub(crate) fn list_window_info_with<S: WindowServer>(
    en: &Enumerator<S>,
    out: *mut *mut AsWindowList,
) -> AsStatus {
    if out.is_null() {
        return AsStatus::NullArgument;
    }
    match en.list_window_info() {
        Ok(list) => write_out(out, Box::into_raw(Box::new(AsWindowList::from(list)))),
        Err(e) => {
            write_out(out, ptr::null_mut());
            fail(e)
        }
    }
}

pub(crate) fn snapshot_json_with<S: WindowServer>(
    en: &Enumerator<S>,
    out: *mut *mut c_char,
) -> AsStatus {
    if out.is_null() {
        return AsStatus::NullArgument;
    }
    write_out(out, ptr::null_mut());
    let json = match Snapshot::capture(en) {
        Ok(snapshot) => snapshot.to_json(),
        Err(e) => return fail(e),
    };
    match json {
        Ok(json) => write_out(out, c_string_lossy(json).into_raw()),
        Err(e) => {
            set_last_error(e.to_string());
            AsStatus::Internal
        }
    }
}

/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn appstream_count_active_displays(out: *mut u32) -> AsStatus {
    guard(|| count_active_displays_with(&Enumerator::system(), out))
}

/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn appstream_list_active_displays(out: *mut *mut AsDisplayList) -> AsStatus {
    guard(|| list_active_displays_with(&Enumerator::system(), out))
}

/// # Safety
/// `list` must be null or a live handle from `appstream_list_active_displays`.
#[no_mangle]
pub unsafe extern "C" fn appstream_display_list_len(list: *const AsDisplayList) -> usize {
    list.as_ref().map_or(0, |l| l.ids.len())
}

/// # Safety
/// `list` must be null or a live handle from `appstream_list_active_displays`.
#[no_mangle]
pub unsafe extern "C" fn appstream_get_display_at(
    list: *const AsDisplayList,
    index: usize,
    out: *mut u32,
) -> AsStatus {
    let Some(list) = list.as_ref() else {
        return AsStatus::NullArgument;
    };
    if out.is_null() {
        return AsStatus::NullArgument;
    }
    match list.ids.get(index) {
        Some(&id) => write_out(out, id),
        None => fail(Error::IndexOutOfRange {
            index,
            len: list.ids.len(),
        }),
    }
}

/// # Safety
/// `list` must be null or a handle from `appstream_list_active_displays`
/// that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn appstream_display_list_free(list: *mut AsDisplayList) {
    if !list.is_null() {
        drop(Box::from_raw(list));
    }
}

/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn appstream_count_visible_windows(out: *mut usize) -> AsStatus {
    guard(|| count_visible_windows_with(&Enumerator::system(), out))
}

/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn appstream_list_window_info(out: *mut *mut AsWindowList) -> AsStatus {
    guard(|| list_window_info_with(&Enumerator::system(), out))
}

/// # Safety
/// `list` must be null or a live handle from `appstream_list_window_info`.
#[no_mangle]
pub unsafe extern "C" fn appstream_window_list_len(list: *const AsWindowList) -> usize {
    list.as_ref().map_or(0, |l| l.records.len())
}

/// # Safety
/// `list` must be null or a live handle from `appstream_list_window_info`.
/// The record's `title` is valid until the list is freed.
#[no_mangle]
pub unsafe extern "C" fn appstream_get_window_at(
    list: *const AsWindowList,
    index: usize,
    out: *mut AsWindowRecord,
) -> AsStatus {
    let Some(list) = list.as_ref() else {
        return AsStatus::NullArgument;
    };
    if out.is_null() {
        return AsStatus::NullArgument;
    }
    match list.records.get(index) {
        Some(&record) => write_out(out, record),
        None => fail(Error::IndexOutOfRange {
            index,
            len: list.records.len(),
        }),
    }
}

/// # Safety
/// `list` must be null or a handle from `appstream_list_window_info` that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn appstream_window_list_free(list: *mut AsWindowList) {
    if !list.is_null() {
        drop(Box::from_raw(list));
    }
}

/// JSON snapshot of displays and windows; release with `appstream_string_free`
///
/// # Safety
/// `out` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn appstream_snapshot_json(out: *mut *mut c_char) -> AsStatus {
    guard(|| snapshot_json_with(&Enumerator::system(), out))
}

/// # Safety
/// `s` must be null or a string returned by this library, not yet freed.
#[no_mangle]
pub unsafe extern "C" fn appstream_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Message for the calling thread's most recent failure, or null. Valid
/// until the next failing call on the same thread.
#[no_mangle]
pub extern "C" fn appstream_last_error_message() -> *const c_char {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map_or(ptr::null(), |msg| msg.as_ptr()))
}

#[no_mangle]
pub extern "C" fn appstream_init_logging() {
    crate::logging::init_logging();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnumerateOptions;
    use crate::platform::fake::{window, FakeServer};
    use std::ffi::CStr;

    fn enumerator() -> Enumerator<FakeServer> {
        Enumerator::new(FakeServer::default(), EnumerateOptions::default())
    }

    #[test]
    fn display_list_round_trip() {
        let en = enumerator();
        let mut count = 0u32;
        assert_eq!(count_active_displays_with(&en, &mut count), AsStatus::Ok);

        let mut list: *mut AsDisplayList = ptr::null_mut();
        assert_eq!(list_active_displays_with(&en, &mut list), AsStatus::Ok);
        assert!(!list.is_null());

        unsafe {
            assert_eq!(appstream_display_list_len(list), count as usize);
            let mut id = 0u32;
            assert_eq!(appstream_get_display_at(list, 1, &mut id), AsStatus::Ok);
            assert_eq!(id, 7);
            assert_eq!(
                appstream_get_display_at(list, count as usize, &mut id),
                AsStatus::IndexOutOfRange
            );
            assert_eq!(id, 7, "failed lookup must not write");
            appstream_display_list_free(list);
        }
    }

    #[test]
    fn window_records_own_their_titles() {
        let server = FakeServer {
            windows: vec![
                (window(42, Some("Inbox\0(3)"), Rect::new(1.0, 2.0, 3.0, 4.0)), true, false),
                (window(43, None, Rect::default()), true, false),
            ],
            ..FakeServer::default()
        };
        let en = Enumerator::new(server, EnumerateOptions::default());

        let mut list: *mut AsWindowList = ptr::null_mut();
        assert_eq!(list_window_info_with(&en, &mut list), AsStatus::Ok);

        unsafe {
            assert_eq!(appstream_window_list_len(list), 2);
            let mut rec = AsWindowRecord::default();
            assert_eq!(appstream_get_window_at(list, 0, &mut rec), AsStatus::Ok);
            assert_eq!(rec.pid, 42);
            assert_eq!(CStr::from_ptr(rec.title).to_str().unwrap(), "Inbox(3)");
            assert_eq!(rec.bounds, AsRect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 });

            assert_eq!(appstream_get_window_at(list, 1, &mut rec), AsStatus::Ok);
            assert_eq!(CStr::from_ptr(rec.title).to_bytes(), b"");

            assert_eq!(appstream_get_window_at(list, 2, &mut rec), AsStatus::IndexOutOfRange);
            appstream_window_list_free(list);
        }
    }

    #[test]
    fn null_arguments_rejected() {
        let en = enumerator();
        assert_eq!(count_active_displays_with(&en, ptr::null_mut()), AsStatus::NullArgument);
        assert_eq!(list_window_info_with(&en, ptr::null_mut()), AsStatus::NullArgument);
        unsafe {
            let mut id = 0u32;
            assert_eq!(appstream_get_display_at(ptr::null(), 0, &mut id), AsStatus::NullArgument);
            assert_eq!(appstream_display_list_len(ptr::null()), 0);
            appstream_display_list_free(ptr::null_mut());
            appstream_window_list_free(ptr::null_mut());
            appstream_string_free(ptr::null_mut());
        }
    }

    #[test]
    fn errors_map_to_status_and_message() {
        let server = FakeServer {
            capture_allowed: false,
            ..FakeServer::default()
        };
        let en = Enumerator::new(
            server,
            EnumerateOptions {
                require_titles: true,
                ..EnumerateOptions::default()
            },
        );
        let mut list: *mut AsWindowList = ptr::null_mut();
        assert_eq!(list_window_info_with(&en, &mut list), AsStatus::PermissionDenied);
        assert!(list.is_null());

        let msg = appstream_last_error_message();
        assert!(!msg.is_null());
        let text = unsafe { CStr::from_ptr(msg) }.to_str().unwrap();
        assert_eq!(text, "Screen recording permission denied");

        assert_eq!(AsStatus::from(&Error::Unsupported), AsStatus::Unsupported);
        assert_eq!(
            AsStatus::from(&Error::malformed("CGWindowListCopyWindowInfo")),
            AsStatus::OsQueryFailed
        );
    }

    #[test]
    fn snapshot_json_is_released_by_caller() {
        let en = enumerator();
        let mut json: *mut c_char = ptr::null_mut();
        assert_eq!(snapshot_json_with(&en, &mut json), AsStatus::Ok);
        unsafe {
            let text = CStr::from_ptr(json).to_str().unwrap();
            assert!(text.contains("\"displays\""));
            appstream_string_free(json);
        }
    }

    const HEADER: &str = include_str!("../include/appstream_native.h");

    #[test]
    fn header_declares_every_export() {
        for name in [
            "appstream_count_active_displays",
            "appstream_list_active_displays",
            "appstream_display_list_len",
            "appstream_get_display_at",
            "appstream_display_list_free",
            "appstream_count_visible_windows",
            "appstream_list_window_info",
            "appstream_window_list_len",
            "appstream_get_window_at",
            "appstream_window_list_free",
            "appstream_snapshot_json",
            "appstream_string_free",
            "appstream_last_error_message",
            "appstream_init_logging",
        ] {
            assert!(HEADER.contains(&format!("{}(", name)), "{} missing from header", name);
        }
    }

    #[test]
    fn header_status_codes_match() {
        for (define, status) in [
            ("AS_STATUS_OK", AsStatus::Ok),
            ("AS_STATUS_PERMISSION_DENIED", AsStatus::PermissionDenied),
            ("AS_STATUS_OS_QUERY_FAILED", AsStatus::OsQueryFailed),
            ("AS_STATUS_INDEX_OUT_OF_RANGE", AsStatus::IndexOutOfRange),
            ("AS_STATUS_UNSUPPORTED", AsStatus::Unsupported),
            ("AS_STATUS_NULL_ARGUMENT", AsStatus::NullArgument),
            ("AS_STATUS_INTERNAL", AsStatus::Internal),
        ] {
            let value = HEADER
                .lines()
                .filter_map(|line| line.strip_prefix("#define "))
                .find_map(|rest| {
                    let mut parts = rest.split_whitespace();
                    (parts.next() == Some(define)).then(|| parts.next()).flatten()
                })
                .and_then(|v| v.parse::<i32>().ok());
            assert_eq!(value, Some(status as i32), "{}", define);
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn record_layout_matches_header() {
        use std::mem::{offset_of, size_of};

        assert_eq!(size_of::<AsStatus>(), 4);
        assert_eq!(size_of::<AsRect>(), 32);
        assert_eq!(size_of::<AsWindowRecord>(), 56);
        assert_eq!(offset_of!(AsWindowRecord, pid), 0);
        assert_eq!(offset_of!(AsWindowRecord, title), 8);
        assert_eq!(offset_of!(AsWindowRecord, title_truncated), 16);
        assert_eq!(offset_of!(AsWindowRecord, bounds), 24);

        for assertion in [
            "sizeof(AsRect) == 32",
            "sizeof(AsWindowRecord) == 56",
            "offsetof(AsWindowRecord, pid) == 0",
            "offsetof(AsWindowRecord, title) == 8",
            "offsetof(AsWindowRecord, title_truncated) == 16",
            "offsetof(AsWindowRecord, bounds) == 24",
        ] {
            assert!(
                HEADER.contains(&format!("_Static_assert({},", assertion)),
                "header lacks {}",
                assertion
            );
        }
    }
}
