//! macOS screen recording permission check

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGPreflightScreenCaptureAccess() -> bool;
}

/// Whether this process may read other applications' window titles.
/// Never prompts the user.
pub fn check_screen_recording() -> bool {
    let granted = unsafe { CGPreflightScreenCaptureAccess() };
    tracing::debug!("Screen recording preflight: {}", granted);
    granted
}
