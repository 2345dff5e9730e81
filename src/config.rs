//! Enumeration options

use serde::{Deserialize, Serialize};

/// Maximum number of displays reported by a single query
pub const MAX_DISPLAYS: usize = 1024;

/// Byte capacity of a window title, including the C terminator
pub const TITLE_BUFFER_BYTES: usize = 256;

/// Which windows the window server should report.
///
/// Counting and listing always use the same filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFilter {
    /// Every window, including off-screen and desktop-level ones
    All,
    /// Only windows currently on screen
    OnScreenOnly,
    /// Every window except desktop-level decorations
    #[default]
    ExcludeDesktopElements,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerateOptions {
    pub window_filter: WindowFilter,
    /// Titles longer than this many bytes are cut at a character boundary.
    /// `None` keeps titles whole.
    pub title_limit: Option<usize>,
    /// Fail with `PermissionDenied` instead of returning empty titles when
    /// screen recording access is missing.
    pub require_titles: bool,
    pub display_limit: usize,
}

impl Default for EnumerateOptions {
    fn default() -> Self {
        Self {
            window_filter: WindowFilter::default(),
            title_limit: Some(TITLE_BUFFER_BYTES - 1),
            require_titles: false,
            display_limit: MAX_DISPLAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_buffers() {
        let opts = EnumerateOptions::default();
        assert_eq!(opts.window_filter, WindowFilter::ExcludeDesktopElements);
        assert_eq!(opts.title_limit, Some(255));
        assert_eq!(opts.display_limit, 1024);
        assert!(!opts.require_titles);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let opts: EnumerateOptions =
            serde_json::from_str(r#"{"window_filter":"on_screen_only"}"#).unwrap();
        assert_eq!(opts.window_filter, WindowFilter::OnScreenOnly);
        assert_eq!(opts.title_limit, Some(255));
    }
}
