//! Display and window queries over a `WindowServer`

use crate::config::{EnumerateOptions, WindowFilter};
use crate::display::{DisplayId, DisplayList};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::platform::{SystemServer, WindowServer};
use crate::window::{WindowList, WindowRecord};

/// Narrow a count for hosts that only take 32-bit integers
pub(crate) fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Stateless query front-end. Every call goes back to the OS.
#[derive(Debug, Clone, Default)]
pub struct Enumerator<S = SystemServer> {
    server: S,
    options: EnumerateOptions,
}

impl Enumerator<SystemServer> {
    /// Enumerator over the current platform's window server
    pub fn system() -> Self {
        Self::new(SystemServer::default(), EnumerateOptions::default())
    }

    pub fn system_with(options: EnumerateOptions) -> Self {
        Self::new(SystemServer::default(), options)
    }
}

impl<S: WindowServer> Enumerator<S> {
    pub fn new(server: S, options: EnumerateOptions) -> Self {
        Self { server, options }
    }

    pub fn options(&self) -> &EnumerateOptions {
        &self.options
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    /// Number of active displays, capped at `display_limit`
    pub fn count_active_displays(&self) -> Result<u32> {
        let count = self.server.active_display_count()?;
        let capped = count.min(self.options.display_limit);
        tracing::debug!("Active displays: {} (reported {})", capped, count);
        Ok(saturating_u32(capped))
    }

    /// Active display identifiers in OS order, capped at `display_limit`
    pub fn list_active_displays(&self) -> Result<DisplayList> {
        let mut ids = self.server.active_displays()?;
        if ids.len() > self.options.display_limit {
            tracing::warn!(
                "OS reported {} displays, keeping the first {}",
                ids.len(),
                self.options.display_limit
            );
            ids.truncate(self.options.display_limit);
        }
        Ok(DisplayList::new(ids))
    }

    /// Bounds of `id` in global top-left coordinates
    pub fn display_bounds(&self, id: DisplayId) -> Result<Rect> {
        self.server.display_bounds(id)
    }

    /// Bounds of `id` in bottom-left coordinates relative to the main display
    pub fn display_bounds_bottom_left(&self, id: DisplayId) -> Result<Rect> {
        let main = self.server.display_bounds(self.server.main_display()?)?;
        Ok(self.server.display_bounds(id)?.flipped_within(&main))
    }

    /// Number of windows matching the configured filter
    pub fn count_visible_windows(&self) -> Result<usize> {
        let count = self.server.window_count(self.options.window_filter)?;
        tracing::debug!("Windows ({:?}): {}", self.options.window_filter, count);
        Ok(count)
    }

    /// Summaries of every window matching the configured filter
    pub fn list_window_info(&self) -> Result<WindowList> {
        self.list_windows(self.options.window_filter)
    }

    fn list_windows(&self, filter: WindowFilter) -> Result<WindowList> {
        if !self.server.screen_capture_allowed() {
            if self.options.require_titles {
                return Err(Error::PermissionDenied);
            }
            tracing::warn!("Screen recording permission missing, window titles will be empty");
        }

        let raw = self.server.windows(filter)?;
        let records = raw
            .into_iter()
            .map(|w| WindowRecord::from_raw(w, self.options.title_limit))
            .collect::<Result<Vec<_>>>()?;

        let truncated = records.iter().filter(|r| r.title_truncated).count();
        if truncated > 0 {
            tracing::debug!("Truncated {} window titles", truncated);
        }
        Ok(WindowList::new(records))
    }

    /// Windows owned by `pid`
    pub fn windows_for_pid(&self, pid: i32) -> Result<WindowList> {
        Ok(self.list_window_info()?.owned_by(pid))
    }

    /// Union of the bounds of every on-screen window owned by `pid`.
    /// Ignores the configured filter; minimized windows sit at -32000 on Win32.
    pub fn capture_rect(&self, pid: i32) -> Result<Option<Rect>> {
        let on_screen = self.list_windows(WindowFilter::OnScreenOnly)?;
        Ok(on_screen.owned_by(pid).bounding_rect())
    }

    pub fn screen_capture_allowed(&self) -> bool {
        self.server.screen_capture_allowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::{window, FakeServer};
    use std::collections::BTreeSet;

    fn enumerator(server: FakeServer) -> Enumerator<FakeServer> {
        Enumerator::new(server, EnumerateOptions::default())
    }

    #[test]
    fn display_count_matches_list() {
        let en = enumerator(FakeServer::default());
        let list = en.list_active_displays().unwrap();
        assert_eq!(en.count_active_displays().unwrap() as usize, list.len());
        assert_eq!(list.get_display_at(1), Ok(DisplayId(7)));
    }

    #[test]
    fn counts_saturate_at_u32_max() {
        assert_eq!(saturating_u32(3), 3);
        assert_eq!(saturating_u32(u32::MAX as usize), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(saturating_u32(u32::MAX as usize + 1), u32::MAX);
    }

    #[test]
    fn display_lists_are_stable() {
        let en = enumerator(FakeServer::default());
        let a: BTreeSet<_> = en.list_active_displays().unwrap().into_vec().into_iter().collect();
        let b: BTreeSet<_> = en.list_active_displays().unwrap().into_vec().into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn each_call_requeries() {
        let en = enumerator(FakeServer::default());
        en.list_active_displays().unwrap();
        en.list_active_displays().unwrap();
        assert_eq!(en.server().queries.get(), 2);
    }

    #[test]
    fn display_limit_caps_count_and_list() {
        let server = FakeServer {
            displays: (0..5).map(|i| (DisplayId(i), Rect::default())).collect(),
            ..FakeServer::default()
        };
        let en = Enumerator::new(
            server,
            EnumerateOptions {
                display_limit: 3,
                ..EnumerateOptions::default()
            },
        );
        assert_eq!(en.count_active_displays().unwrap(), 3);
        let list = en.list_active_displays().unwrap();
        assert_eq!(list.as_slice(), &[DisplayId(0), DisplayId(1), DisplayId(2)]);
        assert!(list.get_display_at(3).is_err());
    }

    #[test]
    fn bottom_left_bounds() {
        let en = enumerator(FakeServer::default());
        assert_eq!(
            en.display_bounds_bottom_left(DisplayId(7)).unwrap(),
            Rect::new(1920.0, 380.0, 1440.0, 900.0)
        );
        assert_eq!(
            en.display_bounds(DisplayId(99)),
            Err(Error::UnknownDisplay(DisplayId(99)))
        );
    }

    #[test]
    fn count_and_list_share_filter() {
        for filter in [
            WindowFilter::All,
            WindowFilter::OnScreenOnly,
            WindowFilter::ExcludeDesktopElements,
        ] {
            let en = Enumerator::new(
                FakeServer::default(),
                EnumerateOptions {
                    window_filter: filter,
                    ..EnumerateOptions::default()
                },
            );
            assert_eq!(
                en.count_visible_windows().unwrap(),
                en.list_window_info().unwrap().len(),
                "filter {:?}",
                filter
            );
        }
    }

    #[test]
    fn default_filter_excludes_desktop() {
        let en = enumerator(FakeServer::default());
        let list = en.list_window_info().unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.iter().all(|w| w.title != "Desktop"));
        assert_eq!(list.get_window_at(1).unwrap().title, "");
        assert!(matches!(
            list.get_window_at(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn long_titles_truncated() {
        let long = "t".repeat(400);
        let server = FakeServer {
            windows: vec![(window(1, Some(&long), Rect::default()), true, false)],
            ..FakeServer::default()
        };
        let list = enumerator(server).list_window_info().unwrap();
        let rec = list.get_window_at(0).unwrap();
        assert_eq!(rec.title.len(), 255);
        assert!(rec.title_truncated);
    }

    #[test]
    fn missing_permission_policy() {
        let server = FakeServer {
            capture_allowed: false,
            ..FakeServer::default()
        };
        assert!(enumerator(server.clone()).list_window_info().is_ok());

        let strict = Enumerator::new(
            server,
            EnumerateOptions {
                require_titles: true,
                ..EnumerateOptions::default()
            },
        );
        assert_eq!(strict.list_window_info(), Err(Error::PermissionDenied));
    }

    #[test]
    fn os_failures_propagate() {
        let server = FakeServer {
            fail: Some(Error::OsQueryFailed {
                call: "CGGetActiveDisplayList",
                code: 1001,
            }),
            ..FakeServer::default()
        };
        let en = enumerator(server);
        assert!(matches!(
            en.count_active_displays(),
            Err(Error::OsQueryFailed { code: 1001, .. })
        ));
        assert!(en.list_window_info().is_err());
    }

    #[test]
    fn capture_rect_for_pid() {
        let en = enumerator(FakeServer::default());
        assert_eq!(
            en.capture_rect(501).unwrap(),
            Some(Rect::new(10.0, 20.0, 1190.0, 600.0))
        );
        assert_eq!(en.windows_for_pid(501).unwrap().len(), 2);
        assert_eq!(en.capture_rect(12345).unwrap(), None);
    }

    #[test]
    fn capture_rect_ignores_off_screen_windows() {
        let server = FakeServer {
            windows: vec![
                (window(9, Some("Player"), Rect::new(100.0, 100.0, 200.0, 200.0)), true, false),
                (window(9, Some("Mini"), Rect::new(-32000.0, -32000.0, 160.0, 28.0)), false, false),
            ],
            ..FakeServer::default()
        };
        let en = enumerator(server);
        assert_eq!(
            en.capture_rect(9).unwrap(),
            Some(Rect::new(100.0, 100.0, 200.0, 200.0))
        );
        // The configured filter still applies to the plain per-pid listing
        assert_eq!(en.windows_for_pid(9).unwrap().len(), 2);
    }

    #[test]
    fn capture_rect_none_when_only_off_screen() {
        let server = FakeServer {
            windows: vec![(window(9, None, Rect::new(-32000.0, -32000.0, 160.0, 28.0)), false, false)],
            ..FakeServer::default()
        };
        assert_eq!(enumerator(server).capture_rect(9).unwrap(), None);
    }
}
