//! Window records and title normalization

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::platform::RawWindow;
use serde::{Deserialize, Serialize};

/// Snapshot of one window at query time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub pid: i32,
    pub title: String,
    /// Set when `title` was cut to fit the configured limit
    pub title_truncated: bool,
    pub bounds: Rect,
}

impl WindowRecord {
    /// Normalize an OS entry. Owner pid and bounds are required keys.
    pub(crate) fn from_raw(raw: RawWindow, title_limit: Option<usize>) -> Result<Self> {
        let pid = raw.pid.ok_or(Error::malformed("window owner pid"))?;
        let bounds = raw.bounds.ok_or(Error::malformed("window bounds"))?;
        let (title, title_truncated) = match (raw.title, title_limit) {
            (None, _) => (String::new(), false),
            (Some(t), None) => (t, false),
            (Some(t), Some(limit)) => truncate_title(t, limit),
        };

        Ok(WindowRecord {
            pid,
            title,
            title_truncated,
            bounds,
        })
    }
}

/// Cut `title` to at most `limit` bytes without splitting a character
pub fn truncate_title(mut title: String, limit: usize) -> (String, bool) {
    if title.len() <= limit {
        return (title, false);
    }
    let mut end = limit;
    while !title.is_char_boundary(end) {
        end -= 1;
    }
    title.truncate(end);
    (title, true)
}

/// Window records in OS-reported (front to back) order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WindowList {
    records: Vec<WindowRecord>,
}

impl WindowList {
    pub fn new(records: Vec<WindowRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checked positional access
    pub fn get_window_at(&self, index: usize) -> Result<&WindowRecord> {
        self.records.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WindowRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[WindowRecord] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<WindowRecord> {
        self.records
    }

    /// Records owned by `pid`, order preserved
    pub fn owned_by(&self, pid: i32) -> WindowList {
        WindowList::new(self.records.iter().filter(|w| w.pid == pid).cloned().collect())
    }

    /// Smallest rectangle enclosing every record, `None` when empty
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut iter = self.records.iter().map(|w| w.bounds);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, r| acc.union(&r)))
    }
}

impl<'a> IntoIterator for &'a WindowList {
    type Item = &'a WindowRecord;
    type IntoIter = std::slice::Iter<'a, WindowRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Record at `index`, or `IndexOutOfRange`
pub fn get_window_at(list: &WindowList, index: usize) -> Result<&WindowRecord> {
    list.get_window_at(index)
}
