//! Active display identifiers

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// OS-assigned display handle, valid for the current session only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayId(pub u32);

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DisplayId {
    /// Narrow a pointer-sized monitor handle. Handles are small
    /// session-local values; a handle with upper bits set keeps only its
    /// low 32 bits and may collide with another display.
    #[cfg_attr(not(target_os = "windows"), allow(dead_code))]
    pub(crate) fn from_handle(raw: usize) -> Self {
        match u32::try_from(raw) {
            Ok(id) => DisplayId(id),
            Err(_) => {
                tracing::warn!("Display handle {:#x} does not fit in 32 bits", raw);
                DisplayId(raw as u32)
            }
        }
    }
}

impl From<u32> for DisplayId {
    fn from(id: u32) -> Self {
        DisplayId(id)
    }
}

/// Display identifiers in OS-reported order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    ids: Vec<DisplayId>,
}

impl DisplayList {
    pub fn new(ids: Vec<DisplayId>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Checked positional access
    pub fn get_display_at(&self, index: usize) -> Result<DisplayId> {
        self.ids.get(index).copied().ok_or(Error::IndexOutOfRange {
            index,
            len: self.ids.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[DisplayId] {
        &self.ids
    }

    pub fn into_vec(self) -> Vec<DisplayId> {
        self.ids
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DisplayId;
    type IntoIter = std::slice::Iter<'a, DisplayId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

/// Element at `index`, or `IndexOutOfRange`
pub fn get_display_at(list: &DisplayList, index: usize) -> Result<DisplayId> {
    list.get_display_at(index)
}
