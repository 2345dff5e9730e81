//! Timestamped capture of displays and windows

use crate::display::DisplayId;
use crate::enumerator::Enumerator;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::platform::WindowServer;
use crate::window::WindowRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayInfo {
    pub id: DisplayId,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub captured_at: DateTime<Utc>,
    pub displays: Vec<DisplayInfo>,
    pub windows: Vec<WindowRecord>,
}

impl Snapshot {
    pub fn capture<S: WindowServer>(enumerator: &Enumerator<S>) -> Result<Self> {
        let captured_at = Utc::now();
        let mut displays = Vec::new();
        for &id in enumerator.list_active_displays()?.iter() {
            match enumerator.display_bounds(id) {
                Ok(bounds) => displays.push(DisplayInfo { id, bounds }),
                // Unplugged between the list and the bounds query
                Err(Error::UnknownDisplay(_)) => {
                    tracing::debug!("Skipping display {}: no longer active", id);
                }
                Err(e) => return Err(e),
            }
        }
        let windows = enumerator.list_window_info()?.into_vec();

        Ok(Snapshot {
            captured_at,
            displays,
            windows,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
