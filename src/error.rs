//! Error types shared by every query

use crate::display::DisplayId;

/// Display and window enumeration error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Screen recording permission denied")]
    PermissionDenied,

    #[error("{call} failed (code {code})")]
    OsQueryFailed { call: &'static str, code: i32 },

    #[error("Index {index} out of range for list of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown display: {0}")]
    UnknownDisplay(DisplayId),

    #[error("Platform not supported")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Malformed data returned by an otherwise successful OS call
    pub(crate) fn malformed(call: &'static str) -> Self {
        Error::OsQueryFailed { call, code: -1 }
    }
}
