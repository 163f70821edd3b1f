//! File system errors

use super::PaxError;

/// Creates a file read error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PaxError {
    PaxError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> PaxError {
    PaxError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
