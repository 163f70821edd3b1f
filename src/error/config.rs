//! Configuration errors

use super::PaxError;

/// Creates a configuration not found error
pub fn not_found(path: impl Into<String>) -> PaxError {
    PaxError::ConfigNotFound { path: path.into() }
}

/// Creates a configuration parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PaxError {
    PaxError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> PaxError {
    PaxError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a missing module descriptor error
pub fn module_not_found(module: impl Into<String>, path: impl Into<String>) -> PaxError {
    PaxError::ModuleNotFound {
        module: module.into(),
        path: path.into(),
    }
}
