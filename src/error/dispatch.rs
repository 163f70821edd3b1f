//! Provisioning tool dispatch errors

use super::{DispatchFailure, PaxError, ToolError};

/// Creates an error for a tool artifact missing from every repository
pub fn not_found(reference: impl Into<String>) -> PaxError {
    failed(DispatchFailure::NotFound, reference, None)
}

/// Creates an error for a tool artifact that could not be resolved
pub fn unresolvable(reference: impl Into<String>, cause: Option<ToolError>) -> PaxError {
    failed(DispatchFailure::Unresolvable, reference, cause)
}

/// Creates an error for a missing tool entry point
pub fn entry_point_not_found(reference: impl Into<String>) -> PaxError {
    failed(DispatchFailure::EntryPointNotFound, reference, None)
}

/// Wraps an error raised by the tool entry point
pub fn invocation(reference: impl Into<String>, cause: ToolError) -> PaxError {
    failed(DispatchFailure::Invocation, reference, Some(cause))
}

fn failed(kind: DispatchFailure, reference: impl Into<String>, cause: Option<ToolError>) -> PaxError {
    PaxError::Dispatch {
        kind,
        reference: reference.into(),
        cause,
    }
}
