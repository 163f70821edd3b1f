//! Deployment descriptor errors

use super::PaxError;

/// Creates an error for a deployment descriptor that could not be written
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> PaxError {
    PaxError::DeploymentWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a deployment descriptor that could not be installed
pub fn install_failed(coordinates: impl Into<String>, reason: impl Into<String>) -> PaxError {
    PaxError::DeploymentInstallFailed {
        coordinates: coordinates.into(),
        reason: reason.into(),
    }
}
