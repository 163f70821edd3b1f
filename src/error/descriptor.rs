//! Project descriptor errors

use super::PaxError;

/// Creates an error for an element that would be overwritten
pub fn existing_element(element: impl Into<String>) -> PaxError {
    PaxError::ExistingElement {
        element: element.into(),
    }
}

/// Creates a descriptor read error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PaxError {
    PaxError::DescriptorReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a descriptor parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PaxError {
    PaxError::DescriptorParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a missing donor section
pub fn section_not_found(section: impl Into<String>, path: impl Into<String>) -> PaxError {
    PaxError::SectionNotFound {
        section: section.into(),
        path: path.into(),
    }
}

/// Creates a bad dependency version error
pub fn invalid_version(project: impl Into<String>, reason: impl Into<String>) -> PaxError {
    PaxError::InvalidDependencyVersion {
        project: project.into(),
        reason: reason.into(),
    }
}
