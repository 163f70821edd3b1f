//! Relative path arithmetic for parent references

/// Relative path used when a parent reference does not declare one
pub const DEFAULT_RELATIVE_PATH: &str = "../pom.xml";

const UP: &str = "../";

/// Shift a relative path after its descriptor moved `offset` directory levels
///
/// A positive offset means the descriptor moved down, so `../` segments are
/// prepended. A negative offset removes leading `../` segments, stopping
/// once none are left.
pub fn shift_relative_path(relative_path: &str, offset: i32) -> String {
    if offset >= 0 {
        let depth = usize::try_from(offset).unwrap_or_default();
        return format!("{}{relative_path}", UP.repeat(depth));
    }

    let mut shifted = relative_path;
    for _ in 0..offset.unsigned_abs() {
        match shifted.strip_prefix(UP) {
            Some(rest) => shifted = rest,
            None => break,
        }
    }
    shifted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_down_prepends_segments() {
        assert_eq!(shift_relative_path("../pom.xml", 2), "../../../pom.xml");
    }

    #[test]
    fn test_moving_up_removes_segments() {
        assert_eq!(shift_relative_path("../../pom.xml", -1), "../pom.xml");
    }

    #[test]
    fn test_zero_offset_is_identity() {
        assert_eq!(shift_relative_path("../parent/pom.xml", 0), "../parent/pom.xml");
    }

    #[test]
    fn test_removal_stops_at_first_real_segment() {
        assert_eq!(shift_relative_path("../pom.xml", -3), "pom.xml");
        assert_eq!(shift_relative_path("poms/pom.xml", -1), "poms/pom.xml");
    }
}
