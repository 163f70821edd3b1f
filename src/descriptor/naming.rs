//! Identifier derivation from group and artifact ids

/// Combine group and artifact ids into one dotted identifier
///
/// Overlapping segments are not repeated: an artifact that already starts
/// with the group wins, as does a group that already ends with the artifact.
///
/// ```text
/// ("org.foo", "org.foo.bar") -> "org.foo.bar"
/// ("org.foo", "org.foo")     -> "org.foo"
/// ("org.foo.bar", "bar")     -> "org.foo.bar"
/// ("org.foo", "baz")         -> "org.foo.baz"
/// ```
pub fn compound_id(group_id: &str, artifact_id: &str) -> String {
    if artifact_id == group_id
        || artifact_id
            .strip_prefix(group_id)
            .is_some_and(|rest| rest.starts_with('.'))
    {
        return artifact_id.to_string();
    }

    if group_id
        .strip_suffix(artifact_id)
        .is_some_and(|rest| rest.ends_with('.'))
    {
        return group_id.to_string();
    }

    format!("{group_id}.{artifact_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_extends_group() {
        assert_eq!(compound_id("org.foo", "org.foo.bar"), "org.foo.bar");
    }

    #[test]
    fn test_artifact_equals_group() {
        assert_eq!(compound_id("org.foo", "org.foo"), "org.foo");
    }

    #[test]
    fn test_group_ends_with_artifact() {
        assert_eq!(compound_id("org.foo.bar", "bar"), "org.foo.bar");
    }

    #[test]
    fn test_unrelated_ids_are_joined() {
        assert_eq!(compound_id("org.foo", "baz"), "org.foo.baz");
    }

    #[test]
    fn test_partial_segment_overlap_is_not_merged() {
        assert_eq!(compound_id("org.foo", "org.foobar"), "org.foo.org.foobar");
        assert_eq!(compound_id("org.foobar", "bar"), "org.foobar.bar");
    }
}
