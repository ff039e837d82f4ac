//! Path normalization shared by every filesystem operation.
//!
//! The filesystem only ever sees fully-qualified paths. It does not interpret
//! `.` or `..`; joining against a working directory is the caller's job.

/// Applies the cleanup rules that run before a path is split:
/// backslashes become slashes, whitespace runs collapse to one space and the
/// result is trimmed.
fn clean(path: &str) -> String {
    path.replace('\\', "/")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a path into its non-empty segments.
pub fn segments(path: &str) -> Vec<String> {
    clean(path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Canonical absolute form of `path`, `/` for the root.
pub fn normalize(path: &str) -> String {
    let segments = segments(path);
    if segments.is_empty() {
        return "/".to_string();
    }
    segments.iter().map(|s| format!("/{s}")).collect()
}

/// Splits a path into its ancestor segments and leaf name.
/// Returns `None` when the path addresses the root.
pub(crate) fn split_leaf(path: &str) -> Option<(Vec<String>, String)> {
    let mut segments = segments(path);
    let leaf = segments.pop()?;
    Some((segments, leaf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("", "/")]
    #[case("/", "/")]
    #[case("//", "/")]
    #[case("   ", "/")]
    #[case("/home/user", "/home/user")]
    #[case("/home//user/", "/home/user")]
    #[case("home/user", "/home/user")]
    #[case("\\home\\user", "/home/user")]
    #[case("\\\\home\\/user", "/home/user")]
    #[case("  /home/user  ", "/home/user")]
    #[case("/home/my   file.txt", "/home/my file.txt")]
    #[case("/home/./user/..", "/home/./user/..")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case("/a//b\\c/")]
    #[case(" x \t y ")]
    #[case("")]
    fn test_normalize_is_idempotent(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_split_leaf() {
        assert_eq!(split_leaf("/"), None);
        assert_eq!(split_leaf(""), None);
        assert_eq!(split_leaf("/a"), Some((vec![], "a".to_string())));
        assert_eq!(
            split_leaf("/a/b/c"),
            Some((vec!["a".to_string(), "b".to_string()], "c".to_string()))
        );
    }

    #[test]
    fn test_segments_keep_inner_spaces() {
        assert_eq!(segments("/home / user"), vec!["home ", " user"]);
    }
}
