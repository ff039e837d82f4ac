/// Resolves `path` against the working directory `cwd`.
///
/// Relative paths start from `cwd`, absolute ones from the root. Either way
/// `.` is skipped and `..` drops one level, never above the root, so the
/// result never holds a `.` or `..` segment.
pub fn join(cwd: &str, path: &str) -> String {
    let base = if path.starts_with('/') { "" } else { cwd };

    let mut stack: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            name => stack.push(name),
        }
    }

    format!("/{}", stack.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("/home/user", "notes.txt", "/home/user/notes.txt")]
    #[case("/home/user", "", "/home/user")]
    #[case("/home/user", ".", "/home/user")]
    #[case("/home/user", "..", "/home")]
    #[case("/home/user", "../../..", "/")]
    #[case("/home/user", "./a/../b", "/home/user/b")]
    #[case("/", "tmp", "/tmp")]
    #[case("/home/user", "/etc/../x", "/x")]
    #[case("/home/user", "/home/..", "/")]
    #[case("/home/user", "/../..", "/")]
    #[case("/home/user", "/tmp/./a", "/tmp/a")]
    #[case("/home/user", "docs//a/", "/home/user/docs/a")]
    fn test_join(#[case] cwd: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(join(cwd, path), expected);
    }
}
