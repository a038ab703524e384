//! Path joining and pattern composition.
//!
//! Every lookup is rooted at the renderer's base directory. Include patterns
//! come first, in configured order, and the requested template always comes
//! last.

/// Joins `base` and `path` with `/` and cleans the result lexically.
///
/// Empty and `.` segments are dropped and `..` removes the previous segment.
/// A `..` that would climb above the start is kept, so `join("", "../x")`
/// stays `../x`. Glob metacharacters pass through untouched.
///
/// ```rust
/// use tmplrender::template::join;
///
/// assert_eq!(join("templates", "pages/index.html"), "templates/pages/index.html");
/// assert_eq!(join("templates/", "./a/../b.html"), "templates/b.html");
/// assert_eq!(join("", "index.html"), "index.html");
/// ```
pub fn join(base: &str, path: &str) -> String {
    let rooted = base.starts_with('/') || (base.is_empty() && path.starts_with('/'));
    let mut segments: Vec<&str> = Vec::new();

    for segment in base.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Builds the ordered list of patterns parsed for template `name`.
pub(crate) fn compose(base_dir: &str, include_patterns: &[String], name: &str) -> Vec<String> {
    include_patterns
        .iter()
        .map(|pattern| join(base_dir, pattern))
        .chain(std::iter::once(join(base_dir, name)))
        .collect()
}

/// Strips `base_dir` from a matched path, giving the name the file is
/// registered under inside the compiled unit.
pub(crate) fn relative_name<'a>(base_dir: &str, path: &'a str) -> &'a str {
    let base = join(base_dir, "");
    if base == "." {
        return path;
    }
    path.strip_prefix(base.as_str())
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}
