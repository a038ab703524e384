//! Read-only template sources.
//!
//! A [`TemplateSource`] serves template text by slash-separated path and can
//! list every path it knows about, which is all the renderer needs to expand
//! glob patterns. Two implementations ship with the crate:
//!
//! - [`MemorySource`]: an in-memory map, handy for tests and embedded templates
//! - [`DirSource`]: a directory on disk, walked recursively
//!
//! Paths are always relative to the source root and use `/` as separator,
//! regardless of platform.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::RenderError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A read-only, hierarchical file source keyed by path.
pub trait TemplateSource: Send + Sync {
    /// Lists every file path in the source.
    fn paths(&self) -> io::Result<Vec<String>>;

    /// Reads the contents of the file at `path`.
    fn read(&self, path: &str) -> io::Result<String>;

    /// Returns every path matching the shell pattern, sorted.
    ///
    /// `*` and `?` never match `/`. An empty result is not an error here;
    /// callers decide whether zero matches is acceptable.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, RenderError> {
        let compiled = Pattern::new(pattern).map_err(|source| RenderError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut matches: Vec<String> = self
            .paths()
            .map_err(|e| RenderError::source_io(pattern, e))?
            .into_iter()
            .filter(|path| compiled.matches_with(path, MATCH_OPTIONS))
            .collect();
        matches.sort();
        Ok(matches)
    }
}

/// In-memory template source.
///
/// # Example
///
/// ```rust
/// use tmplrender::{MemorySource, TemplateSource};
///
/// let source = MemorySource::new()
///     .with_file("layouts/base.html", "{% block body %}{% endblock %}")
///     .with_file("index.html", "{% extends 'layouts/base.html' %}");
///
/// assert_eq!(source.glob("layouts/*.html").unwrap(), vec!["layouts/base.html"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any previous content at the same path.
    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Builder form of [`add_file`](Self::add_file).
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for MemorySource {
    fn from_iter<T: IntoIterator<Item = (P, C)>>(iter: T) -> Self {
        let mut source = MemorySource::new();
        for (path, content) in iter {
            source.add_file(path, content);
        }
        source
    }
}

impl TemplateSource for MemorySource {
    fn paths(&self) -> io::Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, path: &str) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("file does not exist: {path}"))
        })
    }
}

/// Template source backed by a directory on disk.
///
/// The directory is walked on every call to [`paths`](TemplateSource::paths);
/// the renderer only asks for it on a cache miss.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Creates a source rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist or is not a directory.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("template directory does not exist: {}", root.display()),
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let mut resolved = self.root.clone();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("path escapes source root: {path}"),
                    ))
                }
                _ => resolved.push(segment),
            }
        }
        Ok(resolved)
    }
}

impl TemplateSource for DirSource {
    fn paths(&self) -> io::Result<Vec<String>> {
        let mut out = Vec::new();
        walk_dir_recursive(&self.root, "", &mut out)?;
        Ok(out)
    }

    fn read(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(self.resolve(path)?)
    }
}

fn walk_dir_recursive(current: &Path, prefix: &str, out: &mut Vec<String>) -> io::Result<()> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        // Names that are not UTF-8 cannot be addressed by a `&str` path.
        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };
        let relative = if prefix.is_empty() {
            file_name
        } else {
            format!("{prefix}/{file_name}")
        };

        if path.is_dir() {
            walk_dir_recursive(&path, &relative, out)?;
        } else if path.is_file() {
            out.push(relative);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemorySource {
        MemorySource::new()
            .with_file("pages/index.html", "index")
            .with_file("pages/about.html", "about")
            .with_file("pages/nested/deep.html", "deep")
            .with_file("layouts/base.html", "base")
    }

    #[test]
    fn test_memory_read() {
        let source = sample();
        assert_eq!(source.read("pages/index.html").unwrap(), "index");
        assert_eq!(source.len(), 4);
    }

    #[test]
    fn test_memory_read_missing_is_not_found() {
        let err = sample().read("nope.html").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_glob_is_sorted() {
        let matches = sample().glob("pages/*.html").unwrap();
        assert_eq!(matches, vec!["pages/about.html", "pages/index.html"]);
    }

    #[test]
    fn test_glob_star_does_not_cross_separator() {
        let matches = sample().glob("*.html").unwrap();
        assert!(matches.is_empty());

        let matches = sample().glob("pages/*/*.html").unwrap();
        assert_eq!(matches, vec!["pages/nested/deep.html"]);
    }

    #[test]
    fn test_glob_literal_path() {
        let matches = sample().glob("layouts/base.html").unwrap();
        assert_eq!(matches, vec!["layouts/base.html"]);
    }

    #[test]
    fn test_glob_invalid_pattern() {
        let err = sample().glob("pages/[").unwrap_err();
        assert!(matches!(err, RenderError::InvalidPattern { .. }));
    }

    #[test]
    fn test_memory_from_iter() {
        let source: MemorySource = [("a.html", "A"), ("b.html", "B")].into_iter().collect();
        assert_eq!(source.paths().unwrap(), vec!["a.html", "b.html"]);
    }

    #[test]
    fn test_dir_source_missing_root() {
        assert!(DirSource::new("/definitely/not/a/real/dir").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_dir_source_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.txt"), "ok").unwrap();
        let bad = dir.path().join(OsStr::from_bytes(b"bad\xff.txt"));
        if std::fs::write(&bad, "bad").is_err() {
            // Filesystem refuses non-UTF-8 names; nothing to skip.
            return;
        }

        let source = DirSource::new(dir.path()).unwrap();
        let paths = source.paths().unwrap();
        assert_eq!(paths, vec!["ok.txt"]);
        for path in &paths {
            assert!(source.read(path).is_ok());
        }
    }

    #[test]
    fn test_dir_source_rejects_parent_segments() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path()).unwrap();
        let err = source.read("../etc/passwd").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
