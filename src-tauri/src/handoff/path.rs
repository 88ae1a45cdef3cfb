use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use url::Url;

/// An absolute, normalized `file://` location, as handed to the frontend.
///
/// Equality is plain string equality; the same file opened twice yields two
/// equal values and both are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FileUrl(String);

impl FileUrl {
    /// Builds a file URL from an OS path. Relative paths resolve against the
    /// current working directory.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let absolute = std::path::absolute(path.as_ref()).ok()?;
        let url = Url::from_file_path(lexical_normalize(&absolute)).ok()?;
        Some(FileUrl(url.into()))
    }

    pub fn from_url(url: &Url) -> Option<Self> {
        if url.scheme() != "file" {
            return None;
        }
        let path = url.to_file_path().ok()?;
        Self::from_path(path)
    }

    /// Parses a raw string that is either a URL or an OS path.
    ///
    /// Single-letter schemes are drive letters (`C:\notes.md`), not URLs.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) if url.scheme().len() > 1 => Self::from_url(&url),
            _ => Self::from_path(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<FileUrl> for String {
    fn from(url: FileUrl) -> Self {
        url.0
    }
}

// Drops `.` and resolves `..` without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn absolute_path_becomes_file_url() {
        let url = FileUrl::from_path("/tmp/notes/a.md").expect("absolute path");
        assert_eq!(url.as_str(), "file:///tmp/notes/a.md");
    }

    #[cfg(unix)]
    #[test]
    fn dot_segments_are_removed() {
        let url = FileUrl::from_path("/tmp/./drafts/../notes/a.md").expect("dotted path");
        assert_eq!(url.as_str(), "file:///tmp/notes/a.md");
    }

    #[cfg(unix)]
    #[test]
    fn spaces_are_percent_encoded() {
        let url = FileUrl::from_path("/tmp/my notes/a b.md").expect("path with spaces");
        assert_eq!(url.as_str(), "file:///tmp/my%20notes/a%20b.md");
    }

    #[test]
    fn relative_path_resolves_against_cwd() {
        let cwd = std::env::current_dir().expect("cwd");
        let expected = FileUrl::from_path(cwd.join("a.md")).expect("joined path");
        assert_eq!(FileUrl::from_path("a.md"), Some(expected));
    }

    #[test]
    fn non_file_urls_are_rejected() {
        let url = Url::parse("https://example.com/a.md").expect("valid url");
        assert_eq!(FileUrl::from_url(&url), None);
        assert_eq!(FileUrl::parse("https://example.com/a.md"), None);
        assert_eq!(FileUrl::parse("inkwell://open?file=a.md"), None);
    }

    #[cfg(unix)]
    #[test]
    fn parse_accepts_urls_and_paths() {
        assert_eq!(
            FileUrl::parse("file:///tmp/a%20b.md").map(String::from),
            Some("file:///tmp/a%20b.md".to_string())
        );
        assert_eq!(
            FileUrl::parse("/tmp/a.md").map(String::from),
            Some("file:///tmp/a.md".to_string())
        );
    }

    #[cfg(windows)]
    #[test]
    fn drive_letters_are_paths_not_schemes() {
        let url = FileUrl::parse(r"C:\notes\a.md").expect("drive path");
        assert_eq!(url.as_str(), "file:///C:/notes/a.md");
    }

    #[test]
    fn blank_input_is_dropped() {
        assert_eq!(FileUrl::parse(""), None);
        assert_eq!(FileUrl::parse("   "), None);
    }

    #[cfg(unix)]
    #[test]
    fn serializes_as_plain_string() {
        let url = FileUrl::from_path("/tmp/a.md").expect("path");
        assert_eq!(
            serde_json::to_string(&url).expect("serialize"),
            "\"file:///tmp/a.md\""
        );
    }
}
