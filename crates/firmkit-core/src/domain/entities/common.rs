use super::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A project-relative path in list-file form.
///
/// Invariant: never absolute, never climbs out with `..`, always
/// `/`-separated, no leading `./`, no trailing `/`. The empty path is the project root. Enforced at
/// construction.
///
/// List files are shared between hosts, so separators are normalised here
/// rather than by `std::path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelativePath(String);

impl RelativePath {
    /// The project root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Fallible constructor.
    pub fn try_new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = path.as_ref().trim();
        let normalised = raw.replace('\\', "/");

        if is_absolute(&normalised) {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: raw.to_string(),
            });
        }

        let segments: Vec<&str> = normalised
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();

        if segments.contains(&"..") {
            return Err(DomainError::PathEscapesProject {
                path: raw.to_string(),
            });
        }

        Ok(Self(segments.join("/")))
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<str>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        if is_absolute(&segment.replace('\\', "/")) {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: segment.to_string(),
            });
        }
        if self.0.is_empty() {
            Self::try_new(segment)
        } else {
            Self::try_new(format!("{}/{}", self.0, segment))
        }
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Host path relative to the project directory.
    pub fn to_path_buf(&self) -> PathBuf {
        self.0.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Resolve against a project directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(self.to_path_buf())
    }

    /// Form used inside list files and the registry.
    ///
    /// The root is written as `.` so a registry line always has a value.
    pub fn to_list_entry(&self) -> String {
        if self.0.is_empty() {
            ".".to_string()
        } else {
            self.0.clone()
        }
    }

    /// Form used inside source and include lists: `./`-anchored.
    pub fn to_build_entry(&self) -> String {
        if self.0.is_empty() {
            ".".to_string()
        } else {
            format!("./{}", self.0)
        }
    }
}

impl TryFrom<String> for RelativePath {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<RelativePath> for String {
    fn from(path: RelativePath) -> Self {
        path.0
    }
}

fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/') || (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_list_entry())
    }
}
