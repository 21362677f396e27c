//! Location string parsing

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use types::{is_blank, ResourceError};

/// Marker that routes a location to the classpath
pub const CLASSPATH_PREFIX: &str = "classpath:";

/// Parsed resource location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Normalized classpath entry, marker stripped
    Classpath(String),
    /// Absolute or working-directory relative path
    FileSystem(PathBuf),
}

impl Location {
    /// Decide which backing store a location string refers to
    pub fn parse(location: &str) -> Result<Self, ResourceError> {
        if is_blank(location) {
            return Err(ResourceError::BlankLocation);
        }

        Ok(match location.strip_prefix(CLASSPATH_PREFIX) {
            Some(entry) => Location::Classpath(normalize_entry(entry)),
            None => Location::FileSystem(PathBuf::from(location)),
        })
    }
}

impl FromStr for Location {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Classpath(entry) => write!(f, "{}{}", CLASSPATH_PREFIX, entry),
            Location::FileSystem(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Collapse `/`-separated segments, dropping empty and `.` segments.
/// `..` pops the previous segment and is ignored at the root.
pub(crate) fn normalize_entry(entry: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in entry.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Resolve `relative` against the directory holding `entry`
pub(crate) fn resolve_sibling_entry(entry: &str, relative: &str) -> String {
    let relative = relative.replace('\\', "/");
    if relative.starts_with('/') {
        return normalize_entry(&relative);
    }

    match entry.rfind('/') {
        Some(idx) => normalize_entry(&format!("{}/{}", &entry[..idx], relative)),
        None => normalize_entry(&relative),
    }
}
