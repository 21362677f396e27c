//! Classpath search roots
//!
//! A classpath is an ordered list of roots that classpath entries are
//! looked up in. Roots are either trees bundled into the binary at compile
//! time with `include_dir!` or directories on disk. The first root that
//! holds an entry wins.

use figment::{providers::Env, Figment};
use include_dir::Dir;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use types::ResourceError;

/// A single classpath root
#[derive(Clone)]
pub enum ClasspathRoot {
    /// Tree bundled into the binary
    Embedded(&'static Dir<'static>),
    /// Directory on disk
    Directory(PathBuf),
}

impl ClasspathRoot {
    fn open(&self, entry: &str) -> Option<Box<dyn Read + Send>> {
        match self {
            ClasspathRoot::Embedded(dir) => dir
                .get_file(entry)
                .map(|file| Box::new(file.contents()) as Box<dyn Read + Send>),
            ClasspathRoot::Directory(root) => {
                let path = root.join(entry);
                if !path.is_file() {
                    return None;
                }
                File::open(path)
                    .ok()
                    .map(|file| Box::new(file) as Box<dyn Read + Send>)
            }
        }
    }
}

impl fmt::Debug for ClasspathRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClasspathRoot::Embedded(dir) => f.debug_tuple("Embedded").field(&dir.path()).finish(),
            ClasspathRoot::Directory(path) => f.debug_tuple("Directory").field(path).finish(),
        }
    }
}

/// Settings read from `FLAIR_*` environment variables
#[derive(Debug, Default, Deserialize)]
struct ClasspathSettings {
    /// Platform path list (`:` separated on Unix, `;` on Windows)
    classpath: Option<String>,
}

/// Ordered set of classpath roots
#[derive(Debug, Clone, Default)]
pub struct Classpath {
    roots: Vec<ClasspathRoot>,
}

impl Classpath {
    /// Create an empty classpath
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a classpath from the `FLAIR_CLASSPATH` environment variable
    pub fn from_env() -> Result<Self, ResourceError> {
        Self::from_figment(&Figment::new().merge(Env::prefixed("FLAIR_").only(&["classpath"])))
    }

    /// Build a classpath from the `classpath` key of a figment
    pub fn from_figment(figment: &Figment) -> Result<Self, ResourceError> {
        let settings: ClasspathSettings = figment
            .extract()
            .map_err(|e| ResourceError::Settings(e.to_string()))?;

        let mut classpath = Self::new();
        if let Some(paths) = settings.classpath {
            for path in std::env::split_paths(&paths) {
                if !path.as_os_str().is_empty() {
                    classpath = classpath.with_directory(path);
                }
            }
        }

        tracing::debug!(roots = ?classpath.roots, "Classpath configured");
        Ok(classpath)
    }

    /// Append a bundled tree
    pub fn with_embedded(mut self, dir: &'static Dir<'static>) -> Self {
        self.roots.push(ClasspathRoot::Embedded(dir));
        self
    }

    /// Append a directory root
    pub fn with_directory(mut self, path: impl AsRef<Path>) -> Self {
        self.roots.push(ClasspathRoot::Directory(path.as_ref().to_path_buf()));
        self
    }

    pub fn roots(&self) -> &[ClasspathRoot] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Open a normalized entry from the first root that holds it
    pub(crate) fn open(&self, entry: &str) -> Option<Box<dyn Read + Send>> {
        if entry.is_empty() {
            return None;
        }
        self.roots.iter().find_map(|root| root.open(entry))
    }

    /// Check that an entry can be opened, closing the probe immediately
    pub(crate) fn contains(&self, entry: &str) -> bool {
        self.open(entry).is_some()
    }
}
