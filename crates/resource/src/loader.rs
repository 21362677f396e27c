//! Resource loader implementation

use crate::classpath::Classpath;
use crate::location::Location;
use crate::resource::{ClasspathResource, FileSystemResource, Resource};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use types::ResourceError;

/// Turns location strings into validated resources
#[derive(Debug, Clone, Default)]
pub struct ResourceLoader {
    classpath: Arc<Classpath>,
}

impl ResourceLoader {
    /// Create a loader that looks up classpath entries in `classpath`
    pub fn new(classpath: Classpath) -> Self {
        Self {
            classpath: Arc::new(classpath),
        }
    }

    /// Create a loader whose classpath comes from `FLAIR_CLASSPATH`
    pub fn from_env() -> Result<Self, ResourceError> {
        Ok(Self::new(Classpath::from_env()?))
    }

    pub fn classpath(&self) -> &Classpath {
        &self.classpath
    }

    /// Load the resource at `location`.
    ///
    /// `classpath:` locations must be openable from some classpath root;
    /// anything else is a filesystem path that must exist and be readable.
    pub fn load(&self, location: &str) -> Result<Resource, ResourceError> {
        tracing::debug!(location = %location, "Loading resource");

        match Location::parse(location)? {
            Location::Classpath(entry) => self.load_classpath(location, entry),
            Location::FileSystem(path) => load_file(path),
        }
    }

    /// Load `location` and read it fully as UTF-8 text
    pub fn read_contents(&self, location: &str) -> Result<String, ResourceError> {
        self.load(location)?.read_contents()
    }

    fn load_classpath(&self, location: &str, entry: String) -> Result<Resource, ResourceError> {
        if !self.classpath.contains(&entry) {
            tracing::debug!(location = %location, "Classpath entry not found");
            return Err(ResourceError::ClasspathNotFound {
                location: location.to_string(),
            });
        }

        Ok(Resource::Classpath(ClasspathResource::new(
            location.to_string(),
            entry,
            Arc::clone(&self.classpath),
        )))
    }
}

/// Validate that `path` is an existing, readable regular file
pub(crate) fn load_file(path: PathBuf) -> Result<Resource, ResourceError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(ResourceError::FileNotFound { path: display });
    }

    if !path.is_file() {
        return Err(ResourceError::NotAFile { path: display });
    }

    // probe readability; the handle is dropped right away
    File::open(&path).map_err(|source| ResourceError::FileNotReadable {
        path: display,
        source,
    })?;

    Ok(Resource::FileSystem(FileSystemResource::new(path)))
}
