//! Readable resources

use crate::classpath::Classpath;
use crate::loader::load_file;
use crate::location::{resolve_sibling_entry, CLASSPATH_PREFIX};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use types::ResourceError;

/// A named, re-openable source of bytes
#[derive(Debug, Clone)]
pub enum Resource {
    /// Entry looked up on a classpath
    Classpath(ClasspathResource),
    /// File on disk
    FileSystem(FileSystemResource),
}

impl Resource {
    /// The location this resource was loaded from
    pub fn location(&self) -> &str {
        match self {
            Resource::Classpath(resource) => &resource.location,
            Resource::FileSystem(resource) => &resource.location,
        }
    }

    /// Open a fresh reader over the resource contents
    pub fn open(&self) -> Result<Box<dyn Read + Send>, ResourceError> {
        match self {
            Resource::Classpath(resource) => resource.open(),
            Resource::FileSystem(resource) => resource.open(),
        }
    }

    /// Run `callback` with an open reader and return its result.
    ///
    /// The reader is closed when this returns, whether the callback
    /// succeeded or not. Callback I/O errors are reported against this
    /// resource's location.
    pub fn with_resource<T, F>(&self, callback: F) -> Result<T, ResourceError>
    where
        F: FnOnce(&mut dyn Read) -> io::Result<T>,
    {
        let mut reader = self.open()?;
        callback(&mut *reader).map_err(|source| ResourceError::Io {
            resource: self.location().to_string(),
            source,
        })
    }

    /// Like [`Resource::with_resource`] for callbacks without a result
    pub fn use_resource<F>(&self, consumer: F) -> Result<(), ResourceError>
    where
        F: FnOnce(&mut dyn Read) -> io::Result<()>,
    {
        self.with_resource(consumer)
    }

    /// Read the whole resource as UTF-8 text
    pub fn read_contents(&self) -> Result<String, ResourceError> {
        self.with_resource(|reader| {
            let mut contents = String::new();
            reader.read_to_string(&mut contents)?;
            Ok(contents)
        })
    }

    /// Resolve `relative` against the directory containing this resource.
    ///
    /// The result is of the same variant. Filesystem results are
    /// validated again; classpath results are checked when opened.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Result<Resource, ResourceError> {
        match self {
            Resource::Classpath(resource) => Ok(Resource::Classpath(resource.resolve(relative))),
            Resource::FileSystem(resource) => resource.resolve(relative),
        }
    }
}

/// Resource backed by a classpath entry
#[derive(Debug, Clone)]
pub struct ClasspathResource {
    location: String,
    entry: String,
    classpath: Arc<Classpath>,
}

impl ClasspathResource {
    pub(crate) fn new(location: String, entry: String, classpath: Arc<Classpath>) -> Self {
        Self {
            location,
            entry,
            classpath,
        }
    }

    /// Normalized entry path, without the classpath marker
    pub fn entry(&self) -> &str {
        &self.entry
    }

    fn open(&self) -> Result<Box<dyn Read + Send>, ResourceError> {
        self.classpath
            .open(&self.entry)
            .ok_or_else(|| ResourceError::ClasspathNotFound {
                location: self.location.clone(),
            })
    }

    fn resolve(&self, relative: impl AsRef<Path>) -> ClasspathResource {
        let relative = relative.as_ref().to_string_lossy();
        let entry = resolve_sibling_entry(&self.entry, &relative);
        ClasspathResource::new(
            format!("{}{}", CLASSPATH_PREFIX, entry),
            entry,
            Arc::clone(&self.classpath),
        )
    }
}

/// Resource backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileSystemResource {
    location: String,
    path: PathBuf,
}

impl FileSystemResource {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            location: path.display().to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Box<dyn Read + Send>, ResourceError> {
        let file = std::fs::File::open(&self.path).map_err(|source| ResourceError::Open {
            path: self.location.clone(),
            source,
        })?;
        Ok(Box::new(file))
    }

    fn resolve(&self, relative: impl AsRef<Path>) -> Result<Resource, ResourceError> {
        let path = match self.path.parent() {
            Some(parent) => parent.join(relative),
            None => relative.as_ref().to_path_buf(),
        };
        load_file(path)
    }
}
