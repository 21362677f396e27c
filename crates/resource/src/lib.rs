//! Classpath and filesystem resource resolution
//!
//! This crate locates named resources either on a classpath (bundled trees
//! or directories searched in order) or on the filesystem, and opens them as
//! byte streams.

pub mod classpath;
pub mod loader;
pub mod location;
pub mod resource;

pub use classpath::{Classpath, ClasspathRoot};
pub use loader::ResourceLoader;
pub use location::{Location, CLASSPATH_PREFIX};
pub use resource::{ClasspathResource, FileSystemResource, Resource};

#[cfg(test)]
pub(crate) mod testdata {
    use include_dir::{include_dir, Dir};
    use std::path::PathBuf;

    pub(crate) static TESTDATA: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/testdata");

    pub(crate) fn testdata_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
    }
}
