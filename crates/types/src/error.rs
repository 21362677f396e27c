//! Error types for the Flair configuration and resource libraries

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Main error type for the flair libraries
#[derive(Error, Debug)]
pub enum FlairError {
    /// Resource location or access errors
    #[error("Resource access error: {0}")]
    ResourceAccess(#[from] ResourceError),

    /// Missing or malformed configuration parameters
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Malformed property data
    #[error("Bad data: {0}")]
    BadData(#[from] PropertiesError),
}

/// Result type alias for flair operations
pub type Result<T> = std::result::Result<T, FlairError>;

/// Coarse classification of a [`FlairError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ResourceAccess,
    Configuration,
    BadData,
}

impl FlairError {
    /// The kind of failure this error represents
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlairError::ResourceAccess(_) => ErrorKind::ResourceAccess,
            FlairError::Configuration(_) => ErrorKind::Configuration,
            FlairError::BadData(_) => ErrorKind::BadData,
        }
    }

    /// Structured parameters attached to the underlying error
    pub fn params(&self) -> ErrorParams {
        match self {
            FlairError::ResourceAccess(err) => err.params(),
            FlairError::Configuration(err) => err.params(),
            FlairError::BadData(err) => err.params(),
        }
    }
}

/// Resource location and access errors
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Blank location string
    #[error("Resource location is required")]
    BlankLocation,

    /// Filesystem path does not exist
    #[error("File does not exist: {path}")]
    FileNotFound { path: String },

    /// Filesystem path exists but cannot be read
    #[error("File cannot be read from: {path}")]
    FileNotReadable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Filesystem path is not a regular file
    #[error("Not a regular file: {path}")]
    NotAFile { path: String },

    /// No classpath root holds the entry
    #[error("Cannot open classpath location: {location}")]
    ClasspathNotFound { location: String },

    /// Opening a file failed
    #[error("Error opening file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Reading from an open resource failed
    #[error("I/O error reading {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: io::Error,
    },

    /// Classpath settings could not be extracted
    #[error("Invalid classpath settings: {0}")]
    Settings(String),
}

impl ResourceError {
    /// Structured parameters carried by this error
    pub fn params(&self) -> ErrorParams {
        match self {
            ResourceError::BlankLocation | ResourceError::Settings(_) => ErrorParams::new(),
            ResourceError::FileNotFound { path }
            | ResourceError::FileNotReadable { path, .. }
            | ResourceError::NotAFile { path }
            | ResourceError::Open { path, .. } => ErrorParams::new().with("path", path),
            ResourceError::ClasspathNotFound { location } => {
                ErrorParams::new().with("location", location)
            }
            ResourceError::Io { resource, .. } => ErrorParams::new().with("resource", resource),
        }
    }
}

/// Configuration parameter errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required parameter is absent
    #[error("Missing required parameter: {param_name}")]
    MissingParameter { param_name: String },

    /// Numeric parameter is present but blank
    #[error("Blank parameter provided: {param_name}")]
    BlankParameter {
        param_name: String,
        param_value: String,
    },

    /// Parameter is not a base-10 integer
    #[error("Invalid integer parameter provided for {param_name}: {param_value:?}")]
    InvalidInteger {
        param_name: String,
        param_value: String,
        #[source]
        source: ParseIntError,
    },

    /// Parameter is not a floating point number
    #[error("Invalid float parameter provided for {param_name}: {param_value:?}")]
    InvalidFloat {
        param_name: String,
        param_value: String,
        #[source]
        source: ParseFloatError,
    },
}

impl ConfigError {
    /// Name of the offending parameter
    pub fn param_name(&self) -> &str {
        match self {
            ConfigError::MissingParameter { param_name }
            | ConfigError::BlankParameter { param_name, .. }
            | ConfigError::InvalidInteger { param_name, .. }
            | ConfigError::InvalidFloat { param_name, .. } => param_name,
        }
    }

    /// Structured parameters carried by this error
    pub fn params(&self) -> ErrorParams {
        let params = ErrorParams::new().with("param_name", self.param_name());
        match self {
            ConfigError::MissingParameter { .. } => params,
            ConfigError::BlankParameter { param_value, .. }
            | ConfigError::InvalidInteger { param_value, .. }
            | ConfigError::InvalidFloat { param_value, .. } => {
                params.with("param_value", param_value)
            }
        }
    }
}

/// Property data format errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertiesError {
    /// Invalid `\uXXXX` escape sequence
    #[error("Malformed escape on line {line}: {message}")]
    MalformedEscape { line: usize, message: String },
}

impl PropertiesError {
    /// Structured parameters carried by this error
    pub fn params(&self) -> ErrorParams {
        match self {
            PropertiesError::MalformedEscape { line, .. } => {
                ErrorParams::new().with("line", line.to_string())
            }
        }
    }
}

/// Ordered key/value parameters describing an error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorParams(BTreeMap<String, String>);

impl ErrorParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing any previous value for the key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ErrorParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}
