//! Hierarchical configuration backed by property files
//!
//! Property resources are located through the `resource` crate, parsed into
//! a flat key/value map and exposed through typed, prefix-scoped
//! [`Configuration`] views that all share the same map.

pub mod configuration;
pub mod loader;
pub mod properties;
pub mod store;

pub use configuration::{Configuration, FromConfigValue};
pub use loader::ConfigLoader;
pub use properties::Properties;
pub use store::ConfigurationStore;
