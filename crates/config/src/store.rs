//! Prefix-scoped view over a shared property set

use crate::properties::Properties;
use std::sync::Arc;
use types::is_blank;

/// Flat string lookup over one shared [`Properties`] map.
///
/// Sub-stores share the same map and only differ in their key prefix.
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    prefix: String,
    props: Arc<Properties>,
}

impl ConfigurationStore {
    /// Create a root store
    pub fn new(props: Properties) -> Self {
        Self::from_shared(Arc::new(props))
    }

    /// Create a root store over an already shared map
    pub fn from_shared(props: Arc<Properties>) -> Self {
        Self {
            prefix: String::new(),
            props,
        }
    }

    /// Prefix applied to every lookup, empty for the root store
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn properties(&self) -> &Arc<Properties> {
        &self.props
    }

    /// Look up the raw value stored for `key` within this store's scope
    pub fn get_string(&self, key: &str) -> Option<&str> {
        if is_blank(key) {
            return None;
        }

        let qualified = self.qualify(key);
        let value = self.props.get(&qualified);
        tracing::trace!(key = %qualified, found = value.is_some(), "Configuration lookup");
        value
    }

    /// Derive a store scoped to `prefix` below this one.
    ///
    /// Returns `None` unless some key starts with the qualified prefix.
    /// The check is a plain text prefix match, so `param.sub` is also
    /// reported present when only `param.subOption` exists.
    pub fn get_config(&self, prefix: &str) -> Option<ConfigurationStore> {
        let qualified = self.qualify(prefix);
        let has_keys = self.props.keys().any(|key| key.starts_with(&qualified));

        has_keys.then(|| ConfigurationStore {
            prefix: qualified,
            props: Arc::clone(&self.props),
        })
    }

    fn qualify(&self, key: &str) -> String {
        if is_blank(&self.prefix) {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }
}
