//! Typed accessors over a configuration store

use crate::store::ConfigurationStore;
use types::{is_blank, not_blank, ConfigError};

/// Types that can be parsed from a stored configuration value
pub trait FromConfigValue: Sized {
    /// Parse `value`, reporting failures against `key`
    fn from_config_value(key: &str, value: &str) -> Result<Self, ConfigError>;
}

fn check_not_blank(key: &str, value: &str) -> Result<(), ConfigError> {
    if is_blank(value) {
        return Err(ConfigError::BlankParameter {
            param_name: key.to_string(),
            param_value: value.to_string(),
        });
    }
    Ok(())
}

macro_rules! impl_integer_value {
    ($($ty:ty),*) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(key: &str, value: &str) -> Result<Self, ConfigError> {
                    check_not_blank(key, value)?;
                    value.parse().map_err(|source| ConfigError::InvalidInteger {
                        param_name: key.to_string(),
                        param_value: value.to_string(),
                        source,
                    })
                }
            }
        )*
    };
}

macro_rules! impl_float_value {
    ($($ty:ty),*) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(key: &str, value: &str) -> Result<Self, ConfigError> {
                    check_not_blank(key, value)?;
                    value.trim().parse().map_err(|source| ConfigError::InvalidFloat {
                        param_name: key.to_string(),
                        param_value: value.to_string(),
                        source,
                    })
                }
            }
        )*
    };
}

impl_integer_value!(i32, i64);
impl_float_value!(f32, f64);

/// Split a comma separated value into trimmed, non-blank tokens
fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').filter(|token| not_blank(token)).map(str::trim)
}

/// Read-only typed view over a [`ConfigurationStore`]
#[derive(Debug, Clone)]
pub struct Configuration {
    store: ConfigurationStore,
}

impl Configuration {
    pub fn new(store: ConfigurationStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    /// Key prefix of this view, empty at the root
    pub fn prefix(&self) -> &str {
        self.store.prefix()
    }

    /// Stored value for `key`, unmodified
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.store.get_string(key)
    }

    /// Stored value for `key`, or `default` when absent
    pub fn get_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.store.get_string(key).unwrap_or(default)
    }

    pub fn get_required_string(&self, key: &str) -> Result<&str, ConfigError> {
        self.store.get_string(key).ok_or_else(|| missing(key))
    }

    /// Comma separated tokens for `key`; empty when absent
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.store
            .get_string(key)
            .map(|value| split_list(value).map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Parsed value for `key`, `None` when absent.
    ///
    /// A present value that is blank or fails to parse is an error.
    pub fn get<T: FromConfigValue>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        self.store
            .get_string(key)
            .map(|value| T::from_config_value(key, value))
            .transpose()
    }

    /// Parsed value for `key`, or `default` when absent
    pub fn get_or<T: FromConfigValue>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    pub fn get_required<T: FromConfigValue>(&self, key: &str) -> Result<T, ConfigError> {
        self.get(key)?.ok_or_else(|| missing(key))
    }

    /// Parse every comma separated token for `key`; empty when absent
    pub fn get_list<T: FromConfigValue>(&self, key: &str) -> Result<Vec<T>, ConfigError> {
        match self.store.get_string(key) {
            Some(value) => split_list(value)
                .map(|token| T::from_config_value(key, token))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_integer(&self, key: &str) -> Result<Option<i32>, ConfigError> {
        self.get(key)
    }

    pub fn get_integer_or(&self, key: &str, default: i32) -> Result<i32, ConfigError> {
        self.get_or(key, default)
    }

    pub fn get_required_integer(&self, key: &str) -> Result<i32, ConfigError> {
        self.get_required(key)
    }

    pub fn get_integer_list(&self, key: &str) -> Result<Vec<i32>, ConfigError> {
        self.get_list(key)
    }

    pub fn get_float(&self, key: &str) -> Result<Option<f32>, ConfigError> {
        self.get(key)
    }

    pub fn get_float_or(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        self.get_or(key, default)
    }

    pub fn get_required_float(&self, key: &str) -> Result<f32, ConfigError> {
        self.get_required(key)
    }

    pub fn get_float_list(&self, key: &str) -> Result<Vec<f32>, ConfigError> {
        self.get_list(key)
    }

    /// View scoped to `prefix`, if any key lives under it
    pub fn get_sub_configuration(&self, prefix: &str) -> Option<Configuration> {
        self.store.get_config(prefix).map(Configuration::new)
    }
}

fn missing(key: &str) -> ConfigError {
    ConfigError::MissingParameter {
        param_name: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::Properties;
    use crate::testdata;

    const INT_VALUE: i32 = 11;
    const FLOAT_VALUE: f32 = 1.1;

    fn config() -> Configuration {
        let props = Properties::parse(testdata::SAMPLE_CONFIGURATION).unwrap();
        Configuration::new(ConfigurationStore::new(props))
    }

    #[test]
    fn test_get_string() {
        let config = config();
        assert_eq!(config.get_string("param.stringValue"), Some("hello"));
        assert_eq!(config.get_string("param.paddedString"), Some("padded value  "));
        assert_eq!(config.get_string("param.notFound!"), None);
    }

    #[test]
    fn test_get_required_string() {
        let config = config();
        assert_eq!(config.get_required_string("param.stringValue").unwrap(), "hello");

        let err = config.get_required_string("param.notFound!").unwrap_err();
        assert!(matches!(err, ConfigError::MissingParameter { .. }));
        assert_eq!(err.param_name(), "param.notFound!");
    }

    #[test]
    fn test_get_string_with_default() {
        let config = config();
        assert_eq!(config.get_string_or("param.notFound!", "defaultValue"), "defaultValue");
        assert_eq!(config.get_string_or("param.stringValue", "defaultValue"), "hello");
        // present but empty is not absent
        assert_eq!(config.get_string_or("param.blankInt", "defaultValue"), "");
    }

    #[test]
    fn test_get_string_list() {
        let config = config();
        assert_eq!(
            config.get_string_list("param.stringList"),
            vec!["first", "second", "third"]
        );
        assert_eq!(config.get_string_list("param.sparseList"), vec!["a", "b"]);
        assert!(config.get_string_list("param.blankInt").is_empty());
        assert!(config.get_string_list("param.notFound!").is_empty());
    }

    #[test]
    fn test_get_integer() {
        let config = config();
        assert_eq!(config.get_integer("param.intValue").unwrap(), Some(INT_VALUE));
        assert_eq!(config.get_integer("param.notFound!").unwrap(), None);
    }

    #[test]
    fn test_get_required_integer() {
        let config = config();
        assert_eq!(config.get_required_integer("param.intValue").unwrap(), INT_VALUE);

        let err = config.get_required_integer("param.notFound!").unwrap_err();
        assert!(matches!(err, ConfigError::MissingParameter { ref param_name } if param_name == "param.notFound!"));
    }

    #[test]
    fn test_get_integer_with_default() {
        let config = config();
        assert_eq!(config.get_integer_or("param.notFound!", 13).unwrap(), 13);
        assert_eq!(config.get_integer_or("param.intValue", 13).unwrap(), INT_VALUE);
    }

    #[test]
    fn test_invalid_integer_is_not_defaulted() {
        let config = config();

        let err = config.get_integer("param.badInt").unwrap_err();
        match &err {
            ConfigError::InvalidInteger {
                param_name,
                param_value,
                ..
            } => {
                assert_eq!(param_name, "param.badInt");
                assert_eq!(param_value, "abc");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(config.get_integer_or("param.badInt", 13).is_err());
        assert!(config.get_required_integer("param.badInt").is_err());
    }

    #[test]
    fn test_blank_integer() {
        let config = config();
        let err = config.get_integer_or("param.blankInt", 13).unwrap_err();
        assert!(matches!(err, ConfigError::BlankParameter { .. }));
        assert_eq!(err.params().get("param_value"), Some(""));
    }

    #[test]
    fn test_get_integer_list() {
        let config = config();
        assert_eq!(config.get_integer_list("param.intList").unwrap(), vec![1, 2, 3]);
        assert!(config.get_integer_list("param.notFound!").unwrap().is_empty());

        let err = config.get_integer_list("param.badIntList").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInteger { ref param_value, .. } if param_value == "x"));
    }

    #[test]
    fn test_get_float() {
        let config = config();
        assert_eq!(config.get_float("param.floatValue").unwrap(), Some(FLOAT_VALUE));
        assert_eq!(config.get_required_float("param.floatValue").unwrap(), FLOAT_VALUE);
        assert_eq!(config.get_float_or("param.notFound!", 13.13).unwrap(), 13.13);
        assert_eq!(config.get_float_or("param.floatValue", 13.13).unwrap(), FLOAT_VALUE);
        assert!(matches!(
            config.get_float("param.badInt"),
            Err(ConfigError::InvalidFloat { .. })
        ));
    }

    #[test]
    fn test_get_float_list() {
        let config = config();
        assert_eq!(
            config.get_float_list("param.floatList").unwrap(),
            vec![1.1f32, 2.2, 3.3]
        );
    }

    #[test]
    fn test_generic_accessors() {
        let config = config();
        assert_eq!(config.get::<i64>("param.intValue").unwrap(), Some(11));
        let value: f64 = config.get_required("param.floatValue").unwrap();
        assert!((value - 1.1).abs() < 1e-9);
        assert_eq!(config.get_list::<i64>("param.intList").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_get_sub_configuration() {
        let config = config();
        let sub = config.get_sub_configuration("param.sub").unwrap();

        assert_eq!(sub.prefix(), "param.sub");
        assert_eq!(sub.get_required_integer("intValue").unwrap(), 22);
        assert_eq!(sub.get_required_string("stringValue").unwrap(), "sub.string");

        let err = sub.get_required_string("missing").unwrap_err();
        assert_eq!(err.param_name(), "missing");

        assert!(config.get_sub_configuration("absent").is_none());
    }

    #[test]
    fn test_concurrent_reads() {
        let config = config();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let sub = config.get_sub_configuration("param").unwrap();
                    assert_eq!(sub.get_required_integer("intValue").unwrap(), INT_VALUE);
                });
            }
        });
    }
}
