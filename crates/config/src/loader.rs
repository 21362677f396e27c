//! Configuration loader implementation

use crate::configuration::Configuration;
use crate::properties::Properties;
use crate::store::ConfigurationStore;
use resource::{Resource, ResourceLoader};
use types::Result;

/// Loads property resources into [`Configuration`] views
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    resources: ResourceLoader,
}

impl ConfigLoader {
    /// Create a loader that resolves locations with `resources`
    pub fn new(resources: ResourceLoader) -> Self {
        Self { resources }
    }

    /// Create a loader whose classpath comes from `FLAIR_CLASSPATH`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ResourceLoader::from_env()?))
    }

    pub fn resources(&self) -> &ResourceLoader {
        &self.resources
    }

    /// Load configuration from a `classpath:` or filesystem location
    pub fn load(&self, location: &str) -> Result<Configuration> {
        let resource = self.resources.load(location)?;
        Self::load_resource(&resource)
    }

    /// Load configuration from an already resolved resource
    pub fn load_resource(resource: &Resource) -> Result<Configuration> {
        let props = Self::load_resource_properties(resource)?;
        Ok(Configuration::new(ConfigurationStore::new(props)))
    }

    /// Parse the properties stored at `location`
    pub fn load_properties(&self, location: &str) -> Result<Properties> {
        let resource = self.resources.load(location)?;
        Self::load_resource_properties(&resource)
    }

    /// Parse the properties held by `resource`
    pub fn load_resource_properties(resource: &Resource) -> Result<Properties> {
        let contents = resource.read_contents()?;
        let props = Properties::parse(&contents)?;

        tracing::debug!(
            location = %resource.location(),
            keys = props.len(),
            "Configuration loaded"
        );
        Ok(props)
    }

    /// Load configuration from property text
    pub fn load_from_str(content: &str) -> Result<Configuration> {
        let props = Properties::parse(content)?;
        Ok(Configuration::new(ConfigurationStore::new(props)))
    }
}
