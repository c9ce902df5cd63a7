//! Locators backed by fixed tables. Custom lookups implement the core traits.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use wirebox_core::{BoxError, Class, ClassLocator, Instance, InstanceLocator};

/// Class locator from a static table (class name -> class).
#[derive(Clone, Default)]
pub struct StaticClassLocator {
    classes: HashMap<String, Arc<dyn Class>>,
}

impl StaticClassLocator {
    pub fn new(classes: HashMap<String, Arc<dyn Class>>) -> Self {
        Self { classes }
    }

    pub fn with(mut self, name: &str, class: impl Class + 'static) -> Self {
        self.classes.insert(name.to_string(), Arc::new(class));
        self
    }
}

impl ClassLocator for StaticClassLocator {
    fn locate(&self, class_name: &str) -> Option<Arc<dyn Class>> {
        self.classes.get(class_name).cloned()
    }
}

/// Instance locator from a static table (identifier -> instance). Useful for
/// exposing services owned by another registry.
#[derive(Clone, Default)]
pub struct StaticInstanceLocator {
    instances: HashMap<String, Instance>,
}

impl StaticInstanceLocator {
    pub fn new(instances: HashMap<String, Instance>) -> Self {
        Self { instances }
    }

    /// Build from a slice of (identifier, instance) pairs.
    pub fn from_slice(pairs: &[(&str, Instance)]) -> Self {
        Self {
            instances: pairs
                .iter()
                .map(|(id, instance)| ((*id).to_string(), Arc::clone(instance)))
                .collect(),
        }
    }
}

#[async_trait]
impl InstanceLocator for StaticInstanceLocator {
    async fn locate(&self, id: &str) -> Result<Option<Instance>, BoxError> {
        Ok(self.instances.get(id).cloned())
    }
}
