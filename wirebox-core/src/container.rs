//! Container: instances, definitions, parameters and the two locators.
//! Resolution is delegated to the resolver.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::definition::Definition;
use crate::locator::{ClassLocator, InstanceLocator};
use crate::resolver::Resolver;
use crate::service::Instance;
use crate::ContainerError;

/// Dependency-injection container. Cloning yields another handle to the same
/// container, so it can be shared between tasks.
///
/// Precedence when resolving an identifier: cached instance, then definition,
/// then the instance locator.
#[derive(Clone, Default)]
pub struct Container {
    resolver: Arc<Resolver>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a ready-made instance.
    pub fn set(&self, id: impl Into<String>, instance: Instance) -> &Self {
        let id = id.into();
        trace!(id = %id, "instance set");
        self.resolver.registry().instances.insert(id, instance);
        self
    }

    /// Resolve every identifier, in order. Fails on the first identifier that
    /// cannot be resolved.
    pub async fn get<S: AsRef<str> + Sync>(&self, ids: &[S]) -> Result<Vec<Instance>, ContainerError> {
        let mut instances = Vec::with_capacity(ids.len());
        for id in ids {
            instances.push(self.get_one(id.as_ref()).await?);
        }
        Ok(instances)
    }

    pub async fn get_one(&self, id: &str) -> Result<Instance, ContainerError> {
        self.resolver
            .resolve(id.to_string(), Vec::new())
            .await
            .map_err(|source| ContainerError::GetService {
                id: id.to_string(),
                source,
            })
    }

    /// Register a definition. Refused once a previous definition for the same
    /// identifier has been used to build an instance.
    pub fn set_definition(&self, id: impl Into<String>, definition: Definition) -> Result<(), ContainerError> {
        let id = id.into();
        let mut registry = self.resolver.registry();
        if registry.used.contains(&id) {
            return Err(ContainerError::ServiceDefinitionAlreadyUsed(id));
        }
        debug!(id = %id, source = ?definition.source(), "definition set");
        registry.definitions.insert(id, Arc::new(definition));
        Ok(())
    }

    pub fn get_definition(&self, id: &str) -> Result<Arc<Definition>, ContainerError> {
        self.resolver
            .registry()
            .definitions
            .get(id)
            .cloned()
            .ok_or_else(|| ContainerError::UndefinedServiceDefinition(id.to_string()))
    }

    pub fn has_definition(&self, id: &str) -> bool {
        self.resolver.registry().definitions.contains_key(id)
    }

    pub fn has_instance(&self, id: &str) -> bool {
        self.resolver.registry().instances.contains_key(id)
    }

    /// True when an instance or a definition is registered. What the instance
    /// locator could provide is not considered.
    pub fn has(&self, id: &str) -> bool {
        let registry = self.resolver.registry();
        registry.instances.contains_key(id) || registry.definitions.contains_key(id)
    }

    pub fn set_parameter(&self, name: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.resolver
            .registry()
            .parameters
            .insert(name.into(), value.into());
        self
    }

    /// Merge every top-level field of a serializable config into the parameter table.
    pub fn set_parameters<T: Serialize + ?Sized>(&self, parameters: &T) -> Result<&Self, ContainerError> {
        let Value::Object(fields) = serde_json::to_value(parameters)? else {
            return Err(ContainerError::ParametersNotAnObject);
        };
        debug!(count = fields.len(), "parameters set");
        self.resolver.registry().parameters.extend(fields);
        Ok(self)
    }

    pub fn get_parameter(&self, name: &str) -> Result<Value, ContainerError> {
        self.resolver
            .registry()
            .parameters
            .get(name)
            .cloned()
            .ok_or_else(|| ContainerError::UndefinedParameter(name.to_string()))
    }

    /// Typed variant of `get_parameter`.
    pub fn get_parameter_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, ContainerError> {
        let value = self.get_parameter(name)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.resolver.registry().parameters.contains_key(name)
    }

    pub fn register_class_locator(&self, locator: impl ClassLocator + 'static) -> &Self {
        self.resolver.registry().class_locator = Some(Arc::new(locator));
        self
    }

    pub fn register_instance_locator(&self, locator: impl InstanceLocator + 'static) -> &Self {
        self.resolver.registry().instance_locator = Some(Arc::new(locator));
        self
    }
}
