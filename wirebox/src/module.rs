//! Module: a bundle of registrations applied to a container in one go.

use serde_json::Value;
use tracing::debug;
use wirebox_core::{Container, ContainerError, Definition, Instance};

/// Something that registers services into a container.
pub trait Module {
    fn register_into(&mut self, container: &Container) -> Result<(), ContainerError>;
}

/// Module built fluently: .parameter().instance().definition(), then
/// `builder.module(m)` or `m.register_into(&container)`.
pub struct ServiceModule {
    name: String,
    parameters: Vec<(String, Value)>,
    instances: Vec<(String, Instance)>,
    definitions: Vec<(String, Definition)>,
}

impl ServiceModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: Vec::new(),
            instances: Vec::new(),
            definitions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.parameters.push((name.to_string(), value.into()));
        self
    }

    pub fn instance(mut self, id: &str, instance: Instance) -> Self {
        self.instances.push((id.to_string(), instance));
        self
    }

    pub fn definition(mut self, id: &str, definition: Definition) -> Self {
        self.definitions.push((id.to_string(), definition));
        self
    }
}

impl Module for ServiceModule {
    fn register_into(&mut self, container: &Container) -> Result<(), ContainerError> {
        debug!(
            module = %self.name,
            parameters = self.parameters.len(),
            instances = self.instances.len(),
            definitions = self.definitions.len(),
            "registering module"
        );
        for (name, value) in self.parameters.drain(..) {
            container.set_parameter(name, value);
        }
        for (id, instance) in self.instances.drain(..) {
            container.set(id, instance);
        }
        for (id, definition) in self.definitions.drain(..) {
            container.set_definition(id, definition)?;
        }
        Ok(())
    }
}
