//! ContainerBuilder: collect registrations, apply them in order on build().

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use wirebox_core::{ClassLocator, Container, ContainerError, Definition, Instance, InstanceLocator};

use crate::module::Module;

type Step = Box<dyn FnOnce(&Container) -> Result<(), ContainerError>>;

/// Builder for a configured container. Steps run in the order they were
/// added; the first failing step aborts the build.
#[derive(Default)]
pub struct ContainerBuilder {
    steps: Vec<Step>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn step(mut self, step: impl FnOnce(&Container) -> Result<(), ContainerError> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn parameter(self, name: &str, value: impl Into<Value>) -> Self {
        let name = name.to_string();
        let value = value.into();
        self.step(move |container| {
            container.set_parameter(name, value);
            Ok(())
        })
    }

    /// Load every top-level field of `settings` as a parameter. Serialization
    /// happens now, errors surface on build().
    pub fn parameters<T: Serialize + ?Sized>(self, settings: &T) -> Self {
        let settings = serde_json::to_value(settings);
        self.step(move |container| {
            container.set_parameters(&settings?)?;
            Ok(())
        })
    }

    pub fn instance(self, id: &str, instance: Instance) -> Self {
        let id = id.to_string();
        self.step(move |container| {
            container.set(id, instance);
            Ok(())
        })
    }

    pub fn definition(self, id: &str, definition: Definition) -> Self {
        let id = id.to_string();
        self.step(move |container| container.set_definition(id, definition))
    }

    pub fn class_locator(self, locator: impl ClassLocator + 'static) -> Self {
        self.step(move |container| {
            container.register_class_locator(locator);
            Ok(())
        })
    }

    pub fn instance_locator(self, locator: impl InstanceLocator + 'static) -> Self {
        self.step(move |container| {
            container.register_instance_locator(locator);
            Ok(())
        })
    }

    pub fn module(self, mut module: impl Module + 'static) -> Self {
        self.step(move |container| module.register_into(container))
    }

    pub fn build(self) -> Result<Container, ContainerError> {
        let container = Container::new();
        debug!(steps = self.steps.len(), "building container");
        for step in self.steps {
            step(&container)?;
        }
        Ok(container)
    }
}
