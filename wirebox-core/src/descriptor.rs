//! Argument descriptors: how to obtain one argument, and which method to call
//! on a freshly built service.

use serde_json::Value;

use crate::service::Instance;

/// Resolve the service with this identifier and pass the instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    id: String,
}

impl Reference {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Pass the literal stored under this name in the parameter table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One entry of an argument list.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    Reference(Reference),
    Parameter(Parameter),
    /// Passed through unchanged.
    Value(Value),
}

impl Argument {
    pub fn reference(id: impl Into<String>) -> Self {
        Argument::Reference(Reference::new(id))
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Argument::Parameter(Parameter::new(name))
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Argument::Value(value.into())
    }
}

impl From<Reference> for Argument {
    fn from(reference: Reference) -> Self {
        Argument::Reference(reference)
    }
}

impl From<Parameter> for Argument {
    fn from(parameter: Parameter) -> Self {
        Argument::Parameter(parameter)
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Value(value)
    }
}

/// Method invoked on a service after construction, with its own arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodCall {
    method: String,
    arguments: Vec<Argument>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }
}

/// An argument after resolution, as handed to factories and methods.
#[derive(Clone, Debug)]
pub enum ResolvedArgument {
    Service(Instance),
    Value(Value),
}

impl ResolvedArgument {
    pub fn as_service(&self) -> Option<&Instance> {
        match self {
            ResolvedArgument::Service(instance) => Some(instance),
            ResolvedArgument::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResolvedArgument::Service(_) => None,
            ResolvedArgument::Value(value) => Some(value),
        }
    }

    pub fn into_service(self) -> Option<Instance> {
        match self {
            ResolvedArgument::Service(instance) => Some(instance),
            ResolvedArgument::Value(_) => None,
        }
    }
}
