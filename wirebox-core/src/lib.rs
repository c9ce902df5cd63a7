//! Wirebox core: definitions, argument descriptors, async resolver, container.

pub mod container;
pub mod definition;
pub mod descriptor;
pub mod locator;
mod resolver;
pub mod service;

pub use container::Container;
pub use definition::{Definition, FactorySource};
pub use descriptor::{Argument, MethodCall, Parameter, Reference, ResolvedArgument};
pub use locator::{ClassLocator, InstanceLocator};
pub use service::{AsAny, BoxError, Class, Instance, Invocation, Service};

use thiserror::Error;

/// Errors raised by container operations. Table operations fail immediately;
/// everything that goes wrong inside `get` is reported as `GetService`.
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("Undefined service definition for identifier \"{0}\"")]
    UndefinedServiceDefinition(String),
    #[error("Service definition for \"{0}\" has already been used to instantiate a service, refusing to modify it")]
    ServiceDefinitionAlreadyUsed(String),
    #[error("Undefined parameter for identifier \"{0}\"")]
    UndefinedParameter(String),
    #[error("Error getting service \"{id}\": {source}")]
    GetService {
        id: String,
        #[source]
        source: ResolveError,
    },
    #[error("parameters must serialize to a JSON object")]
    ParametersNotAnObject,
    #[error("invalid parameter value: {0}")]
    Json(#[from] serde_json::Error),
}

/// Nested cause of a failed resolution. Cloneable so a single pending
/// resolution can hand the same failure to every caller awaiting it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Chain from the re-entered identifier back to its first occurrence.
    #[error("Circular dependency found: {}", .0.join(" <- "))]
    CircularDependency(Vec<String>),
    #[error("Undefined service definition and instance for identifier \"{0}\"")]
    Undefined(String),
    #[error("Factory method for identifier \"{0}\" returns nothing")]
    ReturnsNothing(String),
    #[error("Factory method \"{method}\" in factory service \"{service}\" does not exist")]
    MissingFactoryMethod { service: String, method: String },
    #[error("Static factory method \"{method}\" in class \"{class}\" does not exist")]
    MissingStaticMethod { class: String, method: String },
    #[error("Cannot locate service class constructor for class \"{0}\"")]
    ClassNotFound(String),
    #[error("Factory service \"{0}\" is not callable")]
    NotCallable(String),
    #[error("Method \"{0}\" does not exist")]
    MissingMethod(String),
    #[error("Undefined parameter for identifier \"{0}\"")]
    UndefinedParameter(String),
    /// A factory, method or locator reported its own error.
    #[error("{0}")]
    Collaborator(String),
}

impl ResolveError {
    pub(crate) fn collaborator(err: BoxError) -> Self {
        ResolveError::Collaborator(err.to_string())
    }
}
