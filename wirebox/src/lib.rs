//! Wirebox for Rust: dynamic service and class objects, static locators,
//! modules and a builder on top of wirebox-core.

pub mod builder;
pub mod locator;
pub mod module;
pub mod object;

pub use builder::ContainerBuilder;
pub use locator::{StaticClassLocator, StaticInstanceLocator};
pub use module::{Module, ServiceModule};
pub use object::{ClassObject, Method, ServiceFn, ServiceObject};
pub use wirebox_core::{
    Argument, AsAny, BoxError, Class, ClassLocator, Container, ContainerError, Definition, FactorySource, Instance,
    InstanceLocator, Invocation, MethodCall, Parameter, Reference, ResolveError, ResolvedArgument, Service,
};
pub use wirebox_macros::Service;

use std::sync::Arc;

/// Wrap a service as a container instance.
pub fn instance<T: Service>(service: T) -> Instance {
    Arc::new(service)
}
