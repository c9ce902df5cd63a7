//! Capability traits for things the container produces (services) and things it
//! constructs them from (classes).

use std::any::Any;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::descriptor::ResolvedArgument;

/// Error type returned by factories, methods and locators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A service owned by the container.
pub type Instance = Arc<dyn Service>;

/// Pending result of a factory, method or constructor call. `Ok(None)` means
/// the call returned nothing.
pub type Invocation<'a> = BoxFuture<'a, Result<Option<Instance>, BoxError>>;

/// Type-erasure helper so instances can be downcast back to their concrete type.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Anything the container can hand out. Both capabilities are optional: a plain
/// struct implements `Service` with an empty body (or `#[derive(Service)]`).
pub trait Service: AsAny {
    /// Invoke a named method. `None` when the service has no such method.
    fn invoke(&self, _method: &str, _arguments: Vec<ResolvedArgument>) -> Option<Invocation<'_>> {
        None
    }

    /// Call the service itself, for services used as factory functions.
    /// `None` when the service is not callable.
    fn call(&self, _arguments: Vec<ResolvedArgument>) -> Option<Invocation<'_>> {
        None
    }
}

impl std::fmt::Debug for dyn Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Service")
    }
}

impl dyn Service {
    pub fn is<T: Any>(&self) -> bool {
        <dyn Service as AsAny>::as_any(self).is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Service as AsAny>::as_any(self).downcast_ref::<T>()
    }

    /// Downcast a shared instance to its concrete type.
    pub fn downcast<T: Any + Send + Sync>(self: Arc<Self>) -> Option<Arc<T>> {
        <dyn Service as AsAny>::into_any(self).downcast::<T>().ok()
    }
}

/// A class as seen through the class locator: something that can be constructed
/// and may expose static factory methods.
pub trait Class: Send + Sync {
    fn construct(&self, arguments: Vec<ResolvedArgument>) -> Invocation<'_>;

    /// Invoke a static method. `None` when the class has no such method.
    fn invoke_static(&self, _method: &str, _arguments: Vec<ResolvedArgument>) -> Option<Invocation<'_>> {
        None
    }
}
