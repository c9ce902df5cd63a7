//! Ready-made services and classes built from closures, for factories and
//! collaborators that do not warrant a dedicated type.

mod class;

pub use class::ClassObject;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use wirebox_core::{BoxError, Instance, Invocation, ResolvedArgument, Service};

/// Named method or constructor: resolved arguments in, pending result out.
pub type Method = Arc<dyn Fn(Vec<ResolvedArgument>) -> Invocation<'static> + Send + Sync>;

pub(crate) fn method<F, Fut>(f: F) -> Method
where
    F: Fn(Vec<ResolvedArgument>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<Instance>, BoxError>> + Send + 'static,
{
    Arc::new(move |arguments| f(arguments).boxed())
}

/// Service exposing a set of named methods: `.method(name, f)` per method.
#[derive(Clone, Default)]
pub struct ServiceObject {
    methods: HashMap<String, Method>,
}

impl ServiceObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method<F, Fut>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(Vec<ResolvedArgument>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<Instance>, BoxError>> + Send + 'static,
    {
        self.methods.insert(name.to_string(), method(f));
        self
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
}

impl Service for ServiceObject {
    fn invoke(&self, method: &str, arguments: Vec<ResolvedArgument>) -> Option<Invocation<'_>> {
        self.methods.get(method).map(|m| m(arguments))
    }
}

/// Callable service, for function-factory definitions.
#[derive(Clone)]
pub struct ServiceFn {
    function: Method,
}

impl ServiceFn {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Vec<ResolvedArgument>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<Instance>, BoxError>> + Send + 'static,
    {
        Self { function: method(f) }
    }
}

impl Service for ServiceFn {
    fn call(&self, arguments: Vec<ResolvedArgument>) -> Option<Invocation<'_>> {
        Some((self.function)(arguments))
    }
}
