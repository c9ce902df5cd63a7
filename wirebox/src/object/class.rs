//! ClassObject: constructor plus static methods, handed out by a class locator.

use std::collections::HashMap;
use std::future::Future;

use wirebox_core::{BoxError, Class, Instance, Invocation, ResolvedArgument};

use super::{method, Method};

pub struct ClassObject {
    constructor: Method,
    statics: HashMap<String, Method>,
}

impl ClassObject {
    pub fn new<F, Fut>(constructor: F) -> Self
    where
        F: Fn(Vec<ResolvedArgument>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<Instance>, BoxError>> + Send + 'static,
    {
        Self {
            constructor: method(constructor),
            statics: HashMap::new(),
        }
    }

    pub fn static_method<F, Fut>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(Vec<ResolvedArgument>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<Instance>, BoxError>> + Send + 'static,
    {
        self.statics.insert(name.to_string(), method(f));
        self
    }
}

impl Class for ClassObject {
    fn construct(&self, arguments: Vec<ResolvedArgument>) -> Invocation<'_> {
        (self.constructor)(arguments)
    }

    fn invoke_static(&self, method: &str, arguments: Vec<ResolvedArgument>) -> Option<Invocation<'_>> {
        self.statics.get(method).map(|m| m(arguments))
    }
}
