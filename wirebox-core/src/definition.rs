//! Definitions: lazy recipes for producing one service.

use crate::descriptor::{Argument, MethodCall, Reference};

/// Where the instance comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum FactorySource {
    /// A callable service, invoked with the resolved arguments.
    Function(Reference),
    /// A named method on another service, bound to that service.
    ServiceMethod { service: Reference, method: String },
    /// A static method on a class found through the class locator.
    StaticMethod { class: String, method: String },
    /// A class found through the class locator, invoked as a constructor.
    ClassConstructor(String),
}

/// Recipe for one service: factory source, constructor arguments and the
/// method calls applied after construction, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    source: FactorySource,
    arguments: Vec<Argument>,
    method_calls: Vec<MethodCall>,
}

impl Definition {
    pub fn new(source: FactorySource, arguments: Vec<Argument>) -> Self {
        Self {
            source,
            arguments,
            method_calls: Vec::new(),
        }
    }

    pub fn function_factory(factory: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self::new(FactorySource::Function(Reference::new(factory)), arguments)
    }

    pub fn service_method_factory(
        service: impl Into<String>,
        method: impl Into<String>,
        arguments: Vec<Argument>,
    ) -> Self {
        Self::new(
            FactorySource::ServiceMethod {
                service: Reference::new(service),
                method: method.into(),
            },
            arguments,
        )
    }

    pub fn static_method_factory(
        class: impl Into<String>,
        method: impl Into<String>,
        arguments: Vec<Argument>,
    ) -> Self {
        Self::new(
            FactorySource::StaticMethod {
                class: class.into(),
                method: method.into(),
            },
            arguments,
        )
    }

    pub fn class_constructor(class: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self::new(FactorySource::ClassConstructor(class.into()), arguments)
    }

    pub fn with_method_call(mut self, call: MethodCall) -> Self {
        self.method_calls.push(call);
        self
    }

    pub fn with_method_calls(mut self, calls: impl IntoIterator<Item = MethodCall>) -> Self {
        self.method_calls.extend(calls);
        self
    }

    pub fn source(&self) -> &FactorySource {
        &self.source
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn method_calls(&self) -> &[MethodCall] {
        &self.method_calls
    }
}
