//! Resolver: turns an identifier into an instance. Cached instance first, then
//! definition, then the instance locator.
//!
//! Every resolution that has to do work is registered as a pending, shared
//! future so concurrent callers for the same identifier converge on a single
//! instantiation. Each call carries its own path of identifiers being resolved;
//! re-entering one of them is a circular dependency. Pending resolutions also
//! record what they are waiting on, so a call about to wait on another call's
//! resolution can tell when that wait would loop back onto its own path.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::definition::{Definition, FactorySource};
use crate::descriptor::{Argument, ResolvedArgument};
use crate::locator::{ClassLocator, InstanceLocator};
use crate::service::{Class, Instance};
use crate::ResolveError;

type Resolution = Shared<BoxFuture<'static, Result<Instance, ResolveError>>>;

struct Pending {
    resolution: Resolution,
    waiting_on: Option<String>,
}

/// Container state. Only the container and the resolver touch it, and the
/// lock is never held across an await.
#[derive(Default)]
pub(crate) struct Registry {
    pub(crate) instances: HashMap<String, Instance>,
    pub(crate) definitions: HashMap<String, Arc<Definition>>,
    /// Identifiers whose definition has been consumed; those definitions are locked.
    pub(crate) used: HashSet<String>,
    pub(crate) parameters: HashMap<String, Value>,
    pub(crate) class_locator: Option<Arc<dyn ClassLocator>>,
    pub(crate) instance_locator: Option<Arc<dyn InstanceLocator>>,
    pending: HashMap<String, Pending>,
}

impl Registry {
    fn set_waiting(&mut self, waiter: Option<&String>, target: Option<&str>) {
        if let Some(pending) = waiter.and_then(|w| self.pending.get_mut(w)) {
            pending.waiting_on = target.map(str::to_string);
        }
    }

    /// Follow the wait-for edges starting at the pending resolution of `id`.
    /// If they lead back onto `path`, waiting for `id` would never finish:
    /// returns the cycle, from `id` back to `id`.
    fn wait_cycle(&self, id: &str, path: &[String]) -> Option<Vec<String>> {
        let mut waiters = vec![id.to_string()];
        let mut current = id;
        while let Some(next) = self.pending.get(current).and_then(|p| p.waiting_on.as_deref()) {
            if let Some(start) = path.iter().position(|p| p == next) {
                let mut chain = vec![id.to_string()];
                chain.extend(path[start..].iter().rev().cloned());
                chain.extend(waiters.iter().skip(1).rev().cloned());
                chain.push(id.to_string());
                return Some(chain);
            }
            if waiters.iter().any(|w| w == next) {
                return None;
            }
            waiters.push(next.to_string());
            current = next;
        }
        None
    }
}

#[derive(Default)]
pub(crate) struct Resolver {
    registry: Mutex<Registry>,
}

impl Resolver {
    pub(crate) fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve `id`. `path` holds the identifiers this call is already
    /// resolving, most recent last.
    pub(crate) fn resolve(
        self: &Arc<Self>,
        id: String,
        path: Vec<String>,
    ) -> BoxFuture<'static, Result<Instance, ResolveError>> {
        let resolver = Arc::clone(self);
        async move {
            if let Some(start) = path.iter().position(|p| *p == id) {
                let mut chain = vec![id.clone()];
                chain.extend(path[start..].iter().rev().cloned());
                warn!(id = %id, chain = %chain.join(" <- "), "circular dependency");
                return Err(ResolveError::CircularDependency(chain));
            }

            let resolution = {
                let mut registry = resolver.registry();
                if let Some(instance) = registry.instances.get(&id) {
                    trace!(id = %id, "instance cache hit");
                    return Ok(Arc::clone(instance));
                }
                let resolution = match registry.pending.get(&id) {
                    Some(pending) => {
                        let resolution = pending.resolution.clone();
                        if let Some(chain) = registry.wait_cycle(&id, &path) {
                            warn!(id = %id, chain = %chain.join(" <- "), "circular dependency across calls");
                            return Err(ResolveError::CircularDependency(chain));
                        }
                        trace!(id = %id, "joining in-flight resolution");
                        resolution
                    }
                    None => {
                        let resolution = Arc::clone(&resolver)
                            .instantiate(id.clone(), path.clone())
                            .boxed()
                            .shared();
                        registry.pending.insert(
                            id.clone(),
                            Pending {
                                resolution: resolution.clone(),
                                waiting_on: None,
                            },
                        );
                        resolution
                    }
                };
                registry.set_waiting(path.last(), Some(&id));
                resolution
            };

            let result = resolution.await;
            resolver.registry().set_waiting(path.last(), None);
            result
        }
        .boxed()
    }

    async fn instantiate(self: Arc<Self>, id: String, path: Vec<String>) -> Result<Instance, ResolveError> {
        let result = self.produce(&id, &path).await;
        self.registry().pending.remove(&id);
        if let Err(err) = &result {
            warn!(id = %id, error = %err, "resolution failed");
        }
        result
    }

    async fn produce(self: &Arc<Self>, id: &str, path: &[String]) -> Result<Instance, ResolveError> {
        let (definition, locator) = {
            let mut registry = self.registry();
            let definition = registry.definitions.get(id).cloned();
            if definition.is_some() {
                registry.used.insert(id.to_string());
            }
            (definition, registry.instance_locator.clone())
        };

        if let Some(definition) = definition {
            return self.build(id, &definition, path).await;
        }

        debug!(id, "no instance or definition, asking instance locator");
        let located = match locator {
            Some(locator) => locator.locate(id).await.map_err(ResolveError::collaborator)?,
            None => None,
        };
        let instance = located.ok_or_else(|| ResolveError::Undefined(id.to_string()))?;
        self.registry().instances.insert(id.to_string(), Arc::clone(&instance));
        Ok(instance)
    }

    async fn build(
        self: &Arc<Self>,
        id: &str,
        definition: &Definition,
        path: &[String],
    ) -> Result<Instance, ResolveError> {
        let mut path = path.to_vec();
        path.push(id.to_string());

        // Arguments first: a cycle through them is reported before the
        // factory source is looked at.
        let arguments = self.resolve_arguments(definition.arguments(), &path).await?;
        let produced = match definition.source() {
            FactorySource::Function(factory) => {
                let function = self.resolve(factory.id().to_string(), path.clone()).await?;
                let invocation = function
                    .call(arguments)
                    .ok_or_else(|| ResolveError::NotCallable(factory.id().to_string()))?;
                invocation.await
            }
            FactorySource::ServiceMethod { service, method } => {
                let target = self.resolve(service.id().to_string(), path.clone()).await?;
                let invocation = target.invoke(method, arguments).ok_or_else(|| ResolveError::MissingFactoryMethod {
                    service: service.id().to_string(),
                    method: method.clone(),
                })?;
                invocation.await
            }
            FactorySource::StaticMethod { class, method } => {
                let located = self.locate_class(class)?;
                let invocation = located
                    .invoke_static(method, arguments)
                    .ok_or_else(|| ResolveError::MissingStaticMethod {
                        class: class.clone(),
                        method: method.clone(),
                    })?;
                invocation.await
            }
            FactorySource::ClassConstructor(class) => {
                let located = self.locate_class(class)?;
                let invocation = located.construct(arguments);
                invocation.await
            }
        };
        let instance = produced
            .map_err(ResolveError::collaborator)?
            .ok_or_else(|| ResolveError::ReturnsNothing(id.to_string()))?;

        // Cached before method calls run.
        self.registry().instances.insert(id.to_string(), Arc::clone(&instance));
        debug!(id, "service instantiated");

        if let Err(err) = self.apply_method_calls(&instance, definition, &path).await {
            // A half-initialized instance must not satisfy later lookups.
            let mut registry = self.registry();
            if registry.instances.get(id).is_some_and(|cached| Arc::ptr_eq(cached, &instance)) {
                registry.instances.remove(id);
            }
            return Err(err);
        }
        Ok(instance)
    }

    async fn apply_method_calls(
        self: &Arc<Self>,
        instance: &Instance,
        definition: &Definition,
        path: &[String],
    ) -> Result<(), ResolveError> {
        for call in definition.method_calls() {
            let arguments = self.resolve_arguments(call.arguments(), path).await?;
            trace!(method = call.method(), "applying method call");
            let invocation = instance
                .invoke(call.method(), arguments)
                .ok_or_else(|| ResolveError::MissingMethod(call.method().to_string()))?;
            invocation.await.map_err(ResolveError::collaborator)?;
        }
        Ok(())
    }

    async fn resolve_arguments(
        self: &Arc<Self>,
        arguments: &[Argument],
        path: &[String],
    ) -> Result<Vec<ResolvedArgument>, ResolveError> {
        let mut resolved = Vec::with_capacity(arguments.len());
        for argument in arguments {
            let value = match argument {
                Argument::Reference(reference) => {
                    let instance = self.resolve(reference.id().to_string(), path.to_vec()).await?;
                    ResolvedArgument::Service(instance)
                }
                Argument::Parameter(parameter) => {
                    let value = self.registry().parameters.get(parameter.name()).cloned();
                    let value =
                        value.ok_or_else(|| ResolveError::UndefinedParameter(parameter.name().to_string()))?;
                    ResolvedArgument::Value(value)
                }
                Argument::Value(value) => ResolvedArgument::Value(value.clone()),
            };
            resolved.push(value);
        }
        Ok(resolved)
    }

    fn locate_class(&self, class: &str) -> Result<Arc<dyn Class>, ResolveError> {
        let locator = self.registry().class_locator.clone();
        locator
            .and_then(|locator| locator.locate(class))
            .ok_or_else(|| ResolveError::ClassNotFound(class.to_string()))
    }
}
