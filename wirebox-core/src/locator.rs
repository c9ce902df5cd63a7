//! Locator protocols: the boundary to whatever runtime or framework hosts the
//! container. The host implements these (or passes closures).

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::service::{BoxError, Class, Instance};

/// Resolves a class by name, for static-method and constructor definitions.
pub trait ClassLocator: Send + Sync {
    fn locate(&self, class_name: &str) -> Option<Arc<dyn Class>>;
}

impl<F> ClassLocator for F
where
    F: Fn(&str) -> Option<Arc<dyn Class>> + Send + Sync,
{
    fn locate(&self, class_name: &str) -> Option<Arc<dyn Class>> {
        self(class_name)
    }
}

/// Fallback source of instances for identifiers with no local instance or
/// definition. Async so it can bridge to another injector without blocking.
#[async_trait]
pub trait InstanceLocator: Send + Sync {
    async fn locate(&self, id: &str) -> Result<Option<Instance>, BoxError>;
}

#[async_trait]
impl<F, Fut> InstanceLocator for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<Instance>, BoxError>> + Send + 'static,
{
    async fn locate(&self, id: &str) -> Result<Option<Instance>, BoxError> {
        self(id.to_string()).await
    }
}
