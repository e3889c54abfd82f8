use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{exception::PlatformResult, model::vo::Namespace};

/// Access to one namespaced resource kind of the orchestration platform.
///
/// Missing resources are reported as `PlatformException::ResourceAbsent`.
#[async_trait]
pub trait ResourceClient<R>: Send + Sync
where
    R: Send + Sync,
{
    async fn get(&self, namespace: &str, name: &str) -> PlatformResult<R>;

    /// An empty `label_selector` lists everything in the namespace.
    async fn list(&self, namespace: &str, label_selector: &str) -> PlatformResult<Vec<R>>;

    async fn create(&self, resource: &R) -> PlatformResult<R>;

    /// Full replacement. The resource must carry the current version token.
    async fn replace(&self, resource: &R) -> PlatformResult<R>;

    async fn delete(&self, namespace: &str, name: &str) -> PlatformResult<()>;

    /// Merge `annotations` into the resource metadata.
    async fn patch_annotations(
        &self,
        namespace: &str,
        name: &str,
        annotations: &BTreeMap<String, String>,
    ) -> PlatformResult<()>;
}

#[async_trait]
pub trait NamespaceClient: Send + Sync {
    async fn get(&self, name: &str) -> PlatformResult<Namespace>;
    async fn create(&self, name: &str) -> PlatformResult<Namespace>;
}
