use std::{collections::BTreeMap, fmt::Debug, marker::PhantomData};

use anyhow::anyhow;
use async_trait::async_trait;
use domain_cluster::{
    exception::{PlatformException, PlatformResult},
    repository::ResourceClient,
};
use k8s_openapi::NamespaceResourceScope;
use kube::{
    api::{DeleteParams, ListParams, Patch, PatchParams, PostParams},
    Api, Client, Resource, ResourceExt,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::debug;

/// A platform object kind that stands in for the domain resource `D`.
pub trait KubeMapped<D>:
    Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + Clone
    + Debug
    + DeserializeOwned
    + Serialize
    + Send
    + Sync
    + 'static
{
    fn into_domain(self) -> anyhow::Result<D>;
    fn from_domain(resource: &D) -> anyhow::Result<Self>;
}

/// [`ResourceClient`] over the kube api for the object kind `K`.
pub struct KubeResourceClient<K> {
    client: Client,
    _kind: PhantomData<fn() -> K>,
}

impl<K> KubeResourceClient<K>
where
    K: Resource<DynamicType = (), Scope = NamespaceResourceScope>,
{
    pub fn new(client: Client) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    fn api(&self, namespace: &str) -> Api<K> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn absent_or_api(e: kube::Error, name: &str) -> PlatformException {
        map_kube_error(e, &K::kind(&()), name)
    }
}

pub(crate) fn map_kube_error(e: kube::Error, kind: &str, name: &str) -> PlatformException {
    match e {
        kube::Error::Api(response) if response.code == 404 => PlatformException::ResourceAbsent {
            kind: kind.to_owned(),
            name: name.to_owned(),
        },
        kube::Error::Api(response) if response.code == 409 => PlatformException::AlreadyExists {
            kind: kind.to_owned(),
            name: name.to_owned(),
        },
        e => PlatformException::Api { source: e.into() },
    }
}

fn located<K: Resource<DynamicType = ()>>(object: &K) -> anyhow::Result<(String, String)> {
    let name = object.name_any();
    let namespace = object
        .namespace()
        .ok_or(anyhow!("{} {name} has no namespace", K::kind(&())))?;
    Ok((namespace, name))
}

#[async_trait]
impl<K, D> ResourceClient<D> for KubeResourceClient<K>
where
    K: KubeMapped<D>,
    D: Send + Sync,
{
    async fn get(&self, namespace: &str, name: &str) -> PlatformResult<D> {
        let object = self
            .api(namespace)
            .get(name)
            .await
            .map_err(|e| Self::absent_or_api(e, name))?;
        Ok(object.into_domain()?)
    }

    async fn list(&self, namespace: &str, label_selector: &str) -> PlatformResult<Vec<D>> {
        let mut params = ListParams::default();
        if !label_selector.is_empty() {
            params = params.labels(label_selector);
        }
        let objects = self
            .api(namespace)
            .list(&params)
            .await
            .map_err(|e| Self::absent_or_api(e, namespace))?;
        Ok(objects
            .items
            .into_iter()
            .map(K::into_domain)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }

    async fn create(&self, resource: &D) -> PlatformResult<D> {
        let object = K::from_domain(resource)?;
        let (namespace, name) = located(&object)?;
        debug!(kind = %K::kind(&()), %namespace, %name, "Creating platform object");
        let created = self
            .api(&namespace)
            .create(&PostParams::default(), &object)
            .await
            .map_err(|e| Self::absent_or_api(e, &name))?;
        Ok(created.into_domain()?)
    }

    async fn replace(&self, resource: &D) -> PlatformResult<D> {
        let object = K::from_domain(resource)?;
        let (namespace, name) = located(&object)?;
        debug!(kind = %K::kind(&()), %namespace, %name, "Replacing platform object");
        let replaced = self
            .api(&namespace)
            .replace(&name, &PostParams::default(), &object)
            .await
            .map_err(|e| Self::absent_or_api(e, &name))?;
        Ok(replaced.into_domain()?)
    }

    async fn delete(&self, namespace: &str, name: &str) -> PlatformResult<()> {
        debug!(kind = %K::kind(&()), %namespace, %name, "Deleting platform object");
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await
            .map_err(|e| Self::absent_or_api(e, name))?;
        Ok(())
    }

    async fn patch_annotations(
        &self,
        namespace: &str,
        name: &str,
        annotations: &BTreeMap<String, String>,
    ) -> PlatformResult<()> {
        let patch = json!({ "metadata": { "annotations": annotations } });
        self.api(namespace)
            .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| Self::absent_or_api(e, name))?;
        Ok(())
    }
}
