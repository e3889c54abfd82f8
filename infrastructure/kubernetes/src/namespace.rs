use async_trait::async_trait;
use domain_cluster::{exception::PlatformResult, model::vo::Namespace, repository::NamespaceClient};
use k8s_openapi::{
    api::core::v1::Namespace as KubeNamespace, apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use kube::{api::PostParams, Api, Client, ResourceExt};
use tracing::info;

use crate::client::map_kube_error;

pub struct KubeNamespaceClient {
    client: Client,
}

impl KubeNamespaceClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self) -> Api<KubeNamespace> {
        Api::all(self.client.clone())
    }
}

#[async_trait]
impl NamespaceClient for KubeNamespaceClient {
    async fn get(&self, name: &str) -> PlatformResult<Namespace> {
        let namespace = self
            .api()
            .get(name)
            .await
            .map_err(|e| map_kube_error(e, "Namespace", name))?;
        Ok(Namespace {
            name: namespace.name_any(),
        })
    }

    async fn create(&self, name: &str) -> PlatformResult<Namespace> {
        let namespace = KubeNamespace {
            metadata: ObjectMeta {
                name: Some(name.to_owned()),
                ..Default::default()
            },
            ..Default::default()
        };
        let created = self
            .api()
            .create(&PostParams::default(), &namespace)
            .await
            .map_err(|e| map_kube_error(e, "Namespace", name))?;
        info!(namespace = %name, "Namespace created");
        Ok(Namespace {
            name: created.name_any(),
        })
    }
}
