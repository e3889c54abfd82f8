use domain_cluster::model::vo::{DatabaseClusterResource, PlatformClusterStatus};
use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::object_meta;
use crate::client::KubeMapped;

/// The database cluster object the chart renders. Only read and annotated from here.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[kube(
    group = "postgresql.cnpg.io",
    version = "v1",
    kind = "Cluster",
    status = "CnpgClusterStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CnpgClusterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances: Option<i32>,
}

pub type CnpgCluster = Cluster;

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CnpgClusterStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_instances: Option<i32>,
}

impl KubeMapped<DatabaseClusterResource> for CnpgCluster {
    fn into_domain(self) -> anyhow::Result<DatabaseClusterResource> {
        Ok(DatabaseClusterResource {
            name: self.name_any(),
            namespace: self.namespace().unwrap_or_default(),
            annotations: self.annotations().clone(),
            status: self.status.map(|status| PlatformClusterStatus {
                phase: status.phase,
            }),
        })
    }

    fn from_domain(cluster: &DatabaseClusterResource) -> anyhow::Result<Self> {
        let mut object = Cluster::new(&cluster.name, CnpgClusterSpec::default());
        object.metadata = object_meta(&cluster.namespace, &cluster.name);
        object.metadata.annotations = Some(cluster.annotations.clone());
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn phase_is_read_from_status() {
        let object: CnpgCluster = serde_json::from_value(json!({
            "apiVersion": "postgresql.cnpg.io/v1",
            "kind": "Cluster",
            "metadata": {
                "name": "shop-db",
                "namespace": "shop-db",
                "annotations": { "kubectl.kubernetes.io/restartedAt": "2024-01-01T00:00:00Z" }
            },
            "spec": { "instances": 2, "storage": { "size": "2Gi" } },
            "status": { "phase": "Cluster in healthy state", "readyInstances": 2 }
        }))
        .unwrap();

        let cluster = object.into_domain().unwrap();
        assert_eq!(cluster.namespace, "shop-db");
        assert!(cluster.status.unwrap().is_healthy());
        assert_eq!(
            cluster.annotations["kubectl.kubernetes.io/restartedAt"],
            "2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn annotated_cluster_is_written_as_cnpg_object() {
        let cluster = DatabaseClusterResource {
            name: "shop-db".to_owned(),
            namespace: "shop-db".to_owned(),
            annotations: [(
                "kubectl.kubernetes.io/restartedAt".to_owned(),
                "2024-01-01T00:00:00Z".to_owned(),
            )]
            .into(),
            status: None,
        };

        let value = serde_json::to_value(CnpgCluster::from_domain(&cluster).unwrap()).unwrap();
        assert_eq!(value["apiVersion"], "postgresql.cnpg.io/v1");
        assert_eq!(value["kind"], "Cluster");
        assert_eq!(value["metadata"]["namespace"], "shop-db");
        assert_eq!(
            value["metadata"]["annotations"]["kubectl.kubernetes.io/restartedAt"],
            "2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn fresh_cluster_has_no_status() {
        let object: CnpgCluster = serde_json::from_value(json!({
            "apiVersion": "postgresql.cnpg.io/v1",
            "kind": "Cluster",
            "metadata": { "name": "shop-db", "namespace": "shop-db" },
            "spec": {}
        }))
        .unwrap();
        assert_eq!(object.into_domain().unwrap().status, None);
    }
}
