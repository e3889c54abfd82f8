use anyhow::Context;
use domain_cluster::model::vo::BackupResource;
use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::object_meta;
use crate::client::KubeMapped;

/// On-demand backup of a database cluster.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "postgresql.cnpg.io",
    version = "v1",
    kind = "Backup",
    status = "BackupStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct BackupSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub cluster: ClusterReference,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
pub struct ClusterReference {
    pub name: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl KubeMapped<BackupResource> for Backup {
    fn into_domain(self) -> anyhow::Result<BackupResource> {
        let name = self.name_any();
        Ok(BackupResource {
            namespace: self.namespace().unwrap_or_default(),
            method: self
                .spec
                .method
                .with_context(|| format!("backup {name} has no method"))?,
            cluster_name: self.spec.cluster.name,
            phase: self.status.and_then(|status| status.phase),
            created_at: self.metadata.creation_timestamp.map(|time| time.0),
            name,
        })
    }

    fn from_domain(backup: &BackupResource) -> anyhow::Result<Self> {
        let mut object = Backup::new(
            &backup.name,
            BackupSpec {
                method: Some(backup.method.clone()),
                cluster: ClusterReference {
                    name: backup.cluster_name.clone(),
                },
            },
        );
        object.metadata = object_meta(&backup.namespace, &backup.name);
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    #[test]
    fn backup_targets_the_platform_cluster() {
        let backup = BackupResource {
            name: "shop-db-1700000000".to_owned(),
            namespace: "shop-db".to_owned(),
            method: "barmanObjectStore".to_owned(),
            cluster_name: "shop-db-restored".to_owned(),
            phase: None,
            created_at: None,
        };
        let written = serde_json::to_value(Backup::from_domain(&backup).unwrap()).unwrap();
        assert_eq!(written["apiVersion"], "postgresql.cnpg.io/v1");
        assert_eq!(
            written["spec"],
            json!({ "method": "barmanObjectStore", "cluster": { "name": "shop-db-restored" } })
        );
    }

    #[test]
    fn listed_backup_carries_phase_and_creation_time() {
        let object: Backup = serde_json::from_value(json!({
            "apiVersion": "postgresql.cnpg.io/v1",
            "kind": "Backup",
            "metadata": {
                "name": "shop-db-1700000000",
                "namespace": "shop-db",
                "creationTimestamp": "2023-11-14T22:13:20Z"
            },
            "spec": { "method": "volumeSnapshot", "cluster": { "name": "shop-db" } },
            "status": { "phase": "completed" }
        }))
        .unwrap();

        let backup = object.into_domain().unwrap();
        assert_eq!(backup.phase.as_deref(), Some("completed"));
        assert_eq!(
            backup.created_at,
            Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
        );
    }
}
