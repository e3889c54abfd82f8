use anyhow::Context;
use domain_cluster::model::vo::{ChartReference, ReleaseResource, ReleaseSpec};
use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::object_meta;
use crate::client::KubeMapped;

/// Flux helm release, reconciled by the helm controller into the chart's objects.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "helm.toolkit.fluxcd.io",
    version = "v2",
    kind = "HelmRelease",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct HelmReleaseSpec {
    pub chart: HelmChartTemplate,
    pub interval: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<serde_json::Value>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
pub struct HelmChartTemplate {
    pub spec: HelmChartTemplateSpec,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HelmChartTemplateSpec {
    pub chart: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub source_ref: CrossNamespaceObjectReference,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
pub struct CrossNamespaceObjectReference {
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl KubeMapped<ReleaseResource> for HelmRelease {
    fn into_domain(self) -> anyhow::Result<ReleaseResource> {
        let name = self.name_any();
        let namespace = self.namespace().unwrap_or_default();
        let resource_version = self.resource_version();
        let HelmReleaseSpec {
            chart,
            interval,
            values,
        } = self.spec;
        let values = values.with_context(|| format!("helm release {name} carries no values"))?;
        Ok(ReleaseResource {
            resource_version,
            spec: ReleaseSpec {
                chart: ChartReference {
                    name: chart.spec.chart,
                    version: chart.spec.version.unwrap_or_default(),
                    source_kind: chart.spec.source_ref.kind,
                    source_name: chart.spec.source_ref.name,
                    source_namespace: chart.spec.source_ref.namespace.unwrap_or_default(),
                },
                interval,
                values: serde_json::from_value(values)
                    .with_context(|| format!("unexpected values in helm release {name}"))?,
            },
            name,
            namespace,
        })
    }

    fn from_domain(release: &ReleaseResource) -> anyhow::Result<Self> {
        let chart = &release.spec.chart;
        let mut object = HelmRelease::new(
            &release.name,
            HelmReleaseSpec {
                chart: HelmChartTemplate {
                    spec: HelmChartTemplateSpec {
                        chart: chart.name.clone(),
                        version: Some(chart.version.clone()),
                        source_ref: CrossNamespaceObjectReference {
                            kind: chart.source_kind.clone(),
                            name: chart.source_name.clone(),
                            namespace: Some(chart.source_namespace.clone()),
                        },
                    },
                },
                interval: release.spec.interval.clone(),
                values: Some(serde_json::to_value(&release.spec.values)?),
            },
        );
        object.metadata = object_meta(&release.namespace, &release.name);
        object.metadata.resource_version = release.resource_version.clone();
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use domain_cluster::model::vo::{
        BackupValues, DataDurability, PoolerValues, RecoveryValues, ReleaseValues, SecurityValues,
    };
    use serde_json::json;

    use super::*;

    fn release() -> ReleaseResource {
        ReleaseResource {
            name: "shop-db".to_owned(),
            namespace: "shop-db".to_owned(),
            resource_version: Some("42".to_owned()),
            spec: ReleaseSpec {
                chart: ChartReference {
                    name: "pg-cluster".to_owned(),
                    version: "1.x.x".to_owned(),
                    source_kind: "HelmRepository".to_owned(),
                    source_name: "pgaas".to_owned(),
                    source_namespace: "default".to_owned(),
                },
                interval: "10m".to_owned(),
                values: ReleaseValues {
                    name: "shop-db".to_owned(),
                    major_version: 16,
                    instances: 2,
                    storage_size: "2Gi".to_owned(),
                    memory: "512Mi".to_owned(),
                    cpu: "250m".to_owned(),
                    database_name: "shop".to_owned(),
                    lc_collate: "C".to_owned(),
                    lc_ctype: "C".to_owned(),
                    owner_name: "shop".to_owned(),
                    owner_password: "hunter2".to_owned(),
                    parameters: BTreeMap::from([("jit".to_owned(), None)]),
                    pooler: PoolerValues {
                        enabled: false,
                        mode: None,
                        max_client_connections: None,
                        default_pool_size: None,
                    },
                    security: SecurityValues {
                        enabled: false,
                        allowed_ips: vec![],
                    },
                    backups: BackupValues {
                        enabled: false,
                        schedule: None,
                        method: None,
                    },
                    recovery: RecoveryValues {
                        enabled: false,
                        backup_name: None,
                    },
                    sync_replicas: Some(1),
                    data_durability: DataDurability::Required,
                },
            },
        }
    }

    #[test]
    fn release_is_written_as_flux_object() {
        let object = HelmRelease::from_domain(&release()).unwrap();
        let written = serde_json::to_value(&object).unwrap();
        assert_eq!(written["apiVersion"], "helm.toolkit.fluxcd.io/v2");
        assert_eq!(written["metadata"]["namespace"], "shop-db");
        assert_eq!(written["metadata"]["resourceVersion"], "42");
        assert_eq!(
            written["spec"]["chart"]["spec"],
            json!({
                "chart": "pg-cluster",
                "version": "1.x.x",
                "sourceRef": { "kind": "HelmRepository", "name": "pgaas", "namespace": "default" }
            })
        );
        assert_eq!(written["spec"]["values"]["storageSize"], "2Gi");
        assert_eq!(written["spec"]["values"]["parameters"], json!({ "jit": null }));
        assert_eq!(written["spec"]["values"]["dataDurability"], "required");
    }

    #[test]
    fn stored_release_reads_back() {
        let object = HelmRelease::from_domain(&release()).unwrap();
        assert_eq!(object.into_domain().unwrap(), release());
    }

    #[test]
    fn release_from_older_chart_reads_back() {
        let mut object = HelmRelease::from_domain(&release()).unwrap();
        object.spec.values = Some(json!({
            "name": "shop-db",
            "majorVersion": 16,
            "instances": 2,
            "storageSize": "2Gi",
            "memory": "512Mi",
            "cpu": "250m",
            "databaseName": "shop",
            "lcCollate": "C",
            "lcCtype": "C",
            "ownerName": "shop",
            "ownerPassword": "hunter2"
        }));

        let read = object.into_domain().unwrap();
        assert_eq!(read.resource_version.as_deref(), Some("42"));
        let values = read.spec.values;
        assert!(values.parameters.is_empty());
        assert!(!values.recovery.enabled);
        assert_eq!(values.sync_replicas, None);
        assert_eq!(values.data_durability, DataDurability::Preferred);
    }

    #[test]
    fn release_without_values_is_rejected() {
        let mut object = HelmRelease::from_domain(&release()).unwrap();
        object.spec.values = None;
        assert!(object.into_domain().is_err());
    }
}
