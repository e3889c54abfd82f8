mod backup;
mod cluster;
mod helm_release;
mod workload;

#[rustfmt::skip]
pub use {
    backup::{Backup, BackupSpec, BackupStatus, ClusterReference},
    cluster::{CnpgCluster, CnpgClusterSpec, CnpgClusterStatus},
    helm_release::{
        CrossNamespaceObjectReference, HelmChartTemplate, HelmChartTemplateSpec, HelmRelease,
        HelmReleaseSpec,
    },
};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

fn object_meta(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_owned()),
        namespace: Some(namespace.to_owned()),
        ..Default::default()
    }
}
