//! The declarative release resource that materializes a cluster.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DataDurability;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseResource {
    pub name: String,
    pub namespace: String,
    /// The platform's internal version token. Must be carried over on replace.
    pub resource_version: Option<String>,
    pub spec: ReleaseSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseSpec {
    pub chart: ChartReference,
    /// How often the platform re-applies the release, e.g. `10m`.
    pub interval: String,
    pub values: ReleaseValues,
}

/// Which chart the release installs and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReference {
    pub name: String,
    /// Semver range, e.g. `1.x.x`.
    pub version: String,
    pub source_kind: String,
    pub source_name: String,
    pub source_namespace: String,
}

/// Values handed to the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseValues {
    pub name: String,
    pub major_version: u32,
    pub instances: u32,
    pub storage_size: String,
    pub memory: String,
    pub cpu: String,
    pub database_name: String,
    pub lc_collate: String,
    pub lc_ctype: String,
    pub owner_name: String,
    pub owner_password: String,
    /// Sections below may be missing from releases written by older charts.
    #[serde(default)]
    pub parameters: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub pooler: PoolerValues,
    #[serde(default)]
    pub security: SecurityValues,
    #[serde(default)]
    pub backups: BackupValues,
    #[serde(default)]
    pub recovery: RecoveryValues,
    #[serde(default)]
    pub sync_replicas: Option<u32>,
    #[serde(default)]
    pub data_durability: DataDurability,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolerValues {
    pub enabled: bool,
    pub mode: Option<String>,
    pub max_client_connections: Option<u32>,
    pub default_pool_size: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityValues {
    pub enabled: bool,
    pub allowed_ips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupValues {
    pub enabled: bool,
    pub schedule: Option<String>,
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryValues {
    pub enabled: bool,
    pub backup_name: Option<String>,
}
