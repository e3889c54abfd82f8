use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Create a cluster, or reshape an existing one with the same system name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrUpdateClusterCommand {
    pub system_name: String,
    pub security_group_id: Option<Uuid>,
    /// GiB
    pub storage_size: u32,
    /// millicores
    pub cpu: u32,
    /// MiB
    pub memory: u32,
    pub major_version: u32,
    pub database_name: String,
    pub lc_collate: String,
    pub lc_ctype: String,
    pub instances: u32,
    pub owner_name: String,
    /// Required on create, kept as is on update when absent.
    pub owner_password: Option<String>,
    pub pooler_mode: Option<String>,
    pub pooler_max_connections: Option<u32>,
    pub pooler_default_pool_size: Option<u32>,
    pub backup_schedule_cron_expression: Option<String>,
    pub backup_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrUpdateSecurityGroupCommand {
    /// Updates the group when it exists in the workspace.
    pub id: Option<Uuid>,
    pub name: String,
    pub allowed_ips: Vec<String>,
}
