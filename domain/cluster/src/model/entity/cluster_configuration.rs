use std::collections::BTreeMap;

use anyhow::Context;
use database_model::cluster_configuration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::vo::{DataDurability, PoolerMode};

/// The provisioned shape of a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfiguration {
    pub id: Uuid,
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
    pub owner_password: String,
    /// Engine parameters, a `None` value unsets the parameter.
    pub parameters: BTreeMap<String, Option<String>>,
    pub pooler_mode: Option<PoolerMode>,
    pub pooler_max_connections: Option<u32>,
    pub pooler_default_pool_size: Option<u32>,
    pub backup_schedule_cron_expression: Option<String>,
    pub backup_method: Option<String>,
    pub sync_replicas: Option<u32>,
    pub data_durability: DataDurability,
}

impl ClusterConfiguration {
    /// Keep `sync_replicas` within the replicas that exist, dropping it when there are none.
    pub fn clamp_sync_replicas(&mut self) {
        let replicas = self.instances.saturating_sub(1);
        if self.sync_replicas.is_some_and(|sync| sync > replicas) {
            self.sync_replicas = (replicas > 0).then_some(replicas);
        }
    }
}

fn unsigned(value: i32, column: &str) -> anyhow::Result<u32> {
    u32::try_from(value).with_context(|| format!("negative {column}: {value}"))
}

fn optional_unsigned(value: Option<i32>, column: &str) -> anyhow::Result<Option<u32>> {
    value.map(|v| unsigned(v, column)).transpose()
}

impl TryFrom<cluster_configuration::Model> for ClusterConfiguration {
    type Error = anyhow::Error;

    fn try_from(model: cluster_configuration::Model) -> Result<Self, Self::Error> {
        let cluster_configuration::Model {
            id,
            cluster_id: _,
            storage_size,
            cpu,
            memory,
            major_version,
            database_name,
            lc_collate,
            lc_ctype,
            instances,
            owner_name,
            owner_password,
            parameters,
            pooler_mode,
            pooler_max_connections,
            pooler_default_pool_size,
            backup_schedule_cron_expression,
            backup_method,
            sync_replicas,
            data_durability,
        } = model;

        let parameters = if parameters.is_null() {
            BTreeMap::new()
        } else {
            serde_json::from_value(parameters).context("malformed cluster parameters")?
        };

        Ok(Self {
            id,
            storage_size: unsigned(storage_size, "storage_size")?,
            cpu: unsigned(cpu, "cpu")?,
            memory: unsigned(memory, "memory")?,
            major_version: unsigned(major_version, "major_version")?,
            database_name,
            lc_collate,
            lc_ctype,
            instances: unsigned(instances, "instances")?,
            owner_name,
            owner_password,
            parameters,
            pooler_mode: pooler_mode.as_deref().map(str::parse::<PoolerMode>).transpose()?,
            pooler_max_connections: optional_unsigned(
                pooler_max_connections,
                "pooler_max_connections",
            )?,
            pooler_default_pool_size: optional_unsigned(
                pooler_default_pool_size,
                "pooler_default_pool_size",
            )?,
            backup_schedule_cron_expression,
            backup_method,
            sync_replicas: optional_unsigned(sync_replicas, "sync_replicas")?,
            data_durability: data_durability
                .as_deref()
                .map(str::parse::<DataDurability>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

fn signed(value: u32, column: &str) -> anyhow::Result<i32> {
    i32::try_from(value).with_context(|| format!("{column} out of range: {value}"))
}

impl ClusterConfiguration {
    /// The row of this configuration, owned by the cluster `cluster_id`.
    pub fn to_model(&self, cluster_id: Uuid) -> anyhow::Result<cluster_configuration::Model> {
        Ok(cluster_configuration::Model {
            id: self.id,
            cluster_id,
            storage_size: signed(self.storage_size, "storage_size")?,
            cpu: signed(self.cpu, "cpu")?,
            memory: signed(self.memory, "memory")?,
            major_version: signed(self.major_version, "major_version")?,
            database_name: self.database_name.clone(),
            lc_collate: self.lc_collate.clone(),
            lc_ctype: self.lc_ctype.clone(),
            instances: signed(self.instances, "instances")?,
            owner_name: self.owner_name.clone(),
            owner_password: self.owner_password.clone(),
            parameters: serde_json::to_value(&self.parameters)?,
            pooler_mode: self.pooler_mode.map(|mode| mode.as_str().to_owned()),
            pooler_max_connections: self
                .pooler_max_connections
                .map(|v| signed(v, "pooler_max_connections"))
                .transpose()?,
            pooler_default_pool_size: self
                .pooler_default_pool_size
                .map(|v| signed(v, "pooler_default_pool_size"))
                .transpose()?,
            backup_schedule_cron_expression: self.backup_schedule_cron_expression.clone(),
            backup_method: self.backup_method.clone(),
            sync_replicas: self.sync_replicas.map(|v| signed(v, "sync_replicas")).transpose()?,
            data_durability: Some(self.data_durability.as_str().to_owned()),
        })
    }
}
