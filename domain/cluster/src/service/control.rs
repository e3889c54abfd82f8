//! User facing operations.
use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    command::{CreateOrUpdateClusterCommand, CreateOrUpdateSecurityGroupCommand},
    exception::ClusterResult,
    model::{
        entity::{Cluster, SecurityGroup},
        vo::{BackupResource, DataDurability, HostResourceUsage},
    },
};

#[async_trait]
pub trait ClusterControlService: Send + Sync {
    /// Validate, then create a new cluster or update the existing one.
    async fn create_or_update(
        &self,
        workspace_id: Uuid,
        command: CreateOrUpdateClusterCommand,
    ) -> ClusterResult<Cluster>;
    async fn restart(&self, workspace_id: Uuid, id: Uuid) -> ClusterResult<Cluster>;
    /// Deletes synchronously, the record is kept as `Deleted`.
    async fn delete(&self, workspace_id: Uuid, id: Uuid) -> ClusterResult<()>;
    async fn get(&self, workspace_id: Uuid, id: Uuid) -> ClusterResult<Cluster>;
    async fn list(&self, workspace_id: Uuid) -> ClusterResult<Vec<Cluster>>;
    async fn exists(&self, system_name: &str) -> ClusterResult<bool>;
    async fn resource_usage(
        &self,
        workspace_id: Uuid,
        id: Uuid,
    ) -> ClusterResult<Vec<HostResourceUsage>>;
}

#[async_trait]
pub trait ReplicationService: Send + Sync {
    async fn hosts(&self, workspace_id: Uuid, cluster_id: Uuid) -> ClusterResult<Vec<String>>;
    async fn add_host(&self, workspace_id: Uuid, cluster_id: Uuid) -> ClusterResult<()>;
    async fn remove_host(&self, workspace_id: Uuid, cluster_id: Uuid) -> ClusterResult<()>;
    async fn set_settings(
        &self,
        workspace_id: Uuid,
        cluster_id: Uuid,
        sync_replicas: u32,
        data_durability: DataDurability,
    ) -> ClusterResult<()>;
}

#[async_trait]
pub trait BackupService: Send + Sync {
    async fn create(
        &self,
        workspace_id: Uuid,
        cluster_id: Uuid,
        method: &str,
    ) -> ClusterResult<BackupResource>;
    async fn list(&self, workspace_id: Uuid, cluster_id: Uuid)
        -> ClusterResult<Vec<BackupResource>>;
    async fn delete(&self, workspace_id: Uuid, cluster_id: Uuid, name: &str) -> ClusterResult<()>;
    /// Turn on scheduled backups.
    async fn schedule(
        &self,
        workspace_id: Uuid,
        cluster_id: Uuid,
        cron_expression: &str,
        method: &str,
    ) -> ClusterResult<()>;
    /// Reseed the cluster from one of its backups.
    async fn recover(
        &self,
        workspace_id: Uuid,
        cluster_id: Uuid,
        backup_name: &str,
    ) -> ClusterResult<()>;
}

#[async_trait]
pub trait SecurityGroupService: Send + Sync {
    async fn create_or_update(
        &self,
        workspace_id: Uuid,
        command: CreateOrUpdateSecurityGroupCommand,
    ) -> ClusterResult<SecurityGroup>;
    async fn list(&self, workspace_id: Uuid) -> ClusterResult<Vec<SecurityGroup>>;
    async fn delete(&self, workspace_id: Uuid, id: Uuid) -> ClusterResult<()>;
}
