use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use domain_cluster::{
    command::CreateOrUpdateClusterCommand,
    exception::{ClusterException, ClusterResult},
    model::{
        entity::{Cluster, ClusterConfiguration, SecurityGroup},
        vo::{ClusterStatus, HostResourceUsage, LifecycleEvent},
    },
    repository::{ClusterRepo, SecurityGroupRepo},
    service::{ClusterActuatorService, ClusterControlService},
};
use tracing::{debug, info};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::validation::validate_cluster_command;

/// Load a cluster of the workspace.
pub(crate) async fn workspace_cluster(
    cluster_repo: &dyn ClusterRepo,
    workspace_id: Uuid,
    id: Uuid,
) -> ClusterResult<Cluster> {
    let cluster = cluster_repo.get_by_id(id).await.map_err(|e| {
        debug!(%id, "Cluster lookup failed: {e:#}");
        ClusterException::NoSuchCluster { id }
    })?;
    if cluster.workspace_id != workspace_id {
        return Err(ClusterException::NoSuchCluster { id });
    }
    Ok(cluster)
}

/// Load a security group of the workspace.
pub(crate) async fn workspace_security_group(
    security_group_repo: &dyn SecurityGroupRepo,
    workspace_id: Uuid,
    id: Uuid,
) -> ClusterResult<SecurityGroup> {
    let group = security_group_repo.get_by_id(id).await.map_err(|e| {
        debug!(%id, "Security group lookup failed: {e:#}");
        ClusterException::NoSuchSecurityGroup { id }
    })?;
    if group.workspace_id != workspace_id {
        return Err(ClusterException::NoSuchSecurityGroup { id });
    }
    Ok(group)
}

pub(crate) fn ensure_running(cluster: &Cluster) -> ClusterResult<()> {
    if cluster.status() != ClusterStatus::Running {
        return Err(ClusterException::NotRunning {
            system_name: cluster.system_name.clone(),
            status: cluster.status(),
        });
    }
    Ok(())
}

/// Actuate the reshaped cluster, then persist it.
pub(crate) async fn apply_update(
    cluster_repo: &dyn ClusterRepo,
    actuator: &dyn ClusterActuatorService,
    cluster: &Cluster,
) -> ClusterResult<()> {
    actuator.update_cluster(cluster).await?;
    cluster_repo.update(cluster).await?;
    cluster_repo.save_changed().await?;
    Ok(())
}

#[derive(TypedBuilder)]
pub struct ClusterControlServiceImpl {
    cluster_repo: Arc<dyn ClusterRepo>,
    security_group_repo: Arc<dyn SecurityGroupRepo>,
    actuator: Arc<dyn ClusterActuatorService>,
}

#[async_trait]
impl ClusterControlService for ClusterControlServiceImpl {
    async fn create_or_update(
        &self,
        workspace_id: Uuid,
        command: CreateOrUpdateClusterCommand,
    ) -> ClusterResult<Cluster> {
        let pooler_mode = validate_cluster_command(&command)?;
        if let Some(id) = command.security_group_id {
            workspace_security_group(self.security_group_repo.as_ref(), workspace_id, id).await?;
        }

        let Some(mut cluster) = self
            .cluster_repo
            .get_by_system_name(&command.system_name)
            .await?
        else {
            let owner_password = command.owner_password.ok_or(ClusterException::Validation {
                reason: "OwnerPassword is required.".to_owned(),
            })?;
            let configuration = ClusterConfiguration {
                id: Uuid::new_v4(),
                storage_size: command.storage_size,
                cpu: command.cpu,
                memory: command.memory,
                major_version: command.major_version,
                database_name: command.database_name,
                lc_collate: command.lc_collate,
                lc_ctype: command.lc_ctype,
                instances: command.instances,
                owner_name: command.owner_name,
                owner_password,
                parameters: BTreeMap::new(),
                pooler_mode,
                pooler_max_connections: command.pooler_max_connections,
                pooler_default_pool_size: command.pooler_default_pool_size,
                backup_schedule_cron_expression: command.backup_schedule_cron_expression,
                backup_method: command.backup_method,
                sync_replicas: None,
                data_durability: Default::default(),
            };
            let cluster = Cluster::new(
                workspace_id,
                command.system_name,
                command.security_group_id,
                configuration,
            );
            self.cluster_repo.insert(&cluster).await?;
            self.cluster_repo.save_changed().await?;
            info!(cluster = %cluster.system_name, "Cluster registered");
            return Ok(cluster);
        };

        if cluster.workspace_id != workspace_id {
            return Err(ClusterException::Validation {
                reason: format!("SystemName {} is already taken.", command.system_name),
            });
        }
        ensure_running(&cluster)?;
        let current = cluster.configuration.storage_size;
        if command.storage_size < current {
            return Err(ClusterException::StorageSizeDecrease {
                current,
                requested: command.storage_size,
            });
        }

        let previous = &cluster.configuration;
        let mut configuration = ClusterConfiguration {
            id: previous.id,
            storage_size: command.storage_size,
            cpu: command.cpu,
            memory: command.memory,
            major_version: command.major_version,
            database_name: command.database_name,
            lc_collate: command.lc_collate,
            lc_ctype: command.lc_ctype,
            instances: command.instances,
            owner_name: command.owner_name,
            owner_password: command
                .owner_password
                .unwrap_or_else(|| previous.owner_password.clone()),
            parameters: previous.parameters.clone(),
            pooler_mode,
            pooler_max_connections: command.pooler_max_connections,
            pooler_default_pool_size: command.pooler_default_pool_size,
            backup_schedule_cron_expression: command.backup_schedule_cron_expression,
            backup_method: command.backup_method,
            sync_replicas: previous.sync_replicas,
            data_durability: previous.data_durability,
        };
        configuration.clamp_sync_replicas();
        cluster.configuration = configuration;
        cluster.security_group_id = command.security_group_id;
        if command.storage_size > current {
            cluster.apply(LifecycleEvent::StorageExpansionRequested)?;
        }

        apply_update(self.cluster_repo.as_ref(), self.actuator.as_ref(), &cluster).await?;
        info!(cluster = %cluster.system_name, status = ?cluster.status(), "Cluster updated");
        Ok(cluster)
    }

    async fn restart(&self, workspace_id: Uuid, id: Uuid) -> ClusterResult<Cluster> {
        let mut cluster = workspace_cluster(self.cluster_repo.as_ref(), workspace_id, id).await?;
        cluster.apply(LifecycleEvent::RestartRequested)?;
        self.actuator.restart_cluster(&cluster).await?;
        self.cluster_repo.update(&cluster).await?;
        self.cluster_repo.save_changed().await?;
        Ok(cluster)
    }

    async fn delete(&self, workspace_id: Uuid, id: Uuid) -> ClusterResult<()> {
        let mut cluster = workspace_cluster(self.cluster_repo.as_ref(), workspace_id, id).await?;
        cluster.apply(LifecycleEvent::DeleteRequested)?;
        self.cluster_repo.update(&cluster).await?;
        self.cluster_repo.save_changed().await?;

        self.actuator.delete_cluster(&cluster).await?;

        cluster.apply(LifecycleEvent::DeleteCompleted)?;
        self.cluster_repo.update(&cluster).await?;
        self.cluster_repo.save_changed().await?;
        info!(cluster = %cluster.system_name, "Cluster deleted");
        Ok(())
    }

    async fn get(&self, workspace_id: Uuid, id: Uuid) -> ClusterResult<Cluster> {
        workspace_cluster(self.cluster_repo.as_ref(), workspace_id, id).await
    }

    async fn list(&self, workspace_id: Uuid) -> ClusterResult<Vec<Cluster>> {
        Ok(self.cluster_repo.get_all_by_workspace(workspace_id).await?)
    }

    async fn exists(&self, system_name: &str) -> ClusterResult<bool> {
        Ok(self
            .cluster_repo
            .get_by_system_name(system_name)
            .await?
            .is_some())
    }

    async fn resource_usage(
        &self,
        workspace_id: Uuid,
        id: Uuid,
    ) -> ClusterResult<Vec<HostResourceUsage>> {
        let cluster = workspace_cluster(self.cluster_repo.as_ref(), workspace_id, id).await?;
        self.actuator.get_resource_usage(&cluster).await
    }
}
