use std::sync::Arc;

use async_trait::async_trait;
use domain_cluster::{
    exception::{ClusterException, ClusterResult},
    model::vo::DataDurability,
    repository::ClusterRepo,
    service::{ClusterActuatorService, ReplicationService},
};
use tracing::info;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::{
    control::{apply_update, ensure_running, workspace_cluster},
    validation::INSTANCES,
};

#[derive(TypedBuilder)]
pub struct ReplicationServiceImpl {
    cluster_repo: Arc<dyn ClusterRepo>,
    actuator: Arc<dyn ClusterActuatorService>,
}

#[async_trait]
impl ReplicationService for ReplicationServiceImpl {
    async fn hosts(&self, workspace_id: Uuid, cluster_id: Uuid) -> ClusterResult<Vec<String>> {
        let cluster =
            workspace_cluster(self.cluster_repo.as_ref(), workspace_id, cluster_id).await?;
        self.actuator.get_cluster_hosts(&cluster).await
    }

    async fn add_host(&self, workspace_id: Uuid, cluster_id: Uuid) -> ClusterResult<()> {
        let mut cluster =
            workspace_cluster(self.cluster_repo.as_ref(), workspace_id, cluster_id).await?;
        ensure_running(&cluster)?;
        if cluster.configuration.instances >= *INSTANCES.end() {
            return Err(ClusterException::Validation {
                reason: format!("Cluster cannot have more than {} hosts.", INSTANCES.end()),
            });
        }

        cluster.configuration.instances += 1;
        apply_update(self.cluster_repo.as_ref(), self.actuator.as_ref(), &cluster).await?;
        info!(
            cluster = %cluster.system_name,
            instances = cluster.configuration.instances,
            "Host added"
        );
        Ok(())
    }

    async fn remove_host(&self, workspace_id: Uuid, cluster_id: Uuid) -> ClusterResult<()> {
        let mut cluster =
            workspace_cluster(self.cluster_repo.as_ref(), workspace_id, cluster_id).await?;
        ensure_running(&cluster)?;
        if cluster.configuration.instances <= 1 {
            return Err(ClusterException::Validation {
                reason: "Cannot delete host from cluster.".to_owned(),
            });
        }

        cluster.configuration.instances -= 1;
        cluster.configuration.clamp_sync_replicas();
        apply_update(self.cluster_repo.as_ref(), self.actuator.as_ref(), &cluster).await?;
        info!(
            cluster = %cluster.system_name,
            instances = cluster.configuration.instances,
            "Host removed"
        );
        Ok(())
    }

    async fn set_settings(
        &self,
        workspace_id: Uuid,
        cluster_id: Uuid,
        sync_replicas: u32,
        data_durability: DataDurability,
    ) -> ClusterResult<()> {
        let mut cluster =
            workspace_cluster(self.cluster_repo.as_ref(), workspace_id, cluster_id).await?;
        ensure_running(&cluster)?;
        let replicas = cluster.configuration.instances.saturating_sub(1);
        if sync_replicas == 0 || sync_replicas > replicas {
            return Err(ClusterException::Validation {
                reason: "Sync replicas should be less or equal than cluster replicas and greater than zero."
                    .to_owned(),
            });
        }

        cluster.configuration.sync_replicas = Some(sync_replicas);
        cluster.configuration.data_durability = data_durability;
        apply_update(self.cluster_repo.as_ref(), self.actuator.as_ref(), &cluster).await
    }
}
