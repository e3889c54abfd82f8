use anyhow::anyhow;
use architecture::AggregateRoot;
use database_model::{cluster, cluster_configuration};
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ClusterConfiguration;
use crate::{
    exception::{ClusterException, ClusterResult},
    model::vo::{ClusterStatus, LifecycleEvent},
};

/// A tenant-owned database cluster.
///
/// `status` only moves along the lifecycle table, through [`Cluster::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: Uuid,
    /// DNS-safe name, also used as the platform namespace.
    pub system_name: String,
    status: ClusterStatus,
    pub workspace_id: Uuid,
    pub security_group_id: Option<Uuid>,
    cluster_name_in_platform: String,
    recovery_from_backup: bool,
    pub configuration: ClusterConfiguration,
}

impl AggregateRoot for Cluster {}

impl Cluster {
    /// A cluster waiting to be materialized.
    pub fn new(
        workspace_id: Uuid,
        system_name: String,
        security_group_id: Option<Uuid>,
        configuration: ClusterConfiguration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            cluster_name_in_platform: system_name.clone(),
            system_name,
            status: ClusterStatus::Initialization,
            workspace_id,
            security_group_id,
            recovery_from_backup: false,
            configuration,
        }
    }

    pub fn status(&self) -> ClusterStatus {
        self.status
    }

    /// Name of the database cluster inside the platform. Equals `system_name` until
    /// the cluster is recovered from a backup.
    pub fn cluster_name_in_platform(&self) -> &str {
        &self.cluster_name_in_platform
    }

    pub fn recovery_from_backup(&self) -> bool {
        self.recovery_from_backup
    }

    /// Move along the lifecycle table, returning the new status.
    pub fn apply(&mut self, event: LifecycleEvent) -> ClusterResult<ClusterStatus> {
        let next = self.status.next(event).ok_or(ClusterException::InvalidTransition {
            from: self.status,
            event,
        })?;
        self.status = next;
        Ok(next)
    }

    /// Seed the cluster from a backup on the next update.
    pub fn recover_from(&mut self, backup_name: &str) {
        self.cluster_name_in_platform = backup_name.to_owned();
        self.recovery_from_backup = true;
        self.configuration.parameters.clear();
    }

    #[cfg(any(test, feature = "mock"))]
    pub fn with_status(mut self, status: ClusterStatus) -> Self {
        self.status = status;
        self
    }
}

impl TryFrom<(cluster::Model, cluster_configuration::Model)> for Cluster {
    type Error = anyhow::Error;

    fn try_from(
        (model, configuration): (cluster::Model, cluster_configuration::Model),
    ) -> Result<Self, Self::Error> {
        let cluster::Model {
            id,
            system_name,
            status,
            workspace_id,
            security_group_id,
            cluster_name_in_platform,
            recovery_from_backup,
        } = model;

        Ok(Self {
            id,
            status: ClusterStatus::from_i32(status)
                .ok_or(anyhow!("unknown status {status} of cluster {system_name}"))?,
            system_name,
            workspace_id,
            security_group_id,
            cluster_name_in_platform,
            recovery_from_backup,
            configuration: configuration.try_into()?,
        })
    }
}

impl TryFrom<&Cluster> for cluster::Model {
    type Error = anyhow::Error;

    fn try_from(cluster: &Cluster) -> Result<Self, Self::Error> {
        Ok(Self {
            id: cluster.id,
            system_name: cluster.system_name.clone(),
            status: cluster
                .status
                .to_i32()
                .ok_or(anyhow!("unrepresentable status {:?}", cluster.status))?,
            workspace_id: cluster.workspace_id,
            security_group_id: cluster.security_group_id,
            cluster_name_in_platform: cluster.cluster_name_in_platform.clone(),
            recovery_from_backup: cluster.recovery_from_backup,
        })
    }
}

impl TryFrom<&Cluster> for cluster_configuration::Model {
    type Error = anyhow::Error;

    fn try_from(cluster: &Cluster) -> Result<Self, Self::Error> {
        cluster.configuration.to_model(cluster.id)
    }
}
