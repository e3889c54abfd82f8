use async_trait::async_trait;

use crate::{
    exception::{ClusterResult, PlatformResult},
    model::{
        entity::Cluster,
        vo::{BackupResource, HostResourceUsage, PlatformClusterStatus},
    },
};

/// The only way the engine touches a cluster on the orchestration platform.
///
/// Nothing here retries. Retrying is left to the reconciliation loop.
#[async_trait]
pub trait ClusterActuatorService: Send + Sync {
    /// Create the namespace unless the probe finds it.
    async fn ensure_namespace(&self, name: &str) -> PlatformResult<()>;

    /// Submit a new release. Fails with `AlreadyExists` when the release is there.
    async fn create_cluster(&self, cluster: &Cluster) -> ClusterResult<()>;

    /// Replace the release with a freshly rendered one, keeping its version token.
    async fn update_cluster(&self, cluster: &Cluster) -> ClusterResult<()>;

    async fn delete_cluster(&self, cluster: &Cluster) -> ClusterResult<()>;

    /// Patch the restart trigger annotation of the database cluster resource.
    async fn restart_cluster(&self, cluster: &Cluster) -> ClusterResult<()>;

    /// `None` while the database cluster resource does not exist yet.
    async fn get_cluster_status(
        &self,
        cluster: &Cluster,
    ) -> ClusterResult<Option<PlatformClusterStatus>>;

    /// Names of the member hosts.
    async fn get_cluster_hosts(&self, cluster: &Cluster) -> ClusterResult<Vec<String>>;

    /// Drop each host together with its volume claim, one host at a time.
    async fn recreate_storage(&self, cluster: &Cluster) -> ClusterResult<()>;

    /// Best effort, a failed metric of one host is reported as `None`.
    async fn get_resource_usage(&self, cluster: &Cluster) -> ClusterResult<Vec<HostResourceUsage>>;
}

#[async_trait]
pub trait BackupActuatorService: Send + Sync {
    /// Submit an on-demand backup named `{system_name}-{unix seconds}`.
    async fn create_backup(&self, cluster: &Cluster, method: &str) -> ClusterResult<BackupResource>;

    async fn get_backups(&self, cluster: &Cluster) -> ClusterResult<Vec<BackupResource>>;

    async fn delete_backup(&self, cluster: &Cluster, name: &str) -> ClusterResult<()>;
}
