use architecture::DBRepository;
use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{entity::Cluster, vo::ClusterStatus};

#[async_trait]
pub trait ClusterRepo: DBRepository<Cluster> + Send + Sync {
    /// Clusters whose status is any of `statuses`.
    async fn get_by_statuses(&self, statuses: &[ClusterStatus]) -> anyhow::Result<Vec<Cluster>>;

    async fn get_by_system_name(&self, system_name: &str) -> anyhow::Result<Option<Cluster>>;

    /// Every cluster of a workspace, deleted ones included.
    async fn get_all_by_workspace(&self, workspace_id: Uuid) -> anyhow::Result<Vec<Cluster>>;

    /// Conditionally write `to`, only while the stored status still equals `from`.
    /// Takes effect immediately and returns whether a record was written.
    async fn transition_status(
        &self,
        id: Uuid,
        from: ClusterStatus,
        to: ClusterStatus,
    ) -> anyhow::Result<bool>;
}
