use async_trait::async_trait;

use crate::model::vo::TickReport;

/// Drives clusters through their lifecycle from what the platform reports.
#[async_trait]
pub trait ReconcileService: Send + Sync {
    /// Materialize new clusters and follow platform health.
    async fn synchronize(&self) -> TickReport;

    /// Recreate the storage of clusters waiting for it, once they are healthy.
    async fn recreate_storage(&self) -> TickReport;
}
