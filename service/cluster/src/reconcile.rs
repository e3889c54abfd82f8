use std::sync::Arc;

use async_trait::async_trait;
use domain_cluster::{
    exception::{ClusterException, ClusterResult},
    model::{
        entity::Cluster,
        vo::{
            BucketReport, ClusterStatus, LifecycleEvent, PhaseClass, ReconcileOutcome,
            TickReport,
        },
    },
    repository::ClusterRepo,
    service::{ClusterActuatorService, ReconcileService},
};
use tracing::{debug, error, info, warn};
use typed_builder::TypedBuilder;

/// Clusters loaded together and handled by the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Initialization,
    Starting,
    Running,
    RecreatingStorage,
}

impl Bucket {
    fn name(self) -> &'static str {
        match self {
            Bucket::Initialization => "initialization",
            Bucket::Starting => "starting",
            Bucket::Running => "running",
            Bucket::RecreatingStorage => "recreating_storage",
        }
    }

    fn statuses(self) -> &'static [ClusterStatus] {
        match self {
            Bucket::Initialization => &[ClusterStatus::Initialization],
            Bucket::Starting => &[ClusterStatus::Starting, ClusterStatus::Restarting],
            Bucket::Running => &[ClusterStatus::Running],
            Bucket::RecreatingStorage => &[ClusterStatus::RecreatingStorage],
        }
    }
}

#[derive(TypedBuilder)]
pub struct ReconcileServiceImpl {
    cluster_repo: Arc<dyn ClusterRepo>,
    actuator: Arc<dyn ClusterActuatorService>,
}

#[async_trait]
impl ReconcileService for ReconcileServiceImpl {
    async fn synchronize(&self) -> TickReport {
        self.run(&[Bucket::Initialization, Bucket::Starting, Bucket::Running])
            .await
    }

    async fn recreate_storage(&self) -> TickReport {
        self.run(&[Bucket::RecreatingStorage]).await
    }
}

impl ReconcileServiceImpl {
    async fn run(&self, buckets: &[Bucket]) -> TickReport {
        let mut report = TickReport::default();
        for bucket in buckets {
            if let Some(bucket_report) = self.run_bucket(*bucket).await {
                report.push(bucket.name(), bucket_report);
            }
        }
        report
    }

    /// Clusters are visited one after another, a failing one does not stop the rest.
    async fn run_bucket(&self, bucket: Bucket) -> Option<BucketReport> {
        let clusters = match self.cluster_repo.get_by_statuses(bucket.statuses()).await {
            Ok(clusters) => clusters,
            Err(e) => {
                error!(bucket = bucket.name(), "Failed to load clusters: {e:#}");
                return None;
            }
        };

        let mut report = BucketReport::default();
        for cluster in clusters {
            let outcome = match self.step(bucket, &cluster).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(
                        bucket = bucket.name(),
                        cluster = %cluster.system_name,
                        "Reconciliation step failed: {e}"
                    );
                    ReconcileOutcome::Failed
                }
            };
            report.record(outcome);
        }
        Some(report)
    }

    async fn step(&self, bucket: Bucket, cluster: &Cluster) -> ClusterResult<ReconcileOutcome> {
        match bucket {
            Bucket::Initialization => {
                match self.actuator.create_cluster(cluster).await {
                    Ok(()) => {}
                    Err(ClusterException::Platform(e)) if e.is_already_exists() => {
                        info!(cluster = %cluster.system_name, "Release already exists");
                    }
                    Err(e) => return Err(e),
                }
                self.advance(cluster, LifecycleEvent::ReleaseCreated).await
            }
            Bucket::Starting => {
                if self.observe(cluster).await?.is_healthy() {
                    self.advance(cluster, LifecycleEvent::PlatformHealthy).await
                } else {
                    Ok(ReconcileOutcome::Unchanged)
                }
            }
            Bucket::Running => {
                if self.observe(cluster).await?.is_restarting() {
                    self.advance(cluster, LifecycleEvent::PlatformRestarting).await
                } else {
                    Ok(ReconcileOutcome::Unchanged)
                }
            }
            Bucket::RecreatingStorage => {
                if !self.observe(cluster).await?.is_healthy() {
                    return Ok(ReconcileOutcome::Unchanged);
                }
                self.actuator.recreate_storage(cluster).await?;
                self.advance(cluster, LifecycleEvent::StorageRecreated).await
            }
        }
    }

    /// Classify the platform phase of a cluster.
    async fn observe(&self, cluster: &Cluster) -> ClusterResult<PhaseClass> {
        let Some(status) = self.actuator.get_cluster_status(cluster).await? else {
            debug!(cluster = %cluster.system_name, "Cluster resource not found yet");
            return Ok(PhaseClass::Other);
        };
        let class = status.class();
        if class == PhaseClass::Unrecognized {
            warn!(cluster = %cluster.system_name, phase = ?status.phase, "Unrecognized platform phase");
        } else {
            debug!(cluster = %cluster.system_name, phase = ?status.phase, ?class, "Platform phase");
        }
        Ok(class)
    }

    /// Persist the transition unless the record changed since it was loaded.
    async fn advance(
        &self,
        cluster: &Cluster,
        event: LifecycleEvent,
    ) -> ClusterResult<ReconcileOutcome> {
        let from = cluster.status();
        let to = from
            .next(event)
            .ok_or(ClusterException::InvalidTransition { from, event })?;

        if self.cluster_repo.transition_status(cluster.id, from, to).await? {
            info!(cluster = %cluster.system_name, ?from, ?to, "Cluster status changed");
            Ok(ReconcileOutcome::Advanced)
        } else {
            warn!(
                cluster = %cluster.system_name,
                ?from,
                ?to,
                "Cluster changed concurrently, transition skipped"
            );
            Ok(ReconcileOutcome::Conflicted)
        }
    }
}
