pub mod lifecycle;
pub mod phase;
pub mod platform;
pub mod reconcile;
pub mod release;
pub mod replication;
pub mod resource_usage;

#[rustfmt::skip]
pub use {
    lifecycle::{ClusterStatus, LifecycleEvent},
    phase::PhaseClass,
    platform::{BackupResource, DatabaseClusterResource, MemberHost, Namespace, PlatformClusterStatus, VolumeClaim},
    reconcile::{BucketReport, ReconcileOutcome, TickReport},
    release::{BackupValues, ChartReference, PoolerValues, RecoveryValues, ReleaseResource, ReleaseSpec, ReleaseValues, SecurityValues},
    replication::{DataDurability, PoolerMode},
    resource_usage::HostResourceUsage,
};
