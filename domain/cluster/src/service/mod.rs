mod actuator;
mod control;
mod metrics;
mod reconcile;
mod render;

#[rustfmt::skip]
pub use {
    actuator::{BackupActuatorService, ClusterActuatorService},
    control::{BackupService, ClusterControlService, ReplicationService, SecurityGroupService},
    metrics::MetricsQueryService,
    reconcile::ReconcileService,
    render::DesiredStateRenderService,
};
