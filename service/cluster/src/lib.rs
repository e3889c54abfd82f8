mod actuator;
mod backup;
mod control;
mod reconcile;
mod render;
mod replication;
mod security_group;
mod validation;

pub use actuator::{
    backup_name, host_selector, BackupActuatorServiceImpl, ClusterActuatorServiceImpl,
    RESTART_ANNOTATION,
};
pub use backup::BackupServiceImpl;
pub use control::ClusterControlServiceImpl;
pub use reconcile::ReconcileServiceImpl;
pub use render::DesiredStateRenderServiceImpl;
pub use replication::ReplicationServiceImpl;
pub use security_group::SecurityGroupServiceImpl;
