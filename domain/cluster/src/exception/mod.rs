use thiserror::Error;
use uuid::Uuid;

use crate::model::vo::{ClusterStatus, LifecycleEvent};

pub type ClusterResult<T> = Result<T, ClusterException>;
pub type PlatformResult<T> = Result<T, PlatformException>;

/// Failures reported by the orchestration platform.
#[derive(Error, Debug)]
pub enum PlatformException {
    /// The probed resource does not exist. Usually benign.
    #[error("{kind} {name} does not exist on the platform.")]
    ResourceAbsent { kind: String, name: String },

    #[error("{kind} {name} already exists on the platform.")]
    AlreadyExists { kind: String, name: String },

    #[error("Platform api error: {source}")]
    Api {
        #[source]
        source: anyhow::Error,
    },
}

impl PlatformException {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::ResourceAbsent { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

impl From<anyhow::Error> for PlatformException {
    fn from(e: anyhow::Error) -> Self {
        PlatformException::Api { source: e }
    }
}

#[derive(Error, Debug)]
pub enum ClusterException {
    #[error("There is no cluster with id: {id}.")]
    NoSuchCluster { id: Uuid },

    #[error("There is no security group with id: {id} in the workspace.")]
    NoSuchSecurityGroup { id: Uuid },

    #[error("There is no backup named {name} for cluster {system_name}.")]
    NoSuchBackup { system_name: String, name: String },

    #[error("Invalid request: {reason}")]
    Validation { reason: String },

    #[error("Storage size can not decrease from {current}Gi to {requested}Gi.")]
    StorageSizeDecrease { current: u32, requested: u32 },

    #[error("Cluster {system_name} is {status:?}, the operation needs it to be Running.")]
    NotRunning {
        system_name: String,
        status: ClusterStatus,
    },

    #[error("Cluster in status {from:?} can not handle event {event:?}.")]
    InvalidTransition {
        from: ClusterStatus,
        event: LifecycleEvent,
    },

    #[error("Recreating storage of host {host} failed: {source}")]
    DestructiveOperation {
        host: String,
        #[source]
        source: PlatformException,
    },

    #[error(transparent)]
    Platform(#[from] PlatformException),

    #[error("Cluster internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for ClusterException {
    fn from(e: anyhow::Error) -> Self {
        ClusterException::InternalError { source: e }
    }
}
