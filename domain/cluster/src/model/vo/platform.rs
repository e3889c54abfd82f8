//! Platform resources as the engine sees them.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PhaseClass;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
}

/// Live status of the platform's database cluster resource. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformClusterStatus {
    /// Absent until the platform operator reports its first phase.
    pub phase: Option<String>,
}

impl PlatformClusterStatus {
    pub fn class(&self) -> PhaseClass {
        match &self.phase {
            Some(phase) => PhaseClass::classify(phase),
            None => PhaseClass::Other,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.class().is_healthy()
    }

    pub fn is_restarting(&self) -> bool {
        self.class().is_restarting()
    }
}

/// The database cluster resource materialized by the release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseClusterResource {
    pub name: String,
    pub namespace: String,
    pub annotations: BTreeMap<String, String>,
    pub status: Option<PlatformClusterStatus>,
}

/// A compute instance hosting one database member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberHost {
    pub name: String,
    pub namespace: String,
}

/// The volume claim attached to a member host. Shares the host's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeClaim {
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupResource {
    pub name: String,
    pub namespace: String,
    pub method: String,
    /// Platform name of the backed up cluster.
    pub cluster_name: String,
    pub phase: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
