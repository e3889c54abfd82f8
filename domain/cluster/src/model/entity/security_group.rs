use anyhow::Context;
use architecture::AggregateRoot;
use database_model::security_group;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named allow-list of IP ranges, scoped to a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub id: Uuid,
    pub name: String,
    pub allowed_ips: Vec<String>,
    pub workspace_id: Uuid,
}

impl AggregateRoot for SecurityGroup {}

impl TryFrom<security_group::Model> for SecurityGroup {
    type Error = anyhow::Error;

    fn try_from(model: security_group::Model) -> Result<Self, Self::Error> {
        let security_group::Model {
            id,
            name,
            allowed_ips,
            workspace_id,
        } = model;

        Ok(Self {
            id,
            name,
            allowed_ips: serde_json::from_value(allowed_ips)
                .with_context(|| format!("malformed allowed ips of security group {id}"))?,
            workspace_id,
        })
    }
}

impl TryFrom<&SecurityGroup> for security_group::Model {
    type Error = anyhow::Error;

    fn try_from(group: &SecurityGroup) -> Result<Self, Self::Error> {
        Ok(Self {
            id: group.id,
            name: group.name.clone(),
            allowed_ips: serde_json::to_value(&group.allowed_ips)?,
            workspace_id: group.workspace_id,
        })
    }
}
