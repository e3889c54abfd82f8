use architecture::DBRepository;
use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::SecurityGroup;

#[async_trait]
pub trait SecurityGroupRepo: DBRepository<SecurityGroup> + Send + Sync {
    async fn get_all_by_workspace(&self, workspace_id: Uuid) -> anyhow::Result<Vec<SecurityGroup>>;
}
