use architecture::{DBRepository, MutableRepository, ReadOnlyRepository};
use database_model::prelude::*;
use domain_cluster::{model::entity::SecurityGroup, repository::SecurityGroupRepo};
use sea_orm::{prelude::*, QueryTrait};

use crate::infrastructure::database::OrmRepo;

#[async_trait::async_trait]
impl ReadOnlyRepository<SecurityGroup> for OrmRepo {
    async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<SecurityGroup> {
        SecurityGroupEntity::find_by_id(uuid)
            .one(self.db.get_connection())
            .await?
            .ok_or(anyhow::anyhow!("There is no such security group with id: {uuid}"))?
            .try_into()
    }

    async fn get_all(&self) -> anyhow::Result<Vec<SecurityGroup>> {
        SecurityGroupEntity::find()
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(SecurityGroup::try_from)
            .collect()
    }
}

#[async_trait::async_trait]
impl MutableRepository<SecurityGroup> for OrmRepo {
    async fn update(&self, entity: &SecurityGroup) -> anyhow::Result<()> {
        let backend = self.db.get_connection().get_database_backend();
        let model = SecurityGroupModel::try_from(entity)?.into_set();
        self.push([SecurityGroupEntity::update(model).build(backend)]).await;
        Ok(())
    }

    async fn insert(&self, entity: &SecurityGroup) -> anyhow::Result<Uuid> {
        let backend = self.db.get_connection().get_database_backend();
        let model = SecurityGroupModel::try_from(entity)?.into_set();
        self.push([SecurityGroupEntity::insert(model).build(backend)]).await;
        Ok(entity.id)
    }

    async fn delete_by_id(&self, uuid: Uuid) -> anyhow::Result<()> {
        let backend = self.db.get_connection().get_database_backend();
        self.push([SecurityGroupEntity::delete_by_id(uuid).build(backend)])
            .await;
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        self.save_changed().await
    }
}

impl DBRepository<SecurityGroup> for OrmRepo {}

#[async_trait::async_trait]
impl SecurityGroupRepo for OrmRepo {
    async fn get_all_by_workspace(&self, workspace_id: Uuid) -> anyhow::Result<Vec<SecurityGroup>> {
        SecurityGroupEntity::find()
            .filter(SecurityGroupColumn::WorkspaceId.eq(workspace_id))
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(SecurityGroup::try_from)
            .collect()
    }
}
