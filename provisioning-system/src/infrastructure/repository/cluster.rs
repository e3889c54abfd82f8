use architecture::{DBRepository, MutableRepository, ReadOnlyRepository};
use database_model::prelude::*;
use domain_cluster::{
    model::{entity::Cluster, vo::ClusterStatus},
    repository::ClusterRepo,
};
use num_traits::ToPrimitive;
use sea_orm::{prelude::*, sea_query::Expr, QueryTrait};

use crate::infrastructure::database::OrmRepo;

type ClusterRow = (ClusterModel, Option<ClusterConfigurationModel>);

fn into_cluster((cluster, configuration): ClusterRow) -> anyhow::Result<Cluster> {
    let configuration = configuration.ok_or(anyhow::anyhow!(
        "Cluster {} has no configuration",
        cluster.system_name
    ))?;
    (cluster, configuration).try_into()
}

fn into_clusters(rows: Vec<ClusterRow>) -> anyhow::Result<Vec<Cluster>> {
    rows.into_iter().map(into_cluster).collect()
}

fn status_value(status: ClusterStatus) -> anyhow::Result<i32> {
    status
        .to_i32()
        .ok_or(anyhow::anyhow!("unrepresentable status {status:?}"))
}

#[async_trait::async_trait]
impl ReadOnlyRepository<Cluster> for OrmRepo {
    async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<Cluster> {
        let row = ClusterEntity::find_by_id(uuid)
            .find_also_related(ClusterConfigurationEntity)
            .one(self.db.get_connection())
            .await?
            .ok_or(anyhow::anyhow!("There is no such cluster with id: {uuid}"))?;
        into_cluster(row)
    }

    async fn get_all(&self) -> anyhow::Result<Vec<Cluster>> {
        let rows = ClusterEntity::find()
            .find_also_related(ClusterConfigurationEntity)
            .all(self.db.get_connection())
            .await?;
        into_clusters(rows)
    }
}

#[async_trait::async_trait]
impl MutableRepository<Cluster> for OrmRepo {
    async fn update(&self, entity: &Cluster) -> anyhow::Result<()> {
        let backend = self.db.get_connection().get_database_backend();
        let cluster = ClusterModel::try_from(entity)?.into_set();
        let configuration = ClusterConfigurationModel::try_from(entity)?.into_set();
        self.push([
            ClusterEntity::update(cluster).build(backend),
            ClusterConfigurationEntity::update(configuration).build(backend),
        ])
        .await;
        Ok(())
    }

    async fn insert(&self, entity: &Cluster) -> anyhow::Result<Uuid> {
        let backend = self.db.get_connection().get_database_backend();
        let cluster = ClusterModel::try_from(entity)?.into_set();
        let configuration = ClusterConfigurationModel::try_from(entity)?.into_set();
        self.push([
            ClusterEntity::insert(cluster).build(backend),
            ClusterConfigurationEntity::insert(configuration).build(backend),
        ])
        .await;
        Ok(entity.id)
    }

    async fn delete_by_id(&self, uuid: Uuid) -> anyhow::Result<()> {
        let backend = self.db.get_connection().get_database_backend();
        self.push([
            ClusterConfigurationEntity::delete_many()
                .filter(ClusterConfigurationColumn::ClusterId.eq(uuid))
                .build(backend),
            ClusterEntity::delete_by_id(uuid).build(backend),
        ])
        .await;
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        self.save_changed().await
    }
}

impl DBRepository<Cluster> for OrmRepo {}

#[async_trait::async_trait]
impl ClusterRepo for OrmRepo {
    async fn get_by_statuses(&self, statuses: &[ClusterStatus]) -> anyhow::Result<Vec<Cluster>> {
        let statuses = statuses
            .iter()
            .map(|status| status_value(*status))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let rows = ClusterEntity::find()
            .filter(ClusterColumn::Status.is_in(statuses))
            .find_also_related(ClusterConfigurationEntity)
            .all(self.db.get_connection())
            .await?;
        into_clusters(rows)
    }

    async fn get_by_system_name(&self, system_name: &str) -> anyhow::Result<Option<Cluster>> {
        ClusterEntity::find()
            .filter(ClusterColumn::SystemName.eq(system_name))
            .find_also_related(ClusterConfigurationEntity)
            .one(self.db.get_connection())
            .await?
            .map(into_cluster)
            .transpose()
    }

    async fn get_all_by_workspace(&self, workspace_id: Uuid) -> anyhow::Result<Vec<Cluster>> {
        let rows = ClusterEntity::find()
            .filter(ClusterColumn::WorkspaceId.eq(workspace_id))
            .find_also_related(ClusterConfigurationEntity)
            .all(self.db.get_connection())
            .await?;
        into_clusters(rows)
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: ClusterStatus,
        to: ClusterStatus,
    ) -> anyhow::Result<bool> {
        let result = ClusterEntity::update_many()
            .col_expr(ClusterColumn::Status, Expr::value(status_value(to)?))
            .filter(ClusterColumn::Id.eq(id))
            .filter(ClusterColumn::Status.eq(status_value(from)?))
            .exec(self.db.get_connection())
            .await?;
        Ok(result.rows_affected > 0)
    }
}
