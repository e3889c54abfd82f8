//! 集群配置
use crate::prelude::*;
use sea_orm::{entity::prelude::*, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cluster_configuration")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub cluster_id: Uuid,
    /// GiB
    pub storage_size: i32,
    /// millicores
    pub cpu: i32,
    /// MiB
    pub memory: i32,
    pub major_version: i32,
    pub database_name: String,
    pub lc_collate: String,
    pub lc_ctype: String,
    pub instances: i32,
    pub owner_name: String,
    pub owner_password: String,
    /// `{ "name": "value" | null }`
    pub parameters: Json,
    pub pooler_mode: Option<String>,
    pub pooler_max_connections: Option<i32>,
    pub pooler_default_pool_size: Option<i32>,
    pub backup_schedule_cron_expression: Option<String>,
    pub backup_method: Option<String>,
    pub sync_replicas: Option<i32>,
    pub data_durability: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "ClusterEntity",
        from = "Column::ClusterId",
        to = "ClusterColumn::Id"
    )]
    Cluster,
}

impl Related<ClusterEntity> for Entity {
    fn to() -> RelationDef {
        Relation::Cluster.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_set(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            cluster_id: Set(self.cluster_id),
            storage_size: Set(self.storage_size),
            cpu: Set(self.cpu),
            memory: Set(self.memory),
            major_version: Set(self.major_version),
            database_name: Set(self.database_name),
            lc_collate: Set(self.lc_collate),
            lc_ctype: Set(self.lc_ctype),
            instances: Set(self.instances),
            owner_name: Set(self.owner_name),
            owner_password: Set(self.owner_password),
            parameters: Set(self.parameters),
            pooler_mode: Set(self.pooler_mode),
            pooler_max_connections: Set(self.pooler_max_connections),
            pooler_default_pool_size: Set(self.pooler_default_pool_size),
            backup_schedule_cron_expression: Set(self.backup_schedule_cron_expression),
            backup_method: Set(self.backup_method),
            sync_replicas: Set(self.sync_replicas),
            data_durability: Set(self.data_durability),
        }
    }
}
