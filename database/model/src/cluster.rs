//! 集群
use crate::prelude::*;
use sea_orm::{entity::prelude::*, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cluster")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// DNS-safe name, also the platform namespace.
    #[sea_orm(unique)]
    pub system_name: String,
    pub status: i32,
    pub workspace_id: Uuid,
    pub security_group_id: Option<Uuid>,
    pub cluster_name_in_platform: String,
    pub recovery_from_backup: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "ClusterConfigurationEntity")]
    ClusterConfiguration,
    #[sea_orm(
        belongs_to = "SecurityGroupEntity",
        from = "Column::SecurityGroupId",
        to = "SecurityGroupColumn::Id",
        on_delete = "SetNull"
    )]
    SecurityGroup,
}

impl Related<ClusterConfigurationEntity> for Entity {
    fn to() -> RelationDef {
        Relation::ClusterConfiguration.def()
    }
}

impl Related<SecurityGroupEntity> for Entity {
    fn to() -> RelationDef {
        Relation::SecurityGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_set(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            system_name: Set(self.system_name),
            status: Set(self.status),
            workspace_id: Set(self.workspace_id),
            security_group_id: Set(self.security_group_id),
            cluster_name_in_platform: Set(self.cluster_name_in_platform),
            recovery_from_backup: Set(self.recovery_from_backup),
        }
    }
}
