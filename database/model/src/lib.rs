pub mod cluster;
pub mod cluster_configuration;
pub mod security_group;

pub mod prelude {
    pub use super::{
        cluster::{
            ActiveModel as ClusterActiveModel, Column as ClusterColumn, Entity as ClusterEntity,
            Model as ClusterModel, PrimaryKey as ClusterPrimaryKey, Relation as ClusterRelation,
        },
        cluster_configuration::{
            ActiveModel as ClusterConfigurationActiveModel,
            Column as ClusterConfigurationColumn, Entity as ClusterConfigurationEntity,
            Model as ClusterConfigurationModel, PrimaryKey as ClusterConfigurationPrimaryKey,
            Relation as ClusterConfigurationRelation,
        },
        security_group::{
            ActiveModel as SecurityGroupActiveModel, Column as SecurityGroupColumn,
            Entity as SecurityGroupEntity, Model as SecurityGroupModel,
            PrimaryKey as SecurityGroupPrimaryKey, Relation as SecurityGroupRelation,
        },
    };
}
