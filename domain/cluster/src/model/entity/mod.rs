pub mod cluster;
pub mod cluster_configuration;
pub mod security_group;

#[rustfmt::skip]
pub use {
    cluster::Cluster,
    cluster_configuration::ClusterConfiguration,
    security_group::SecurityGroup,
};
