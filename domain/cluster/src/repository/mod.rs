mod cluster;
mod platform;
mod security_group;

#[rustfmt::skip]
pub use {
    cluster::ClusterRepo,
    platform::{NamespaceClient, ResourceClient},
    security_group::SecurityGroupRepo,
};
