use crate::model::{
    entity::{Cluster, SecurityGroup},
    vo::ReleaseResource,
};

/// Maps a cluster's durable record to the release the platform consumes.
///
/// Implementations are pure: the same input always renders the same release.
pub trait DesiredStateRenderService: Send + Sync {
    /// `security_group` is the group attached to the cluster, if any.
    fn render(&self, cluster: &Cluster, security_group: Option<&SecurityGroup>) -> ReleaseResource;
}
