use std::sync::Arc;

use async_trait::async_trait;
use domain_cluster::{
    command::CreateOrUpdateSecurityGroupCommand,
    exception::{ClusterException, ClusterResult},
    model::entity::SecurityGroup,
    repository::{ClusterRepo, SecurityGroupRepo},
    service::SecurityGroupService,
};
use tracing::info;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::control::workspace_security_group;

#[derive(TypedBuilder)]
pub struct SecurityGroupServiceImpl {
    security_group_repo: Arc<dyn SecurityGroupRepo>,
    cluster_repo: Arc<dyn ClusterRepo>,
}

#[async_trait]
impl SecurityGroupService for SecurityGroupServiceImpl {
    async fn create_or_update(
        &self,
        workspace_id: Uuid,
        command: CreateOrUpdateSecurityGroupCommand,
    ) -> ClusterResult<SecurityGroup> {
        if command.name.trim().is_empty() {
            return Err(ClusterException::Validation {
                reason: "Name is required.".to_owned(),
            });
        }

        let existing = match command.id {
            Some(id) => {
                match workspace_security_group(
                    self.security_group_repo.as_ref(),
                    workspace_id,
                    id,
                )
                .await
                {
                    Ok(group) => Some(group),
                    Err(ClusterException::NoSuchSecurityGroup { .. }) => None,
                    Err(e) => return Err(e),
                }
            }
            None => None,
        };

        let group = match existing {
            Some(mut group) => {
                group.name = command.name;
                group.allowed_ips = command.allowed_ips;
                self.security_group_repo.update(&group).await?;
                group
            }
            None => {
                let group = SecurityGroup {
                    id: Uuid::new_v4(),
                    name: command.name,
                    allowed_ips: command.allowed_ips,
                    workspace_id,
                };
                self.security_group_repo.insert(&group).await?;
                group
            }
        };
        self.security_group_repo.save_changed().await?;
        info!(security_group = %group.id, name = %group.name, "Security group saved");
        Ok(group)
    }

    async fn list(&self, workspace_id: Uuid) -> ClusterResult<Vec<SecurityGroup>> {
        Ok(self
            .security_group_repo
            .get_all_by_workspace(workspace_id)
            .await?)
    }

    async fn delete(&self, workspace_id: Uuid, id: Uuid) -> ClusterResult<()> {
        let group =
            workspace_security_group(self.security_group_repo.as_ref(), workspace_id, id).await?;
        let attached = self
            .cluster_repo
            .get_all_by_workspace(workspace_id)
            .await?
            .into_iter()
            .filter(|cluster| !cluster.status().is_terminal())
            .filter(|cluster| cluster.security_group_id == Some(group.id))
            .map(|cluster| cluster.system_name)
            .collect::<Vec<_>>();
        if !attached.is_empty() {
            return Err(ClusterException::Validation {
                reason: format!(
                    "Security group {} is still attached to {}.",
                    group.name,
                    attached.join(", ")
                ),
            });
        }

        self.security_group_repo.delete_by_id(group.id).await?;
        self.security_group_repo.save_changed().await?;
        info!(security_group = %group.id, "Security group deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use domain_cluster::{
        mock::{MockClusterRepo, MockSecurityGroupRepo},
        model::{entity::Cluster, vo::ClusterStatus},
    };

    use super::*;
    use crate::render::tests::configuration;

    fn group(workspace_id: Uuid) -> SecurityGroup {
        SecurityGroup {
            id: Uuid::new_v4(),
            name: "office".to_owned(),
            allowed_ips: vec!["10.0.0.0/8".to_owned()],
            workspace_id,
        }
    }

    fn service(
        security_group_repo: MockSecurityGroupRepo,
        cluster_repo: MockClusterRepo,
    ) -> SecurityGroupServiceImpl {
        SecurityGroupServiceImpl::builder()
            .security_group_repo(Arc::new(security_group_repo))
            .cluster_repo(Arc::new(cluster_repo))
            .build()
    }

    #[tokio::test]
    async fn unknown_id_creates_a_group() {
        let workspace_id = Uuid::new_v4();
        let mut repo = MockSecurityGroupRepo::new();
        repo.expect_get_by_id()
            .returning(|id| Err(anyhow::anyhow!("there is no such security group with key {id}")));
        repo.expect_insert()
            .withf(move |group| group.workspace_id == workspace_id && group.name == "vpn")
            .times(1)
            .returning(|group| Ok(group.id));
        repo.expect_update().never();
        repo.expect_save_changed().times(1).returning(|| Ok(true));

        let group = service(repo, MockClusterRepo::new())
            .create_or_update(
                workspace_id,
                CreateOrUpdateSecurityGroupCommand {
                    id: Some(Uuid::new_v4()),
                    name: "vpn".to_owned(),
                    allowed_ips: vec!["192.168.0.0/16".to_owned()],
                },
            )
            .await
            .unwrap();
        assert_eq!(group.allowed_ips, vec!["192.168.0.0/16".to_owned()]);
    }

    #[tokio::test]
    async fn existing_group_is_updated() {
        let workspace_id = Uuid::new_v4();
        let existing = group(workspace_id);
        let id = existing.id;
        let mut repo = MockSecurityGroupRepo::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(existing.clone()));
        repo.expect_update()
            .withf(move |group| group.id == id && group.name == "office-2")
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_insert().never();
        repo.expect_save_changed().times(1).returning(|| Ok(true));

        service(repo, MockClusterRepo::new())
            .create_or_update(
                workspace_id,
                CreateOrUpdateSecurityGroupCommand {
                    id: Some(id),
                    name: "office-2".to_owned(),
                    allowed_ips: vec![],
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn attached_group_is_not_deleted() {
        let workspace_id = Uuid::new_v4();
        let existing = group(workspace_id);
        let id = existing.id;
        let mut repo = MockSecurityGroupRepo::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(existing.clone()));
        repo.expect_delete_by_id().never();
        let mut cluster_repo = MockClusterRepo::new();
        cluster_repo.expect_get_all_by_workspace().returning(move |workspace_id| {
            Ok(vec![
                Cluster::new(workspace_id, "shop-db".to_owned(), Some(id), configuration())
                    .with_status(ClusterStatus::Running),
                Cluster::new(workspace_id, "old-db".to_owned(), Some(id), configuration())
                    .with_status(ClusterStatus::Deleted),
            ])
        });

        let err = service(repo, cluster_repo)
            .delete(workspace_id, id)
            .await
            .unwrap_err();
        let ClusterException::Validation { reason } = err else {
            panic!("group should stay");
        };
        assert_eq!(reason, "Security group office is still attached to shop-db.");
    }

    #[tokio::test]
    async fn detached_group_is_deleted() {
        let workspace_id = Uuid::new_v4();
        let existing = group(workspace_id);
        let id = existing.id;
        let mut repo = MockSecurityGroupRepo::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(existing.clone()));
        repo.expect_delete_by_id()
            .withf(move |deleted| *deleted == id)
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_save_changed().times(1).returning(|| Ok(true));
        let mut cluster_repo = MockClusterRepo::new();
        cluster_repo
            .expect_get_all_by_workspace()
            .returning(|_| Ok(vec![]));

        service(repo, cluster_repo).delete(workspace_id, id).await.unwrap();
    }
}
