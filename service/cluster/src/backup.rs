use std::sync::Arc;

use async_trait::async_trait;
use domain_cluster::{
    exception::{ClusterException, ClusterResult},
    model::vo::BackupResource,
    repository::ClusterRepo,
    service::{BackupActuatorService, BackupService, ClusterActuatorService},
};
use tracing::info;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::control::{apply_update, ensure_running, workspace_cluster};

fn required(field: &str, value: &str) -> ClusterResult<()> {
    if value.trim().is_empty() {
        return Err(ClusterException::Validation {
            reason: format!("{field} is required."),
        });
    }
    Ok(())
}

#[derive(TypedBuilder)]
pub struct BackupServiceImpl {
    cluster_repo: Arc<dyn ClusterRepo>,
    actuator: Arc<dyn ClusterActuatorService>,
    backup_actuator: Arc<dyn BackupActuatorService>,
}

#[async_trait]
impl BackupService for BackupServiceImpl {
    async fn create(
        &self,
        workspace_id: Uuid,
        cluster_id: Uuid,
        method: &str,
    ) -> ClusterResult<BackupResource> {
        required("Method", method)?;
        let cluster =
            workspace_cluster(self.cluster_repo.as_ref(), workspace_id, cluster_id).await?;
        self.backup_actuator.create_backup(&cluster, method).await
    }

    async fn list(
        &self,
        workspace_id: Uuid,
        cluster_id: Uuid,
    ) -> ClusterResult<Vec<BackupResource>> {
        let cluster =
            workspace_cluster(self.cluster_repo.as_ref(), workspace_id, cluster_id).await?;
        self.backup_actuator.get_backups(&cluster).await
    }

    async fn delete(&self, workspace_id: Uuid, cluster_id: Uuid, name: &str) -> ClusterResult<()> {
        let cluster =
            workspace_cluster(self.cluster_repo.as_ref(), workspace_id, cluster_id).await?;
        self.backup_actuator.delete_backup(&cluster, name).await
    }

    async fn schedule(
        &self,
        workspace_id: Uuid,
        cluster_id: Uuid,
        cron_expression: &str,
        method: &str,
    ) -> ClusterResult<()> {
        required("CronExpression", cron_expression)?;
        required("Method", method)?;
        let mut cluster =
            workspace_cluster(self.cluster_repo.as_ref(), workspace_id, cluster_id).await?;
        ensure_running(&cluster)?;

        cluster.configuration.backup_schedule_cron_expression = Some(cron_expression.to_owned());
        cluster.configuration.backup_method = Some(method.to_owned());
        apply_update(self.cluster_repo.as_ref(), self.actuator.as_ref(), &cluster).await?;
        info!(cluster = %cluster.system_name, cron_expression, method, "Backups scheduled");
        Ok(())
    }

    async fn recover(
        &self,
        workspace_id: Uuid,
        cluster_id: Uuid,
        backup_name: &str,
    ) -> ClusterResult<()> {
        let mut cluster =
            workspace_cluster(self.cluster_repo.as_ref(), workspace_id, cluster_id).await?;
        ensure_running(&cluster)?;
        let backups = self.backup_actuator.get_backups(&cluster).await?;
        if !backups.iter().any(|backup| backup.name == backup_name) {
            return Err(ClusterException::NoSuchBackup {
                system_name: cluster.system_name.clone(),
                name: backup_name.to_owned(),
            });
        }

        cluster.recover_from(backup_name);
        apply_update(self.cluster_repo.as_ref(), self.actuator.as_ref(), &cluster).await?;
        info!(cluster = %cluster.system_name, backup = backup_name, "Recovering from backup");
        Ok(())
    }
}
