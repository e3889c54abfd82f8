use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domain_cluster::{
    exception::{ClusterException, ClusterResult, PlatformResult},
    model::{
        entity::Cluster,
        vo::{
            BackupResource, DatabaseClusterResource, HostResourceUsage, MemberHost,
            PlatformClusterStatus, ReleaseResource, VolumeClaim,
        },
    },
    repository::{NamespaceClient, ResourceClient, SecurityGroupRepo},
    service::{
        BackupActuatorService, ClusterActuatorService, DesiredStateRenderService,
        MetricsQueryService,
    },
};
use tracing::{info, warn};
use typed_builder::TypedBuilder;

/// Annotation whose change makes the platform operator restart a cluster.
pub const RESTART_ANNOTATION: &str = "kubectl.kubernetes.io/restartedAt";

/// Label selector of the member hosts of a database cluster.
pub fn host_selector(cluster_name: &str) -> String {
    format!("cnpg.io/cluster={cluster_name},cnpg.io/podRole=instance")
}

/// Deleting something that is already gone is fine.
fn ignore_absent(result: PlatformResult<()>) -> PlatformResult<()> {
    match result {
        Err(e) if e.is_absent() => Ok(()),
        other => other,
    }
}

#[derive(TypedBuilder)]
pub struct ClusterActuatorServiceImpl {
    namespace_client: Arc<dyn NamespaceClient>,
    release_client: Arc<dyn ResourceClient<ReleaseResource>>,
    database_cluster_client: Arc<dyn ResourceClient<DatabaseClusterResource>>,
    host_client: Arc<dyn ResourceClient<MemberHost>>,
    volume_claim_client: Arc<dyn ResourceClient<VolumeClaim>>,
    security_group_repo: Arc<dyn SecurityGroupRepo>,
    render_service: Arc<dyn DesiredStateRenderService>,
    metrics_service: Arc<dyn MetricsQueryService>,
}

impl ClusterActuatorServiceImpl {
    async fn render(&self, cluster: &Cluster) -> ClusterResult<ReleaseResource> {
        let security_group = match cluster.security_group_id {
            Some(id) => Some(self.security_group_repo.get_by_id(id).await?),
            None => None,
        };
        Ok(self.render_service.render(cluster, security_group.as_ref()))
    }

    async fn query_ratio(&self, host: &str, metric: &str, query: &str) -> Option<f64> {
        match self.metrics_service.query(query).await {
            Ok(value) => value,
            Err(e) => {
                warn!(host, metric, "Failed to query resource usage: {e:#}");
                None
            }
        }
    }
}

#[async_trait]
impl ClusterActuatorService for ClusterActuatorServiceImpl {
    async fn ensure_namespace(&self, name: &str) -> PlatformResult<()> {
        match self.namespace_client.get(name).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_absent() => {
                info!(namespace = name, "Creating namespace");
                match self.namespace_client.create(name).await {
                    Ok(_) => Ok(()),
                    Err(e) if e.is_already_exists() => Ok(()),
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn create_cluster(&self, cluster: &Cluster) -> ClusterResult<()> {
        self.ensure_namespace(&cluster.system_name).await?;
        let release = self.render(cluster).await?;
        self.release_client.create(&release).await?;
        info!(cluster = %cluster.system_name, "Release created");
        Ok(())
    }

    async fn update_cluster(&self, cluster: &Cluster) -> ClusterResult<()> {
        let mut release = self.render(cluster).await?;
        let current = self.release_client.get(&release.namespace, &release.name).await?;
        release.resource_version = current.resource_version;
        self.release_client.replace(&release).await?;
        info!(cluster = %cluster.system_name, "Release replaced");
        Ok(())
    }

    async fn delete_cluster(&self, cluster: &Cluster) -> ClusterResult<()> {
        ignore_absent(
            self.release_client
                .delete(&cluster.system_name, &cluster.system_name)
                .await,
        )?;
        info!(cluster = %cluster.system_name, "Release deleted");
        Ok(())
    }

    async fn restart_cluster(&self, cluster: &Cluster) -> ClusterResult<()> {
        let annotations = BTreeMap::from([(
            RESTART_ANNOTATION.to_owned(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        )]);
        self.database_cluster_client
            .patch_annotations(
                &cluster.system_name,
                cluster.cluster_name_in_platform(),
                &annotations,
            )
            .await?;
        info!(cluster = %cluster.system_name, "Restart triggered");
        Ok(())
    }

    async fn get_cluster_status(
        &self,
        cluster: &Cluster,
    ) -> ClusterResult<Option<PlatformClusterStatus>> {
        match self
            .database_cluster_client
            .get(&cluster.system_name, cluster.cluster_name_in_platform())
            .await
        {
            Ok(resource) => Ok(Some(resource.status.unwrap_or_default())),
            Err(e) if e.is_absent() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_cluster_hosts(&self, cluster: &Cluster) -> ClusterResult<Vec<String>> {
        let hosts = self
            .host_client
            .list(
                &cluster.system_name,
                &host_selector(cluster.cluster_name_in_platform()),
            )
            .await?;
        Ok(hosts.into_iter().map(|host| host.name).collect())
    }

    async fn recreate_storage(&self, cluster: &Cluster) -> ClusterResult<()> {
        let namespace = cluster.system_name.as_str();
        for host in self.get_cluster_hosts(cluster).await? {
            info!(cluster = namespace, %host, "Recreating storage");
            let (deleted_host, deleted_claim) = tokio::join!(
                self.host_client.delete(namespace, &host),
                self.volume_claim_client.delete(namespace, &host),
            );
            ignore_absent(deleted_host)
                .and(ignore_absent(deleted_claim))
                .map_err(|source| ClusterException::DestructiveOperation {
                    host: host.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    async fn get_resource_usage(&self, cluster: &Cluster) -> ClusterResult<Vec<HostResourceUsage>> {
        let namespace = cluster.system_name.as_str();
        let mut usage = vec![];
        for host in self.get_cluster_hosts(cluster).await? {
            let cpu_query = cpu_query(namespace, &host);
            let memory_query = memory_query(namespace, &host);
            let storage_query = storage_query(namespace, &host);
            let (cpu, memory, storage) = tokio::join!(
                self.query_ratio(&host, "cpu", &cpu_query),
                self.query_ratio(&host, "memory", &memory_query),
                self.query_ratio(&host, "storage", &storage_query),
            );
            usage.push(HostResourceUsage {
                host,
                cpu,
                memory,
                storage,
            });
        }
        Ok(usage)
    }
}

fn cpu_query(namespace: &str, host: &str) -> String {
    format!(
        r#"sum(rate(container_cpu_usage_seconds_total{{namespace="{namespace}",pod="{host}",container="postgres"}}[5m])) / sum(kube_pod_container_resource_requests{{namespace="{namespace}",pod="{host}",container="postgres",resource="cpu"}})"#
    )
}

fn memory_query(namespace: &str, host: &str) -> String {
    format!(
        r#"sum(container_memory_working_set_bytes{{namespace="{namespace}",pod="{host}",container="postgres"}}) / sum(kube_pod_container_resource_requests{{namespace="{namespace}",pod="{host}",container="postgres",resource="memory"}})"#
    )
}

fn storage_query(namespace: &str, host: &str) -> String {
    format!(
        r#"sum(kubelet_volume_stats_used_bytes{{namespace="{namespace}",persistentvolumeclaim="{host}"}}) / sum(kubelet_volume_stats_capacity_bytes{{namespace="{namespace}",persistentvolumeclaim="{host}"}})"#
    )
}

/// Name of an on-demand backup submitted at `at`.
pub fn backup_name(system_name: &str, at: DateTime<Utc>) -> String {
    format!("{system_name}-{}", at.timestamp())
}

#[derive(TypedBuilder)]
pub struct BackupActuatorServiceImpl {
    backup_client: Arc<dyn ResourceClient<BackupResource>>,
}

impl BackupActuatorServiceImpl {
    async fn create_backup_at(
        &self,
        cluster: &Cluster,
        method: &str,
        at: DateTime<Utc>,
    ) -> ClusterResult<BackupResource> {
        let backup = BackupResource {
            name: backup_name(&cluster.system_name, at),
            namespace: cluster.system_name.clone(),
            method: method.to_owned(),
            cluster_name: cluster.cluster_name_in_platform().to_owned(),
            phase: None,
            created_at: None,
        };
        let created = self.backup_client.create(&backup).await?;
        info!(cluster = %cluster.system_name, backup = %created.name, method, "Backup submitted");
        Ok(created)
    }
}

#[async_trait]
impl BackupActuatorService for BackupActuatorServiceImpl {
    async fn create_backup(&self, cluster: &Cluster, method: &str) -> ClusterResult<BackupResource> {
        self.create_backup_at(cluster, method, Utc::now()).await
    }

    async fn get_backups(&self, cluster: &Cluster) -> ClusterResult<Vec<BackupResource>> {
        Ok(self.backup_client.list(&cluster.system_name, "").await?)
    }

    async fn delete_backup(&self, cluster: &Cluster, name: &str) -> ClusterResult<()> {
        self.backup_client.delete(&cluster.system_name, name).await?;
        Ok(())
    }
}
