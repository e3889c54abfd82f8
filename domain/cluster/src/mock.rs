use std::collections::BTreeMap;

use architecture::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use crate::{
    exception::{ClusterResult, PlatformResult},
    model::{
        entity::{Cluster, SecurityGroup},
        vo::{
            BackupResource, ClusterStatus, DatabaseClusterResource, HostResourceUsage,
            MemberHost, Namespace, PlatformClusterStatus, ReleaseResource, TickReport, VolumeClaim,
        },
    },
    repository::{ClusterRepo, NamespaceClient, ResourceClient, SecurityGroupRepo},
    service::{
        BackupActuatorService, ClusterActuatorService, MetricsQueryService, ReconcileService,
    },
};

mock! {
    pub ClusterRepo {}
    #[async_trait]
    impl ClusterRepo for ClusterRepo {
        async fn get_by_statuses(&self, statuses: &[ClusterStatus]) -> anyhow::Result<Vec<Cluster>>;
        async fn get_by_system_name(&self, system_name: &str) -> anyhow::Result<Option<Cluster>>;
        async fn get_all_by_workspace(&self, workspace_id: Uuid) -> anyhow::Result<Vec<Cluster>>;
        async fn transition_status(
            &self,
            id: Uuid,
            from: ClusterStatus,
            to: ClusterStatus,
        ) -> anyhow::Result<bool>;
    }
    impl DBRepository<Cluster> for ClusterRepo {}
    #[async_trait]
    impl ReadOnlyRepository<Cluster> for ClusterRepo {
        async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<Cluster>;
        async fn get_all(&self) -> anyhow::Result<Vec<Cluster>>;
    }
    #[async_trait]
    impl MutableRepository<Cluster> for ClusterRepo {
        async fn update(&self, entity: &Cluster) -> anyhow::Result<()>;
        async fn insert(&self, entity: &Cluster) -> anyhow::Result<Uuid>;
        async fn delete_by_id(&self, uuid: Uuid) -> anyhow::Result<()>;
        async fn save_changed(&self) -> anyhow::Result<bool>;
    }
}

mock! {
    pub SecurityGroupRepo {}
    #[async_trait]
    impl SecurityGroupRepo for SecurityGroupRepo {
        async fn get_all_by_workspace(&self, workspace_id: Uuid) -> anyhow::Result<Vec<SecurityGroup>>;
    }
    impl DBRepository<SecurityGroup> for SecurityGroupRepo {}
    #[async_trait]
    impl ReadOnlyRepository<SecurityGroup> for SecurityGroupRepo {
        async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<SecurityGroup>;
        async fn get_all(&self) -> anyhow::Result<Vec<SecurityGroup>>;
    }
    #[async_trait]
    impl MutableRepository<SecurityGroup> for SecurityGroupRepo {
        async fn update(&self, entity: &SecurityGroup) -> anyhow::Result<()>;
        async fn insert(&self, entity: &SecurityGroup) -> anyhow::Result<Uuid>;
        async fn delete_by_id(&self, uuid: Uuid) -> anyhow::Result<()>;
        async fn save_changed(&self) -> anyhow::Result<bool>;
    }
}

mock! {
    pub NamespaceClient {}
    #[async_trait]
    impl NamespaceClient for NamespaceClient {
        async fn get(&self, name: &str) -> PlatformResult<Namespace>;
        async fn create(&self, name: &str) -> PlatformResult<Namespace>;
    }
}

mock! {
    pub ReleaseClient {}
    #[async_trait]
    impl ResourceClient<ReleaseResource> for ReleaseClient {
        async fn get(&self, namespace: &str, name: &str) -> PlatformResult<ReleaseResource>;
        async fn list(&self, namespace: &str, label_selector: &str) -> PlatformResult<Vec<ReleaseResource>>;
        async fn create(&self, resource: &ReleaseResource) -> PlatformResult<ReleaseResource>;
        async fn replace(&self, resource: &ReleaseResource) -> PlatformResult<ReleaseResource>;
        async fn delete(&self, namespace: &str, name: &str) -> PlatformResult<()>;
        async fn patch_annotations(
            &self,
            namespace: &str,
            name: &str,
            annotations: &BTreeMap<String, String>,
        ) -> PlatformResult<()>;
    }
}

mock! {
    pub DatabaseClusterClient {}
    #[async_trait]
    impl ResourceClient<DatabaseClusterResource> for DatabaseClusterClient {
        async fn get(&self, namespace: &str, name: &str) -> PlatformResult<DatabaseClusterResource>;
        async fn list(&self, namespace: &str, label_selector: &str) -> PlatformResult<Vec<DatabaseClusterResource>>;
        async fn create(&self, resource: &DatabaseClusterResource) -> PlatformResult<DatabaseClusterResource>;
        async fn replace(&self, resource: &DatabaseClusterResource) -> PlatformResult<DatabaseClusterResource>;
        async fn delete(&self, namespace: &str, name: &str) -> PlatformResult<()>;
        async fn patch_annotations(
            &self,
            namespace: &str,
            name: &str,
            annotations: &BTreeMap<String, String>,
        ) -> PlatformResult<()>;
    }
}

mock! {
    pub MemberHostClient {}
    #[async_trait]
    impl ResourceClient<MemberHost> for MemberHostClient {
        async fn get(&self, namespace: &str, name: &str) -> PlatformResult<MemberHost>;
        async fn list(&self, namespace: &str, label_selector: &str) -> PlatformResult<Vec<MemberHost>>;
        async fn create(&self, resource: &MemberHost) -> PlatformResult<MemberHost>;
        async fn replace(&self, resource: &MemberHost) -> PlatformResult<MemberHost>;
        async fn delete(&self, namespace: &str, name: &str) -> PlatformResult<()>;
        async fn patch_annotations(
            &self,
            namespace: &str,
            name: &str,
            annotations: &BTreeMap<String, String>,
        ) -> PlatformResult<()>;
    }
}

mock! {
    pub VolumeClaimClient {}
    #[async_trait]
    impl ResourceClient<VolumeClaim> for VolumeClaimClient {
        async fn get(&self, namespace: &str, name: &str) -> PlatformResult<VolumeClaim>;
        async fn list(&self, namespace: &str, label_selector: &str) -> PlatformResult<Vec<VolumeClaim>>;
        async fn create(&self, resource: &VolumeClaim) -> PlatformResult<VolumeClaim>;
        async fn replace(&self, resource: &VolumeClaim) -> PlatformResult<VolumeClaim>;
        async fn delete(&self, namespace: &str, name: &str) -> PlatformResult<()>;
        async fn patch_annotations(
            &self,
            namespace: &str,
            name: &str,
            annotations: &BTreeMap<String, String>,
        ) -> PlatformResult<()>;
    }
}

mock! {
    pub BackupClient {}
    #[async_trait]
    impl ResourceClient<BackupResource> for BackupClient {
        async fn get(&self, namespace: &str, name: &str) -> PlatformResult<BackupResource>;
        async fn list(&self, namespace: &str, label_selector: &str) -> PlatformResult<Vec<BackupResource>>;
        async fn create(&self, resource: &BackupResource) -> PlatformResult<BackupResource>;
        async fn replace(&self, resource: &BackupResource) -> PlatformResult<BackupResource>;
        async fn delete(&self, namespace: &str, name: &str) -> PlatformResult<()>;
        async fn patch_annotations(
            &self,
            namespace: &str,
            name: &str,
            annotations: &BTreeMap<String, String>,
        ) -> PlatformResult<()>;
    }
}

mock! {
    pub ClusterActuatorService {}
    #[async_trait]
    impl ClusterActuatorService for ClusterActuatorService {
        async fn ensure_namespace(&self, name: &str) -> PlatformResult<()>;
        async fn create_cluster(&self, cluster: &Cluster) -> ClusterResult<()>;
        async fn update_cluster(&self, cluster: &Cluster) -> ClusterResult<()>;
        async fn delete_cluster(&self, cluster: &Cluster) -> ClusterResult<()>;
        async fn restart_cluster(&self, cluster: &Cluster) -> ClusterResult<()>;
        async fn get_cluster_status(
            &self,
            cluster: &Cluster,
        ) -> ClusterResult<Option<PlatformClusterStatus>>;
        async fn get_cluster_hosts(&self, cluster: &Cluster) -> ClusterResult<Vec<String>>;
        async fn recreate_storage(&self, cluster: &Cluster) -> ClusterResult<()>;
        async fn get_resource_usage(&self, cluster: &Cluster) -> ClusterResult<Vec<HostResourceUsage>>;
    }
}

mock! {
    pub BackupActuatorService {}
    #[async_trait]
    impl BackupActuatorService for BackupActuatorService {
        async fn create_backup(&self, cluster: &Cluster, method: &str) -> ClusterResult<BackupResource>;
        async fn get_backups(&self, cluster: &Cluster) -> ClusterResult<Vec<BackupResource>>;
        async fn delete_backup(&self, cluster: &Cluster, name: &str) -> ClusterResult<()>;
    }
}

mock! {
    pub MetricsQueryService {}
    #[async_trait]
    impl MetricsQueryService for MetricsQueryService {
        async fn query(&self, query: &str) -> anyhow::Result<Option<f64>>;
    }
}

mock! {
    pub ReconcileService {}
    #[async_trait]
    impl ReconcileService for ReconcileService {
        async fn synchronize(&self) -> TickReport;
        async fn recreate_storage(&self) -> TickReport;
    }
}
