use domain_cluster::{
    model::{
        entity::{Cluster, SecurityGroup},
        vo::{
            BackupValues, ChartReference, PoolerValues, RecoveryValues, ReleaseResource,
            ReleaseSpec, ReleaseValues, SecurityValues,
        },
    },
    service::DesiredStateRenderService,
};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct DesiredStateRenderServiceImpl {
    chart: ChartReference,
    #[builder(default = "10m".to_owned())]
    interval: String,
}

impl DesiredStateRenderService for DesiredStateRenderServiceImpl {
    fn render(&self, cluster: &Cluster, security_group: Option<&SecurityGroup>) -> ReleaseResource {
        let configuration = &cluster.configuration;
        let recovery_from_backup = cluster.recovery_from_backup();

        let values = ReleaseValues {
            name: cluster.cluster_name_in_platform().to_owned(),
            major_version: configuration.major_version,
            instances: configuration.instances,
            storage_size: format!("{}Gi", configuration.storage_size),
            memory: format!("{}Mi", configuration.memory),
            cpu: format!("{}m", configuration.cpu),
            database_name: configuration.database_name.clone(),
            lc_collate: configuration.lc_collate.clone(),
            lc_ctype: configuration.lc_ctype.clone(),
            owner_name: configuration.owner_name.clone(),
            owner_password: configuration.owner_password.clone(),
            parameters: configuration.parameters.clone(),
            pooler: PoolerValues {
                enabled: configuration.pooler_mode.is_some(),
                mode: configuration.pooler_mode.map(|mode| mode.to_string()),
                max_client_connections: configuration.pooler_max_connections,
                default_pool_size: configuration.pooler_default_pool_size,
            },
            security: SecurityValues {
                enabled: security_group.is_some(),
                allowed_ips: security_group
                    .map(|group| group.allowed_ips.clone())
                    .unwrap_or_default(),
            },
            backups: BackupValues {
                enabled: configuration.backup_schedule_cron_expression.is_some(),
                schedule: configuration.backup_schedule_cron_expression.clone(),
                method: configuration.backup_method.clone(),
            },
            recovery: RecoveryValues {
                enabled: recovery_from_backup,
                backup_name: recovery_from_backup
                    .then(|| cluster.cluster_name_in_platform().to_owned()),
            },
            sync_replicas: configuration.sync_replicas,
            data_durability: configuration.data_durability,
        };

        ReleaseResource {
            name: cluster.system_name.clone(),
            namespace: cluster.system_name.clone(),
            resource_version: None,
            spec: ReleaseSpec {
                chart: self.chart.clone(),
                interval: self.interval.clone(),
                values,
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;

    use domain_cluster::model::{
        entity::ClusterConfiguration,
        vo::{DataDurability, PoolerMode},
    };
    use uuid::Uuid;

    use super::*;

    pub(crate) fn chart() -> ChartReference {
        ChartReference {
            name: "pg-cluster".to_owned(),
            version: "1.x.x".to_owned(),
            source_kind: "HelmRepository".to_owned(),
            source_name: "pgaas".to_owned(),
            source_namespace: "default".to_owned(),
        }
    }

    pub(crate) fn configuration() -> ClusterConfiguration {
        ClusterConfiguration {
            id: Uuid::new_v4(),
            storage_size: 2,
            cpu: 250,
            memory: 512,
            major_version: 16,
            database_name: "shop".to_owned(),
            lc_collate: "C".to_owned(),
            lc_ctype: "C".to_owned(),
            instances: 2,
            owner_name: "shop".to_owned(),
            owner_password: "hunter2".to_owned(),
            parameters: BTreeMap::from([
                ("work_mem".to_owned(), Some("8MB".to_owned())),
                ("max_connections".to_owned(), Some("150".to_owned())),
                ("jit".to_owned(), None),
            ]),
            pooler_mode: None,
            pooler_max_connections: None,
            pooler_default_pool_size: None,
            backup_schedule_cron_expression: None,
            backup_method: None,
            sync_replicas: Some(1),
            data_durability: DataDurability::Required,
        }
    }

    fn renderer() -> DesiredStateRenderServiceImpl {
        DesiredStateRenderServiceImpl::builder().chart(chart()).build()
    }

    #[test]
    fn render_maps_configuration() {
        let cluster = Cluster::new(Uuid::new_v4(), "shop-db".to_owned(), None, configuration());
        let release = renderer().render(&cluster, None);

        assert_eq!(release.name, "shop-db");
        assert_eq!(release.namespace, "shop-db");
        assert_eq!(release.resource_version, None);
        assert_eq!(release.spec.interval, "10m");
        assert_eq!(release.spec.chart, chart());

        let values = &release.spec.values;
        assert_eq!(values.name, "shop-db");
        assert_eq!(values.storage_size, "2Gi");
        assert_eq!(values.memory, "512Mi");
        assert_eq!(values.cpu, "250m");
        assert_eq!(values.instances, 2);
        assert_eq!(values.sync_replicas, Some(1));
        assert_eq!(values.data_durability, DataDurability::Required);
        assert!(!values.pooler.enabled);
        assert!(!values.security.enabled);
        assert!(values.security.allowed_ips.is_empty());
        assert!(!values.backups.enabled);
        assert!(!values.recovery.enabled);
        assert_eq!(values.recovery.backup_name, None);
    }

    #[test]
    fn optional_sections_are_enabled_by_presence() {
        let mut configuration = configuration();
        configuration.pooler_mode = Some(PoolerMode::Transaction);
        configuration.pooler_max_connections = Some(200);
        configuration.backup_schedule_cron_expression = Some("0 0 * * *".to_owned());
        configuration.backup_method = Some("barmanObjectStore".to_owned());
        let group = SecurityGroup {
            id: Uuid::new_v4(),
            name: "office".to_owned(),
            allowed_ips: vec!["10.0.0.0/8".to_owned()],
            workspace_id: Uuid::new_v4(),
        };
        let mut cluster = Cluster::new(Uuid::new_v4(), "shop-db".to_owned(), Some(group.id), configuration);
        cluster.recover_from("shop-db-1700000000");

        let values = renderer().render(&cluster, Some(&group)).spec.values;

        assert!(values.pooler.enabled);
        assert_eq!(values.pooler.mode.as_deref(), Some("transaction"));
        assert_eq!(values.pooler.max_client_connections, Some(200));
        assert!(values.security.enabled);
        assert_eq!(values.security.allowed_ips, vec!["10.0.0.0/8".to_owned()]);
        assert!(values.backups.enabled);
        assert_eq!(values.backups.schedule.as_deref(), Some("0 0 * * *"));
        assert!(values.recovery.enabled);
        assert_eq!(values.recovery.backup_name.as_deref(), Some("shop-db-1700000000"));
        assert_eq!(values.name, "shop-db-1700000000");
        assert!(values.parameters.is_empty());
    }

    #[test]
    fn render_is_deterministic() {
        let cluster = Cluster::new(Uuid::new_v4(), "shop-db".to_owned(), None, configuration());
        let renderer = renderer();

        let first = serde_json::to_vec(&renderer.render(&cluster, None)).unwrap();
        let second = serde_json::to_vec(&renderer.render(&cluster.clone(), None)).unwrap();
        assert_eq!(first, second);
    }
}
