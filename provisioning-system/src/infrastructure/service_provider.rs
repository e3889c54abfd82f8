use std::sync::Arc;

use architecture::BackgroundService;
use domain_cluster::{
    repository::{ClusterRepo, SecurityGroupRepo},
    service::{ClusterActuatorService, ReconcileService},
};
use infrastructure_kubernetes::{
    crd::{CnpgCluster, HelmRelease},
    KubeNamespaceClient, KubeResourceClient, PrometheusMetricsService,
};
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Pod};
use service_cluster::{
    ClusterActuatorServiceImpl, DesiredStateRenderServiceImpl, ReconcileServiceImpl,
};
use tokio_util::sync::CancellationToken;
use url::Url;

use super::{
    config::ProvisioningConfig,
    database::{Database, OrmRepo},
    interval_runner::{IntervalRunner, ReconcilePass},
};

/// Everything the process runs, built once at start-up.
pub struct ServiceProvider {
    pub database: Arc<Database>,
    pub background_services: Vec<Arc<dyn BackgroundService>>,
}

impl ServiceProvider {
    pub async fn build(
        config: &ProvisioningConfig,
        cancellation: CancellationToken,
    ) -> anyhow::Result<Self> {
        let database = Arc::new(Database::connect(&config.db.url).await?);
        let repo = Arc::new(OrmRepo::builder().db(database.clone()).build());
        let cluster_repo: Arc<dyn ClusterRepo> = repo.clone();
        let security_group_repo: Arc<dyn SecurityGroupRepo> = repo;

        let kube_config = match kube::Config::incluster() {
            Ok(x) => x,
            Err(_) => kube::Config::infer().await?,
        };
        let client = kube::Client::try_from(kube_config)?;

        let metrics_service = PrometheusMetricsService::builder()
            .http_client(reqwest::Client::new())
            .base_url(Url::parse(&config.metrics.prometheus_url)?)
            .build();
        let render_service = DesiredStateRenderServiceImpl::builder()
            .chart(config.chart.reference())
            .interval(config.chart.interval.clone())
            .build();

        let actuator: Arc<dyn ClusterActuatorService> = Arc::new(
            ClusterActuatorServiceImpl::builder()
                .namespace_client(Arc::new(KubeNamespaceClient::new(client.clone())))
                .release_client(Arc::new(KubeResourceClient::<HelmRelease>::new(
                    client.clone(),
                )))
                .database_cluster_client(Arc::new(KubeResourceClient::<CnpgCluster>::new(
                    client.clone(),
                )))
                .host_client(Arc::new(KubeResourceClient::<Pod>::new(client.clone())))
                .volume_claim_client(Arc::new(KubeResourceClient::<PersistentVolumeClaim>::new(
                    client,
                )))
                .security_group_repo(security_group_repo)
                .render_service(Arc::new(render_service))
                .metrics_service(Arc::new(metrics_service))
                .build(),
        );

        let reconcile_service: Arc<dyn ReconcileService> = Arc::new(
            ReconcileServiceImpl::builder()
                .cluster_repo(cluster_repo)
                .actuator(actuator)
                .build(),
        );

        let background_services: Vec<Arc<dyn BackgroundService>> = vec![
            Arc::new(IntervalRunner::new(
                ReconcilePass::Synchronize,
                reconcile_service.clone(),
                config.reconcile.synchronize_interval_secs,
                cancellation.clone(),
            )),
            Arc::new(IntervalRunner::new(
                ReconcilePass::RecreateStorage,
                reconcile_service,
                config.reconcile.storage_recreation_interval_secs,
                cancellation,
            )),
        ];

        Ok(Self {
            database,
            background_services,
        })
    }
}
