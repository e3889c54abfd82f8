use std::{collections::BTreeMap, sync::Arc};

use domain_cluster::{
    exception::{ClusterException, PlatformException},
    mock::{MockClusterActuatorService, MockClusterRepo},
    model::{
        entity::{Cluster, ClusterConfiguration},
        vo::{BucketReport, ClusterStatus, DataDurability, PlatformClusterStatus},
    },
    service::ReconcileService,
};
use mockall::predicate::eq;
use service_cluster::ReconcileServiceImpl;
use uuid::Uuid;

fn configuration() -> ClusterConfiguration {
    ClusterConfiguration {
        id: Uuid::new_v4(),
        storage_size: 1,
        cpu: 100,
        memory: 300,
        major_version: 16,
        database_name: "app".to_owned(),
        lc_collate: "C".to_owned(),
        lc_ctype: "C".to_owned(),
        instances: 1,
        owner_name: "app".to_owned(),
        owner_password: "secret".to_owned(),
        parameters: BTreeMap::new(),
        pooler_mode: None,
        pooler_max_connections: None,
        pooler_default_pool_size: None,
        backup_schedule_cron_expression: None,
        backup_method: None,
        sync_replicas: None,
        data_durability: DataDurability::Preferred,
    }
}

fn cluster(system_name: &str, status: ClusterStatus) -> Cluster {
    Cluster::new(Uuid::new_v4(), system_name.to_owned(), None, configuration()).with_status(status)
}

fn phase(phase: &str) -> Option<PlatformClusterStatus> {
    Some(PlatformClusterStatus {
        phase: Some(phase.to_owned()),
    })
}

/// A repository whose status buckets are served from `clusters`.
fn repo_with(clusters: Vec<Cluster>) -> MockClusterRepo {
    let mut repo = MockClusterRepo::new();
    repo.expect_get_by_statuses().returning(move |statuses| {
        Ok(clusters
            .iter()
            .filter(|cluster| statuses.contains(&cluster.status()))
            .cloned()
            .collect())
    });
    repo
}

fn service(repo: MockClusterRepo, actuator: MockClusterActuatorService) -> ReconcileServiceImpl {
    ReconcileServiceImpl::builder()
        .cluster_repo(Arc::new(repo))
        .actuator(Arc::new(actuator))
        .build()
}

fn report(attempted: usize, advanced: usize, unchanged: usize, failed: usize) -> BucketReport {
    BucketReport {
        attempted,
        advanced,
        unchanged,
        conflicted: 0,
        failed,
    }
}

#[tokio::test]
async fn initialization_creates_release_and_starts() {
    let new = cluster("orders", ClusterStatus::Initialization);
    let mut repo = repo_with(vec![new.clone()]);
    repo.expect_transition_status()
        .with(eq(new.id), eq(ClusterStatus::Initialization), eq(ClusterStatus::Starting))
        .times(1)
        .returning(|_, _, _| Ok(true));
    let mut actuator = MockClusterActuatorService::new();
    let id = new.id;
    actuator
        .expect_create_cluster()
        .withf(move |cluster| cluster.id == id)
        .times(1)
        .returning(|_| Ok(()));

    let tick = service(repo, actuator).synchronize().await;

    assert_eq!(tick.bucket("initialization"), Some(&report(1, 1, 0, 0)));
    assert_eq!(tick.bucket("starting"), Some(&BucketReport::default()));
    assert_eq!(tick.bucket("running"), Some(&BucketReport::default()));
}

#[tokio::test]
async fn failing_cluster_does_not_block_the_bucket() {
    let broken = cluster("broken", ClusterStatus::Initialization);
    let fine = cluster("fine", ClusterStatus::Initialization);
    let mut repo = repo_with(vec![broken.clone(), fine.clone()]);
    repo.expect_transition_status()
        .with(eq(fine.id), eq(ClusterStatus::Initialization), eq(ClusterStatus::Starting))
        .times(1)
        .returning(|_, _, _| Ok(true));
    let mut actuator = MockClusterActuatorService::new();
    actuator.expect_create_cluster().times(2).returning(|cluster| {
        if cluster.system_name == "broken" {
            Err(PlatformException::Api {
                source: anyhow::anyhow!("connection refused"),
            }
            .into())
        } else {
            Ok(())
        }
    });

    let tick = service(repo, actuator).synchronize().await;

    assert_eq!(tick.bucket("initialization"), Some(&report(2, 1, 0, 1)));
}

#[tokio::test]
async fn existing_release_counts_as_created() {
    let new = cluster("orders", ClusterStatus::Initialization);
    let mut repo = repo_with(vec![new.clone()]);
    repo.expect_transition_status()
        .times(1)
        .returning(|_, _, _| Ok(true));
    let mut actuator = MockClusterActuatorService::new();
    actuator.expect_create_cluster().returning(|cluster| {
        Err(ClusterException::Platform(PlatformException::AlreadyExists {
            kind: "HelmRelease".to_owned(),
            name: cluster.system_name.clone(),
        }))
    });

    let tick = service(repo, actuator).synchronize().await;

    assert_eq!(tick.bucket("initialization"), Some(&report(1, 1, 0, 0)));
}

#[tokio::test]
async fn starting_and_restarting_become_running_only_when_healthy() {
    let healthy = cluster("healthy", ClusterStatus::Starting);
    let restarting = cluster("restarting", ClusterStatus::Restarting);
    let absent = cluster("absent", ClusterStatus::Starting);
    let odd = cluster("odd", ClusterStatus::Restarting);
    let mut repo = repo_with(vec![
        healthy.clone(),
        restarting.clone(),
        absent.clone(),
        odd.clone(),
    ]);
    repo.expect_transition_status()
        .with(eq(healthy.id), eq(ClusterStatus::Starting), eq(ClusterStatus::Running))
        .times(1)
        .returning(|_, _, _| Ok(true));
    let mut actuator = MockClusterActuatorService::new();
    actuator
        .expect_get_cluster_status()
        .returning(|cluster| match cluster.system_name.as_str() {
            "healthy" => Ok(phase("Cluster in healthy state")),
            "restarting" => Ok(phase("Switchover in progress")),
            "odd" => Ok(phase("Something nobody has seen before")),
            _ => Ok(None),
        });

    let tick = service(repo, actuator).synchronize().await;

    assert_eq!(tick.bucket("starting"), Some(&report(4, 1, 3, 0)));
}

#[tokio::test]
async fn running_becomes_restarting_only_on_restarting_phase() {
    let restarting = cluster("restarting", ClusterStatus::Running);
    let steady = cluster("steady", ClusterStatus::Running);
    let mut repo = repo_with(vec![restarting.clone(), steady.clone()]);
    repo.expect_transition_status()
        .with(
            eq(restarting.id),
            eq(ClusterStatus::Running),
            eq(ClusterStatus::Restarting),
        )
        .times(1)
        .returning(|_, _, _| Ok(true));
    let mut actuator = MockClusterActuatorService::new();
    actuator
        .expect_get_cluster_status()
        .returning(|cluster| match cluster.system_name.as_str() {
            "restarting" => Ok(phase("Applying configuration")),
            _ => Ok(phase("Cluster in healthy state")),
        });

    let tick = service(repo, actuator).synchronize().await;

    assert_eq!(tick.bucket("running"), Some(&report(2, 1, 1, 0)));
}

#[tokio::test]
async fn concurrent_change_is_reported_as_conflict() {
    let starting = cluster("orders", ClusterStatus::Starting);
    let mut repo = repo_with(vec![starting]);
    repo.expect_transition_status()
        .times(1)
        .returning(|_, _, _| Ok(false));
    let mut actuator = MockClusterActuatorService::new();
    actuator
        .expect_get_cluster_status()
        .returning(|_| Ok(phase("Cluster in healthy state")));

    let tick = service(repo, actuator).synchronize().await;

    assert_eq!(
        tick.bucket("starting"),
        Some(&BucketReport {
            attempted: 1,
            conflicted: 1,
            ..Default::default()
        })
    );
}

#[tokio::test]
async fn unreadable_bucket_is_skipped() {
    let mut repo = MockClusterRepo::new();
    repo.expect_get_by_statuses().returning(|statuses| {
        if statuses.contains(&ClusterStatus::Initialization) {
            Err(anyhow::anyhow!("database is gone"))
        } else {
            Ok(vec![])
        }
    });

    let tick = service(repo, MockClusterActuatorService::new())
        .synchronize()
        .await;

    assert_eq!(tick.bucket("initialization"), None);
    assert_eq!(tick.bucket("starting"), Some(&BucketReport::default()));
    assert_eq!(tick.bucket("running"), Some(&BucketReport::default()));
}

#[tokio::test]
async fn storage_is_recreated_once_healthy() {
    let ready = cluster("ready", ClusterStatus::RecreatingStorage);
    let busy = cluster("busy", ClusterStatus::RecreatingStorage);
    let mut repo = repo_with(vec![ready.clone(), busy]);
    repo.expect_transition_status()
        .with(
            eq(ready.id),
            eq(ClusterStatus::RecreatingStorage),
            eq(ClusterStatus::Running),
        )
        .times(1)
        .returning(|_, _, _| Ok(true));
    let mut actuator = MockClusterActuatorService::new();
    actuator
        .expect_get_cluster_status()
        .returning(|cluster| match cluster.system_name.as_str() {
            "ready" => Ok(phase("Cluster in healthy state")),
            _ => Ok(phase("Creating a new replica")),
        });
    actuator
        .expect_recreate_storage()
        .withf(|cluster| cluster.system_name == "ready")
        .times(1)
        .returning(|_| Ok(()));

    let tick = service(repo, actuator).recreate_storage().await;

    assert_eq!(tick.bucket("recreating_storage"), Some(&report(2, 1, 1, 0)));
    assert_eq!(tick.bucket("initialization"), None);
}

#[tokio::test]
async fn failed_recreation_keeps_status() {
    let ready = cluster("ready", ClusterStatus::RecreatingStorage);
    let mut repo = repo_with(vec![ready]);
    repo.expect_transition_status().never();
    let mut actuator = MockClusterActuatorService::new();
    actuator
        .expect_get_cluster_status()
        .returning(|_| Ok(phase("Cluster in healthy state")));
    actuator.expect_recreate_storage().times(1).returning(|_| {
        Err(ClusterException::DestructiveOperation {
            host: "ready-1".to_owned(),
            source: PlatformException::Api {
                source: anyhow::anyhow!("volume is busy"),
            },
        })
    });

    let tick = service(repo, actuator).recreate_storage().await;

    assert_eq!(tick.bucket("recreating_storage"), Some(&report(1, 0, 0, 1)));
}
