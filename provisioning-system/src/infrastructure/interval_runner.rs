use std::{sync::Arc, time::Duration};

use architecture::BackgroundService;
use async_trait::async_trait;
use domain_cluster::{model::vo::TickReport, service::ReconcileService};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, Instrument};

/// Which reconciliation pass a runner drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePass {
    Synchronize,
    RecreateStorage,
}

impl ReconcilePass {
    fn name(self) -> &'static str {
        match self {
            ReconcilePass::Synchronize => "synchronize",
            ReconcilePass::RecreateStorage => "recreate_storage",
        }
    }
}

/// Runs one reconciliation pass per period until cancelled.
///
/// A pass in flight always completes, cancellation is only observed between passes.
pub struct IntervalRunner {
    pass: ReconcilePass,
    service: Arc<dyn ReconcileService>,
    period: Duration,
    cancellation: CancellationToken,
}

impl IntervalRunner {
    pub fn new(
        pass: ReconcilePass,
        service: Arc<dyn ReconcileService>,
        period_secs: u64,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            pass,
            service,
            period: Duration::from_secs(period_secs.max(1)),
            cancellation,
        }
    }

    async fn tick(&self) -> TickReport {
        match self.pass {
            ReconcilePass::Synchronize => self.service.synchronize().await,
            ReconcilePass::RecreateStorage => self.service.recreate_storage().await,
        }
    }
}

#[async_trait]
impl BackgroundService for IntervalRunner {
    async fn run(&self) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let pass = self.pass.name();
        info!(pass, period = ?self.period, "Reconciliation runner started");
        loop {
            tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => break,
                _ = ticker.tick() => {}
            }
            let report = self
                .tick()
                .instrument(tracing::debug_span!("reconcile", pass))
                .await;
            for (bucket, counts) in report.buckets {
                info!(
                    pass,
                    bucket,
                    attempted = counts.attempted,
                    advanced = counts.advanced,
                    unchanged = counts.unchanged,
                    conflicted = counts.conflicted,
                    failed = counts.failed,
                    "Reconciliation pass finished"
                );
            }
        }
        info!(pass, "Reconciliation runner stopped");
    }
}
