use serde::Serialize;

/// Outcome counters of one bucket in one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketReport {
    pub attempted: usize,
    /// Transition persisted.
    pub advanced: usize,
    /// Nothing to do this time.
    pub unchanged: usize,
    /// The record changed under us between read and write.
    pub conflicted: usize,
    pub failed: usize,
}

/// What happened to one cluster in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Advanced,
    Unchanged,
    Conflicted,
    Failed,
}

impl BucketReport {
    pub fn record(&mut self, outcome: ReconcileOutcome) {
        self.attempted += 1;
        match outcome {
            ReconcileOutcome::Advanced => self.advanced += 1,
            ReconcileOutcome::Unchanged => self.unchanged += 1,
            ReconcileOutcome::Conflicted => self.conflicted += 1,
            ReconcileOutcome::Failed => self.failed += 1,
        }
    }
}

/// Outcome of one reconciliation pass, keyed by bucket name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub buckets: Vec<(&'static str, BucketReport)>,
}

impl TickReport {
    pub fn bucket(&self, name: &str) -> Option<&BucketReport> {
        self.buckets.iter().find(|(n, _)| *n == name).map(|(_, r)| r)
    }

    pub fn push(&mut self, name: &'static str, report: BucketReport) {
        self.buckets.push((name, report));
    }
}
