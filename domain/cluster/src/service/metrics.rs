use async_trait::async_trait;

/// External metrics collaborator.
#[async_trait]
pub trait MetricsQueryService: Send + Sync {
    /// Evaluate an instant query, returning the first sample's value if there is one.
    async fn query(&self, query: &str) -> anyhow::Result<Option<f64>>;
}
