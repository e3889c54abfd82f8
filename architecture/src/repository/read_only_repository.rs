use uuid::Uuid;

/// Read-only access to stored aggregates.
#[async_trait::async_trait]
pub trait ReadOnlyRepository<T>: Send + Sync
where
    T: Send + Sync + crate::model::AggregateRoot,
{
    /// Get the aggregate with the given id, failing when it does not exist.
    async fn get_by_id(&self, uuid: Uuid) -> anyhow::Result<T>;
    /// Get every stored aggregate.
    async fn get_all(&self) -> anyhow::Result<Vec<T>>;
}
