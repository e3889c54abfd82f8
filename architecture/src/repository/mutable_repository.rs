use uuid::Uuid;

/// Write access to stored aggregates.
///
/// Writes are buffered by implementations with a unit of work and only hit the
/// store on `save_changed`.
#[async_trait::async_trait]
pub trait MutableRepository<T>: Send + Sync
where
    T: Send + Sync + crate::model::AggregateRoot,
{
    /// Update an aggregate.
    async fn update(&self, entity: &T) -> anyhow::Result<()>;
    /// Insert an aggregate, returning its id.
    async fn insert(&self, entity: &T) -> anyhow::Result<Uuid>;
    /// Delete the aggregate with the given id.
    async fn delete_by_id(&self, uuid: Uuid) -> anyhow::Result<()>;
    /// Commit buffered changes. Returns `Ok(false)` when there was nothing to commit.
    async fn save_changed(&self) -> anyhow::Result<bool>;
}
