/// Marks an aggregate root, the unit a repository loads and stores.
pub trait AggregateRoot {}
