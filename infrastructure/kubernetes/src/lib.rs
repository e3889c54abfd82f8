//! Orchestration platform and metrics adapters.
pub mod client;
pub mod crd;
pub mod metrics;
pub mod namespace;

#[rustfmt::skip]
pub use {
    client::{KubeMapped, KubeResourceClient},
    metrics::PrometheusMetricsService,
    namespace::KubeNamespaceClient,
};
