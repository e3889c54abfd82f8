mod config;
mod database;
mod interval_runner;
mod repository;
mod service_provider;
pub mod telemetry;

pub use config::{build_config, ProvisioningConfig};
pub use service_provider::ServiceProvider;
