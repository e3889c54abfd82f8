use serde::{Deserialize, Serialize};

/// Utilization ratios of one member host. `None` when the metric could not be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostResourceUsage {
    pub host: String,
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub storage: Option<f64>,
}
