/// Classification of the free-form phase text the platform reports for a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseClass {
    Healthy,
    Restarting,
    /// A known phase that is neither healthy nor restarting.
    Other,
    /// A phase string nobody told us about.
    Unrecognized,
}

const HEALTHY_PHASES: &[&str] = &["Cluster in healthy state"];

const RESTARTING_PHASES: &[&str] = &[
    "Upgrading cluster",
    "Applying configuration",
    "Primary instance is being restarted in-place",
    "Primary instance is being restarted without a switchover",
    "Waiting for the instances to become active",
    "Online upgrade in progress",
    "Switchover in progress",
    "Failing over",
];

const OTHER_PHASES: &[&str] = &[
    "Setting up primary",
    "Creating a new replica",
    "Cluster upgrade delayed",
    "Waiting for user action",
    "Cluster is in an unrecoverable state, needs manual intervention",
    "Creating replica cluster",
];

impl PhaseClass {
    pub fn classify(phase: &str) -> Self {
        if HEALTHY_PHASES.contains(&phase) {
            PhaseClass::Healthy
        } else if RESTARTING_PHASES.contains(&phase) {
            PhaseClass::Restarting
        } else if OTHER_PHASES.contains(&phase) {
            PhaseClass::Other
        } else {
            PhaseClass::Unrecognized
        }
    }

    pub fn is_healthy(self) -> bool {
        self == PhaseClass::Healthy
    }

    pub fn is_restarting(self) -> bool {
        self == PhaseClass::Restarting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_phases() {
        assert_eq!(PhaseClass::classify("Cluster in healthy state"), PhaseClass::Healthy);
        assert_eq!(PhaseClass::classify("Switchover in progress"), PhaseClass::Restarting);
        assert_eq!(
            PhaseClass::classify("Primary instance is being restarted in-place"),
            PhaseClass::Restarting
        );
        assert_eq!(PhaseClass::classify("Setting up primary"), PhaseClass::Other);
    }

    #[test]
    fn unknown_phase_is_neither_healthy_nor_restarting() {
        for phase in ["", "cluster in healthy state", "Cluster in healthy state ", "Exploded"] {
            let class = PhaseClass::classify(phase);
            assert_eq!(class, PhaseClass::Unrecognized, "{phase:?}");
            assert!(!class.is_healthy());
            assert!(!class.is_restarting());
        }
    }

    #[test]
    fn phase_sets_are_disjoint() {
        for phase in HEALTHY_PHASES {
            assert!(!RESTARTING_PHASES.contains(phase) && !OTHER_PHASES.contains(phase));
        }
        for phase in RESTARTING_PHASES {
            assert!(!OTHER_PHASES.contains(phase));
        }
    }
}
