use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a cluster.
///
/// Discriminants are the persisted representation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
pub enum ClusterStatus {
    Initialization = 0,
    Starting = 1,
    Restarting = 2,
    RecreatingStorage = 3,
    Running = 4,
    Deleting = 5,
    Deleted = 6,
}

/// Things that move a cluster between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// The declarative release was submitted to the platform.
    ReleaseCreated,
    /// The platform reports the cluster phase as healthy.
    PlatformHealthy,
    /// The platform reports the cluster phase as restarting.
    PlatformRestarting,
    /// A user asked for a restart.
    RestartRequested,
    /// A user grew the storage of a running cluster.
    StorageExpansionRequested,
    /// Every host got fresh storage.
    StorageRecreated,
    DeleteRequested,
    DeleteCompleted,
}

impl ClusterStatus {
    /// The transition table. `None` means the event is not accepted in this status.
    pub fn next(self, event: LifecycleEvent) -> Option<ClusterStatus> {
        use ClusterStatus::*;
        use LifecycleEvent::*;

        match (self, event) {
            (Initialization, ReleaseCreated) => Some(Starting),
            (Starting | Restarting, PlatformHealthy) => Some(Running),
            (Running, PlatformRestarting | RestartRequested) => Some(Restarting),
            (Running, StorageExpansionRequested) => Some(RecreatingStorage),
            (RecreatingStorage, StorageRecreated) => Some(Running),
            (Deleted, DeleteRequested) => None,
            (_, DeleteRequested) => Some(Deleting),
            (Deleting, DeleteCompleted) => Some(Deleted),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ClusterStatus::Deleted
    }
}

#[cfg(test)]
mod tests {
    use num_traits::FromPrimitive;

    use super::*;

    const ALL: [ClusterStatus; 7] = [
        ClusterStatus::Initialization,
        ClusterStatus::Starting,
        ClusterStatus::Restarting,
        ClusterStatus::RecreatingStorage,
        ClusterStatus::Running,
        ClusterStatus::Deleting,
        ClusterStatus::Deleted,
    ];

    #[test]
    fn forward_edges() {
        use ClusterStatus::*;
        use LifecycleEvent::*;

        assert_eq!(Initialization.next(ReleaseCreated), Some(Starting));
        assert_eq!(Starting.next(PlatformHealthy), Some(Running));
        assert_eq!(Restarting.next(PlatformHealthy), Some(Running));
        assert_eq!(Running.next(PlatformRestarting), Some(Restarting));
        assert_eq!(Running.next(RestartRequested), Some(Restarting));
        assert_eq!(Running.next(StorageExpansionRequested), Some(RecreatingStorage));
        assert_eq!(RecreatingStorage.next(StorageRecreated), Some(Running));
        assert_eq!(Deleting.next(DeleteCompleted), Some(Deleted));
    }

    #[test]
    fn health_does_not_skip_storage_recreation() {
        assert_eq!(
            ClusterStatus::RecreatingStorage.next(LifecycleEvent::PlatformHealthy),
            None
        );
        assert_eq!(
            ClusterStatus::Initialization.next(LifecycleEvent::PlatformHealthy),
            None
        );
        assert_eq!(ClusterStatus::Running.next(LifecycleEvent::PlatformHealthy), None);
    }

    #[test]
    fn restart_only_from_running() {
        for status in ALL.into_iter().filter(|s| *s != ClusterStatus::Running) {
            assert_eq!(status.next(LifecycleEvent::RestartRequested), None, "{status:?}");
        }
    }

    #[test]
    fn delete_from_every_non_terminal_status() {
        for status in ALL {
            let next = status.next(LifecycleEvent::DeleteRequested);
            if status.is_terminal() {
                assert_eq!(next, None);
            } else {
                assert_eq!(next, Some(ClusterStatus::Deleting), "{status:?}");
            }
        }
        assert_eq!(ClusterStatus::Running.next(LifecycleEvent::DeleteCompleted), None);
    }

    #[test]
    fn persisted_discriminants_round_trip() {
        for status in ALL {
            assert_eq!(ClusterStatus::from_i32(status as i32), Some(status));
        }
        assert_eq!(ClusterStatus::from_i32(7), None);
    }
}
