//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a particle within a [`ParticleStore`](crate::ParticleStore).
///
/// Stores hand these out on insertion. Containers hold `ParticleId`s rather
/// than references, so membership never borrows the particle itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u32);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ParticleId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`ContainerId`] allocation.
static CONTAINER_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a container.
///
/// Allocated from a monotonic atomic counter via [`ContainerId::next`].
/// Subscriptions record the owning container so that a user-control
/// notification can be routed back to the container that installed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Allocate a fresh, unique container ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process.
    pub fn next() -> Self {
        Self(CONTAINER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token returned by [`UserControlled::subscribe`](crate::UserControlled::subscribe).
///
/// Required to unsubscribe. Tokens are unique per flag, not globally, so a
/// container keeps the token next to the [`ParticleId`] it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
