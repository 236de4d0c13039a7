//! In-memory membership snapshots.

use crate::error::BucketError;
use crate::sphere::SphereBucket;
use bucket_core::{ParticleId, ParticleStore};
use indexmap::IndexSet;

/// Which particles a bucket holds, in insertion order.
///
/// Positions and destinations live on the particles themselves, so
/// capturing membership is enough to put a bucket back the way it was.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketState {
    /// Member IDs in insertion order.
    pub particles: Vec<ParticleId>,
}

impl SphereBucket {
    /// Capture current membership.
    pub fn state(&self) -> BucketState {
        BucketState {
            particles: self.particles().collect(),
        }
    }

    /// Replace membership with `state`.
    ///
    /// Equivalent to [`reset`](Self::reset) followed by re-registering each
    /// listed particle at its current destination, with its position
    /// snapped to the destination. No slot search or relayout runs.
    ///
    /// The bucket is left untouched if any ID is unknown to `store` or
    /// listed twice.
    pub fn apply_state<S: ParticleStore>(
        &mut self,
        store: &mut S,
        state: &BucketState,
    ) -> Result<(), BucketError> {
        let mut seen = IndexSet::with_capacity(state.particles.len());
        for &id in &state.particles {
            if store.get(id).is_none() {
                return Err(BucketError::UnknownParticle { id });
            }
            if !seen.insert(id) {
                return Err(BucketError::AlreadyContained { id });
            }
        }

        self.reset(store);
        for id in seen {
            let particle = store
                .get_mut(id)
                .ok_or(BucketError::UnknownParticle { id })?;
            self.register(id, particle, false);
        }
        Ok(())
    }
}
