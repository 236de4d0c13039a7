//! Storage and container traits.

use crate::error::ParticleError;
use crate::id::{ContainerId, ListenerId, ParticleId};
use crate::particle::Particle;
use smallvec::SmallVec;

/// Notification that a subscribed particle became user-controlled.
///
/// Produced by [`ParticleStore::set_user_controlled`] and delivered by the
/// host to the container named in `owner`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GrabEvent {
    /// The particle whose flag rose.
    pub particle: ParticleId,
    /// The subscription token that fired.
    pub listener: ListenerId,
    /// The container that installed the subscription.
    pub owner: ContainerId,
}

/// Host-owned particle storage addressed by [`ParticleId`].
///
/// Containers never own particles. Every container operation that reads
/// or moves particles borrows the store for the duration of the call.
pub trait ParticleStore {
    /// The particle type held by this store.
    type Particle: Particle;

    /// Look up a particle.
    fn get(&self, id: ParticleId) -> Option<&Self::Particle>;

    /// Look up a particle mutably.
    fn get_mut(&mut self, id: ParticleId) -> Option<&mut Self::Particle>;

    /// Set a particle's user-control flag.
    ///
    /// Returns one [`GrabEvent`] per subscription that fired. The events
    /// are not delivered here; pass each to its owning container.
    fn set_user_controlled(
        &mut self,
        id: ParticleId,
        value: bool,
    ) -> Result<SmallVec<[GrabEvent; 2]>, ParticleError> {
        let particle = self
            .get_mut(id)
            .ok_or(ParticleError::UnknownParticle { id })?;
        Ok(particle
            .user_controlled_mut()
            .set(value)
            .into_iter()
            .map(|s| GrabEvent {
                particle: id,
                listener: s.id,
                owner: s.owner,
            })
            .collect())
    }
}

/// Shared contract of particle containers: add, remove, membership.
pub trait ParticleContainer<S: ParticleStore> {
    /// Error returned when a particle cannot be added.
    type Error;

    /// Add `id` to the container, letting the container choose its spot.
    ///
    /// With `skip_layout` set, the container must not move any particle it
    /// already holds to make room.
    fn add_particle(
        &mut self,
        store: &mut S,
        id: ParticleId,
        skip_layout: bool,
    ) -> Result<(), Self::Error>;

    /// Remove `id` from the container.
    fn remove_particle(&mut self, store: &mut S, id: ParticleId);

    /// Whether `id` is currently held.
    fn includes(&self, id: ParticleId) -> bool;
}
