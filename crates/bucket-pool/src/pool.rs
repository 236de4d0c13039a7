//! Insertion-ordered particle storage.

use crate::basic::BasicParticle;
use bucket_core::{Particle, ParticleId, ParticleStore};
use indexmap::IndexMap;

/// Owns particles and addresses them by sequential [`ParticleId`].
///
/// IDs are never reused within a pool, so a stale ID held by a container
/// resolves to `None` instead of to a different particle.
///
/// # Examples
///
/// ```
/// use bucket_core::{Particle, ParticleStore};
/// use bucket_pool::{BasicParticle, ParticlePool};
///
/// let mut pool = ParticlePool::new();
/// let a = pool.insert(BasicParticle::at(1.0, 2.0));
/// let b = pool.insert(BasicParticle::at(3.0, 4.0));
/// assert_ne!(a, b);
/// assert_eq!(pool.len(), 2);
///
/// let removed = pool.remove(a).unwrap();
/// assert_eq!(removed.position().x, 1.0);
/// assert!(pool.get(a).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ParticlePool<P = BasicParticle> {
    particles: IndexMap<ParticleId, P>,
    next_id: u32,
}

impl<P: Particle> ParticlePool<P> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            particles: IndexMap::new(),
            next_id: 0,
        }
    }

    /// Take ownership of `particle` and return its ID.
    pub fn insert(&mut self, particle: P) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.particles.insert(id, particle);
        id
    }

    /// Remove and return a particle. Order of the rest is preserved.
    pub fn remove(&mut self, id: ParticleId) -> Option<P> {
        self.particles.shift_remove(&id)
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the pool holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// IDs in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.particles.keys().copied()
    }

    /// `(id, particle)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &P)> + '_ {
        self.particles.iter().map(|(id, p)| (*id, p))
    }
}

impl<P: Particle> Default for ParticlePool<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Particle> ParticleStore for ParticlePool<P> {
    type Particle = P;

    fn get(&self, id: ParticleId) -> Option<&P> {
        self.particles.get(&id)
    }

    fn get_mut(&mut self, id: ParticleId) -> Option<&mut P> {
        self.particles.get_mut(&id)
    }
}
