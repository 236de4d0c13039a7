//! Test utilities for bucket development.
//!
//! Provides pool fixtures, a [`TrackedParticle`] that records every
//! destination it is given, and stacking invariant checks that are
//! written independently of the layout code they verify.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod invariants;

pub use invariants::{assert_no_dangling, assert_no_overlap, layer_counts};

use bucket_core::{Particle, ParticleId, ParticleStore, UserControlled, Vec2};
use bucket_pool::{BasicParticle, ParticlePool};

/// A pool of `n` basic particles resting at `at`.
pub fn pool_with(n: usize, at: Vec2) -> (ParticlePool, Vec<ParticleId>) {
    let mut pool = ParticlePool::new();
    let ids = (0..n).map(|_| pool.insert(BasicParticle::new(at))).collect();
    (pool, ids)
}

/// Destinations of `ids`, in order. Panics on an unknown ID.
pub fn destinations<S: ParticleStore>(store: &S, ids: &[ParticleId]) -> Vec<Vec2> {
    ids.iter()
        .map(|&id| {
            store
                .get(id)
                .unwrap_or_else(|| panic!("unknown particle {id}"))
                .destination()
        })
        .collect()
}

/// Particle that keeps a history of destination writes.
///
/// Lets tests see how many times relayout moved a particle and through
/// which slots.
#[derive(Clone, Debug, Default)]
pub struct TrackedParticle {
    position: Vec2,
    destination: Vec2,
    user_controlled: UserControlled,
    pub destination_history: Vec<Vec2>,
    pub position_writes: usize,
}

impl TrackedParticle {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            destination: position,
            ..Self::default()
        }
    }

    /// Number of destination writes since creation.
    pub fn moves(&self) -> usize {
        self.destination_history.len()
    }
}

impl Particle for TrackedParticle {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position_writes += 1;
        self.position = position;
    }

    fn destination(&self) -> Vec2 {
        self.destination
    }

    fn set_destination(&mut self, destination: Vec2) {
        self.destination_history.push(destination);
        self.destination = destination;
    }

    fn user_controlled(&self) -> &UserControlled {
        &self.user_controlled
    }

    fn user_controlled_mut(&mut self) -> &mut UserControlled {
        &mut self.user_controlled
    }
}
