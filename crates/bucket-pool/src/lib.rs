//! Particle storage for sphere-stacking containers.
//!
//! [`ParticlePool`] is an insertion-ordered [`ParticleStore`] that hands out
//! sequential [`ParticleId`]s. [`BasicParticle`] is the plain particle most
//! simulations need: a position, a destination, and a user-control flag.
//!
//! [`ParticleStore`]: bucket_core::ParticleStore
//! [`ParticleId`]: bucket_core::ParticleId

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod basic;
pub mod pool;

pub use basic::BasicParticle;
pub use pool::ParticlePool;
