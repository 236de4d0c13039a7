//! Core types and traits for sphere-stacking simulation containers.
//!
//! This is the leaf crate of the workspace. It defines the identifiers,
//! geometry aliases, error types, and the capability traits that connect a
//! container to the particles it manages:
//!
//! - [`Particle`]: readable/writable `position` and `destination`, plus an
//!   observable [`UserControlled`] flag.
//! - [`ParticleStore`]: host-owned storage that resolves a [`ParticleId`].
//! - [`ParticleContainer`]: the add / remove / includes contract shared by
//!   containers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod id;
pub mod particle;
pub mod traits;

pub use error::ParticleError;
pub use geometry::{Dimension2, Vec2};
pub use id::{ContainerId, ListenerId, ParticleId};
pub use particle::{Particle, Subscription, UserControlled};
pub use traits::{GrabEvent, ParticleContainer, ParticleStore};
