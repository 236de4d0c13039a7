//! Error types for particle lookup.

use crate::id::ParticleId;
use std::error::Error;
use std::fmt;

/// Errors from resolving a particle through a [`ParticleStore`](crate::ParticleStore).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParticleError {
    /// No particle with this ID exists in the store.
    UnknownParticle {
        /// The ID that failed to resolve.
        id: ParticleId,
    },
}

impl fmt::Display for ParticleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParticle { id } => write!(f, "unknown particle {id}"),
        }
    }
}

impl Error for ParticleError {}
