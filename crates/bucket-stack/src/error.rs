//! Error types for bucket construction and membership changes.

use bucket_core::ParticleId;
use std::error::Error;
use std::fmt;

/// Errors from adding particles to a [`SphereBucket`](crate::SphereBucket).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BucketError {
    /// The particle ID does not resolve in the supplied store.
    UnknownParticle {
        /// The unresolved ID.
        id: ParticleId,
    },
    /// The particle is already a member of this bucket.
    AlreadyContained {
        /// The duplicate ID.
        id: ParticleId,
    },
}

impl fmt::Display for BucketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParticle { id } => write!(f, "unknown particle {id}"),
            Self::AlreadyContained { id } => write!(f, "particle {id} is already in the bucket"),
        }
    }
}

impl Error for BucketError {}

/// Errors detected by [`SphereBucketConfig::validate`](crate::SphereBucketConfig::validate).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `sphere_radius` is NaN, infinite, zero, or negative.
    InvalidSphereRadius {
        /// The invalid value.
        value: f64,
    },
    /// `usable_width_proportion` is outside `(0, 1]`.
    InvalidWidthProportion {
        /// The invalid value.
        value: f64,
    },
    /// A size component is NaN, infinite, or negative.
    InvalidSize {
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },
    /// A position component is NaN or infinite.
    NonFinitePosition,
    /// An explicit vertical offset is NaN or infinite.
    NonFiniteOffset {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSphereRadius { value } => {
                write!(f, "sphere_radius must be finite and positive, got {value}")
            }
            Self::InvalidWidthProportion { value } => {
                write!(f, "usable_width_proportion must be in (0, 1], got {value}")
            }
            Self::InvalidSize { width, height } => {
                write!(f, "size must be finite and non-negative, got {width}x{height}")
            }
            Self::NonFinitePosition => write!(f, "position must be finite"),
            Self::NonFiniteOffset { value } => {
                write!(f, "vertical_offset must be finite, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}
