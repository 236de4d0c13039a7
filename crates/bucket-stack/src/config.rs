//! Bucket configuration and validation.

use crate::error::ConfigError;
use bucket_core::{Dimension2, Vec2};

/// Construction parameters for a [`SphereBucket`](crate::SphereBucket).
///
/// Validated once by [`SphereBucket::new`](crate::SphereBucket::new); all
/// values are immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereBucketConfig {
    /// Center of the bucket opening in model space. Default: origin.
    pub position: Vec2,
    /// Footprint of the bucket. Default: 200 x 50.
    pub size: Dimension2,
    /// Radius shared by every sphere placed in the bucket. Default: 10.
    pub sphere_radius: f64,
    /// Fraction of the width available to sphere centers, in `(0, 1]`.
    /// Default: 1.0.
    pub usable_width_proportion: f64,
    /// Offset from `position.y` to the bottom layer.
    ///
    /// `None` selects [`DEFAULT_VERTICAL_OFFSET_FACTOR`](Self::DEFAULT_VERTICAL_OFFSET_FACTOR)
    /// times the sphere radius, which nests the bottom row inside the opening.
    pub vertical_offset: Option<f64>,
    /// Whether the model space has y pointing down. Only affects the base
    /// bucket geometry, not stacking.
    pub invert_y: bool,
}

impl SphereBucketConfig {
    /// Default footprint.
    pub const DEFAULT_SIZE: Dimension2 = Dimension2::new(200.0, 50.0);

    /// Default sphere radius.
    pub const DEFAULT_SPHERE_RADIUS: f64 = 10.0;

    /// Default vertical offset as a multiple of the sphere radius.
    pub const DEFAULT_VERTICAL_OFFSET_FACTOR: f64 = -0.4;

    /// Default config with the given footprint and sphere radius.
    pub fn new(position: Vec2, size: Dimension2, sphere_radius: f64) -> Self {
        Self {
            position,
            size,
            sphere_radius,
            ..Self::default()
        }
    }

    /// The vertical offset in effect, applying the radius-based default.
    pub fn resolved_vertical_offset(&self) -> f64 {
        self.vertical_offset
            .unwrap_or(self.sphere_radius * Self::DEFAULT_VERTICAL_OFFSET_FACTOR)
    }

    /// Check structural invariants.
    ///
    /// A footprint too narrow to hold one sphere is accepted; it stacks
    /// as a single column.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sphere_radius.is_finite() || self.sphere_radius <= 0.0 {
            return Err(ConfigError::InvalidSphereRadius {
                value: self.sphere_radius,
            });
        }
        let p = self.usable_width_proportion;
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            return Err(ConfigError::InvalidWidthProportion { value: p });
        }
        if !self.size.is_valid() {
            return Err(ConfigError::InvalidSize {
                width: self.size.width,
                height: self.size.height,
            });
        }
        if !self.position.is_finite() {
            return Err(ConfigError::NonFinitePosition);
        }
        if let Some(offset) = self.vertical_offset {
            if !offset.is_finite() {
                return Err(ConfigError::NonFiniteOffset { value: offset });
            }
        }
        Ok(())
    }
}

impl Default for SphereBucketConfig {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Self::DEFAULT_SIZE,
            sphere_radius: Self::DEFAULT_SPHERE_RADIUS,
            usable_width_proportion: 1.0,
            vertical_offset: None,
            invert_y: false,
        }
    }
}
