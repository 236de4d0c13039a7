//! Footprint geometry shared by every bucket.

use bucket_core::{Dimension2, Vec2};

/// Fraction of the total height occupied by the ellipse of the opening.
/// The opening is as wide as the bucket.
pub const HOLE_ELLIPSE_HEIGHT_PROPORTION: f64 = 0.25;

/// The physical bucket: where its opening is and how big it is.
///
/// `position` is the center of the opening, not a corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    position: Vec2,
    size: Dimension2,
    invert_y: bool,
}

impl Bucket {
    /// Create a bucket footprint.
    pub fn new(position: Vec2, size: Dimension2, invert_y: bool) -> Self {
        Self {
            position,
            size,
            invert_y,
        }
    }

    /// Center of the opening.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Footprint extent.
    pub fn size(&self) -> Dimension2 {
        self.size
    }

    /// Whether the model space has y pointing down.
    pub fn invert_y(&self) -> bool {
        self.invert_y
    }

    /// Semi-axes `(x, y)` of the opening ellipse, centered on `position`.
    pub fn hole_radii(&self) -> Vec2 {
        Vec2::new(
            self.size.width / 2.0,
            self.size.height * HOLE_ELLIPSE_HEIGHT_PROPORTION / 2.0,
        )
    }

    /// Height of the body below the opening.
    pub fn container_height(&self) -> f64 {
        self.size.height * (1.0 - HOLE_ELLIPSE_HEIGHT_PROPORTION / 2.0)
    }

    /// Direction from the opening toward the bottom of the body: `-1.0`
    /// with y up, `1.0` with y down.
    pub fn depth_direction(&self) -> f64 {
        if self.invert_y {
            1.0
        } else {
            -1.0
        }
    }

    /// Model-space y of the bottom of the body.
    pub fn bottom_y(&self) -> f64 {
        self.position.y + self.depth_direction() * self.container_height()
    }
}
