//! Point and extent types shared by containers and particles.

/// A 2D point or vector in model space.
///
/// Slot occupancy compares points with exact `==`, so slot coordinates
/// must always be produced by the same arithmetic.
pub type Vec2 = glam::DVec2;

/// Width and height of a rectangular extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimension2 {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Dimension2 {
    /// Create a new extent.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both components are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}
