//! Triangular stacking lattice and the open-slot searches over it.
//!
//! Layer 0 rests `vertical_offset` above the bucket position. Each layer
//! above it sits `2 * r * 0.866` higher, which packs spheres of radius `r`
//! into a hexagonal lattice, and holds one slot fewer than the layer
//! below, shifted right by one radius so every slot rests on two spheres.
//!
//! Once the narrowing reaches a single slot, every further layer also
//! holds exactly one slot directly above the apex. A pyramid that is full
//! therefore grows a one-wide column on top instead of running out of
//! slots. Column slots never have two supporters, so only the first-open
//! search will place spheres there.

use bucket_core::Vec2;

/// `sin(60°)`, rounded. Ratio of layer pitch to sphere diameter.
pub const LAYER_SPACING_FACTOR: f64 = 0.866;

/// A supporter must lie closer than this many radii to the slot it holds up.
pub const SUPPORT_DISTANCE_FACTOR: f64 = 3.0;

/// Supporters needed for a slot above layer 0 to be stable.
pub const MIN_SUPPORTERS: usize = 2;

/// One position in the stacking order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slot {
    /// Layer index, 0 at the bottom.
    pub layer: u32,
    /// Index within the layer, 0 at the left.
    pub index: u32,
    /// Sphere center for this slot.
    pub position: Vec2,
}

/// Geometry of the stacking lattice for one bucket.
///
/// Pure: every query takes the occupied destinations as a slice, so the
/// same layout serves any particle storage.
#[derive(Clone, Debug, PartialEq)]
pub struct StackLayout {
    origin: Vec2,
    width: f64,
    sphere_radius: f64,
    usable_width_proportion: f64,
    vertical_offset: f64,
}

impl StackLayout {
    /// Create a layout for a bucket whose opening is centered at `origin`.
    pub fn new(
        origin: Vec2,
        width: f64,
        sphere_radius: f64,
        usable_width_proportion: f64,
        vertical_offset: f64,
    ) -> Self {
        Self {
            origin,
            width,
            sphere_radius,
            usable_width_proportion,
            vertical_offset,
        }
    }

    /// Radius of the stacked spheres.
    pub fn sphere_radius(&self) -> f64 {
        self.sphere_radius
    }

    /// Vertical distance between adjacent layers.
    pub fn layer_spacing(&self) -> f64 {
        self.sphere_radius * 2.0 * LAYER_SPACING_FACTOR
    }

    fn usable_width(&self) -> f64 {
        self.width * self.usable_width_proportion - 2.0 * self.sphere_radius
    }

    /// Slots on layer 0. Never less than 1, even when the usable width
    /// cannot fit a single sphere.
    pub fn base_capacity(&self) -> u32 {
        let fit = (self.usable_width() / (self.sphere_radius * 2.0)).floor();
        if fit >= 1.0 {
            fit as u32
        } else {
            1
        }
    }

    /// Slots on `layer`.
    pub fn layer_capacity(&self, layer: u32) -> u32 {
        self.base_capacity().saturating_sub(layer).max(1)
    }

    /// Slots in the full pyramid, excluding the column above the apex.
    pub fn pyramid_capacity(&self) -> u64 {
        let base = u64::from(self.base_capacity());
        base * (base + 1) / 2
    }

    /// Model-space y of sphere centers on `layer`.
    pub fn layer_y(&self, layer: u32) -> f64 {
        self.origin.y
            + self.vertical_offset
            + f64::from(layer) * self.sphere_radius * 2.0 * LAYER_SPACING_FACTOR
    }

    /// Model-space y of the bottom layer.
    pub fn bottom_y(&self) -> f64 {
        self.layer_y(0)
    }

    /// Nearest layer for a y coordinate, rounding half away from zero.
    ///
    /// Positions below the bottom layer map to positive layers by
    /// magnitude.
    pub fn layer_for_y(&self, y: f64) -> u32 {
        let relative = (y - (self.origin.y + self.vertical_offset)) / self.layer_spacing();
        relative.round().abs() as u32
    }

    /// Every slot in stacking order: layer by layer from the bottom, left
    /// to right within a layer. The sequence is unbounded.
    pub fn slots(&self) -> Slots<'_> {
        let usable = self.usable_width();
        Slots {
            layout: self,
            layer: 0,
            index: 0,
            capacity: self.base_capacity(),
            edge_offset: (self.width - usable) / 2.0 + self.sphere_radius,
        }
    }

    /// Number of `occupied` destinations that hold up a sphere at `at`:
    /// strictly lower and closer than three radii.
    pub fn supporting_count(&self, occupied: &[Vec2], at: Vec2) -> usize {
        let reach = self.sphere_radius * SUPPORT_DISTANCE_FACTOR;
        occupied
            .iter()
            .filter(|d| d.y < at.y && d.distance(at) < reach)
            .count()
    }

    /// Whether a sphere at `at` would rest on at least two others.
    pub fn is_supported(&self, occupied: &[Vec2], at: Vec2) -> bool {
        self.supporting_count(occupied, at) >= MIN_SUPPORTERS
    }

    /// Whether a sphere with this destination hangs over a gap.
    ///
    /// The bottom-layer test is an exact comparison against
    /// [`bottom_y`](Self::bottom_y).
    pub fn is_dangling(&self, occupied: &[Vec2], destination: Vec2) -> bool {
        destination.y != self.bottom_y() && !self.is_supported(occupied, destination)
    }

    /// First unoccupied slot in stacking order. Support is not checked;
    /// filling in order keeps every layer resting on a full layer below.
    pub fn first_open(&self, occupied: &[Vec2]) -> Vec2 {
        // At most `occupied.len()` slots can be taken.
        self.slots()
            .take(occupied.len() + 1)
            .find(|s| is_open(occupied, s.position))
            .map_or(Vec2::ZERO, |s| s.position)
    }

    /// Closest stable open slot to `reference`, or `None` if there is none.
    ///
    /// Candidates are the open slots on layers up to one above the highest
    /// occupied layer. Layer 0 slots always qualify; higher slots need
    /// [`MIN_SUPPORTERS`]. Distance is Euclidean and ties go to the slot
    /// that comes first in stacking order.
    pub fn nearest_open(&self, occupied: &[Vec2], reference: Vec2) -> Option<Vec2> {
        let highest = occupied
            .iter()
            .map(|d| self.layer_for_y(d.y))
            .max()
            .unwrap_or(0);
        // Off-lattice destinations can report absurd layers; nothing above
        // a pyramid topped by a full column can be supported.
        let ceiling = self
            .base_capacity()
            .saturating_add(u32::try_from(occupied.len()).unwrap_or(u32::MAX));
        let top = highest.saturating_add(1).min(ceiling);

        self.slots()
            .take_while(|s| s.layer <= top)
            .filter(|s| is_open(occupied, s.position))
            .filter(|s| s.layer == 0 || self.is_supported(occupied, s.position))
            .map(|s| (s.position, s.position.distance(reference)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(position, _)| position)
    }
}

fn is_open(occupied: &[Vec2], position: Vec2) -> bool {
    !occupied.iter().any(|d| *d == position)
}

/// Iterator over [`StackLayout::slots`].
#[derive(Clone, Debug)]
pub struct Slots<'a> {
    layout: &'a StackLayout,
    layer: u32,
    index: u32,
    capacity: u32,
    edge_offset: f64,
}

impl Iterator for Slots<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        let l = self.layout;
        let position = Vec2::new(
            l.origin.x - l.width / 2.0
                + self.edge_offset
                + f64::from(self.index) * 2.0 * l.sphere_radius,
            l.layer_y(self.layer),
        );
        let slot = Slot {
            layer: self.layer,
            index: self.index,
            position,
        };

        self.index += 1;
        if self.index >= self.capacity {
            self.layer = self.layer.saturating_add(1);
            self.index = 0;
            if self.capacity > 1 {
                self.capacity -= 1;
                self.edge_offset += l.sphere_radius;
            }
        }
        Some(slot)
    }
}
