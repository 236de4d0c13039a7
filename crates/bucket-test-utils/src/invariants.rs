//! Stacking invariant checks.
//!
//! These take raw geometry (bottom-layer y and sphere radius) rather than
//! a layout, so they check the container against an independent reading
//! of the rules.

use bucket_core::Vec2;

/// Layer pitch ratio used by the stacking lattice.
const LAYER_SPACING_FACTOR: f64 = 0.866;

/// Assert that no two destinations coincide.
pub fn assert_no_overlap(destinations: &[Vec2]) {
    for (i, a) in destinations.iter().enumerate() {
        for b in &destinations[i + 1..] {
            assert!(a != b, "two particles share destination {a:?}");
        }
    }
}

/// Assert that every destination above the bottom layer rests on at least
/// two strictly lower destinations closer than three radii.
pub fn assert_no_dangling(destinations: &[Vec2], bottom_y: f64, sphere_radius: f64) {
    for d in destinations {
        if d.y == bottom_y {
            continue;
        }
        let supporters = destinations
            .iter()
            .filter(|o| o.y < d.y && o.distance(*d) < 3.0 * sphere_radius)
            .count();
        assert!(
            supporters >= 2,
            "particle at {d:?} has {supporters} supporter(s), expected at least 2"
        );
    }
}

/// Count destinations per layer. Index `i` of the result is the number of
/// particles on layer `i`.
pub fn layer_counts(destinations: &[Vec2], bottom_y: f64, sphere_radius: f64) -> Vec<usize> {
    let pitch = sphere_radius * 2.0 * LAYER_SPACING_FACTOR;
    let mut counts = Vec::new();
    for d in destinations {
        let layer = ((d.y - bottom_y) / pitch).round().abs() as usize;
        if counts.len() <= layer {
            counts.resize(layer + 1, 0);
        }
        counts[layer] += 1;
    }
    counts
}
