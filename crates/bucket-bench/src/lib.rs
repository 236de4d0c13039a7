//! Benchmark profiles for the sphere-stacking bucket.
//!
//! - [`wide_profile`]: a bucket whose bottom layer holds `base` spheres
//! - [`filled_bucket`]: a bucket filled by first-open placement
//! - [`drop_points`]: deterministic drop locations above a bucket

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use bucket_core::{Dimension2, ParticleId, Vec2};
use bucket_pool::{BasicParticle, ParticlePool};
use bucket_stack::{SphereBucket, SphereBucketConfig};

/// Sphere radius used by every profile.
pub const RADIUS: f64 = 10.0;

/// Config for a bucket at the origin whose bottom layer holds exactly
/// `base` spheres of [`RADIUS`], with the bottom layer at y = 0.
///
/// The full pyramid holds `base * (base + 1) / 2` spheres.
pub fn wide_profile(base: u32) -> SphereBucketConfig {
    // Usable width is `width - 2r`; add one radius of slack so the floor
    // lands on `base`.
    let width = f64::from(base + 1) * 2.0 * RADIUS + RADIUS;
    SphereBucketConfig {
        size: Dimension2::new(width, 50.0),
        sphere_radius: RADIUS,
        vertical_offset: Some(0.0),
        ..Default::default()
    }
}

/// Build a bucket from `config` and fill it with `n` particles by
/// first-open placement.
pub fn filled_bucket(
    config: SphereBucketConfig,
    n: usize,
) -> (SphereBucket, ParticlePool, Vec<ParticleId>) {
    let mut bucket = SphereBucket::new(config).unwrap();
    let mut pool = ParticlePool::new();
    let ids = (0..n)
        .map(|_| {
            let id = pool.insert(BasicParticle::default());
            bucket.add_particle_first_open(&mut pool, id, false).unwrap();
            id
        })
        .collect();
    (bucket, pool, ids)
}

/// `n` deterministic points spread over `[-half_width, half_width]` and
/// up to `height` above the origin.
pub fn drop_points(n: usize, half_width: f64, height: f64, seed: u64) -> Vec<Vec2> {
    let mut state = seed;
    let mut next = || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..n)
        .map(|_| {
            let x = (next() * 2.0 - 1.0) * half_width;
            let y = next() * height;
            Vec2::new(x, y)
        })
        .collect()
}
