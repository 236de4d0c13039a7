//! Bucket: sphere-stacking containers for interactive particle simulations.
//!
//! This is the facade crate that re-exports the public API of the bucket
//! sub-crates. For most users, adding `bucket` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use bucket::prelude::*;
//!
//! let mut pool = ParticlePool::new();
//! let mut bucket = SphereBucket::new(SphereBucketConfig::default()).unwrap();
//!
//! // Fill the bottom layer and put one sphere on top.
//! let ids: Vec<ParticleId> = (0..10)
//!     .map(|_| {
//!         let id = pool.insert(BasicParticle::at(0.0, 200.0));
//!         bucket.add_particle_first_open(&mut pool, id, false).unwrap();
//!         id
//!     })
//!     .collect();
//! let top = pool.get(ids[9]).unwrap().destination();
//! assert!(top.y > bucket.layout().bottom_y());
//!
//! // Taking away one of its supporters makes it fall.
//! bucket.remove_particle(&mut pool, ids[0], false);
//! assert_eq!(pool.get(ids[9]).unwrap().destination().y, bucket.layout().bottom_y());
//!
//! // A host drag raises a grab event; the owning bucket lets go.
//! let events = pool.set_user_controlled(ids[4], true).unwrap();
//! assert!(bucket.handle_grab(&mut pool, &events[0]));
//! assert!(!bucket.contains_particle(ids[4]));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `bucket-core` | IDs, geometry, the `Particle` trait, user-control subscriptions |
//! | [`pool`] | `bucket-pool` | `BasicParticle` and the `ParticlePool` store |
//! | [`stack`] | `bucket-stack` | `SphereBucket`, its layout, config, and snapshots |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`bucket-core`).
///
/// Contains [`types::Particle`], the [`types::UserControlled`] flag, and
/// the [`types::ParticleStore`] and [`types::ParticleContainer`] seams.
pub use bucket_core as types;

/// Particle storage (`bucket-pool`).
pub use bucket_pool as pool;

/// Sphere-stacking containers (`bucket-stack`).
///
/// [`stack::SphereBucket`] is the container; [`stack::StackLayout`]
/// exposes the slot lattice it stacks on.
pub use bucket_stack as stack;

/// Common imports for typical bucket usage.
///
/// ```rust
/// use bucket::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use bucket_core::{
        Dimension2, GrabEvent, Particle, ParticleContainer, ParticleId, ParticleStore,
        UserControlled, Vec2,
    };

    // Storage
    pub use bucket_pool::{BasicParticle, ParticlePool};

    // Containers
    pub use bucket_stack::{
        BucketError, BucketState, ConfigError, SphereBucket, SphereBucketConfig, StackLayout,
    };
}
