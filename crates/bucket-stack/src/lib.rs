//! Sphere-stacking bucket containers.
//!
//! A [`SphereBucket`] holds same-radius spheres and stacks them in a
//! triangular pyramid inside its footprint. Spheres are placed either at
//! the first open slot in stacking order or at the stable open slot
//! nearest to where they are dropped. When a sphere is removed, any
//! sphere left hanging over the gap falls until the stack is stable
//! again.
//!
//! # Modules
//!
//! - [`layout`]: the slot lattice ([`StackLayout`]) and the open-slot searches
//! - [`sphere`]: the container itself
//! - [`bucket`]: footprint geometry shared by all buckets
//! - [`config`]: construction parameters and validation
//! - [`state`]: membership snapshots
//!
//! # Known limitations
//!
//! Once the pyramid is full, further first-open placements rise as a
//! one-wide column above the apex instead of failing.
//!
//! Column spheres never have two supporters. When a removal leaves a
//! sphere hanging and every stable slot is already taken, that sphere
//! keeps its destination and stays dangling; it is not moved to the
//! origin. A `warn!` is logged through `tracing` when this happens.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bucket;
pub mod config;
pub mod error;
pub mod layout;
pub mod sphere;
pub mod state;

pub use bucket::Bucket;
pub use config::SphereBucketConfig;
pub use error::{BucketError, ConfigError};
pub use layout::{Slot, StackLayout};
pub use sphere::SphereBucket;
pub use state::BucketState;
