//! The sphere bucket: membership, placement, and relayout.

use crate::bucket::Bucket;
use crate::config::SphereBucketConfig;
use crate::error::{BucketError, ConfigError};
use crate::layout::StackLayout;
use bucket_core::{
    ContainerId, GrabEvent, ListenerId, Particle, ParticleContainer, ParticleId, ParticleStore,
    Vec2,
};
use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

/// Occupied destinations, gathered fresh for every search.
pub(crate) type Occupancy = SmallVec<[Vec2; 32]>;

/// A bucket that stacks same-radius spheres in a triangular pyramid.
///
/// The bucket holds [`ParticleId`]s, never particles. Every operation that
/// reads or moves particles borrows the host's [`ParticleStore`]. Slot
/// occupancy and support are computed from each member's `destination`,
/// so a sphere still animating toward its slot already occupies it.
///
/// When a sphere is removed, spheres left hanging over the gap fall to
/// the nearest stable slot, repeatedly, until nothing dangles.
///
/// # Examples
///
/// ```
/// use bucket_core::{Particle, ParticleStore};
/// use bucket_pool::{BasicParticle, ParticlePool};
/// use bucket_stack::{SphereBucket, SphereBucketConfig};
///
/// let mut pool = ParticlePool::new();
/// let mut bucket = SphereBucket::new(SphereBucketConfig::default()).unwrap();
///
/// let a = pool.insert(BasicParticle::at(0.0, 100.0));
/// let slot = bucket.add_particle_first_open(&mut pool, a, false).unwrap();
/// assert!(bucket.contains_particle(a));
/// assert_eq!(pool.get(a).unwrap().position(), slot);
///
/// // Grabbing the sphere takes it out of the bucket.
/// assert_eq!(bucket.extract_closest_particle(&mut pool, slot), Some(a));
/// assert!(bucket.is_empty());
/// assert!(pool.get(a).unwrap().user_controlled().get());
/// ```
#[derive(Debug)]
pub struct SphereBucket {
    id: ContainerId,
    bucket: Bucket,
    layout: StackLayout,
    /// Members in insertion order, each with the token of the
    /// subscription installed on its user-control flag.
    particles: IndexMap<ParticleId, ListenerId>,
}

impl SphereBucket {
    /// Create an empty bucket.
    ///
    /// Returns `Err` if the config fails [`SphereBucketConfig::validate`].
    pub fn new(config: SphereBucketConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = StackLayout::new(
            config.position,
            config.size.width,
            config.sphere_radius,
            config.usable_width_proportion,
            config.resolved_vertical_offset(),
        );
        Ok(Self {
            id: ContainerId::next(),
            bucket: Bucket::new(config.position, config.size, config.invert_y),
            layout,
            particles: IndexMap::new(),
        })
    }

    /// Unique ID; subscriptions installed by this bucket carry it.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Footprint geometry.
    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }

    /// Stacking lattice.
    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    /// Radius every member is assumed to have.
    pub fn sphere_radius(&self) -> f64 {
        self.layout.sphere_radius()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the bucket holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Members in insertion order.
    pub fn particles(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.particles.keys().copied()
    }

    /// Whether `id` is a member.
    pub fn contains_particle(&self, id: ParticleId) -> bool {
        self.particles.contains_key(&id)
    }

    /// Add a particle at the first open slot in stacking order.
    ///
    /// Sets the particle's destination to the slot. Unless `animate` is
    /// set, its position jumps there too; otherwise moving it is up to the
    /// caller. Returns the slot.
    pub fn add_particle_first_open<S: ParticleStore>(
        &mut self,
        store: &mut S,
        id: ParticleId,
        animate: bool,
    ) -> Result<Vec2, BucketError> {
        self.check_addable(store, id)?;
        let slot = self.layout.first_open(&self.destinations(store));
        self.place(store, id, slot, animate)?;
        Ok(slot)
    }

    /// Add a particle at the stable open slot nearest its current
    /// destination, i.e. where it is being dropped from.
    ///
    /// Placement and `animate` behave as in
    /// [`add_particle_first_open`](Self::add_particle_first_open).
    pub fn add_particle_nearest_open<S: ParticleStore>(
        &mut self,
        store: &mut S,
        id: ParticleId,
        animate: bool,
    ) -> Result<Vec2, BucketError> {
        let from = self.check_addable(store, id)?;
        let slot = self.nearest_open_position(store, from);
        self.place(store, id, slot, animate)?;
        Ok(slot)
    }

    /// Remove a member and, unless `skip_layout` is set, let the spheres
    /// it was holding up fall.
    ///
    /// Removing a non-member is a contract violation: it panics in debug
    /// builds and does nothing in release builds.
    pub fn remove_particle<S: ParticleStore>(
        &mut self,
        store: &mut S,
        id: ParticleId,
        skip_layout: bool,
    ) {
        debug_assert!(
            self.contains_particle(id),
            "attempt made to remove particle {id} that is not in bucket {}",
            self.id
        );
        let Some(listener) = self.particles.shift_remove(&id) else {
            return;
        };
        if let Some(particle) = store.get_mut(id) {
            particle.user_controlled_mut().unsubscribe(listener);
        }
        trace!(container = %self.id, particle = %id, skip_layout, "particle removed");

        if !skip_layout {
            self.relayout(store);
        }
    }

    /// Grab the member whose current position is nearest `location`.
    ///
    /// The member is marked user-controlled, and the resulting
    /// notification removes it from this bucket with relayout. Ties go to
    /// the earliest member. Returns `None` when the bucket is empty.
    pub fn extract_closest_particle<S: ParticleStore>(
        &mut self,
        store: &mut S,
        location: Vec2,
    ) -> Option<ParticleId> {
        let closest = self
            .particles
            .keys()
            .filter_map(|&id| {
                store
                    .get(id)
                    .map(|p| (id, p.position().distance(location)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)?;

        let events = store
            .set_user_controlled(closest, true)
            .unwrap_or_default();
        for event in &events {
            self.handle_grab(store, event);
        }
        debug_assert!(
            !self.contains_particle(closest) || events.is_empty(),
            "particle {closest} still in bucket after being grabbed"
        );
        Some(closest)
    }

    /// Deliver a user-control notification.
    ///
    /// Removes the particle, with relayout, if the event was raised by a
    /// subscription this bucket installed and still holds. Returns whether
    /// the event was consumed.
    pub fn handle_grab<S: ParticleStore>(&mut self, store: &mut S, event: &GrabEvent) -> bool {
        if event.owner != self.id || self.particles.get(&event.particle) != Some(&event.listener) {
            return false;
        }
        self.remove_particle(store, event.particle, false);
        true
    }

    /// Drop every member and its subscription. No relayout.
    pub fn reset<S: ParticleStore>(&mut self, store: &mut S) {
        for (id, listener) in self.particles.drain(..) {
            if let Some(particle) = store.get_mut(id) {
                particle.user_controlled_mut().unsubscribe(listener);
            }
        }
        trace!(container = %self.id, "bucket reset");
    }

    /// First open slot in stacking order.
    pub fn first_open_position<S: ParticleStore>(&self, store: &S) -> Vec2 {
        self.layout.first_open(&self.destinations(store))
    }

    /// Stable open slot nearest `reference`, or the origin if the pyramid
    /// and the column above it are full.
    pub fn nearest_open_position<S: ParticleStore>(&self, store: &S, reference: Vec2) -> Vec2 {
        self.layout
            .nearest_open(&self.destinations(store), reference)
            .unwrap_or(Vec2::ZERO)
    }

    pub(crate) fn destinations<S: ParticleStore>(&self, store: &S) -> Occupancy {
        self.particles
            .keys()
            .filter_map(|&id| store.get(id))
            .map(|p| p.destination())
            .collect()
    }

    /// Returns the particle's current destination.
    fn check_addable<S: ParticleStore>(&self, store: &S, id: ParticleId) -> Result<Vec2, BucketError> {
        if self.contains_particle(id) {
            return Err(BucketError::AlreadyContained { id });
        }
        store
            .get(id)
            .map(|p| p.destination())
            .ok_or(BucketError::UnknownParticle { id })
    }

    fn place<S: ParticleStore>(
        &mut self,
        store: &mut S,
        id: ParticleId,
        slot: Vec2,
        animate: bool,
    ) -> Result<(), BucketError> {
        let particle = store
            .get_mut(id)
            .ok_or(BucketError::UnknownParticle { id })?;
        particle.set_destination(slot);
        self.register(id, particle, animate);
        Ok(())
    }

    /// Record membership and subscribe to the particle's user-control flag.
    pub(crate) fn register<P: Particle>(&mut self, id: ParticleId, particle: &mut P, animate: bool) {
        if !animate {
            particle.set_position(particle.destination());
        }
        let listener = particle.user_controlled_mut().subscribe(self.id);
        self.particles.insert(id, listener);
        trace!(
            container = %self.id,
            particle = %id,
            destination = ?particle.destination(),
            animate,
            "particle added"
        );
    }

    /// Let dangling members fall until none are left.
    ///
    /// Each pass relocates the first dangling member in insertion order to
    /// the nearest stable slot, then rescans against the new occupancy,
    /// since one sphere falling can leave others hanging.
    fn relayout<S: ParticleStore>(&mut self, store: &mut S) {
        let n = self.particles.len();
        let budget = n * (n + 1);
        let mut moves = 0usize;
        // Dangling members with no stable slot left; they stay put.
        let mut stranded: SmallVec<[ParticleId; 4]> = SmallVec::new();

        loop {
            let occupied = self.destinations(store);
            let dangling = self
                .particles
                .keys()
                .copied()
                .filter(|id| !stranded.contains(id))
                .find_map(|id| {
                    let destination = store.get(id)?.destination();
                    self.layout
                        .is_dangling(&occupied, destination)
                        .then_some((id, destination))
                });
            let Some((id, from)) = dangling else {
                break;
            };

            match self.layout.nearest_open(&occupied, from) {
                Some(slot) => {
                    if let Some(particle) = store.get_mut(id) {
                        particle.set_destination(slot);
                    }
                    moves += 1;
                    debug!(container = %self.id, particle = %id, ?from, to = ?slot, "particle fell");
                }
                None => {
                    warn!(container = %self.id, particle = %id, ?from, "no stable slot for dangling particle");
                    stranded.push(id);
                }
            }

            if moves > budget {
                warn!(container = %self.id, moves, "relayout did not settle");
                break;
            }
        }
    }
}

/// Generic container access. Adding drops the particle into the nearest
/// stable slot from where it currently is, animated.
///
/// Placing a sphere never moves the ones already stacked, so `skip_layout`
/// on add has nothing to skip.
impl<S: ParticleStore> ParticleContainer<S> for SphereBucket {
    type Error = BucketError;

    fn add_particle(
        &mut self,
        store: &mut S,
        id: ParticleId,
        _skip_layout: bool,
    ) -> Result<(), BucketError> {
        self.add_particle_nearest_open(store, id, true).map(|_| ())
    }

    fn remove_particle(&mut self, store: &mut S, id: ParticleId) {
        SphereBucket::remove_particle(self, store, id, false);
    }

    fn includes(&self, id: ParticleId) -> bool {
        self.contains_particle(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucket_core::Dimension2;
    use bucket_pool::{BasicParticle, ParticlePool};
    use proptest::prelude::*;

    /// Bucket at the origin, 200 wide, radius 10, bottom layer at y = 0.
    /// Layer 0 has 9 slots at x = -80, -60, ..., 80.
    fn bucket() -> SphereBucket {
        SphereBucket::new(SphereBucketConfig {
            vertical_offset: Some(0.0),
            ..Default::default()
        })
        .unwrap()
    }

    /// Bucket whose layer 0 holds exactly three slots.
    fn narrow_bucket() -> SphereBucket {
        SphereBucket::new(SphereBucketConfig {
            size: Dimension2::new(80.0, 50.0),
            vertical_offset: Some(0.0),
            ..Default::default()
        })
        .unwrap()
    }

    fn fill(
        bucket: &mut SphereBucket,
        pool: &mut ParticlePool,
        n: usize,
    ) -> Vec<ParticleId> {
        (0..n)
            .map(|_| {
                let id = pool.insert(BasicParticle::at(0.0, 500.0));
                bucket.add_particle_first_open(pool, id, false).unwrap();
                id
            })
            .collect()
    }

    fn destination(pool: &ParticlePool, id: ParticleId) -> Vec2 {
        pool.get(id).unwrap().destination()
    }

    fn layer_of(bucket: &SphereBucket, pool: &ParticlePool, id: ParticleId) -> u32 {
        bucket.layout().layer_for_y(destination(pool, id).y)
    }

    fn assert_settled(bucket: &SphereBucket, pool: &ParticlePool) {
        let occupied = bucket.destinations(pool);
        for id in bucket.particles() {
            let d = destination(pool, id);
            assert!(
                !bucket.layout().is_dangling(&occupied, d),
                "particle {id} dangling at {d:?}"
            );
        }
        for (i, a) in occupied.iter().enumerate() {
            assert!(!occupied[i + 1..].contains(a), "two particles share {a:?}");
        }
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn new_rejects_invalid_config() {
        let result = SphereBucket::new(SphereBucketConfig {
            sphere_radius: 0.0,
            ..Default::default()
        });
        assert!(matches!(result, Err(ConfigError::InvalidSphereRadius { .. })));
    }

    #[test]
    fn default_offset_nests_bottom_row() {
        let b = SphereBucket::new(SphereBucketConfig::default()).unwrap();
        assert_eq!(b.layout().bottom_y(), -4.0);
        assert_eq!(b.sphere_radius(), 10.0);
    }

    // ── Adding ──────────────────────────────────────────────────

    #[test]
    fn add_first_open_without_animation_moves_position() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let id = pool.insert(BasicParticle::at(0.0, 300.0));
        let slot = b.add_particle_first_open(&mut pool, id, false).unwrap();
        assert_eq!(slot, Vec2::new(-80.0, 0.0));
        assert_eq!(pool.get(id).unwrap().position(), slot);
        assert_eq!(destination(&pool, id), slot);
    }

    #[test]
    fn add_first_open_with_animation_leaves_position() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let id = pool.insert(BasicParticle::at(0.0, 300.0));
        let slot = b.add_particle_first_open(&mut pool, id, true).unwrap();
        assert_eq!(pool.get(id).unwrap().position(), Vec2::new(0.0, 300.0));
        assert_eq!(destination(&pool, id), slot);
    }

    #[test]
    fn add_nearest_open_uses_incoming_destination() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let id = pool.insert(BasicParticle::at(38.0, 60.0));
        let slot = b.add_particle_nearest_open(&mut pool, id, true).unwrap();
        assert_eq!(slot, Vec2::new(40.0, 0.0));
    }

    #[test]
    fn add_nearest_open_lands_on_supported_slot() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        fill(&mut b, &mut pool, 9);
        let id = pool.insert(BasicParticle::at(-10.0, 40.0));
        let slot = b.add_particle_nearest_open(&mut pool, id, false).unwrap();
        assert_eq!(b.layout().layer_for_y(slot.y), 1);
        assert_eq!(slot.x, -10.0);
    }

    #[test]
    fn add_rejects_duplicates_and_unknown_ids() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let id = pool.insert(BasicParticle::default());
        b.add_particle_first_open(&mut pool, id, false).unwrap();
        assert_eq!(
            b.add_particle_first_open(&mut pool, id, false),
            Err(BucketError::AlreadyContained { id })
        );
        let ghost = ParticleId(999);
        assert_eq!(
            b.add_particle_nearest_open(&mut pool, ghost, false),
            Err(BucketError::UnknownParticle { id: ghost })
        );
        assert_eq!(b.len(), 1);
        assert_eq!(pool.get(id).unwrap().user_controlled().listener_count(), 1);
    }

    #[test]
    fn pyramid_layer_counts() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let ids = fill(&mut b, &mut pool, 10);
        let on_layer = |layer| ids.iter().filter(|&&id| layer_of(&b, &pool, id) == layer).count();
        assert_eq!(on_layer(0), 9);
        assert_eq!(on_layer(1), 1);
    }

    // ── Removing ────────────────────────────────────────────────

    #[test]
    fn membership_round_trip() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let id = pool.insert(BasicParticle::default());
        b.add_particle_first_open(&mut pool, id, false).unwrap();
        assert!(b.contains_particle(id));
        b.remove_particle(&mut pool, id, false);
        assert!(!b.contains_particle(id));
        assert_eq!(pool.get(id).unwrap().user_controlled().listener_count(), 0);
    }

    #[test]
    fn removing_support_drops_upper_particles() {
        let mut pool = ParticlePool::new();
        let mut b = narrow_bucket();
        // Layer 0: a b c; layer 1: d (on a,b) e (on b,c).
        let ids = fill(&mut b, &mut pool, 5);
        let (a, d, e) = (ids[0], ids[3], ids[4]);
        assert_eq!(layer_of(&b, &pool, d), 1);
        assert_eq!(layer_of(&b, &pool, e), 1);

        b.remove_particle(&mut pool, a, false);

        assert_settled(&b, &pool);
        assert_eq!(layer_of(&b, &pool, d), 0);
        assert_eq!(layer_of(&b, &pool, e), 1);
    }

    #[test]
    fn removing_middle_support_cascades() {
        let mut pool = ParticlePool::new();
        let mut b = narrow_bucket();
        // Full pyramid: 3 + 2 + 1.
        let ids = fill(&mut b, &mut pool, 6);
        b.remove_particle(&mut pool, ids[1], false);
        assert_settled(&b, &pool);
        let layer0 = b.particles().filter(|&id| layer_of(&b, &pool, id) == 0).count();
        assert_eq!(layer0, 3);
        assert_eq!(b.len(), 5);
    }

    #[test]
    fn skip_layout_leaves_particles_dangling() {
        let mut pool = ParticlePool::new();
        let mut b = narrow_bucket();
        let ids = fill(&mut b, &mut pool, 4);
        let before = destination(&pool, ids[3]);
        b.remove_particle(&mut pool, ids[0], true);
        assert_eq!(destination(&pool, ids[3]), before);
        let occupied = b.destinations(&pool);
        assert!(b.layout().is_dangling(&occupied, before));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not in bucket")]
    fn removing_non_member_panics_in_debug() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let id = pool.insert(BasicParticle::default());
        b.remove_particle(&mut pool, id, false);
    }

    // ── Extraction and grabs ────────────────────────────────────

    #[test]
    fn extract_from_empty_bucket_is_none() {
        let mut pool: ParticlePool = ParticlePool::new();
        let mut b = bucket();
        assert_eq!(b.extract_closest_particle(&mut pool, Vec2::ZERO), None);
    }

    #[test]
    fn extract_uses_current_position_not_destination() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let near = pool.insert(BasicParticle::at(500.0, 500.0));
        let far = pool.insert(BasicParticle::at(-500.0, 500.0));
        // Animated: positions stay where the particles were created.
        b.add_particle_first_open(&mut pool, near, true).unwrap();
        b.add_particle_first_open(&mut pool, far, true).unwrap();

        let got = b.extract_closest_particle(&mut pool, Vec2::new(400.0, 400.0));
        assert_eq!(got, Some(near));
        assert!(!b.contains_particle(near));
        assert!(b.contains_particle(far));
        assert!(pool.get(near).unwrap().user_controlled().get());
        assert_eq!(pool.get(near).unwrap().user_controlled().listener_count(), 0);
    }

    #[test]
    fn extract_relayouts_remaining_particles() {
        let mut pool = ParticlePool::new();
        let mut b = narrow_bucket();
        let ids = fill(&mut b, &mut pool, 4);
        let a_slot = destination(&pool, ids[0]);
        assert_eq!(b.extract_closest_particle(&mut pool, a_slot), Some(ids[0]));
        assert_settled(&b, &pool);
    }

    #[test]
    fn external_grab_removes_through_handle_grab() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let ids = fill(&mut b, &mut pool, 3);
        let events = pool.set_user_controlled(ids[1], true).unwrap();
        assert_eq!(events.len(), 1);
        assert!(b.handle_grab(&mut pool, &events[0]));
        assert!(!b.contains_particle(ids[1]));
        // Delivering twice is a no-op.
        assert!(!b.handle_grab(&mut pool, &events[0]));
    }

    #[test]
    fn grab_for_other_bucket_is_ignored() {
        let mut pool = ParticlePool::new();
        let mut ours = bucket();
        let mut theirs = bucket();
        let a = pool.insert(BasicParticle::default());
        let b = pool.insert(BasicParticle::default());
        ours.add_particle_first_open(&mut pool, a, false).unwrap();
        theirs.add_particle_first_open(&mut pool, b, false).unwrap();

        let events = pool.set_user_controlled(b, true).unwrap();
        assert!(!ours.handle_grab(&mut pool, &events[0]));
        assert!(theirs.handle_grab(&mut pool, &events[0]));
        assert!(theirs.is_empty());
        assert_eq!(ours.len(), 1);
    }

    // ── Reset ───────────────────────────────────────────────────

    #[test]
    fn reset_empties_and_unsubscribes() {
        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let ids = fill(&mut b, &mut pool, 12);
        let before: Vec<Vec2> = ids.iter().map(|&id| destination(&pool, id)).collect();

        b.reset(&mut pool);

        assert!(b.is_empty());
        for (i, &id) in ids.iter().enumerate() {
            assert!(!b.contains_particle(id));
            assert_eq!(pool.get(id).unwrap().user_controlled().listener_count(), 0);
            // No relayout on reset.
            assert_eq!(destination(&pool, id), before[i]);
        }
        // Grabbing a former member no longer reaches the bucket.
        assert!(pool.set_user_controlled(ids[0], true).unwrap().is_empty());
    }

    // ── ParticleContainer ───────────────────────────────────────

    #[test]
    fn particle_container_contract() {
        fn drop_in<C: ParticleContainer<ParticlePool>>(
            container: &mut C,
            pool: &mut ParticlePool,
            id: ParticleId,
        ) -> Result<(), C::Error> {
            container.add_particle(pool, id, false)
        }

        let mut pool = ParticlePool::new();
        let mut b = bucket();
        let id = pool.insert(BasicParticle::at(75.0, 200.0));
        drop_in(&mut b, &mut pool, id).unwrap();
        assert!(ParticleContainer::<ParticlePool>::includes(&b, id));
        assert_eq!(destination(&pool, id), Vec2::new(80.0, 0.0));
        // Animated drop: still at the release point.
        assert_eq!(pool.get(id).unwrap().position(), Vec2::new(75.0, 200.0));

        ParticleContainer::remove_particle(&mut b, &mut pool, id);
        assert!(!b.contains_particle(id));
    }

    #[test]
    fn container_add_leaves_stacked_particles_alone() {
        for skip_layout in [false, true] {
            let mut pool = ParticlePool::new();
            let mut b = narrow_bucket();
            let ids = fill(&mut b, &mut pool, 4);
            let before: Vec<Vec2> = ids.iter().map(|&id| destination(&pool, id)).collect();

            let id = pool.insert(BasicParticle::at(15.0, 40.0));
            ParticleContainer::add_particle(&mut b, &mut pool, id, skip_layout).unwrap();

            // Lands on the open layer 1 slot resting on b and c.
            assert_eq!(destination(&pool, id), Vec2::new(10.0, 17.32));
            let after: Vec<Vec2> = ids.iter().map(|&id| destination(&pool, id)).collect();
            assert_eq!(after, before);
        }
    }

    // ── Invariants under random operation sequences ─────────────

    #[derive(Clone, Debug)]
    enum Op {
        AddFirst,
        AddNearest(f64, f64),
        Remove(usize),
        Extract(f64, f64),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::AddFirst),
            3 => (-120.0f64..120.0, -20.0f64..120.0).prop_map(|(x, y)| Op::AddNearest(x, y)),
            2 => (0usize..64).prop_map(Op::Remove),
            1 => (-120.0f64..120.0, -20.0f64..120.0).prop_map(|(x, y)| Op::Extract(x, y)),
        ]
    }

    proptest! {
        #[test]
        fn no_overlap_and_only_overflow_dangles(ops in proptest::collection::vec(arb_op(), 1..160)) {
            let mut pool = ParticlePool::new();
            let mut b = bucket();
            // 9 + 8 + ... + 1 = 45 stable slots.
            let capacity = b.layout().pyramid_capacity() as usize;
            for op in ops {
                match op {
                    // First-open keeps going past the pyramid into the apex column.
                    Op::AddFirst if b.len() < capacity + 5 => {
                        let id = pool.insert(BasicParticle::at(0.0, 200.0));
                        b.add_particle_first_open(&mut pool, id, false).unwrap();
                    }
                    // Nearest-open only while a stable slot is guaranteed.
                    Op::AddNearest(x, y) if b.len() < 40 => {
                        let id = pool.insert(BasicParticle::at(x, y));
                        b.add_particle_nearest_open(&mut pool, id, true).unwrap();
                    }
                    Op::Remove(i) if !b.is_empty() => {
                        let id = b.particles().nth(i % b.len()).unwrap();
                        b.remove_particle(&mut pool, id, false);
                    }
                    Op::Extract(x, y) => {
                        let before = b.len();
                        let got = b.extract_closest_particle(&mut pool, Vec2::new(x, y));
                        prop_assert_eq!(got.is_some(), before > 0);
                        prop_assert_eq!(b.len(), before.saturating_sub(1));
                    }
                    _ => {}
                }
                let occupied = b.destinations(&pool);
                for (i, a) in occupied.iter().enumerate() {
                    prop_assert!(!occupied[i + 1..].contains(a));
                }
                // Column spheres above a full pyramid are the only ones left hanging.
                let dangling = occupied
                    .iter()
                    .filter(|d| b.layout().is_dangling(&occupied, **d))
                    .count();
                prop_assert_eq!(dangling, b.len().saturating_sub(capacity));
            }
        }
    }
}
