//! The particle capability and its observable user-control flag.

use crate::geometry::Vec2;
use crate::id::{ContainerId, ListenerId};
use smallvec::SmallVec;

/// A registered interest in a [`UserControlled`] flag becoming `true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    /// Token identifying this subscription on its flag.
    pub id: ListenerId,
    /// Container that installed the subscription.
    pub owner: ContainerId,
}

/// Boolean "held by the user" flag with explicit subscriptions.
///
/// Listeners are not callbacks. [`set`](Self::set) returns the
/// subscriptions that should be notified, and the caller delivers them to
/// their owning containers. Every [`subscribe`](Self::subscribe) hands out a
/// [`ListenerId`] that must be passed back to
/// [`unsubscribe`](Self::unsubscribe), so a leaked subscription shows up in
/// [`listener_count`](Self::listener_count).
///
/// # Examples
///
/// ```
/// use bucket_core::{ContainerId, UserControlled};
///
/// let owner = ContainerId::next();
/// let mut flag = UserControlled::default();
/// let token = flag.subscribe(owner);
///
/// let fired = flag.set(true);
/// assert_eq!(fired.len(), 1);
/// assert_eq!(fired[0].id, token);
///
/// // Already true: no transition, nothing fires.
/// assert!(flag.set(true).is_empty());
///
/// assert!(flag.unsubscribe(token));
/// assert_eq!(flag.listener_count(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct UserControlled {
    value: bool,
    subscriptions: SmallVec<[Subscription; 2]>,
    next_listener: u64,
}

impl UserControlled {
    /// Create a flag with the given initial value and no subscriptions.
    pub fn new(value: bool) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Current value.
    pub fn get(&self) -> bool {
        self.value
    }

    /// Set the flag.
    ///
    /// Returns the subscriptions to notify when the flag transitions from
    /// `false` to `true`, in subscription order. Any other write returns an
    /// empty list.
    pub fn set(&mut self, value: bool) -> SmallVec<[Subscription; 2]> {
        let fired = !self.value && value;
        self.value = value;
        if fired {
            self.subscriptions.clone()
        } else {
            SmallVec::new()
        }
    }

    /// Register `owner` for the next `false` → `true` transition.
    pub fn subscribe(&mut self, owner: ContainerId) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.subscriptions.push(Subscription { id, owner });
        id
    }

    /// Remove a subscription. Returns `false` if the token is not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        match self.subscriptions.iter().position(|s| s.id == id) {
            Some(index) => {
                self.subscriptions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `id` is currently registered.
    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.subscriptions.iter().any(|s| s.id == id)
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }
}

/// Capability a container needs from the spheres it stacks.
///
/// `destination` is the slot a particle is moving toward or resting in;
/// all occupancy and support calculations read it. `position` is where the
/// particle is drawn right now and may lag behind `destination` while the
/// host animates it.
pub trait Particle {
    /// Current location.
    fn position(&self) -> Vec2;

    /// Move the particle immediately.
    fn set_position(&mut self, position: Vec2);

    /// Target location.
    fn destination(&self) -> Vec2;

    /// Retarget the particle.
    fn set_destination(&mut self, destination: Vec2);

    /// The observable user-control flag.
    fn user_controlled(&self) -> &UserControlled;

    /// Mutable access to the user-control flag.
    fn user_controlled_mut(&mut self) -> &mut UserControlled;
}
