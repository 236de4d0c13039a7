//! A plain particle with no behavior beyond the container contract.

use bucket_core::{Particle, UserControlled, Vec2};

/// Minimal [`Particle`] implementation.
///
/// A new particle rests where it is created: `destination == position`.
#[derive(Clone, Debug, Default)]
pub struct BasicParticle {
    position: Vec2,
    destination: Vec2,
    user_controlled: UserControlled,
}

impl BasicParticle {
    /// Create a particle at rest at `position`.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            destination: position,
            user_controlled: UserControlled::default(),
        }
    }

    /// Shorthand for `BasicParticle::new(Vec2::new(x, y))`.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Vec2::new(x, y))
    }

    /// Whether the particle has reached its destination.
    pub fn is_at_destination(&self) -> bool {
        self.position == self.destination
    }
}

impl Particle for BasicParticle {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn destination(&self) -> Vec2 {
        self.destination
    }

    fn set_destination(&mut self, destination: Vec2) {
        self.destination = destination;
    }

    fn user_controlled(&self) -> &UserControlled {
        &self.user_controlled
    }

    fn user_controlled_mut(&mut self) -> &mut UserControlled {
        &mut self.user_controlled
    }
}
