//! Transient forces accumulated on a physics body during one tick.
//!
//! Movement and gameplay code push [`Force`] entries into a body's
//! [`ForcesManager`]; the physics step sums the active ones into a net force
//! and torque, integrates them and clears the list.
//!
//! Forces carry a `lifetime`/`age` pair. A lifetime of `0.0` means the force
//! never expires on its own, which is what every force pushed by the engine
//! uses; since the list is cleared every tick those forces act exactly once.
//! A positive lifetime deactivates the force once its age exceeds it.

use serde::{Deserialize, Serialize};

use crate::math::Vector2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceType {
    #[default]
    None,
    /// Pushes along `direction * magnitude`.
    Linear,
    /// Contributes `torque` only.
    Rotational,
    /// Both linear push and torque.
    Mixed,
    /// Opposes the current velocity, scaled by `magnitude`.
    Drag,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Force {
    pub direction: Vector2,
    pub magnitude: f32,
    pub kind: ForceType,
    /// Seconds the force stays active; `0.0` means unlimited.
    pub lifetime: f32,
    pub age: f32,
    pub is_active: bool,
    /// Lever arm for rotational forces.
    pub radius: f32,
    pub torque: f32,
}

impl Force {
    pub fn linear(direction: Vector2, magnitude: f32) -> Self {
        Self {
            direction,
            magnitude,
            kind: ForceType::Linear,
            lifetime: 0.0,
            age: 0.0,
            is_active: true,
            radius: 0.0,
            torque: 0.0,
        }
    }

    pub fn rotational(torque: f32, radius: f32) -> Self {
        Self {
            kind: ForceType::Rotational,
            torque,
            radius,
            ..Self::linear(Vector2::zero(), 0.0)
        }
    }

    pub fn drag(coefficient: f32) -> Self {
        Self {
            kind: ForceType::Drag,
            ..Self::linear(Vector2::zero(), coefficient)
        }
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Age the force by `dt` and deactivate it once past its lifetime.
    pub fn validate_age(&mut self, dt: f32) {
        self.age += dt;
        if self.lifetime > 0.0 && self.age > self.lifetime {
            self.is_active = false;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForcesManager {
    forces: Vec<Force>,
}

impl ForcesManager {
    pub fn add_force(&mut self, force: Force) {
        self.forces.push(force);
    }

    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn validate_age(&mut self, dt: f32) {
        for force in &mut self.forces {
            force.validate_age(dt);
        }
    }

    /// Sum of all active linear contributions for a body moving at `velocity`.
    pub fn net_force(&self, velocity: Vector2) -> Vector2 {
        let mut total = Vector2::zero();
        for force in self.forces.iter().filter(|f| f.is_active) {
            match force.kind {
                ForceType::Linear | ForceType::Mixed => {
                    total += force.direction * force.magnitude;
                }
                ForceType::Drag => total -= velocity * force.magnitude,
                ForceType::Rotational | ForceType::None => {}
            }
        }
        total
    }

    pub fn net_torque(&self) -> f32 {
        self.forces
            .iter()
            .filter(|f| f.is_active)
            .filter(|f| matches!(f.kind, ForceType::Rotational | ForceType::Mixed))
            .map(|f| f.torque)
            .sum()
    }

    pub fn clear(&mut self) {
        self.forces.clear();
    }
}
