//! Simulation state of a physical entity.
//!
//! A [`PhysicsBody`] carries the collision category, mass, linear and angular
//! motion, its bounding box and the forces accumulated for the current tick.
//! Every body has its forces integrated and is moved by its velocity each
//! frame. Only bodies whose category is [`category::THIEF`] also get gravity,
//! player input and collision response; the rest act as colliders in the
//! spatial grid.

use serde::{Deserialize, Serialize};

use crate::components::forces::{Force, ForcesManager};
use crate::components::transform::Transform;
use crate::math::{Aabb, Vector2};

/// Category tags matched (by substring) in collision dispatch.
pub mod category {
    pub const THIEF: &str = "Thief";
    pub const WALL: &str = "Wall";
    pub const OBJECT: &str = "Object";
    pub const DOOR: &str = "Door";
    pub const LOCK_DOOR: &str = "LockDoor";
    pub const LASER_MODULE: &str = "Laser Module";
    pub const LASER: &str = "Laser";
    pub const SWITCH: &str = "Switch";
    pub const VENT: &str = "Vent";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub category: String,
    pub mass: f32,
    pub inertia_mass: f32,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub angle: f32,
    pub angular_velocity: f32,
    pub angular_acceleration: f32,
    pub position: Vector2,
    pub size: Vector2,
    pub forces: ForcesManager,
    pub aabb: Aabb,
    pub friction: f32,
    /// Toggle state for switch bodies.
    pub switch_on: bool,
    pub is_grounded: bool,
    pub is_crouching: bool,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            category: String::new(),
            mass: 1.0,
            inertia_mass: 1.0,
            velocity: Vector2::zero(),
            acceleration: Vector2::zero(),
            angle: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            position: Vector2::zero(),
            size: Vector2::zero(),
            forces: ForcesManager::default(),
            aabb: Aabb::default(),
            friction: 0.0,
            switch_on: false,
            is_grounded: false,
            is_crouching: false,
        }
    }
}

impl PhysicsBody {
    /// Body of `category` placed where `transform` says.
    pub fn new(category: impl Into<String>, transform: &Transform) -> Self {
        Self {
            category: category.into(),
            position: transform.translate,
            size: transform.scale,
            aabb: transform.aabb(),
            ..Self::default()
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn is(&self, category: &str) -> bool {
        self.category.contains(category)
    }

    pub fn add_force(&mut self, force: Force) {
        self.forces.add_force(force);
    }

    /// Mirror `transform` into the body, keeping the box size unchanged and
    /// re-centring it on the transform.
    pub fn sync_with_transform(&mut self, transform: &Transform) {
        self.position = transform.translate;
        self.size = transform.scale;
        self.aabb = Aabb::from_center(self.position, self.aabb.size());
    }

    /// Move both the position and the box by `delta`.
    pub fn shift(&mut self, delta: Vector2) {
        self.position += delta;
        self.aabb.translate(delta);
    }
}
