//! Messages published by the physics step.
//!
//! [`Message`] values are fanned out through the
//! [`MessageBroker`](crate::resources::messagebroker::MessageBroker) to any
//! subscriber (debug overlays, score keeping, tests). Publishing never blocks
//! and nothing is expected back.

use crate::ecs::Entity;

/// Two bodies touched this tick.
///
/// `a` is the moving body (the thief), `b` the collider it hit. `time` is the
/// first time of contact within the frame, `0.0` for boxes that already
/// overlapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
    pub time: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    CollisionDetected(CollisionEvent),
    /// Destroyed after the collision pass, e.g. a picked-up object.
    EntityDestroyed(Entity),
}
