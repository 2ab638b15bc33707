//! Animation system.
//!
//! Runs once per fixed step. For every entity with a [`PhysicsBody`] and an
//! [`AnimationState`] it selects the clip matching what the physics step
//! produced, advances the frame and mirrors the facing onto the sprite.
//!
//! # Related
//!
//! - [`crate::components::animation::ThiefAnimation`] – clip selection rules
//! - [`crate::systems::physics`] – produces the grounded/crouch flags read here

use log::debug;

use crate::components::animation::{AnimationState, MOVING_THRESHOLD, ThiefAnimation};
use crate::components::physicsbody::PhysicsBody;
use crate::components::sprite::Sprite;
use crate::ecs::{Coordinator, EcsError, Entity};

#[derive(Debug, Default)]
pub struct AnimationSystem;

impl AnimationSystem {
    pub fn update(&mut self, coord: &mut Coordinator, dt: f32) -> Result<(), EcsError> {
        let entities: Vec<Entity> = coord.system_entities::<AnimationSystem>()?.iter().copied().collect();
        for entity in entities {
            let (next, vx) = {
                let body = coord.get_component::<PhysicsBody>(entity)?;
                (ThiefAnimation::from_body(body), body.velocity.x)
            };

            let state = coord.get_component_mut::<AnimationState>(entity)?;
            if state.transition(next) {
                debug!("{} animation {:?} -> {:?}", entity, state.previous, state.current);
            }
            state.advance(dt);
            if vx.abs() > MOVING_THRESHOLD {
                state.facing_left = vx < 0.0;
            }
            let facing_left = state.facing_left;

            if let Some(sprite) = coord.try_component_mut::<Sprite>(entity) {
                sprite.flip_h = facing_left;
            }
        }
        Ok(())
    }
}
