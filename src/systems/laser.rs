//! Laser blink timers.
//!
//! Runs once per fixed step and advances every [`LaserComponent`]. Switches
//! turn lasers on and off from the collision response; this system only
//! drives the on/off blinking of turned-on beams.

use crate::components::laser::LaserComponent;
use crate::ecs::{Coordinator, EcsError, Entity};

#[derive(Debug, Default)]
pub struct LaserSystem;

impl LaserSystem {
    pub fn update(&mut self, coord: &mut Coordinator, dt: f32) -> Result<(), EcsError> {
        let entities: Vec<Entity> = coord.system_entities::<LaserSystem>()?.iter().copied().collect();
        for entity in entities {
            coord.get_component_mut::<LaserComponent>(entity)?.advance(dt);
        }
        Ok(())
    }
}
