//! Collision outlines for the debug overlay.
//!
//! Builds its own grid from the current body boxes so the overlay shows
//! exactly what the broad phase would see, without touching the physics
//! system's grid.

use crate::components::physicsbody::PhysicsBody;
use crate::ecs::{Coordinator, EcsError, Entity};
use crate::math::Aabb;
use crate::resources::gameconfig::EngineConfig;
use crate::resources::spatialgrid::SpatialGrid;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugOutlines {
    /// Box of every physics body.
    pub boxes: Vec<(Entity, Aabb)>,
    /// `(col, row, count)` of every occupied grid cell.
    pub cells: Vec<(usize, usize, usize)>,
    pub cell_size: f32,
}

pub fn build_outlines(coord: &Coordinator, config: &EngineConfig) -> Result<DebugOutlines, EcsError> {
    let mut grid = SpatialGrid::new(config.world_width, config.world_height, config.cell_size);
    let mut boxes = Vec::new();
    for (entity, body) in coord.store::<PhysicsBody>()?.iter() {
        grid.add_entity(entity, &body.aabb);
        boxes.push((entity, body.aabb));
    }
    boxes.sort_unstable_by_key(|(entity, _)| *entity);
    Ok(DebugOutlines {
        boxes,
        cells: grid.occupied_cells().collect(),
        cell_size: grid.cell_size(),
    })
}
