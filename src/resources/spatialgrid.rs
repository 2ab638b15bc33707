//! Uniform broad-phase grid.
//!
//! The world is cut into square cells; every entity is listed in each cell its
//! bounding box touches. The physics step clears and refills the grid once per
//! update and then asks it for the candidates near the moving body instead of
//! testing every pair.
//!
//! Insertion truncates coordinates to cell indices while queries use
//! floor/ceil and widen the range by one cell on every side. The halo is what
//! makes the two roundings agree: an entity inserted with a box is always
//! found by a query with an overlapping box.

use smallvec::SmallVec;

use crate::ecs::Entity;
use crate::math::Aabb;

pub const DEFAULT_WORLD_WIDTH: f32 = 1600.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 900.0;
pub const DEFAULT_CELL_SIZE: f32 = 50.0;

type Cell = SmallVec<[Entity; 4]>;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT, DEFAULT_CELL_SIZE)
    }
}

impl SpatialGrid {
    /// Grid covering `width` × `height` world units with square cells.
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let cell_size = cell_size.max(1.0);
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            cols,
            rows,
            cells: vec![Cell::new(); cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    fn clamp_col(&self, col: i64) -> usize {
        col.clamp(0, self.cols as i64 - 1) as usize
    }

    fn clamp_row(&self, row: i64) -> usize {
        row.clamp(0, self.rows as i64 - 1) as usize
    }

    /// List `entity` in every cell its box overlaps (inclusive range).
    pub fn add_entity(&mut self, entity: Entity, aabb: &Aabb) {
        let cell = self.cell_size as i64;
        let min_col = self.clamp_col(aabb.min.x as i64 / cell);
        let max_col = self.clamp_col(aabb.max.x as i64 / cell);
        let min_row = self.clamp_row(aabb.min.y as i64 / cell);
        let max_row = self.clamp_row(aabb.max.y as i64 / cell);
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                self.cells[row * self.cols + col].push(entity);
            }
        }
    }

    /// Every entity listed in the cells around `aabb`, one-cell halo
    /// included. Entities spanning several cells appear several times.
    pub fn nearby_entities(&self, aabb: &Aabb) -> Vec<Entity> {
        let min_col = self.clamp_col((aabb.min.x / self.cell_size).floor() as i64 - 1);
        let max_col = self.clamp_col((aabb.max.x / self.cell_size).ceil() as i64 + 1);
        let min_row = self.clamp_row((aabb.min.y / self.cell_size).floor() as i64 - 1);
        let max_row = self.clamp_row((aabb.max.y / self.cell_size).ceil() as i64 + 1);
        let mut found = Vec::new();
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                found.extend_from_slice(&self.cells[row * self.cols + col]);
            }
        }
        found
    }

    /// Entities listed in one cell.
    pub fn cell(&self, col: usize, row: usize) -> &[Entity] {
        &self.cells[row * self.cols + col]
    }

    /// `(col, row, count)` for every non-empty cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(i, cell)| (i % self.cols, i / self.cols, cell.len()))
    }
}
