//! Entity handle allocation.
//!
//! An [`Entity`] is a slot index plus a generation counter. Destroying an
//! entity bumps the generation of its slot, so a handle kept around after
//! destruction never aliases whatever entity reuses the slot later.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ecs::error::EcsError;

/// Default upper bound on simultaneously living entities.
pub const MAX_ENTITIES: usize = 5000;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index, dense in `0..capacity`.
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Allocates and recycles entity slots and tracks which handles are alive.
#[derive(Debug)]
pub struct EntityRegistry {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: VecDeque<u32>,
    capacity: usize,
    living: usize,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::with_capacity(MAX_ENTITIES)
    }
}

impl EntityRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::new(),
            alive: Vec::new(),
            free: VecDeque::new(),
            capacity,
            living: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn living_count(&self) -> usize {
        self.living
    }

    /// Hand out a fresh handle. Freed slots are reused oldest-first.
    pub fn create(&mut self) -> Result<Entity, EcsError> {
        let index = match self.free.pop_front() {
            Some(index) => index,
            None => {
                if self.generations.len() >= self.capacity {
                    return Err(EcsError::TooManyEntities {
                        capacity: self.capacity,
                    });
                }
                self.generations.push(0);
                self.alive.push(false);
                (self.generations.len() - 1) as u32
            }
        };
        let slot = index as usize;
        self.alive[slot] = true;
        self.living += 1;
        Ok(Entity::new(index, self.generations[slot]))
    }

    /// Release a handle. The slot's generation is bumped before reuse.
    pub fn destroy(&mut self, entity: Entity) -> Result<(), EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::StaleEntity(entity));
        }
        let slot = entity.index as usize;
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push_back(entity.index);
        self.living -= 1;
        Ok(())
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.index as usize;
        slot < self.generations.len()
            && self.alive[slot]
            && self.generations[slot] == entity.generation
    }

    /// Living handles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(slot, _)| Entity::new(slot as u32, self.generations[slot]))
    }
}
