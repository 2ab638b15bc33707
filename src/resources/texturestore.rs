//! Texture name to id lookup.
//!
//! The renderer loads textures and registers them here; collision responses
//! swap a sprite's texture by name. A name that was never registered is a
//! resource error: it is logged and the caller keeps going with id `0`.

use log::warn;
use rustc_hash::FxHashMap;

/// Id the renderer treats as "no texture".
pub const MISSING_TEXTURE: u32 = 0;

#[derive(Debug, Default, Clone)]
pub struct TextureStore {
    map: FxHashMap<String, u32>,
    next_id: u32,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, returning its id (existing names keep theirs).
    pub fn insert(&mut self, name: impl Into<String>) -> u32 {
        let name = name.into();
        if let Some(id) = self.map.get(&name) {
            return *id;
        }
        self.next_id += 1;
        self.map.insert(name, self.next_id);
        self.next_id
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.map.get(name).copied()
    }

    /// Id for `name`, or [`MISSING_TEXTURE`] with a warning.
    pub fn id_or_missing(&self, name: &str) -> u32 {
        match self.get(name) {
            Some(id) => id,
            None => {
                warn!("Texture not found: {name}");
                MISSING_TEXTURE
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
