//! JSON scene descriptions.
//!
//! A scene lists the texture names to register, an optional inline binary
//! collision map and the objects to spawn. Every object gets a
//! [`Transform`], a [`PhysicsBody`], a [`Name`], a [`RenderLayer`] and a
//! [`Sprite`]; switches, doors, lasers and animated objects get their extra
//! components from the optional sections.
//!
//! ```json
//! {
//!   "textures": ["Thief.png", "Wall.png"],
//!   "objects": [
//!     { "name": "thief", "category": "Thief",
//!       "translate": { "x": 100, "y": 800 }, "scale": { "x": 20, "y": 40 },
//!       "texture": "Thief.png", "animated": true }
//!   ]
//! }
//! ```
//!
//! Categories are not validated: an unknown category spawns a plain static
//! collider.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::animation::AnimationState;
use crate::components::autodoor::AutoDoor;
use crate::components::laser::LaserComponent;
use crate::components::name::Name;
use crate::components::physicsbody::PhysicsBody;
use crate::components::renderlayer::RenderLayer;
use crate::components::sprite::Sprite;
use crate::components::switch::Switch;
use crate::components::transform::Transform;
use crate::ecs::{Coordinator, EcsError, Entity};
use crate::game::Engine;
use crate::math::Vector2;
use crate::resources::texturestore::{MISSING_TEXTURE, TextureStore};
use crate::resources::tilemap::{BinaryCollisionMap, MapError};

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid collision map: {0}")]
    Map(#[from] MapError),
    #[error(transparent)]
    Ecs(#[from] EcsError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub textures: Vec<String>,
    /// Binary collision map in its text format.
    #[serde(default)]
    pub collision_map: Option<String>,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

fn default_mass() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub name: String,
    pub category: String,
    pub translate: Vector2,
    pub scale: Vector2,
    #[serde(default)]
    pub rotate: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
    #[serde(default)]
    pub velocity: Vector2,
    #[serde(default)]
    pub friction: f32,
    #[serde(default)]
    pub layer: RenderLayer,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub switch: Option<SwitchDescription>,
    #[serde(default)]
    pub door: Option<DoorDescription>,
    #[serde(default)]
    pub laser: Option<LaserDescription>,
    /// Drive the thief animation state machine for this object.
    #[serde(default)]
    pub animated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchDescription {
    #[serde(default)]
    pub interactables: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoorDescription {
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub switch_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserDescription {
    pub active_time: f32,
    pub inactive_time: f32,
    pub turned_on: bool,
    pub link_module_id: String,
}

impl Default for LaserDescription {
    fn default() -> Self {
        let laser = LaserComponent::default();
        Self {
            active_time: laser.active_time,
            inactive_time: laser.inactive_time,
            turned_on: laser.turned_on,
            link_module_id: laser.link_module_id,
        }
    }
}

impl SceneDescription {
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse the inline collision map, if any.
    pub fn collision_map(&self) -> Result<Option<BinaryCollisionMap>, SceneError> {
        self.collision_map
            .as_deref()
            .map(BinaryCollisionMap::parse)
            .transpose()
            .map_err(SceneError::from)
    }

    /// Register the textures and spawn every object. Returns the spawned
    /// entities in scene order.
    pub fn spawn(
        &self,
        coord: &mut Coordinator,
        textures: &mut TextureStore,
    ) -> Result<Vec<Entity>, SceneError> {
        for texture in &self.textures {
            textures.insert(texture.as_str());
        }
        let entities = self
            .objects
            .iter()
            .map(|object| object.spawn(coord, textures))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            "Spawned {} objects, {} textures registered",
            entities.len(),
            textures.len()
        );
        Ok(entities)
    }

    /// Spawn into a running engine and install the collision map.
    pub fn load_into(&self, engine: &mut Engine) -> Result<Vec<Entity>, SceneError> {
        if let Some(map) = self.collision_map()? {
            engine.set_collision_map(map);
        }
        let (coord, ctx) = engine.parts_mut();
        self.spawn(coord, &mut ctx.textures)
    }
}

impl ObjectDescription {
    fn spawn(&self, coord: &mut Coordinator, textures: &TextureStore) -> Result<Entity, EcsError> {
        let entity = coord.create_entity()?;
        let mut transform = Transform::new(self.translate, self.scale);
        transform.rotate = self.rotate;

        let mut body = PhysicsBody::new(self.category.as_str(), &transform)
            .with_mass(self.mass)
            .with_velocity(self.velocity);
        body.friction = self.friction;
        body.angle = self.rotate;

        let texture_id = self
            .texture
            .as_deref()
            .map_or(MISSING_TEXTURE, |name| textures.id_or_missing(name));

        coord.add_component(entity, transform)?;
        coord.add_component(entity, body)?;
        coord.add_component(entity, Name::new(self.name.as_str()))?;
        coord.add_component(entity, self.layer)?;
        coord.add_component(
            entity,
            Sprite::new(self.texture.clone().unwrap_or_default(), texture_id),
        )?;

        if let Some(switch) = &self.switch {
            coord.add_component(entity, Switch::new(switch.interactables.clone()))?;
        }
        if let Some(door) = &self.door {
            let mut state = AutoDoor::linked_to(door.switch_name.as_str());
            state.is_open = door.open;
            coord.add_component(entity, state)?;
        }
        if let Some(laser) = &self.laser {
            let mut component = LaserComponent::new(laser.active_time, laser.inactive_time);
            component.turned_on = laser.turned_on;
            component.is_active = laser.turned_on;
            component.link_module_id = laser.link_module_id.clone();
            coord.add_component(entity, component)?;
        }
        if self.animated {
            coord.add_component(entity, AnimationState::default())?;
        }
        Ok(entity)
    }
}
