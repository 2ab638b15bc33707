//! Facade over entities, components and systems.
//!
//! [`Coordinator`] is the only entry point the rest of the engine uses to
//! create and destroy entities, attach and detach components and look up
//! systems. Every component add/remove updates the entity's [`Signature`] and
//! re-routes the entity through the system registry in the same call, so
//! signatures and system membership never drift apart.

use std::any::type_name;
use std::cell::RefCell;
use std::rc::Rc;

use crate::ecs::component::{Component, ComponentRegistry, ComponentStore};
use crate::ecs::entity::{Entity, EntityRegistry};
use crate::ecs::error::EcsError;
use crate::ecs::signature::{ComponentType, Signature, SignatureTable};
use crate::ecs::system::{EntitySet, SystemRegistry};

#[derive(Default)]
pub struct Coordinator {
    entities: EntityRegistry,
    components: ComponentRegistry,
    signatures: SignatureTable,
    systems: SystemRegistry,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinator that refuses to hold more than `max_entities` at once.
    pub fn with_capacity(max_entities: usize) -> Self {
        Self {
            entities: EntityRegistry::with_capacity(max_entities),
            ..Self::default()
        }
    }

    // ---------------------------------------------------------------- entities

    pub fn create_entity(&mut self) -> Result<Entity, EcsError> {
        let entity = self.entities.create()?;
        self.signatures.set(entity, Signature::empty());
        Ok(entity)
    }

    /// Remove `entity` from every store, every system and the signature table,
    /// then free its slot.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.check_alive(entity)?;
        self.components.entity_destroyed(entity);
        self.systems.entity_destroyed(entity);
        self.signatures.clear(entity);
        self.entities.destroy(entity)?;
        log::debug!("Destroyed entity {}", entity);
        Ok(())
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.living_count()
    }

    pub fn living_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    fn check_alive(&self, entity: Entity) -> Result<(), EcsError> {
        if self.entities.is_alive(entity) {
            Ok(())
        } else {
            Err(EcsError::StaleEntity(entity))
        }
    }

    pub fn signature(&self, entity: Entity) -> Result<Signature, EcsError> {
        self.check_alive(entity)?;
        Ok(self.signatures.get(entity))
    }

    // -------------------------------------------------------------- components

    /// Register `T` ahead of time. Adding a component registers its type
    /// implicitly, so this is only needed to build system signatures.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentType, EcsError> {
        self.components.register::<T>()
    }

    pub fn component_type<T: Component>(&self) -> Result<ComponentType, EcsError> {
        self.components.component_type::<T>()
    }

    /// Attach `value` to `entity`, replacing an existing `T`.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        self.check_alive(entity)?;
        let bit = self.components.register::<T>()?;
        self.components.store_mut::<T>()?.insert(entity, value);
        self.update_signature(entity, bit, true);
        Ok(())
    }

    /// Detach and return the `T` of `entity`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        self.check_alive(entity)?;
        let bit = self.components.component_type::<T>()?;
        let value = self
            .components
            .store_mut::<T>()?
            .remove(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })?;
        self.update_signature(entity, bit, false);
        Ok(value)
    }

    fn update_signature(&mut self, entity: Entity, bit: ComponentType, present: bool) {
        let mut signature = self.signatures.get(entity);
        signature.set(bit, present);
        self.signatures.set(entity, signature);
        self.systems.entity_signature_changed(entity, signature);
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.check_alive(entity)?;
        self.components
            .store::<T>()?
            .get(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.check_alive(entity)?;
        self.components
            .store_mut::<T>()?
            .get_mut(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Like [`get_component`](Self::get_component) for callers where absence
    /// is a normal outcome.
    pub fn try_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        self.components.store::<T>().ok()?.get(entity)
    }

    pub fn try_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        self.components.store_mut::<T>().ok()?.get_mut(entity)
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.try_component::<T>(entity).is_some()
    }

    /// Read access to the whole store of `T`.
    pub fn store<T: Component>(&self) -> Result<&ComponentStore<T>, EcsError> {
        self.components.store::<T>()
    }

    // ----------------------------------------------------------------- systems

    /// Register the single instance of system `T`.
    pub fn register_system<T: 'static>(&mut self, system: T) -> Result<Rc<RefCell<T>>, EcsError> {
        self.systems.register(system)
    }

    pub fn get_system<T: 'static>(&self) -> Result<Rc<RefCell<T>>, EcsError> {
        self.systems.get::<T>()
    }

    /// Set the components `T` requires. Entities that already match are
    /// picked up immediately.
    pub fn set_system_signature<T: 'static>(&mut self, signature: Signature) -> Result<(), EcsError> {
        self.systems.set_signature::<T>(signature)?;
        let signatures = &self.signatures;
        let living = self.entities.iter().map(|e| (e, signatures.get(e)));
        self.systems.rescan::<T>(living)
    }

    pub fn system_signature<T: 'static>(&self) -> Result<Signature, EcsError> {
        self.systems.signature::<T>()
    }

    pub fn system_entities<T: 'static>(&self) -> Result<&EntitySet, EcsError> {
        self.systems.entities::<T>()
    }
}
