//! Dense per-type component storage.
//!
//! Each component type lives in its own [`ComponentStore`], a sparse set that
//! keeps values packed in a `Vec` and maps entity slots to dense positions.
//! The [`ComponentRegistry`] owns one store per type behind the type-erased
//! [`ComponentArray`] trait, and hands out the signature bit of each type.

use std::any::{Any, TypeId, type_name};

use rustc_hash::FxHashMap;

use crate::ecs::entity::Entity;
use crate::ecs::error::EcsError;
use crate::ecs::signature::{ComponentType, MAX_COMPONENTS};

/// Anything storable as a component.
pub trait Component: 'static {}

impl<T: 'static> Component for T {}

/// Type-erased view of a [`ComponentStore`], used when the concrete type is
/// unknown (entity destruction).
pub trait ComponentArray: Any {
    fn entity_destroyed(&mut self, entity: Entity);
    fn contains(&self, entity: Entity) -> bool;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

const VACANT: u32 = u32::MAX;

#[derive(Debug)]
pub struct ComponentStore<T> {
    values: Vec<T>,
    owners: Vec<Entity>,
    sparse: Vec<u32>,
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            owners: Vec::new(),
            sparse: Vec::new(),
        }
    }
}

impl<T: Component> ComponentStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn dense_index(&self, entity: Entity) -> Option<usize> {
        let dense = *self.sparse.get(entity.index() as usize)?;
        if dense == VACANT {
            return None;
        }
        let dense = dense as usize;
        (self.owners[dense] == entity).then_some(dense)
    }

    /// Store `value` for `entity`, replacing any previous value.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        if let Some(dense) = self.dense_index(entity) {
            return Some(std::mem::replace(&mut self.values[dense], value));
        }
        let slot = entity.index() as usize;
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, VACANT);
        }
        self.sparse[slot] = self.values.len() as u32;
        self.values.push(value);
        self.owners.push(entity);
        None
    }

    /// Erase the value of `entity`, moving the last element into its place.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let dense = self.dense_index(entity)?;
        let last = self.values.len() - 1;
        if dense != last {
            let moved = self.owners[last];
            self.sparse[moved.index() as usize] = dense as u32;
        }
        self.sparse[entity.index() as usize] = VACANT;
        self.owners.swap_remove(dense);
        Some(self.values.swap_remove(dense))
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.dense_index(entity).map(|dense| &self.values[dense])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.dense_index(entity).map(|dense| &mut self.values[dense])
    }

    /// Owners in storage order. The order changes on removal.
    pub fn entities(&self) -> &[Entity] {
        &self.owners
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.owners.iter().copied().zip(self.values.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.owners.iter().copied().zip(self.values.iter_mut())
    }
}

impl<T: Component> ComponentArray for ComponentStore<T> {
    fn entity_destroyed(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn contains(&self, entity: Entity) -> bool {
        self.dense_index(entity).is_some()
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct Registered {
    bit: ComponentType,
    store: Box<dyn ComponentArray>,
}

/// Owns every component store and the type → signature-bit table.
#[derive(Default)]
pub struct ComponentRegistry {
    by_type: FxHashMap<TypeId, Registered>,
}

impl ComponentRegistry {
    /// Register `T` if needed and return its signature bit.
    pub fn register<T: Component>(&mut self) -> Result<ComponentType, EcsError> {
        if let Some(registered) = self.by_type.get(&TypeId::of::<T>()) {
            return Ok(registered.bit);
        }
        let next = self.by_type.len();
        if next >= MAX_COMPONENTS {
            return Err(EcsError::TooManyComponentTypes {
                max: MAX_COMPONENTS,
            });
        }
        let bit = next as ComponentType;
        log::debug!("Registered component {} as bit {}", type_name::<T>(), bit);
        self.by_type.insert(
            TypeId::of::<T>(),
            Registered {
                bit,
                store: Box::new(ComponentStore::<T>::new()),
            },
        );
        Ok(bit)
    }

    pub fn component_type<T: Component>(&self) -> Result<ComponentType, EcsError> {
        self.by_type
            .get(&TypeId::of::<T>())
            .map(|registered| registered.bit)
            .ok_or(EcsError::ComponentNotRegistered(type_name::<T>()))
    }

    pub fn store<T: Component>(&self) -> Result<&ComponentStore<T>, EcsError> {
        self.by_type
            .get(&TypeId::of::<T>())
            .and_then(|registered| registered.store.as_any().downcast_ref::<ComponentStore<T>>())
            .ok_or(EcsError::ComponentNotRegistered(type_name::<T>()))
    }

    pub fn store_mut<T: Component>(&mut self) -> Result<&mut ComponentStore<T>, EcsError> {
        self.by_type
            .get_mut(&TypeId::of::<T>())
            .and_then(|registered| registered.store.as_any_mut().downcast_mut::<ComponentStore<T>>())
            .ok_or(EcsError::ComponentNotRegistered(type_name::<T>()))
    }

    pub fn entity_destroyed(&mut self, entity: Entity) {
        for registered in self.by_type.values_mut() {
            registered.store.entity_destroyed(entity);
        }
    }

    pub fn registered_count(&self) -> usize {
        self.by_type.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(i32);

    #[derive(Debug, PartialEq)]
    struct Tag;

    fn e(index: u32) -> Entity {
        Entity::new(index, 0)
    }

    #[test]
    fn test_insert_get_remove() {
        let mut store = ComponentStore::new();
        assert!(store.insert(e(3), Health(10)).is_none());
        assert_eq!(store.get(e(3)), Some(&Health(10)));
        assert_eq!(store.insert(e(3), Health(5)), Some(Health(10)));
        assert_eq!(store.remove(e(3)), Some(Health(5)));
        assert!(store.get(e(3)).is_none());
        assert_eq!(ComponentArray::len(&store), 0);
    }

    #[test]
    fn test_swap_remove_keeps_other_entries_reachable() {
        let mut store = ComponentStore::new();
        store.insert(e(0), Health(0));
        store.insert(e(1), Health(1));
        store.insert(e(2), Health(2));
        store.remove(e(0));
        assert_eq!(store.get(e(1)), Some(&Health(1)));
        assert_eq!(store.get(e(2)), Some(&Health(2)));
        assert_eq!(store.entities().len(), 2);
    }

    #[test]
    fn test_stale_generation_not_found() {
        let mut store = ComponentStore::new();
        store.insert(Entity::new(0, 0), Health(1));
        assert!(store.get(Entity::new(0, 1)).is_none());
        assert!(store.remove(Entity::new(0, 1)).is_none());
    }

    #[test]
    fn test_registry_assigns_dense_bits() {
        let mut registry = ComponentRegistry::default();
        assert_eq!(registry.register::<Health>().unwrap(), 0);
        assert_eq!(registry.register::<Tag>().unwrap(), 1);
        assert_eq!(registry.register::<Health>().unwrap(), 0);
        assert_eq!(registry.component_type::<Tag>().unwrap(), 1);
    }

    #[test]
    fn test_registry_unknown_type() {
        let registry = ComponentRegistry::default();
        assert!(matches!(
            registry.store::<Health>(),
            Err(EcsError::ComponentNotRegistered(_))
        ));
    }

    #[test]
    fn test_registry_purges_destroyed_entity() {
        let mut registry = ComponentRegistry::default();
        registry.register::<Health>().unwrap();
        registry.register::<Tag>().unwrap();
        registry.store_mut::<Health>().unwrap().insert(e(1), Health(3));
        registry.store_mut::<Tag>().unwrap().insert(e(1), Tag);
        registry.entity_destroyed(e(1));
        assert!(registry.store::<Health>().unwrap().get(e(1)).is_none());
        assert!(registry.store::<Tag>().unwrap().get(e(1)).is_none());
    }
}
