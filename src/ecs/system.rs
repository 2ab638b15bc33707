//! System registration and signature-based entity routing.
//!
//! The registry keeps, per system type, the shared system instance, the
//! required [`Signature`] and the set of entities currently matching it.
//! Membership lives here rather than inside the system object so a running
//! system can create and destroy entities without re-borrowing itself.

use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::ecs::entity::Entity;
use crate::ecs::error::EcsError;
use crate::ecs::signature::Signature;

/// Entities tracked by a system, iterated in handle order.
pub type EntitySet = BTreeSet<Entity>;

struct SystemEntry {
    name: &'static str,
    instance: Rc<dyn Any>,
    signature: Signature,
    entities: EntitySet,
}

#[derive(Default)]
pub struct SystemRegistry {
    systems: FxHashMap<TypeId, SystemEntry>,
    order: Vec<TypeId>,
}

impl SystemRegistry {
    /// Store `system` as the single instance of `T`.
    pub fn register<T: 'static>(&mut self, system: T) -> Result<Rc<RefCell<T>>, EcsError> {
        let id = TypeId::of::<T>();
        if self.systems.contains_key(&id) {
            return Err(EcsError::SystemAlreadyRegistered(type_name::<T>()));
        }
        let handle = Rc::new(RefCell::new(system));
        let instance: Rc<dyn Any> = handle.clone();
        self.systems.insert(
            id,
            SystemEntry {
                name: type_name::<T>(),
                instance,
                signature: Signature::empty(),
                entities: EntitySet::new(),
            },
        );
        self.order.push(id);
        log::debug!("Registered system {}", type_name::<T>());
        Ok(handle)
    }

    fn entry<T: 'static>(&self) -> Result<&SystemEntry, EcsError> {
        self.systems
            .get(&TypeId::of::<T>())
            .ok_or(EcsError::SystemNotRegistered(type_name::<T>()))
    }

    fn entry_mut<T: 'static>(&mut self) -> Result<&mut SystemEntry, EcsError> {
        self.systems
            .get_mut(&TypeId::of::<T>())
            .ok_or(EcsError::SystemNotRegistered(type_name::<T>()))
    }

    pub fn get<T: 'static>(&self) -> Result<Rc<RefCell<T>>, EcsError> {
        self.entry::<T>()?
            .instance
            .clone()
            .downcast::<RefCell<T>>()
            .map_err(|_| EcsError::SystemNotRegistered(type_name::<T>()))
    }

    pub fn set_signature<T: 'static>(&mut self, signature: Signature) -> Result<(), EcsError> {
        self.entry_mut::<T>()?.signature = signature;
        Ok(())
    }

    pub fn signature<T: 'static>(&self) -> Result<Signature, EcsError> {
        Ok(self.entry::<T>()?.signature)
    }

    pub fn entities<T: 'static>(&self) -> Result<&EntitySet, EcsError> {
        Ok(&self.entry::<T>()?.entities)
    }

    /// Rebuild one system's membership from the given living entities.
    pub fn rescan<T: 'static>(
        &mut self,
        living: impl Iterator<Item = (Entity, Signature)>,
    ) -> Result<(), EcsError> {
        let entry = self.entry_mut::<T>()?;
        entry.entities.clear();
        for (entity, signature) in living {
            if signature.contains(entry.signature) {
                entry.entities.insert(entity);
            }
        }
        Ok(())
    }

    /// Add `entity` to every system whose signature it satisfies and remove
    /// it from every other.
    pub fn entity_signature_changed(&mut self, entity: Entity, signature: Signature) {
        for entry in self.systems.values_mut() {
            if signature.contains(entry.signature) {
                entry.entities.insert(entity);
            } else {
                entry.entities.remove(&entity);
            }
        }
    }

    pub fn entity_destroyed(&mut self, entity: Entity) {
        for entry in self.systems.values_mut() {
            entry.entities.remove(&entity);
        }
    }

    /// System names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().map(|id| self.systems[id].name)
    }
}
