//! Error type for the entity-component-system framework.
//!
//! Every variant is a programming error (an invariant the caller broke). They
//! are returned as values instead of aborting so that tests and tooling can
//! match on them; the demo binary logs them and stops.

use thiserror::Error;

use crate::ecs::entity::Entity;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The registry has no free slot left.
    #[error("too many entities: capacity {capacity} reached")]
    TooManyEntities { capacity: usize },

    /// The handle refers to a destroyed entity (or a slot that was reused).
    #[error("stale or unknown entity {0}")]
    StaleEntity(Entity),

    /// More component types than signature bits.
    #[error("too many component types: at most {max} can be registered")]
    TooManyComponentTypes { max: usize },

    /// A component type was used before it was registered.
    #[error("component type {0} is not registered")]
    ComponentNotRegistered(&'static str),

    /// The entity does not own a component of the requested type.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    /// A system type was registered twice.
    #[error("system {0} is already registered")]
    SystemAlreadyRegistered(&'static str),

    /// A system type was looked up before registration.
    #[error("system {0} is not registered")]
    SystemNotRegistered(&'static str),
}
