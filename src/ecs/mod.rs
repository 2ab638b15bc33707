//! Entity-component-system framework.
//!
//! Submodules overview:
//! - [`entity`] – generational entity handles and their allocator
//! - [`component`] – dense per-type stores and the component type registry
//! - [`signature`] – per-entity component bitsets
//! - [`system`] – system instances, required signatures and entity routing
//! - [`coordinator`] – the facade the engine talks to
//! - [`error`] – invariant violations reported by the framework

pub mod component;
pub mod coordinator;
pub mod entity;
pub mod error;
pub mod signature;
pub mod system;

pub use component::{Component, ComponentStore};
pub use coordinator::Coordinator;
pub use entity::Entity;
pub use error::EcsError;
pub use signature::Signature;
pub use system::EntitySet;
