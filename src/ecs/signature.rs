//! Component-presence bitsets.
//!
//! Bit `i` of an entity's [`Signature`] is set iff the entity owns a component
//! of the type registered with index `i`.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::ecs::entity::Entity;

/// Upper bound on registered component types (one bit each).
pub const MAX_COMPONENTS: usize = 64;

/// Dense index assigned to a component type on registration.
pub type ComponentType = u8;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signature(u64);

impl Signature {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn with(mut self, bit: ComponentType) -> Self {
        self.set(bit, true);
        self
    }

    pub fn set(&mut self, bit: ComponentType, value: bool) {
        debug_assert!((bit as usize) < MAX_COMPONENTS);
        if value {
            self.0 |= 1u64 << bit;
        } else {
            self.0 &= !(1u64 << bit);
        }
    }

    pub fn test(&self, bit: ComponentType) -> bool {
        self.0 & (1u64 << bit) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `required` is also set here.
    pub fn contains(&self, required: Signature) -> bool {
        self.0 & required.0 == required.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

impl BitAnd for Signature {
    type Output = Signature;
    fn bitand(self, rhs: Signature) -> Signature {
        Signature(self.0 & rhs.0)
    }
}

impl BitOr for Signature {
    type Output = Signature;
    fn bitor(self, rhs: Signature) -> Signature {
        Signature(self.0 | rhs.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:#b})", self.0)
    }
}

/// Per-slot signatures, indexed by [`Entity::index`].
#[derive(Debug, Default)]
pub struct SignatureTable {
    signatures: Vec<Signature>,
}

impl SignatureTable {
    pub fn get(&self, entity: Entity) -> Signature {
        self.signatures
            .get(entity.index() as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn set(&mut self, entity: Entity, signature: Signature) {
        let slot = entity.index() as usize;
        if slot >= self.signatures.len() {
            self.signatures.resize(slot + 1, Signature::empty());
        }
        self.signatures[slot] = signature;
    }

    pub fn clear(&mut self, entity: Entity) {
        if let Some(signature) = self.signatures.get_mut(entity.index() as usize) {
            signature.reset();
        }
    }
}
