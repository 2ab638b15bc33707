use serde::{Deserialize, Serialize};

use crate::math::{Aabb, Vector2};

/// World placement shared between the simulation and the renderer.
///
/// `translate` is the centre of the entity, `scale` its size in world units
/// and `rotate` its angle in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate: Vector2,
    pub scale: Vector2,
    pub rotate: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vector2::zero(), Vector2::new(1.0, 1.0))
    }
}

impl Transform {
    pub fn new(translate: Vector2, scale: Vector2) -> Self {
        Self {
            translate,
            scale,
            rotate: 0.0,
        }
    }

    /// Box covered by the transform, centred on `translate`.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.translate, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_is_centred() {
        let t = Transform::new(Vector2::new(100.0, 50.0), Vector2::new(20.0, 40.0));
        assert_eq!(t.aabb(), Aabb::new(90.0, 30.0, 110.0, 70.0));
    }
}
