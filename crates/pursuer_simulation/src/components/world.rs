//! World геометрия: occluders для line-of-sight

use bevy::prelude::*;

/// Occluder - axis-aligned box, перекрывающий обзор
///
/// Центр = `Transform::translation` entity, размер = `half_extents`.
/// Слой задаётся через `CollisionLayer` (обычно COLLISION_LAYER_ENVIRONMENT).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Occluder {
    pub half_extents: Vec3,
}

impl Default for Occluder {
    fn default() -> Self {
        Self {
            half_extents: Vec3::splat(0.5),
        }
    }
}

impl Occluder {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }

    /// (min, max) углы box'а для центра `center`
    pub fn bounds(&self, center: Vec3) -> (Vec3, Vec3) {
        (center - self.half_extents, center + self.half_extents)
    }
}
