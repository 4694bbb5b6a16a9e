//! Navigation collaborator - "nearest walkable point" запросы.
//!
//! Архитектура:
//! - Pathfinding/NavMesh живут снаружи (engine tactical layer)
//! - Ядро знает только `WalkableSurface::sample_walkable_point`
//! - moveTo = `MovementCommand`, warpTo = прямая запись Transform (chase teleport)
//!
//! `FlatNavArea` - простая прямоугольная поверхность для headless прогонов и тестов.

use bevy::prelude::*;

/// Навигационная поверхность (NavMesh, grid, плоскость)
pub trait WalkableSurface: Send + Sync {
    /// Ближайшая walkable точка в пределах `tolerance` от `point`, если есть
    fn sample_walkable_point(&self, point: Vec3, tolerance: f32) -> Option<Vec3>;
}

/// Resource: активная навигационная поверхность
#[derive(Resource)]
pub struct Navigation {
    surface: Box<dyn WalkableSurface>,
}

impl Navigation {
    pub fn new(surface: impl WalkableSurface + 'static) -> Self {
        Self {
            surface: Box::new(surface),
        }
    }

    pub fn sample_walkable_point(&self, point: Vec3, tolerance: f32) -> Option<Vec3> {
        self.surface.sample_walkable_point(point, tolerance)
    }
}

/// Плоская прямоугольная поверхность на высоте `height`
///
/// Точка проецируется на прямоугольник [min, max] (XZ); если проекция
/// дальше `tolerance` - точка считается невалидной.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatNavArea {
    pub min: Vec2,
    pub max: Vec2,
    pub height: f32,
}

impl FlatNavArea {
    pub fn new(min: Vec2, max: Vec2, height: f32) -> Self {
        Self { min, max, height }
    }

    /// Квадрат со стороной `2 * half_size` вокруг origin
    pub fn square(half_size: f32) -> Self {
        Self::new(Vec2::splat(-half_size), Vec2::splat(half_size), 0.0)
    }
}

impl Default for FlatNavArea {
    fn default() -> Self {
        Self::square(100.0)
    }
}

impl WalkableSurface for FlatNavArea {
    fn sample_walkable_point(&self, point: Vec3, tolerance: f32) -> Option<Vec3> {
        let clamped = Vec2::new(point.x, point.z).clamp(self.min, self.max);
        let snapped = Vec3::new(clamped.x, self.height, clamped.y);

        (snapped.distance(point) <= tolerance).then_some(snapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_inside_area_snaps_to_height() {
        let area = FlatNavArea::square(10.0);
        let sampled = area.sample_walkable_point(Vec3::new(3.0, 0.4, -2.0), 1.0);
        assert_eq!(sampled, Some(Vec3::new(3.0, 0.0, -2.0)));
    }

    #[test]
    fn test_point_near_edge_clamps_within_tolerance() {
        let area = FlatNavArea::square(10.0);
        let sampled = area.sample_walkable_point(Vec3::new(12.0, 0.0, 0.0), 3.0);
        assert_eq!(sampled, Some(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_point_far_outside_rejected() {
        let area = FlatNavArea::square(10.0);
        assert_eq!(area.sample_walkable_point(Vec3::new(30.0, 0.0, 0.0), 5.0), None);
    }

    #[test]
    fn test_navigation_resource_delegates() {
        let navigation = Navigation::new(FlatNavArea::square(5.0));
        assert!(navigation.sample_walkable_point(Vec3::ZERO, 0.5).is_some());
        assert!(navigation.sample_walkable_point(Vec3::new(0.0, 0.0, 20.0), 0.5).is_none());
    }
}
