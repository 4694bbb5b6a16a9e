//! Perception geometry - field-of-view cone + line-of-sight.
//!
//! Чистые функции без ECS: система `ai::systems::perception` собирает
//! кандидатов/occluders из Query и вызывает `select_visible_target`.
//!
//! Pipeline одного poll'а:
//! 1. Кандидаты в радиусе `view_range`
//! 2. Горизонтальный угол forward ↔ direction ≤ half FOV
//! 3. Луч из глаз в сторону кандидата не пересекает obstruction boxes
//! 4. Ближайший выживший (tie → первый встреченный)

use bevy::prelude::*;

#[cfg(test)]
mod perception_tests;

const DIRECTION_EPSILON: f32 = 1e-6;

/// Поза сенсора: pivot агента + направление взгляда
#[derive(Debug, Clone, Copy)]
pub struct SensorPose {
    pub position: Vec3,
    pub forward: Vec3,
}

/// Параметры сенсора (фиксируются при спавне из PursuerConfig)
#[derive(Debug, Clone, Copy)]
pub struct SensorParams {
    pub view_range: f32,
    /// Половина угла обзора (радианы)
    pub half_fov: f32,
    pub eye_height: f32,
}

/// Потенциальная цель (уже отфильтрована по слою)
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec3,
}

/// Axis-aligned obstruction volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstructionBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl ObstructionBox {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Slab test: расстояние входа луча в box, если вход в пределах `max_distance`.
    ///
    /// `direction` должен быть нормализован. Луч, стартующий внутри box'а,
    /// его не видит (как физический raycast без backface hits).
    pub fn ray_entry(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        if self.contains(origin) {
            return None;
        }

        let mut t_enter = 0.0_f32;
        let mut t_exit = max_distance;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < DIRECTION_EPSILON {
                // Луч параллелен slab'у: либо внутри полосы, либо промах
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (t1, t2) = ((lo - o) * inv, (hi - o) * inv);
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));

            if t_enter > t_exit {
                return None;
            }
        }

        Some(t_enter)
    }
}

/// Результат одного perception poll (не хранится между poll'ами)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerceptionResult {
    pub target: Option<Entity>,
    pub distance: f32,
}

impl PerceptionResult {
    pub const NONE: Self = Self {
        target: None,
        distance: f32::INFINITY,
    };
}

/// Горизонтальный (XZ) угол между `forward` и `to_target`, радианы.
///
/// Цель строго над/под агентом (нулевая горизонтальная проекция) → 0.
pub fn horizontal_angle(forward: Vec3, to_target: Vec3) -> f32 {
    let forward_flat = Vec3::new(forward.x, 0.0, forward.z);
    let target_flat = Vec3::new(to_target.x, 0.0, to_target.z);

    if forward_flat.length_squared() < DIRECTION_EPSILON
        || target_flat.length_squared() < DIRECTION_EPSILON
    {
        return 0.0;
    }

    forward_flat.angle_between(target_flat)
}

pub fn within_field_of_view(forward: Vec3, to_target: Vec3, half_fov: f32) -> bool {
    horizontal_angle(forward, to_target) <= half_fov
}

/// true если луч `origin + direction * t`, t ∈ [0, max_distance], входит в любой box
pub fn line_of_sight_blocked(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    obstructions: &[ObstructionBox],
) -> bool {
    obstructions
        .iter()
        .any(|obstruction| obstruction.ray_entry(origin, direction, max_distance).is_some())
}

/// Perception poll: ближайший кандидат в радиусе, в конусе и с чистым LOS.
pub fn select_visible_target(
    pose: SensorPose,
    params: SensorParams,
    candidates: impl IntoIterator<Item = Candidate>,
    obstructions: &[ObstructionBox],
) -> PerceptionResult {
    let eye = pose.position + Vec3::Y * params.eye_height;
    let mut best = PerceptionResult::NONE;

    for candidate in candidates {
        let offset = candidate.position - pose.position;
        let distance = offset.length();

        if distance > params.view_range {
            continue;
        }

        if !within_field_of_view(pose.forward, offset, params.half_fov) {
            continue;
        }

        // Луч из глаз вдоль направления pivot → кандидат, длиной distance
        let direction = offset.normalize_or_zero();
        if direction != Vec3::ZERO
            && line_of_sight_blocked(eye, direction, distance, obstructions)
        {
            continue;
        }

        // Строгое `<`: при равенстве остаётся первый встреченный
        if distance < best.distance {
            best = PerceptionResult {
                target: Some(candidate.entity),
                distance,
            };
        }
    }

    best
}
