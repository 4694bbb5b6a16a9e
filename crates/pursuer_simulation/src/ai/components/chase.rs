//! Chase sequence - pursuit → taunt → (teleport + короткая pursuit) → исчезновение.
//!
//! Sequence неотменяема после старта: потеря цели только обрывает
//! текущий pursuit loop, taunt/teleport/despawn всё равно выполняются.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChasePhase {
    /// Основная погоня
    Pursuit { remaining: f32 },
    /// Пауза-насмешка
    Taunt { remaining: f32 },
    /// Погоня после телепорта (или после неудачного sample)
    TeleportPursuit { remaining: f32 },
    /// Терминальная фаза: охотник удаляется
    Vanished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaseStep {
    /// Фаза ещё идёт, движение не нужно
    Waiting,
    /// Pursuit активен: переиздать moveTo к текущей позиции цели
    Pursue,
    /// Основной pursuit закончился (время или потеря цели)
    PursuitEnded,
    /// Taunt закончился: бросаем кубик телепорта
    TauntEnded,
    /// Pursuit после телепорта закончился
    TeleportPursuitEnded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChaseSequence {
    pub phase: ChasePhase,
    /// Скорость до ускорения (восстанавливается после pursuit)
    pub base_speed: f32,
}

impl ChaseSequence {
    pub fn new(chase_duration: f32, base_speed: f32) -> Self {
        Self {
            phase: ChasePhase::Pursuit {
                remaining: chase_duration,
            },
            base_speed,
        }
    }

    pub fn begin_taunt(&mut self, taunt_duration: f32) {
        self.phase = ChasePhase::Taunt {
            remaining: taunt_duration,
        };
    }

    pub fn begin_teleport_pursuit(&mut self, duration: f32) {
        self.phase = ChasePhase::TeleportPursuit { remaining: duration };
    }

    pub fn vanish(&mut self) {
        self.phase = ChasePhase::Vanished;
    }

    pub fn is_pursuing(&self) -> bool {
        matches!(
            self.phase,
            ChasePhase::Pursuit { .. } | ChasePhase::TeleportPursuit { .. }
        )
    }

    /// Один fixed шаг. Pursuit: сначала проверка (время/цель), потом движение.
    pub fn advance(&mut self, delta: f32, target_valid: bool) -> ChaseStep {
        match &mut self.phase {
            ChasePhase::Pursuit { remaining } => {
                if *remaining <= 0.0 || !target_valid {
                    return ChaseStep::PursuitEnded;
                }
                *remaining -= delta;
                ChaseStep::Pursue
            }
            ChasePhase::TeleportPursuit { remaining } => {
                if *remaining <= 0.0 || !target_valid {
                    return ChaseStep::TeleportPursuitEnded;
                }
                *remaining -= delta;
                ChaseStep::Pursue
            }
            ChasePhase::Taunt { remaining } => {
                *remaining -= delta;
                if *remaining > 0.0 {
                    ChaseStep::Waiting
                } else {
                    ChaseStep::TauntEnded
                }
            }
            ChasePhase::Vanished => ChaseStep::Waiting,
        }
    }
}

/// Точка `distance` метров за спиной цели (против её forward)
pub fn point_behind(target_position: Vec3, target_forward: Vec3, distance: f32) -> Vec3 {
    target_position - target_forward * distance
}
