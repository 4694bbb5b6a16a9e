//! Pursuer entity: marker, perceived target, in-flight sequences, decision clock.

use bevy::prelude::*;

use super::chase::ChaseSequence;
use super::fsm::PursuerState;
use super::roam::RoamSequence;
use crate::collision_layers::CollisionLayer;
use crate::components::{MovementCommand, MovementSpeed};
use crate::config::PursuerConfig;

/// Охотник (server-authoritative adversary)
///
/// Required Components подтягивают всё состояние AI; спавн через
/// `crate::pursuer_bundle` задаёт позицию, конфиг и скорость.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    PursuerState,
    PursuerConfig,
    PerceivedTarget,
    BehaviorTasks,
    DecisionClock,
    MovementCommand,
    MovementSpeed,
    Transform,
    CollisionLayer
)]
pub struct Pursuer;

/// Последняя цель, подтверждённая perception (lookup key, не владеет entity)
///
/// Перезаписывается каждым poll'ом: None как только цель не подтверждена.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PerceivedTarget(pub Option<Entity>);

/// In-flight timed sequences (не более одной каждого вида)
#[derive(Component, Debug, Clone, Default)]
pub struct BehaviorTasks {
    pub roam: Option<RoamSequence>,
    pub chase: Option<ChaseSequence>,
}

impl BehaviorTasks {
    pub fn is_chasing(&self) -> bool {
        self.chase.is_some()
    }

    pub fn is_roaming(&self) -> bool {
        self.roam.is_some()
    }

    /// startRoaming: заменяет текущую roam sequence (старая просто бросается).
    ///
    /// Отказ во время погони или при пустом бюджете.
    pub fn start_roaming(&mut self, duration: f32, config: &PursuerConfig) -> bool {
        if self.is_chasing() || duration <= 0.0 {
            return false;
        }
        self.roam = Some(RoamSequence::new(
            duration,
            config.roam_idle_beat,
            config.roam_update_interval,
        ));
        true
    }

    /// chase(): старт только если не гонимся и цель есть. Roam отменяется.
    pub fn start_chase(&mut self, has_target: bool, base_speed: f32, config: &PursuerConfig) -> bool {
        if self.is_chasing() || !has_target {
            return false;
        }
        self.roam = None;
        self.chase = Some(ChaseSequence::new(config.chase_duration, base_speed));
        true
    }
}

/// Decision loop clock: poll perception раз в `decision_interval`
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct DecisionClock {
    pub accumulated: f32,
}

impl DecisionClock {
    /// Накопить `delta`; true когда пора принимать решение
    pub fn tick(&mut self, delta: f32, interval: f32) -> bool {
        self.accumulated += delta;
        if self.accumulated + f32::EPSILON < interval {
            return false;
        }
        self.accumulated = (self.accumulated - interval).max(0.0);
        true
    }
}
