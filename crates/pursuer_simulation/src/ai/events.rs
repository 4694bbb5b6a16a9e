//! AI Events - границы ядра охотника
//!
//! Входящие: ContactEvent (trigger collaborator).
//! Исходящие: смена состояния (→ replication), cosmetic эффекты, teleport,
//! исчезновение охотника, уведомление пойманного актора.

use bevy::prelude::*;

use super::components::PursuerState;

/// Authority сменил состояние охотника (единственный источник для replication)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PursuerStateChanged {
    pub entity: Entity,
    pub old: PursuerState,
    pub new: PursuerState,
}

/// Trigger collaborator: `other` вошёл в contact volume охотника
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub pursuer: Entity,
    pub other: Entity,
}

/// Актор пойман охотником ("you have been caught"), без ответа
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorCaught {
    pub actor: Entity,
    pub pursuer: Entity,
}

/// Cosmetic: дым (начало taunt, исчезновение)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SmokeEffectTriggered {
    pub entity: Entity,
    pub position: Vec3,
}

/// Охотник мгновенно перемещён (warp) на валидированную walkable точку
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PursuerTeleported {
    pub entity: Entity,
    pub from: Vec3,
    pub to: Vec3,
}

/// Chase sequence завершена: охотник удалён из симуляции
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PursuerVanished {
    pub entity: Entity,
    pub position: Vec3,
}
