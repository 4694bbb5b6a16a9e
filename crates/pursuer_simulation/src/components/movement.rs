//! Movement компоненты: команды перемещения и скорость

use bevy::prelude::*;

/// Команда движения (выполняется navigation collaborator'ом)
///
/// Архитектура:
/// - AI системы пишут MovementCommand (high-level intent)
/// - Navigation слой (engine или `drivers::drive_movement_commands`) исполняет
/// - Teleport (warp) не проходит через команду: пишется прямо в Transform
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum MovementCommand {
    /// Стоять на месте
    #[default]
    Idle,
    /// Двигаться к позиции (world coordinates) со скоростью MovementSpeed
    MoveToPosition { target: Vec3 },
    /// Остановиться немедленно
    Stop,
}

impl MovementCommand {
    pub fn destination(&self) -> Option<Vec3> {
        match self {
            MovementCommand::MoveToPosition { target } => Some(*target),
            MovementCommand::Idle | MovementCommand::Stop => None,
        }
    }
}

/// Скорость движения (метры/сек)
///
/// Chase controller поднимает её на время погони и восстанавливает после.
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 3.5 }
    }
}
