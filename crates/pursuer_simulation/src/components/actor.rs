//! Компоненты добычи: Player tag, реакция на поимку

use bevy::prelude::*;

/// Player - tag категории "игрок"
///
/// Roam planner ищет ближайшего игрока по этому тегу (без FOV/LOS).
/// Perception и attack trigger фильтруют по `CollisionLayer` + маскам конфига.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Player;

/// Capability: "тебя поймал охотник"
///
/// Без этого компонента контакт с игроком игнорируется (нечего уведомлять).
/// Последствия (death screen, respawn) - забота владельца актора, не ядра.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CatchReaction {
    /// true после первой поимки (повторные уведомления игнорируются)
    pub caught: bool,
}

impl CatchReaction {
    /// Отмечает поимку. Возвращает false если актор уже был пойман.
    pub fn mark_caught(&mut self) -> bool {
        if self.caught {
            return false;
        }
        self.caught = true;
        true
    }
}
