//! Behavior state machine охотника.
//!
//! Единственное authoritative значение, которое видят observers (анимация).
//! Переходы делают только roam/chase sequences и contact trigger.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::events::PursuerStateChanged;

/// Видимое поведение охотника (ordinal = wire значение для replication)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[repr(u8)]
pub enum PursuerState {
    /// Стоит (roam idle beat, начальное состояние после спавна)
    #[default]
    Idle = 0,
    /// Бредёт к roam точке
    Walk = 1,
    /// Погоня (основная и после телепорта)
    Run = 2,
    /// Пауза-насмешка после погони
    Taunt = 3,
    /// Контакт с игроком
    Attack = 4,
}

impl PursuerState {
    pub const ALL: [PursuerState; 5] = [
        PursuerState::Idle,
        PursuerState::Walk,
        PursuerState::Run,
        PursuerState::Taunt,
        PursuerState::Attack,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Атомарная замена. `None` если состояние не изменилось (no-op),
    /// иначе предыдущее значение.
    pub fn replace(&mut self, new_state: PursuerState) -> Option<PursuerState> {
        if *self == new_state {
            return None;
        }
        Some(std::mem::replace(self, new_state))
    }
}

/// setState: единственный внешний мутатор состояния.
///
/// Идемпотентен: равное состояние не порождает события.
/// Возвращает true если переход произошёл.
pub fn set_state(
    entity: Entity,
    state: &mut PursuerState,
    new_state: PursuerState,
    changes: &mut EventWriter<PursuerStateChanged>,
) -> bool {
    let Some(old) = state.replace(new_state) else {
        return false;
    };

    crate::log(&format!("AI: {:?} {:?} → {:?}", entity, old, new_state));
    changes.write(PursuerStateChanged {
        entity,
        old,
        new: new_state,
    });
    true
}
