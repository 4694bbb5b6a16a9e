//! Replication channel - authority → observers state sync.
//!
//! Контракт:
//! - Одно сообщение на каждое изменение PursuerState (без coalescing)
//! - Порядок доставки = порядок изменений на authority (per-entity sequence)
//! - Fire-and-forget: без acknowledgement, без обратного канала
//! - Observers применяют состояние только к своей визуализации
//!
//! Транспорт/сериализация снаружи: `StateSync` - serde-ready wire payload.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ai::{PursuerState, PursuerStateChanged, PursuerVanished};

/// Wire payload одного изменения состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSync {
    /// Сетевой идентификатор охотника (Entity bits на authority)
    pub net_id: u64,
    /// Монотонный номер изменения для этого охотника (с 1)
    pub sequence: u64,
    /// PursuerState ordinal
    pub state: u8,
}

impl StateSync {
    pub fn decoded_state(&self) -> Option<PursuerState> {
        PursuerState::from_ordinal(self.state)
    }
}

/// Получатель state sync (удалённый клиент, локальный визуал, recorder)
pub trait StateObserver: Send + Sync {
    fn on_state_sync(&mut self, message: &StateSync);

    /// Охотник удалён на authority: сообщений для `net_id` больше не будет
    fn on_forget(&mut self, _net_id: u64) {}
}

/// Resource: authority-side канал
#[derive(Resource, Default)]
pub struct ReplicationChannel {
    observers: Vec<Box<dyn StateObserver>>,
    sequences: HashMap<u64, u64>,
    published: u64,
}

impl ReplicationChannel {
    pub fn add_observer(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Сколько охотников сейчас имеют sequence в канале
    pub fn tracked_pursuers(&self) -> usize {
        self.sequences.len()
    }

    /// Всего отправленных сообщений (для диагностики)
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Отправить новое значение всем observers
    pub fn publish(&mut self, entity: Entity, state: PursuerState) -> StateSync {
        let net_id = entity.to_bits();
        let sequence = self.sequences.entry(net_id).or_insert(0);
        *sequence += 1;

        let message = StateSync {
            net_id,
            sequence: *sequence,
            state: state.ordinal(),
        };

        for observer in self.observers.iter_mut() {
            observer.on_state_sync(&message);
        }
        self.published += 1;

        message
    }

    /// Забыть исчезнувшего охотника (sequence + локальные копии observers)
    pub fn forget(&mut self, entity: Entity) {
        let net_id = entity.to_bits();
        if self.sequences.remove(&net_id).is_none() {
            return;
        }
        for observer in self.observers.iter_mut() {
            observer.on_forget(net_id);
        }
    }
}

/// Система: PursuerStateChanged → ReplicationChannel (в порядке записи)
///
/// Исчезновения обрабатываются после изменений этого же шага.
pub fn replicate_state_changes(
    mut changes: EventReader<PursuerStateChanged>,
    mut vanished: EventReader<PursuerVanished>,
    mut channel: ResMut<ReplicationChannel>,
) {
    for change in changes.read() {
        channel.publish(change.entity, change.new);
    }
    for event in vanished.read() {
        channel.forget(event.entity);
    }
}

/// Observer-side hook: (net_id, previous local state, new state)
pub type StateHook = Box<dyn FnMut(u64, Option<PursuerState>, PursuerState) + Send + Sync>;

/// Observer-side зеркало: локальные копии состояний охотников
///
/// Отбрасывает устаревшие/повторные sequence и неизвестные ordinal'ы,
/// на каждое применённое изменение вызывает hook (например, параметр анимации).
pub struct ObserverMirror {
    states: HashMap<u64, PursuerState>,
    last_sequence: HashMap<u64, u64>,
    hook: StateHook,
}

impl ObserverMirror {
    pub fn new(hook: impl FnMut(u64, Option<PursuerState>, PursuerState) + Send + Sync + 'static) -> Self {
        Self {
            states: HashMap::new(),
            last_sequence: HashMap::new(),
            hook: Box::new(hook),
        }
    }

    pub fn state_of(&self, net_id: u64) -> Option<PursuerState> {
        self.states.get(&net_id).copied()
    }

    /// true если сообщение применено
    pub fn apply(&mut self, message: &StateSync) -> bool {
        let last = self.last_sequence.get(&message.net_id).copied().unwrap_or(0);
        if message.sequence <= last {
            return false;
        }
        let Some(state) = message.decoded_state() else {
            crate::log_warning(&format!(
                "Replication: unknown state ordinal {} for {}",
                message.state, message.net_id
            ));
            return false;
        };

        self.last_sequence.insert(message.net_id, message.sequence);
        let previous = self.states.insert(message.net_id, state);
        (self.hook)(message.net_id, previous, state);
        true
    }
}

impl StateObserver for ObserverMirror {
    fn on_state_sync(&mut self, message: &StateSync) {
        self.apply(message);
    }

    fn on_forget(&mut self, net_id: u64) {
        self.states.remove(&net_id);
        self.last_sequence.remove(&net_id);
    }
}
