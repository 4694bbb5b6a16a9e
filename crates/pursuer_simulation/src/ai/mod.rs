//! AI decision-making module - охотник (pursuer).
//!
//! Server-authoritative: все решения принимаются здесь, observers получают
//! только PursuerState через replication.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::*;

/// SystemSet всей AI цепочки охотника (для ordering drivers/observers)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PursuerSystems;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. poll_perception_and_decide - perception poll + roam/chase выбор
/// 2. handle_contact_events - contact → Attack
/// 3. advance_roam_sequences - idle/walk цикл
/// 4. advance_chase_sequences - pursuit/taunt/teleport/despawn
/// 5. apply_catch_reactions - сторона пойманного актора
/// 6. replicate_state_changes - authority → observers (в порядке изменений)
pub struct PursuerPlugin;

impl Plugin for PursuerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PursuerStateChanged>()
            .add_event::<ContactEvent>()
            .add_event::<ActorCaught>()
            .add_event::<SmokeEffectTriggered>()
            .add_event::<PursuerTeleported>()
            .add_event::<PursuerVanished>()
            .init_resource::<crate::replication::ReplicationChannel>()
            .register_type::<PursuerState>()
            .register_type::<crate::config::PursuerConfig>()
            .add_systems(
                FixedUpdate,
                (
                    systems::poll_perception_and_decide,
                    systems::handle_contact_events,
                    systems::advance_roam_sequences,
                    systems::advance_chase_sequences,
                    systems::apply_catch_reactions,
                    crate::replication::replicate_state_changes,
                )
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(PursuerSystems),
            );
    }
}
