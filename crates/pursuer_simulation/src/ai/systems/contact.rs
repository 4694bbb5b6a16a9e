//! Contact/attack trigger и реакция пойманного актора.

use bevy::prelude::*;

use crate::ai::components::{set_state, Pursuer, PursuerState};
use crate::ai::events::{ActorCaught, ContactEvent, PursuerStateChanged};
use crate::collision_layers::CollisionLayer;
use crate::components::CatchReaction;
use crate::config::PursuerConfig;

/// Система: ContactEvent → Attack + уведомление актора
///
/// Фильтры:
/// - слой актора совпадает с `player_mask` охотника
/// - актор умеет реагировать (CatchReaction)
///
/// Каждый валидный контакт уведомляет актора, даже если охотник уже в Attack:
/// повторный Attack - no-op в set_state, повторную поимку гасит CatchReaction.
pub fn handle_contact_events(
    mut contacts: EventReader<ContactEvent>,
    mut pursuers: Query<(&PursuerConfig, &mut PursuerState), With<Pursuer>>,
    actors: Query<(&CollisionLayer, Has<CatchReaction>), Without<Pursuer>>,
    mut state_changes: EventWriter<PursuerStateChanged>,
    mut caught: EventWriter<ActorCaught>,
) {
    for contact in contacts.read() {
        let Ok((config, mut state)) = pursuers.get_mut(contact.pursuer) else {
            continue;
        };
        let Ok((layer, can_react)) = actors.get(contact.other) else {
            continue;
        };

        if !layer.matches(config.player_mask) || !can_react {
            continue;
        }

        set_state(contact.pursuer, &mut state, PursuerState::Attack, &mut state_changes);
        caught.write(ActorCaught {
            actor: contact.other,
            pursuer: contact.pursuer,
        });
        crate::log_info(&format!("⚔️ {:?} caught {:?}", contact.pursuer, contact.other));
    }
}

/// Система: сторона актора - "тебя поймали"
///
/// Отмечает поимку один раз; дальнейшие последствия (death flow, respawn)
/// подписываются на ActorCaught или читают CatchReaction.
pub fn apply_catch_reactions(
    mut caught: EventReader<ActorCaught>,
    mut actors: Query<&mut CatchReaction>,
) {
    for event in caught.read() {
        let Ok(mut reaction) = actors.get_mut(event.actor) else {
            continue;
        };
        if reaction.mark_caught() {
            crate::log_info(&format!("☠️ {:?} was caught by {:?}", event.actor, event.pursuer));
        }
    }
}
