//! Tick scheduler: periodic perception poll → roam vs chase.

use bevy::prelude::*;

use super::chase::begin_chase;
use super::perception::scan;
use super::roam::begin_roaming;
use crate::ai::components::{BehaviorTasks, DecisionClock, PerceivedTarget, Pursuer, PursuerState};
use crate::ai::events::PursuerStateChanged;
use crate::collision_layers::CollisionLayer;
use crate::components::{MovementSpeed, Occluder};
use crate::config::PursuerConfig;

/// Система: decision loop охотника
///
/// Раз в `decision_interval`:
/// 1. Свежий perception poll (никогда не кешируется между решениями)
/// 2. Цели нет → roam (если ни roam, ни chase не активны)
/// 3. Цель есть → chase() (no-op если уже гонимся; отменяет roam)
pub fn poll_perception_and_decide(
    mut pursuers: Query<
        (
            Entity,
            &Transform,
            &PursuerConfig,
            &mut DecisionClock,
            &mut PerceivedTarget,
            &mut BehaviorTasks,
            &mut PursuerState,
            &mut MovementSpeed,
        ),
        With<Pursuer>,
    >,
    candidates: Query<(Entity, &Transform, &CollisionLayer), Without<Pursuer>>,
    occluders: Query<(&Transform, &Occluder, &CollisionLayer)>,
    time: Res<Time<Fixed>>,
    mut state_changes: EventWriter<PursuerStateChanged>,
) {
    let delta = time.delta_secs();

    for (entity, transform, config, mut clock, mut perceived, mut tasks, mut state, mut speed) in
        pursuers.iter_mut()
    {
        if !clock.tick(delta, config.decision_interval) {
            continue;
        }

        let result = scan(
            entity,
            transform,
            config,
            &mut perceived,
            candidates.iter(),
            occluders.iter(),
        );

        match result.target {
            None => {
                if !tasks.is_chasing() && !tasks.is_roaming() {
                    begin_roaming(
                        entity,
                        &mut tasks,
                        &mut state,
                        config,
                        config.roam_session_duration,
                        &mut state_changes,
                    );
                }
            }
            Some(_) => {
                begin_chase(
                    entity,
                    &mut tasks,
                    &perceived,
                    &mut state,
                    &mut speed,
                    config,
                    &mut state_changes,
                );
            }
        }
    }
}
