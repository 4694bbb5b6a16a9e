//! Chase controller: pursuit, taunt, teleport roll, исчезновение.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::components::{
    point_behind, set_state, BehaviorTasks, ChaseStep, PerceivedTarget, Pursuer, PursuerState,
};
use crate::ai::events::{PursuerStateChanged, PursuerTeleported, PursuerVanished, SmokeEffectTriggered};
use crate::components::{MovementCommand, MovementSpeed};
use crate::config::PursuerConfig;
use crate::navigation::Navigation;
use crate::DeterministicRng;

/// chase(): старт погони за текущей perceived целью.
///
/// No-op если уже гонимся или цели нет. Иначе: roam отменён,
/// скорость × multiplier, состояние Run.
pub fn begin_chase(
    entity: Entity,
    tasks: &mut BehaviorTasks,
    perceived: &PerceivedTarget,
    state: &mut PursuerState,
    speed: &mut MovementSpeed,
    config: &PursuerConfig,
    state_changes: &mut EventWriter<PursuerStateChanged>,
) -> bool {
    let base_speed = speed.speed;
    if !tasks.start_chase(perceived.0.is_some(), base_speed, config) {
        return false;
    }

    crate::log_info(&format!("🏃 {:?} chasing {:?}", entity, perceived.0));
    speed.speed = config.chase_speed(base_speed);
    set_state(entity, state, PursuerState::Run, state_changes);
    true
}

/// Система: продвижение chase sequences
///
/// Цель валидна пока PerceivedTarget указывает на существующую entity.
/// Потеря цели обрывает только pursuit loop - taunt/teleport/despawn идут дальше.
pub fn advance_chase_sequences(
    mut commands: Commands,
    mut pursuers: Query<
        (
            Entity,
            &mut Transform,
            &PursuerConfig,
            &PerceivedTarget,
            &mut BehaviorTasks,
            &mut PursuerState,
            &mut MovementCommand,
            &mut MovementSpeed,
        ),
        With<Pursuer>,
    >,
    targets: Query<&Transform, Without<Pursuer>>,
    navigation: Option<Res<Navigation>>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut state_changes: EventWriter<PursuerStateChanged>,
    mut smoke_effects: EventWriter<SmokeEffectTriggered>,
    mut teleports: EventWriter<PursuerTeleported>,
    mut vanished: EventWriter<PursuerVanished>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, config, perceived, mut tasks, mut state, mut command, mut speed) in
        pursuers.iter_mut()
    {
        let Some(chase) = tasks.chase.as_mut() else {
            continue;
        };

        // Позиция + forward цели, если ссылка ещё валидна
        let target_pose = perceived
            .0
            .and_then(|target| targets.get(target).ok())
            .map(|target| (target.translation, target.forward().as_vec3()));

        let vanish = match chase.advance(delta, target_pose.is_some()) {
            ChaseStep::Waiting => false,
            ChaseStep::Pursue => {
                if let Some((target_position, _)) = target_pose {
                    *command = MovementCommand::MoveToPosition {
                        target: target_position,
                    };
                }
                false
            }
            ChaseStep::PursuitEnded => {
                speed.speed = chase.base_speed;
                set_state(entity, &mut state, PursuerState::Taunt, &mut state_changes);
                smoke_effects.write(SmokeEffectTriggered {
                    entity,
                    position: transform.translation,
                });
                chase.begin_taunt(config.taunt_duration);
                crate::log(&format!("😈 {:?} taunting for {:.1}s", entity, config.taunt_duration));
                false
            }
            ChaseStep::TauntEnded => {
                // Кубик бросается всегда, даже если цель уже потеряна
                let roll: f32 = rng.rng.gen();
                match target_pose {
                    Some((target_position, target_forward)) if roll < config.teleport_chance => {
                        let behind = point_behind(
                            target_position,
                            target_forward,
                            config.teleport_distance_behind,
                        );
                        let landing = navigation.as_deref().and_then(|navigation| {
                            navigation.sample_walkable_point(behind, config.teleport_sample_tolerance)
                        });

                        match landing {
                            Some(landing) => {
                                let from = transform.translation;
                                transform.translation = landing;
                                // Warp сбрасывает текущий путь
                                *command = MovementCommand::Stop;
                                teleports.write(PursuerTeleported {
                                    entity,
                                    from,
                                    to: landing,
                                });
                                crate::log_info(&format!(
                                    "✨ {:?} teleported behind target: {:?} → {:?}",
                                    entity, from, landing
                                ));
                            }
                            None => {
                                crate::log(&format!(
                                    "🧭 {:?} teleport skipped: no walkable point near {:?}",
                                    entity, behind
                                ));
                            }
                        }

                        speed.speed = config.chase_speed(chase.base_speed);
                        set_state(entity, &mut state, PursuerState::Run, &mut state_changes);
                        chase.begin_teleport_pursuit(config.post_teleport_chase_duration);
                        false
                    }
                    _ => true,
                }
            }
            ChaseStep::TeleportPursuitEnded => true,
        };

        if vanish {
            chase.vanish();
            smoke_effects.write(SmokeEffectTriggered {
                entity,
                position: transform.translation,
            });
            vanished.write(PursuerVanished {
                entity,
                position: transform.translation,
            });
            commands.entity(entity).despawn();
            crate::log_info(&format!("💨 {:?} vanished", entity));
        }
    }
}
