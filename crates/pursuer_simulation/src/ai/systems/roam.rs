//! Roam planner: idle/walk цикл + выбор точки со смещением к ближайшему игроку.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::components::{set_state, BehaviorTasks, Pursuer, PursuerState, RoamStep};
use crate::ai::events::PursuerStateChanged;
use crate::components::{MovementCommand, MovementSpeed, Player};
use crate::config::PursuerConfig;
use crate::navigation::Navigation;
use crate::DeterministicRng;

/// startRoaming(duration): новая roam sequence + мгновенный Idle.
///
/// Возвращает false если отказано (идёт погоня / пустой бюджет).
pub fn begin_roaming(
    entity: Entity,
    tasks: &mut BehaviorTasks,
    state: &mut PursuerState,
    config: &PursuerConfig,
    duration: f32,
    state_changes: &mut EventWriter<PursuerStateChanged>,
) -> bool {
    if !tasks.start_roaming(duration, config) {
        return false;
    }

    crate::log(&format!("🚶 {:?} roaming for {:.1}s", entity, duration));
    set_state(entity, state, PursuerState::Idle, state_changes);
    true
}

/// Ближайший игрок по прямой (без FOV/LOS - дешёвый поиск)
pub fn nearest_player(origin: Vec3, players: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let mut best: Option<(Vec3, f32)> = None;
    for position in players {
        let distance = origin.distance(position);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((position, distance));
        }
    }
    best.map(|(position, _)| position)
}

/// Сырой кандидат roam точки (до валидации navigation)
///
/// Направление на игрока (в плоскости XZ) поворачивается на случайный yaw
/// в [-cone, +cone] и откладывается на случайную дистанцию [min, max].
///
/// Границы упорядочиваются здесь: конфиг из struct literal не проходит `validate()`.
pub fn roam_candidate(origin: Vec3, toward: Vec3, config: &PursuerConfig, rng: &mut impl Rng) -> Vec3 {
    let flat = Vec3::new(toward.x - origin.x, 0.0, toward.z - origin.z);
    let direction = flat.try_normalize().unwrap_or(Vec3::NEG_Z);

    let cone = config.roam_cone_angle.abs();
    let yaw = rng.gen_range(-cone..=cone);
    let roam_direction = Quat::from_rotation_y(yaw.to_radians()) * direction;

    let near = config.roam_min_distance.min(config.roam_max_distance);
    let far = config.roam_min_distance.max(config.roam_max_distance);
    let distance = rng.gen_range(near..=far);

    origin + roam_direction * distance
}

/// Выбор roam точки. None → оставить предыдущую цель движения.
pub fn pick_roam_destination(
    origin: Vec3,
    players: impl IntoIterator<Item = Vec3>,
    config: &PursuerConfig,
    rng: &mut impl Rng,
    navigation: Option<&Navigation>,
) -> Option<Vec3> {
    let toward = nearest_player(origin, players)?;
    let candidate = roam_candidate(origin, toward, config, rng);
    navigation?.sample_walkable_point(candidate, config.roam_sample_tolerance)
}

/// Система: продвижение roam sequences
///
/// IdleBeat закончился → новая точка + Walk; Walk закончился → Idle или конец сессии.
pub fn advance_roam_sequences(
    mut pursuers: Query<
        (
            Entity,
            &Transform,
            &PursuerConfig,
            &mut BehaviorTasks,
            &mut PursuerState,
            &mut MovementCommand,
            &mut MovementSpeed,
        ),
        With<Pursuer>,
    >,
    players: Query<&Transform, (With<Player>, Without<Pursuer>)>,
    navigation: Option<Res<Navigation>>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut state_changes: EventWriter<PursuerStateChanged>,
) {
    let delta = time.delta_secs();

    for (entity, transform, config, mut tasks, mut state, mut command, mut speed) in pursuers.iter_mut() {
        let Some(roam) = tasks.roam.as_mut() else {
            continue;
        };

        match roam.advance(delta) {
            RoamStep::Waiting => {}
            RoamStep::PickDestination => {
                let destination = pick_roam_destination(
                    transform.translation,
                    players.iter().map(|player| player.translation),
                    config,
                    &mut rng.rng,
                    navigation.as_deref(),
                );

                match destination {
                    Some(target) => {
                        *command = MovementCommand::MoveToPosition { target };
                        speed.speed = config.walk_speed;
                    }
                    None => {
                        crate::log(&format!("🧭 {:?} roam: no walkable point, keeping previous target", entity));
                    }
                }

                set_state(entity, &mut state, PursuerState::Walk, &mut state_changes);
            }
            RoamStep::BeginIdle => {
                set_state(entity, &mut state, PursuerState::Idle, &mut state_changes);
            }
            RoamStep::Finished => {
                tasks.roam = None;
                crate::log(&format!("🚶 {:?} roam session finished", entity));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_nearest_player_picks_closest() {
        let players = [Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -4.0), Vec3::new(-7.0, 0.0, 0.0)];
        assert_eq!(nearest_player(Vec3::ZERO, players), Some(Vec3::new(0.0, 0.0, -4.0)));
        assert_eq!(nearest_player(Vec3::ZERO, Vec::<Vec3>::new()), None);
    }

    #[test]
    fn test_candidate_with_inverted_bounds_stays_in_range() {
        let config = PursuerConfig {
            roam_min_distance: 30.0,
            roam_max_distance: 5.0,
            roam_cone_angle: -40.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let toward = Vec3::new(0.0, 0.0, 50.0);

        for _ in 0..200 {
            let candidate = roam_candidate(Vec3::ZERO, toward, &config, &mut rng);
            let distance = candidate.length();
            assert!((5.0 - 1e-3..=30.0 + 1e-3).contains(&distance), "distance {}", distance);

            let angle = Vec3::Z.angle_between(candidate).to_degrees();
            assert!(angle <= 40.0 + 1e-2, "angle {}", angle);
        }
    }

    #[test]
    fn test_no_players_keeps_previous_target() {
        let config = PursuerConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let navigation = Navigation::new(crate::navigation::FlatNavArea::square(50.0));
        let picked = pick_roam_destination(Vec3::ZERO, Vec::<Vec3>::new(), &config, &mut rng, Some(&navigation));
        assert_eq!(picked, None);
    }
}
