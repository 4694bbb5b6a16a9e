//! Headless drivers - замена engine collaborators для прогонов без движка и рендера.
//!
//! - drive_movement_commands: прямолинейный kinematic исполнитель MovementCommand
//! - detect_trigger_overlaps: сферический attack trigger → ContactEvent
//!
//! Ядро охотника не зависит от этого модуля: в игре эти роли играют
//! NavigationAgent и физические Area/trigger volumes.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::ai::{ContactEvent, Pursuer, PursuerSystems};
use crate::collision_layers::CollisionLayer;
use crate::components::{MovementCommand, MovementSpeed, Occluder};
use crate::config::PursuerConfig;

/// Дистанция, на которой цель движения считается достигнутой
const ARRIVAL_DISTANCE: f32 = 0.05;

/// Trigger tracking - кто сейчас внутри attack trigger каждого охотника
///
/// Key = pursuer, Value = entities внутри сферы на прошлом шаге.
#[derive(Resource, Default)]
pub struct ContactTracking {
    pub inside: HashMap<Entity, HashSet<Entity>>,
}

/// Plugin: headless collaborators (movement + trigger volumes)
///
/// Выполняются в FixedUpdate ДО PursuerSystems: решения видят свежие позиции
/// и контакты этого же шага.
pub struct DriversPlugin;

impl Plugin for DriversPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContactTracking>().add_systems(
            FixedUpdate,
            (drive_movement_commands, detect_trigger_overlaps)
                .chain()
                .before(PursuerSystems),
        );
    }
}

/// Система: исполнение MovementCommand по прямой со скоростью MovementSpeed
///
/// Тело разворачивается лицом по направлению движения (как NavigationAgent).
pub fn drive_movement_commands(
    mut movers: Query<(&mut Transform, &mut MovementCommand, &MovementSpeed)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut command, speed) in movers.iter_mut() {
        match *command {
            MovementCommand::Idle => {}
            MovementCommand::Stop => {
                *command = MovementCommand::Idle;
            }
            MovementCommand::MoveToPosition { target } => {
                let offset = target - transform.translation;
                let distance = offset.length();
                if distance <= ARRIVAL_DISTANCE {
                    continue;
                }

                let direction = offset / distance;
                let step = (speed.speed * delta).min(distance);
                transform.translation += direction * step;

                let facing = Vec3::new(direction.x, 0.0, direction.z);
                if facing.length_squared() > f32::EPSILON {
                    transform.look_to(facing, Vec3::Y);
                }
            }
        }
    }
}

/// Система: сферический attack trigger вокруг каждого охотника
///
/// Edge-triggered: ContactEvent только при входе (как OnTriggerEnter).
/// Фильтрация по слою - забота handle_contact_events.
pub fn detect_trigger_overlaps(
    pursuers: Query<(Entity, &Transform, &PursuerConfig), With<Pursuer>>,
    bodies: Query<(Entity, &Transform), (With<CollisionLayer>, Without<Pursuer>, Without<Occluder>)>,
    mut tracking: ResMut<ContactTracking>,
    mut contacts: EventWriter<ContactEvent>,
) {
    // Despawned охотники больше не трекаются
    tracking.inside.retain(|pursuer, _| pursuers.contains(*pursuer));

    for (pursuer, transform, config) in pursuers.iter() {
        let mut current: Vec<Entity> = bodies
            .iter()
            .filter(|(_, body)| body.translation.distance(transform.translation) <= config.attack_trigger_radius)
            .map(|(entity, _)| entity)
            .collect();
        // Стабильный порядок событий независимо от хеша
        current.sort();

        let previous = tracking.inside.entry(pursuer).or_default();
        for other in &current {
            if !previous.contains(other) {
                contacts.write(ContactEvent {
                    pursuer,
                    other: *other,
                });
            }
        }

        *previous = current.into_iter().collect();
    }
}
