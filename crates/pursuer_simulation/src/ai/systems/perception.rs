//! Perception poll: Query → геометрия → PerceivedTarget.

use bevy::prelude::*;

use crate::ai::components::PerceivedTarget;
use crate::collision_layers::CollisionLayer;
use crate::components::Occluder;
use crate::config::PursuerConfig;
use crate::perception::{
    select_visible_target, Candidate, ObstructionBox, PerceptionResult, SensorParams, SensorPose,
};

impl From<&PursuerConfig> for SensorParams {
    fn from(config: &PursuerConfig) -> Self {
        Self {
            view_range: config.view_range,
            half_fov: config.half_fov_radians(),
            eye_height: config.eye_height,
        }
    }
}

/// scan(): свежий poll + запись PerceivedTarget (или очистка).
///
/// `candidates` - все entity со слоем (кроме самих охотников), фильтр по `player_mask`.
/// `occluders` - obstruction volumes, фильтр по `obstruction_mask`.
pub fn scan<'a>(
    entity: Entity,
    transform: &Transform,
    config: &PursuerConfig,
    perceived: &mut PerceivedTarget,
    candidates: impl IntoIterator<Item = (Entity, &'a Transform, &'a CollisionLayer)>,
    occluders: impl IntoIterator<Item = (&'a Transform, &'a Occluder, &'a CollisionLayer)>,
) -> PerceptionResult {
    let obstructions: Vec<ObstructionBox> = occluders
        .into_iter()
        .filter(|(_, _, layer)| layer.matches(config.obstruction_mask))
        .map(|(occluder_transform, occluder, _)| {
            let (min, max) = occluder.bounds(occluder_transform.translation);
            ObstructionBox { min, max }
        })
        .collect();

    let visible = candidates
        .into_iter()
        .filter(|(candidate, _, layer)| *candidate != entity && layer.matches(config.player_mask))
        .map(|(candidate, candidate_transform, _)| Candidate {
            entity: candidate,
            position: candidate_transform.translation,
        });

    let pose = SensorPose {
        position: transform.translation,
        forward: transform.forward().as_vec3(),
    };
    let result = select_visible_target(pose, SensorParams::from(config), visible, &obstructions);

    if perceived.0 != result.target {
        match result.target {
            Some(target) => crate::log(&format!(
                "👁️ Perception: {:?} spotted {:?} at {:.1}m",
                entity, target, result.distance
            )),
            None => crate::log(&format!(
                "👻 Perception: {:?} lost sight of {:?}",
                entity, perceived.0
            )),
        }
    }
    perceived.0 = result.target;

    result
}
