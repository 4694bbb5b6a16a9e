//! Pursuer tuning parameters.
//!
//! Один `PursuerConfig` на entity. Значения по умолчанию:
//! исходный тюнинг охотника. Загружается из JSON для headless прогонов.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision_layers::{COLLISION_MASK_OBSTRUCTION, COLLISION_MASK_PREY};

/// Ошибки валидации/загрузки конфига
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be > 0 (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be >= 0 (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("`{min_field}` ({min}) must not exceed `{max_field}` ({max})")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("`{field}` must be within [0, 1] (got {value})")]
    ProbabilityOutOfRange { field: &'static str, value: f32 },

    #[error("field of view must be within (0, 360] degrees (got {0})")]
    FieldOfView(f32),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Параметры охотника (perception, roam, chase, teleport)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct PursuerConfig {
    /// Базовая скорость ходьбы (m/s)
    pub walk_speed: f32,
    /// Множитель скорости во время погони
    pub chase_speed_multiplier: f32,

    /// Roam: пауза Walk между выборами точки (секунды)
    pub roam_update_interval: f32,
    /// Roam: Idle пауза перед выбором новой точки (секунды)
    pub roam_idle_beat: f32,
    pub roam_min_distance: f32,
    pub roam_max_distance: f32,
    /// Roam: половина конуса разброса направления (градусы)
    pub roam_cone_angle: f32,
    /// Roam: радиус поиска walkable точки вокруг кандидата
    pub roam_sample_tolerance: f32,
    /// Длительность одной roam сессии, запускаемой decision loop'ом
    pub roam_session_duration: f32,

    /// Vision: радиус обнаружения (метры)
    pub view_range: f32,
    /// Vision: полный угол обзора (градусы)
    pub field_of_view: f32,
    /// Vision: высота глаз над pivot'ом
    pub eye_height: f32,
    pub player_mask: u32,
    pub obstruction_mask: u32,

    pub chase_duration: f32,
    pub post_teleport_chase_duration: f32,
    pub taunt_duration: f32,
    /// Вероятность телепорта за спину цели после taunt [0, 1]
    pub teleport_chance: f32,
    pub teleport_distance_behind: f32,
    pub teleport_sample_tolerance: f32,

    /// Период decision loop (секунды)
    pub decision_interval: f32,
    /// Радиус attack trigger (используется headless drivers)
    pub attack_trigger_radius: f32,
}

impl Default for PursuerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.5,
            chase_speed_multiplier: 1.5,
            roam_update_interval: 0.5,
            roam_idle_beat: 1.0,
            roam_min_distance: 10.0,
            roam_max_distance: 25.0,
            roam_cone_angle: 60.0,
            roam_sample_tolerance: 5.0,
            roam_session_duration: 10.0,
            view_range: 20.0,
            field_of_view: 90.0,
            eye_height: 1.5,
            player_mask: COLLISION_MASK_PREY,
            obstruction_mask: COLLISION_MASK_OBSTRUCTION,
            chase_duration: 5.0,
            post_teleport_chase_duration: 2.0,
            taunt_duration: 1.5,
            teleport_chance: 0.5,
            teleport_distance_behind: 3.0,
            teleport_sample_tolerance: 3.0,
            decision_interval: 0.1,
            attack_trigger_radius: 1.0,
        }
    }
}

impl PursuerConfig {
    /// Парсинг JSON (отсутствующие поля → defaults) + валидация
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Половина угла обзора в радианах
    pub fn half_fov_radians(&self) -> f32 {
        (self.field_of_view * 0.5).to_radians()
    }

    pub fn chase_speed(&self, base_speed: f32) -> f32 {
        base_speed * self.chase_speed_multiplier
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("walk_speed", self.walk_speed),
            ("chase_speed_multiplier", self.chase_speed_multiplier),
            ("roam_update_interval", self.roam_update_interval),
            ("roam_session_duration", self.roam_session_duration),
            ("view_range", self.view_range),
            ("decision_interval", self.decision_interval),
            ("attack_trigger_radius", self.attack_trigger_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        // Длительности могут быть нулевыми (мгновенная фаза), но не отрицательными
        let non_negative = [
            ("roam_idle_beat", self.roam_idle_beat),
            ("roam_min_distance", self.roam_min_distance),
            ("roam_cone_angle", self.roam_cone_angle),
            ("roam_sample_tolerance", self.roam_sample_tolerance),
            ("eye_height", self.eye_height),
            ("chase_duration", self.chase_duration),
            ("post_teleport_chase_duration", self.post_teleport_chase_duration),
            ("taunt_duration", self.taunt_duration),
            ("teleport_distance_behind", self.teleport_distance_behind),
            ("teleport_sample_tolerance", self.teleport_sample_tolerance),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.roam_min_distance > self.roam_max_distance {
            return Err(ConfigError::InvertedRange {
                min_field: "roam_min_distance",
                max_field: "roam_max_distance",
                min: self.roam_min_distance,
                max: self.roam_max_distance,
            });
        }

        if !(0.0..=1.0).contains(&self.teleport_chance) {
            return Err(ConfigError::ProbabilityOutOfRange {
                field: "teleport_chance",
                value: self.teleport_chance,
            });
        }

        if !(self.field_of_view > 0.0 && self.field_of_view <= 360.0) {
            return Err(ConfigError::FieldOfView(self.field_of_view));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PursuerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.walk_speed, 3.5);
        assert_eq!(config.chase_duration, 5.0);
        assert_eq!(config.teleport_chance, 0.5);
        assert_eq!(config.decision_interval, 0.1);
    }

    #[test]
    fn test_half_fov() {
        let config = PursuerConfig::default();
        assert!((config.half_fov_radians() - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PursuerConfig::from_json_str(r#"{ "view_range": 35.0, "teleport_chance": 1.0 }"#)
            .expect("valid config");
        assert_eq!(config.view_range, 35.0);
        assert_eq!(config.teleport_chance, 1.0);
        assert_eq!(config.taunt_duration, 1.5);
    }

    #[test]
    fn test_inverted_roam_range_rejected() {
        let result = PursuerConfig::from_json_str(r#"{ "roam_min_distance": 30.0, "roam_max_distance": 5.0 }"#);
        assert!(matches!(result, Err(ConfigError::InvertedRange { .. })));
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let config = PursuerConfig {
            teleport_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { field: "teleport_chance", .. })
        ));
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        let config = PursuerConfig {
            decision_interval: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "decision_interval", .. })
        ));
    }

    #[test]
    fn test_negative_duration_rejected_but_zero_allowed() {
        let zero_taunt = PursuerConfig {
            taunt_duration: 0.0,
            ..Default::default()
        };
        assert!(zero_taunt.validate().is_ok());

        let negative_taunt = PursuerConfig {
            taunt_duration: -1.0,
            ..Default::default()
        };
        let error = negative_taunt.validate().expect_err("negative taunt");
        assert!(matches!(error, ConfigError::Negative { field: "taunt_duration", .. }));
        assert!(error.to_string().contains(">= 0"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = PursuerConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
