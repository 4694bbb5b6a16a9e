//! Tests for perception geometry.

#[cfg(test)]
mod tests {
    use super::super::*;

    const HALF_FOV_45: f32 = std::f32::consts::FRAC_PI_4;

    fn pose() -> SensorPose {
        // Bevy forward = -Z
        SensorPose {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }

    fn params() -> SensorParams {
        SensorParams {
            view_range: 20.0,
            half_fov: HALF_FOV_45,
            eye_height: 1.5,
        }
    }

    fn candidate(index: u32, position: Vec3) -> Candidate {
        Candidate {
            entity: Entity::from_raw(index),
            position,
        }
    }

    #[test]
    fn test_horizontal_angle_ignores_height() {
        let angle = horizontal_angle(Vec3::NEG_Z, Vec3::new(0.0, 10.0, -5.0));
        assert!(angle.abs() < 1e-5);

        let side = horizontal_angle(Vec3::NEG_Z, Vec3::X);
        assert!((side - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_target_directly_above_counts_as_in_view() {
        assert_eq!(horizontal_angle(Vec3::NEG_Z, Vec3::Y), 0.0);
    }

    #[test]
    fn test_empty_scan_returns_none() {
        let result = select_visible_target(pose(), params(), Vec::new(), &[]);
        assert_eq!(result.target, None);
        assert!(result.distance.is_infinite());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let result = select_visible_target(
            pose(),
            params(),
            vec![candidate(1, Vec3::new(0.0, 0.0, -25.0))],
            &[],
        );
        assert_eq!(result.target, None);
    }

    #[test]
    fn test_outside_fov_rejected() {
        // 60° от forward при half FOV 45°
        let behind_side = Vec3::new(60f32.to_radians().sin(), 0.0, -60f32.to_radians().cos()) * 5.0;
        let result = select_visible_target(
            pose(),
            params(),
            vec![
                candidate(1, behind_side),
                candidate(2, Vec3::new(0.0, 0.0, 8.0)), // За спиной
            ],
            &[],
        );
        assert_eq!(result.target, None);
    }

    #[test]
    fn test_nearest_visible_wins() {
        let result = select_visible_target(
            pose(),
            params(),
            vec![
                candidate(1, Vec3::new(0.0, 0.0, -12.0)),
                candidate(2, Vec3::new(1.0, 0.0, -6.0)),
                candidate(3, Vec3::new(0.0, 0.0, 4.0)), // Ближе, но за спиной
            ],
            &[],
        );
        assert_eq!(result.target, Some(Entity::from_raw(2)));
        assert!((result.distance - Vec3::new(1.0, 0.0, -6.0).length()).abs() < 1e-5);
    }

    #[test]
    fn test_tie_keeps_first_encountered() {
        let result = select_visible_target(
            pose(),
            params(),
            vec![
                candidate(7, Vec3::new(2.0, 0.0, -5.0)),
                candidate(8, Vec3::new(-2.0, 0.0, -5.0)),
            ],
            &[],
        );
        assert_eq!(result.target, Some(Entity::from_raw(7)));
    }

    #[test]
    fn test_wall_blocks_line_of_sight() {
        let wall = ObstructionBox::from_center(Vec3::new(0.0, 1.5, -5.0), Vec3::new(3.0, 2.0, 0.25));
        let result = select_visible_target(
            pose(),
            params(),
            vec![candidate(1, Vec3::new(0.0, 0.0, -10.0))],
            &[wall],
        );
        assert_eq!(result.target, None);
    }

    #[test]
    fn test_blocked_near_target_falls_back_to_visible_far_target() {
        let wall = ObstructionBox::from_center(Vec3::new(-3.0, 1.5, -4.0), Vec3::new(1.0, 2.0, 0.25));
        let near_hidden = candidate(1, Vec3::new(-4.0, 0.0, -8.0));
        let far_visible = candidate(2, Vec3::new(2.0, 0.0, -15.0));

        let result = select_visible_target(pose(), params(), vec![near_hidden, far_visible], &[wall]);
        assert_eq!(result.target, Some(Entity::from_raw(2)));
    }

    #[test]
    fn test_obstruction_beyond_target_does_not_block() {
        let wall = ObstructionBox::from_center(Vec3::new(0.0, 1.5, -12.0), Vec3::new(3.0, 2.0, 0.25));
        let result = select_visible_target(
            pose(),
            params(),
            vec![candidate(1, Vec3::new(0.0, 0.0, -8.0))],
            &[wall],
        );
        assert_eq!(result.target, Some(Entity::from_raw(1)));
    }

    #[test]
    fn test_low_obstacle_below_eye_line_does_not_block() {
        // Ящик высотой 1м, глаза на 1.5м, луч горизонтальный
        let crate_box = ObstructionBox::from_center(Vec3::new(0.0, 0.5, -5.0), Vec3::new(1.0, 0.5, 1.0));
        let result = select_visible_target(
            pose(),
            params(),
            vec![candidate(1, Vec3::new(0.0, 0.0, -10.0))],
            &[crate_box],
        );
        assert_eq!(result.target, Some(Entity::from_raw(1)));
    }

    #[test]
    fn test_ray_entry_distance() {
        let obstruction = ObstructionBox::from_center(Vec3::new(0.0, 0.0, -5.0), Vec3::splat(1.0));
        let entry = obstruction.ray_entry(Vec3::ZERO, Vec3::NEG_Z, 10.0);
        assert!(matches!(entry, Some(t) if (t - 4.0).abs() < 1e-5));

        // Слишком короткий луч
        assert_eq!(obstruction.ray_entry(Vec3::ZERO, Vec3::NEG_Z, 3.0), None);
        // Луч в другую сторону
        assert_eq!(obstruction.ray_entry(Vec3::ZERO, Vec3::Z, 10.0), None);
    }

    #[test]
    fn test_ray_starting_inside_box_is_ignored() {
        let obstruction = ObstructionBox::from_center(Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(obstruction.ray_entry(Vec3::ZERO, Vec3::X, 10.0), None);
    }

    /// Свойство: любой выбранный target лежит в конусе и без препятствий по лучу
    #[test]
    fn test_selected_target_always_satisfies_fov_and_los() {
        let walls = [
            ObstructionBox::from_center(Vec3::new(3.0, 1.5, -6.0), Vec3::new(1.0, 2.0, 1.0)),
            ObstructionBox::from_center(Vec3::new(-5.0, 1.5, -3.0), Vec3::new(0.5, 2.0, 2.0)),
        ];
        let sensor = params();

        for step in 0..72u32 {
            let angle = (step as f32 * 5.0).to_radians();
            for ring in 1..=4u32 {
                let radius = ring as f32 * 4.5;
                let position = Vec3::new(angle.sin() * radius, 0.0, -angle.cos() * radius);
                let result = select_visible_target(pose(), sensor, vec![candidate(step, position)], &walls);

                if result.target.is_some() {
                    let offset = position - pose().position;
                    assert!(offset.length() <= sensor.view_range);
                    assert!(horizontal_angle(pose().forward, offset) <= sensor.half_fov);
                    let eye = pose().position + Vec3::Y * sensor.eye_height;
                    assert!(!line_of_sight_blocked(eye, offset.normalize(), offset.length(), &walls));
                }
            }
        }
    }
}
