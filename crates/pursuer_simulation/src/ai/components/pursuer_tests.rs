//! Tests for pursuer task bookkeeping.

#[cfg(test)]
mod tests {
    use super::super::chase::ChasePhase;
    use super::super::pursuer::{BehaviorTasks, DecisionClock};
    use super::super::roam::RoamPhase;
    use crate::config::PursuerConfig;

    #[test]
    fn test_start_roaming_replaces_previous() {
        let config = PursuerConfig::default();
        let mut tasks = BehaviorTasks::default();

        assert!(tasks.start_roaming(10.0, &config));
        if let Some(roam) = tasks.roam.as_mut() {
            roam.advance(0.6);
        }

        assert!(tasks.start_roaming(4.0, &config));
        let roam = tasks.roam.as_ref().expect("roam active");
        assert_eq!(roam.duration, 4.0);
        assert_eq!(roam.phase, RoamPhase::IdleBeat { remaining: config.roam_idle_beat });
    }

    #[test]
    fn test_chase_requires_target() {
        let config = PursuerConfig::default();
        let mut tasks = BehaviorTasks::default();
        assert!(!tasks.start_chase(false, 3.5, &config));
        assert!(!tasks.is_chasing());
    }

    #[test]
    fn test_chase_cancels_roam() {
        let config = PursuerConfig::default();
        let mut tasks = BehaviorTasks::default();
        tasks.start_roaming(10.0, &config);

        assert!(tasks.start_chase(true, 3.5, &config));
        assert!(tasks.is_chasing());
        assert!(!tasks.is_roaming());
        let chase = tasks.chase.as_ref().expect("chase active");
        assert_eq!(chase.phase, ChasePhase::Pursuit { remaining: config.chase_duration });
        assert_eq!(chase.base_speed, 3.5);
    }

    #[test]
    fn test_second_chase_refused() {
        let config = PursuerConfig::default();
        let mut tasks = BehaviorTasks::default();
        assert!(tasks.start_chase(true, 3.5, &config));
        if let Some(chase) = tasks.chase.as_mut() {
            chase.begin_taunt(1.0);
        }

        assert!(!tasks.start_chase(true, 10.0, &config));
        // Текущая sequence не тронута
        let chase = tasks.chase.as_ref().expect("chase active");
        assert_eq!(chase.phase, ChasePhase::Taunt { remaining: 1.0 });
        assert_eq!(chase.base_speed, 3.5);
    }

    #[test]
    fn test_roam_refused_while_chasing() {
        let config = PursuerConfig::default();
        let mut tasks = BehaviorTasks::default();
        tasks.start_chase(true, 3.5, &config);

        assert!(!tasks.start_roaming(10.0, &config));
        assert!(!tasks.is_roaming());
    }

    #[test]
    fn test_decision_clock_fires_on_interval() {
        let mut clock = DecisionClock::default();
        let fired: Vec<bool> = (0..10).map(|_| clock.tick(0.025, 0.1)).collect();
        assert_eq!(
            fired,
            vec![false, false, false, true, false, false, false, true, false, false]
        );
    }
}
