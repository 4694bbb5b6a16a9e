//! Roam sequence - повторяющийся цикл Idle beat → Walk в пределах бюджета времени.
//!
//! Фазы:
//! - IdleBeat: стоим `roam_idle_beat` секунд, затем выбираем новую точку
//! - Walking: идём `roam_update_interval` секунд
//!
//! Каждая итерация списывает `roam_update_interval + roam_idle_beat` из бюджета;
//! цикл заканчивается когда накопленное время ≥ `duration`.

/// Текущая фаза roam цикла
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoamPhase {
    IdleBeat { remaining: f32 },
    Walking { remaining: f32 },
}

/// Что системе сделать на этом шаге
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoamStep {
    /// Фаза ещё идёт
    Waiting,
    /// Idle beat закончился: выбрать точку, перейти в Walk
    PickDestination,
    /// Walk закончился, бюджет не исчерпан: снова Idle
    BeginIdle,
    /// Бюджет исчерпан: handle очищается
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoamSequence {
    pub phase: RoamPhase,
    /// Накопленное время итераций (секунды)
    pub elapsed: f32,
    /// Бюджет всей сессии (секунды)
    pub duration: f32,
    idle_beat: f32,
    update_interval: f32,
}

impl RoamSequence {
    /// Новая сессия начинается с Idle beat
    pub fn new(duration: f32, idle_beat: f32, update_interval: f32) -> Self {
        Self {
            phase: RoamPhase::IdleBeat {
                remaining: idle_beat,
            },
            elapsed: 0.0,
            duration,
            idle_beat,
            update_interval,
        }
    }

    /// Время, которое одна итерация списывает из бюджета
    pub fn iteration_cost(&self) -> f32 {
        self.update_interval + self.idle_beat
    }

    pub fn advance(&mut self, delta: f32) -> RoamStep {
        match &mut self.phase {
            RoamPhase::IdleBeat { remaining } => {
                *remaining -= delta;
                if *remaining > 0.0 {
                    return RoamStep::Waiting;
                }
                self.phase = RoamPhase::Walking {
                    remaining: self.update_interval,
                };
                RoamStep::PickDestination
            }
            RoamPhase::Walking { remaining } => {
                *remaining -= delta;
                if *remaining > 0.0 {
                    return RoamStep::Waiting;
                }

                self.elapsed += self.iteration_cost();
                if self.elapsed >= self.duration {
                    return RoamStep::Finished;
                }

                self.phase = RoamPhase::IdleBeat {
                    remaining: self.idle_beat,
                };
                RoamStep::BeginIdle
            }
        }
    }
}
