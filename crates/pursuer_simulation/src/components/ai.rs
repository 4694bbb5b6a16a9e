//! AI компоненты: state machine, perceived target, sequences

// NOTE: компоненты живут в crate::ai::components, здесь только re-export для единообразия
pub use crate::ai::{BehaviorTasks, DecisionClock, PerceivedTarget, Pursuer, PursuerState};
