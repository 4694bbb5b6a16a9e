//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: добыча охотника (Player, CatchReaction)
//! - movement: команды перемещения для navigation collaborator (MovementCommand, MovementSpeed)
//! - ai: охотник (Pursuer, PursuerState, PerceivedTarget, BehaviorTasks)
//! - world: геометрия мира (Occluder)

pub mod actor;
pub mod ai;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use ai::*;
pub use movement::*;
pub use world::*;
