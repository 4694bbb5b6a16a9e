//! AI components

pub mod chase;
pub mod fsm;
pub mod pursuer;
pub mod roam;

#[cfg(test)]
mod pursuer_tests;

// Re-export all components
pub use chase::*;
pub use fsm::*;
pub use pursuer::*;
pub use roam::*;
