//! AI systems (authority-side logic)

pub mod chase;
pub mod contact;
pub mod decision;
pub mod perception;
pub mod roam;

// Re-export all systems
pub use chase::*;
pub use contact::*;
pub use decision::*;
pub use perception::*;
pub use roam::*;
