//! Collision Layers Constants
//!
//! Битовые маски категорий - centralised constants для perception и contact фильтров.
//!
//! ## Layers:
//! - Bit 0 (0b1 = 1): Reserved
//! - Bit 1 (0b10 = 2): Players (добыча pursuer'а)
//! - Bit 2 (0b100 = 4): Environment (стены/препятствия, блокируют LOS)
//! - Bit 3 (0b1000 = 8): Pursuers
//!
//! ## Использование:
//! ```
//! use pursuer_simulation::collision_layers::*;
//!
//! let layer = CollisionLayer(COLLISION_LAYER_PLAYERS);
//! assert!(layer.matches(COLLISION_MASK_PREY));
//! assert!(!layer.matches(COLLISION_MASK_OBSTRUCTION));
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Layer 1: Players (CharacterBody - цели perception и attack trigger)
pub const COLLISION_LAYER_PLAYERS: u32 = 0b10; // 2

/// Layer 2: Environment (walls, obstacles, terrain props)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100; // 4

/// Layer 3: Pursuers (сам охотник - никогда не цель perception)
pub const COLLISION_LAYER_PURSUERS: u32 = 0b1000; // 8

/// Mask: кого pursuer считает добычей
pub const COLLISION_MASK_PREY: u32 = COLLISION_LAYER_PLAYERS;

/// Mask: что перекрывает line-of-sight
pub const COLLISION_MASK_OBSTRUCTION: u32 = COLLISION_LAYER_ENVIRONMENT;

/// На каком слое находится entity
///
/// Default = 0 (ни один слой): entity невидима для всех масок.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct CollisionLayer(pub u32);

impl CollisionLayer {
    /// true если слой пересекается с маской
    pub fn matches(&self, mask: u32) -> bool {
        self.0 & mask != 0
    }
}
