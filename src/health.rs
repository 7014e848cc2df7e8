//! Health Module
//!
//! Hit-point tracking for the player and NPCs. Damage saturates at zero and
//! healing saturates at the maximum, so health can never go negative or
//! overshoot.
use std::cmp;

use serde::{Deserialize, Serialize};

/// Represents the state of a living entity's health.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthState {
    max_hp: u32,
    current_hp: u32,
}
impl HealthState {
    /// Create a clean `HealthState` with specified maximum health.
    pub fn new_at_max(max_hp: u32) -> HealthState {
        HealthState {
            max_hp,
            current_hp: max_hp,
        }
    }

    /// Get the maximum HP for this entity.
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Get the current HP for this entity.
    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    /// Return whether this entity is alive or dead.
    /// In the future, there may be additional states -- so not using a boolean here.
    pub fn life_state(&self) -> LifeState {
        if self.current_hp > 0 {
            LifeState::Alive
        } else {
            LifeState::Dead
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.life_state(), LifeState::Alive)
    }

    /// Do damage to health. Saturates at zero.
    pub fn damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Heal the character. Saturates at max health.
    pub fn heal(&mut self, amount: u32) {
        self.current_hp = cmp::min(self.max_hp, self.current_hp.saturating_add(amount));
    }
}

/// Possible life states for living entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    Dead,
}
