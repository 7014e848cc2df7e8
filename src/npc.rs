//! NPC Module
//!
//! Civilians and gang members. Gang membership is a name keyed into the
//! world's gang rosters; the roster's member set and each member's `gang`
//! field are kept in step by the loader and the world mutation helpers.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::prelude::IndexedRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::behavior::BehaviorKind;
use crate::effect::{EffectKind, StatusEffect, has_effect};
use crate::health::HealthState;
use crate::world::{ItemHolder, Location, WorldObject};

/// A non-playable character.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Npc {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub inventory: HashSet<Uuid>,
    pub gang: Option<String>,
    pub health: HealthState,
    pub effects: Vec<StatusEffect>,
    /// Chance per turn of spotting an unhidden player. Always in [0,1].
    pub detection_chance: f64,
    /// Chance of shrugging off a hazard application. Always in [0,1].
    pub hazard_resistance: f64,
    /// Last turn each behavior ran, used to rate-limit repeats.
    pub cooldowns: HashMap<BehaviorKind, usize>,
    pub dialogue: Vec<String>,
}

impl Npc {
    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn is_gang_member(&self) -> bool {
        self.gang.is_some()
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        has_effect(&self.effects, kind)
    }

    /// Returns a random line of the NPC's dialogue, or the fallback when it
    /// has nothing to say.
    pub fn random_dialogue<R: Rng>(&self, rng: &mut R, fallback: &str) -> String {
        self.dialogue
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }

    /// One detection roll against this NPC's chance.
    pub fn rolls_detection<R: Rng>(&self, rng: &mut R) -> bool {
        rng.random::<f64>() < self.detection_chance
    }

    /// True if `kind` ran within the last `window` turns.
    pub fn on_cooldown(&self, kind: BehaviorKind, current_turn: usize, window: usize) -> bool {
        self.cooldowns
            .get(&kind)
            .is_some_and(|&last| current_turn.saturating_sub(last) < window)
    }
}

impl WorldObject for Npc {
    fn id(&self) -> Uuid {
        self.id
    }
    fn symbol(&self) -> &str {
        &self.symbol
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn location(&self) -> &Location {
        &self.location
    }
}

impl ItemHolder for Npc {
    fn add_item(&mut self, item_id: Uuid) {
        self.inventory.insert(item_id);
    }
    fn remove_item(&mut self, item_id: Uuid) {
        self.inventory.remove(&item_id);
    }
    fn contains_item(&self, item_id: Uuid) -> bool {
        self.inventory.contains(&item_id)
    }
}

/// A gang roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Gang {
    pub name: String,
    pub description: String,
    pub hostile: bool,
    pub members: HashSet<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn test_npc() -> Npc {
        Npc {
            id: Uuid::new_v4(),
            symbol: "wade".into(),
            name: "Wade".into(),
            description: String::new(),
            location: Location::Nowhere,
            inventory: HashSet::new(),
            gang: Some("Sprout Boys".into()),
            health: HealthState::new_at_max(10),
            effects: Vec::new(),
            detection_chance: 0.25,
            hazard_resistance: 0.5,
            cooldowns: HashMap::new(),
            dialogue: vec!["You lost?".into()],
        }
    }

    #[test]
    fn dialogue_falls_back_when_empty() {
        let mut npc = test_npc();
        npc.dialogue.clear();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(npc.random_dialogue(&mut rng, "..."), "...");
    }

    #[test]
    fn cooldown_window_rate_limits_repeats() {
        let mut npc = test_npc();
        npc.cooldowns.insert(BehaviorKind::Fight, 5);
        assert!(npc.on_cooldown(BehaviorKind::Fight, 6, 2));
        assert!(!npc.on_cooldown(BehaviorKind::Fight, 7, 2));
        assert!(!npc.on_cooldown(BehaviorKind::Talk, 6, 2));
    }

    #[test]
    fn detection_roll_respects_unit_interval() {
        let mut sure = test_npc();
        sure.detection_chance = 1.0;
        let mut never = test_npc();
        never.detection_chance = 0.0;
        let mut rng = StdRng::seed_from_u64(7);
        assert!(sure.rolls_detection(&mut rng));
        assert!(!never.rolls_detection(&mut rng));
    }
}
