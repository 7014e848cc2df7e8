//! Player -- module for the player character.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effect::StatusEffect;
use crate::health::HealthState;
use crate::world::{ItemHolder, Location, WorldObject};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub inventory: HashSet<Uuid>,
    pub health: HealthState,
    pub effects: Vec<StatusEffect>,
    /// True while the player is keeping out of sight. Noisy actions break cover.
    pub hidden: bool,
    /// Ids of NPCs that have spotted the player. Alerted NPCs stay alerted.
    pub detected_by: HashSet<Uuid>,
    pub score: usize,
}

impl Default for Player {
    fn default() -> Player {
        Self {
            id: Uuid::new_v4(),
            name: "The Gardener".into(),
            description: "a green thumb with root access".into(),
            location: Location::default(),
            inventory: HashSet::default(),
            health: HealthState::new_at_max(20),
            effects: Vec::new(),
            hidden: false,
            detected_by: HashSet::default(),
            score: 0,
        }
    }
}

impl WorldObject for Player {
    fn id(&self) -> Uuid {
        self.id
    }
    fn symbol(&self) -> &str {
        "player"
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

impl ItemHolder for Player {
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

impl Player {
    /// Short status tags for the prompt: active effects plus hidden state.
    pub fn status_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.effects.iter().map(|fx| fx.kind.to_string()).collect();
        if self.hidden {
            tags.push("hidden".to_string());
        }
        tags
    }

    /// Breaking cover: any loud action clears the hidden flag.
    pub fn break_cover(&mut self) {
        self.hidden = false;
    }
}
