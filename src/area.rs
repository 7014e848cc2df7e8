//! Areas of the game world and their connections.
//!
//! An [`Area`] owns the ids of the items and NPCs standing in it, the active
//! hazards on the ground, and exits to neighboring areas keyed by direction
//! phrase ("north", "fire escape", ...).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hazard::ActiveHazard;
use crate::world::{Location, WorldObject};

/// One location in the world.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Area {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub visited: bool,
    pub exits: HashMap<String, Uuid>,
    pub contents: HashSet<Uuid>,
    pub npcs: HashSet<Uuid>,
    pub hazards: Vec<ActiveHazard>,
}

impl Area {
    /// Look up an exit by direction phrase, case-insensitively.
    pub fn exit_to(&self, direction: &str) -> Option<Uuid> {
        let wanted = direction.trim().to_lowercase();
        self.exits
            .iter()
            .find(|(dir, _)| dir.to_lowercase() == wanted)
            .map(|(_, id)| *id)
    }

    /// Direction names sorted for display.
    pub fn exit_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.exits.keys().cloned().collect();
        names.sort();
        names
    }
}

impl WorldObject for Area {
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
        // areas *are* the locations, so they sit nowhere themselves
        &self.location
    }
}
