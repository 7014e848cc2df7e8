//! Data structures representing the game world.
//!
//! This module defines [`GameWorld`] and related types used at runtime to
//! track the current state of the game. All item movement goes through the
//! relocation helpers here, which detach an item from its old holder and
//! attach it to the new one as a single operation -- an item is referenced
//! by exactly one container at all times.

use crate::ROOT_ACCESS_VERSION;
use crate::area::Area;
use crate::item::Item;
use crate::npc::{Gang, Npc};
use crate::player::Player;
use crate::spinners::PhraseKey;

use anyhow::{Context, Result, anyhow};
use gametools::Spinner;
use log::info;
use serde::{Deserialize, Serialize};

use std::collections::{HashMap, HashSet};
use uuid::Uuid;
use variantly::Variantly;

/// Kinds of places where a `WorldObject` may be located.
/// Because Areas *are* the locations, their location is always `Nowhere`.
/// Consumed or not-yet-spawned items are also located `Nowhere`.
#[derive(Copy, Debug, Default, Clone, Serialize, Deserialize, Variantly, PartialEq, Eq)]
pub enum Location {
    Area(Uuid),
    Item(Uuid),
    Inventory,
    Npc(Uuid),
    #[default]
    Nowhere,
}

/// Methods common to any object in the world.
pub trait WorldObject {
    fn id(&self) -> Uuid;
    fn symbol(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn location(&self) -> &Location;
}

/// Anything that can hold items: areas hold ground items, the player and
/// NPCs hold inventory, containers hold contents.
pub trait ItemHolder {
    fn add_item(&mut self, item_id: Uuid);
    fn remove_item(&mut self, item_id: Uuid);
    fn contains_item(&self, item_id: Uuid) -> bool;
}

/// Complete state of the running game.
///
/// `GameWorld` contains every area, item, NPC and gang roster currently
/// active, as well as the player character. It is created during loading and
/// then mutated throughout gameplay.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameWorld {
    pub areas: HashMap<Uuid, Area>,
    pub items: HashMap<Uuid, Item>,
    pub npcs: HashMap<Uuid, Npc>,
    pub gangs: HashMap<String, Gang>,
    pub player: Player,
    pub phrases: HashMap<PhraseKey, Spinner<String>>,
    pub turn_count: usize,
    pub version: String,
}

impl GameWorld {
    /// Create a new empty world with a default player.
    pub fn new_empty() -> GameWorld {
        let world = Self {
            areas: HashMap::new(),
            items: HashMap::new(),
            npcs: HashMap::new(),
            gangs: HashMap::new(),
            player: Player::default(),
            phrases: HashMap::new(),
            turn_count: 0,
            version: ROOT_ACCESS_VERSION.to_string(),
        };
        info!("new, empty 'GameWorld' created");
        world
    }

    /// Returns a random phrase from the selected wheel, or a supplied default.
    pub fn spin_phrase(&self, key: PhraseKey, default: &str) -> String {
        self.phrases
            .get(&key)
            .and_then(Spinner::spin)
            .unwrap_or_else(|| default.to_string())
    }

    /// Obtain a reference to the area the player occupies.
    /// # Errors
    /// - if player isn't in an Area or the Area's uuid is not found
    pub fn player_area_ref(&self) -> Result<&Area> {
        match self.player.location {
            Location::Area(uuid) => self
                .areas
                .get(&uuid)
                .ok_or_else(|| anyhow!("player's area UUID ({uuid}) not found in world")),
            _ => Err(anyhow!("player not in an area - located at {:?}", self.player.location)),
        }
    }

    /// Obtain a mutable reference to the area the player occupies.
    /// # Errors
    /// - if player is not in an area or the area's UUID is not found
    pub fn player_area_mut(&mut self) -> Result<&mut Area> {
        match self.player.location {
            Location::Area(uuid) => self
                .areas
                .get_mut(&uuid)
                .ok_or_else(|| anyhow!("player's area UUID ({uuid}) not found in world")),
            _ => Err(anyhow!("player not in an area - located at {:?}", self.player.location)),
        }
    }

    /// Get mutable reference to a world item.
    pub fn get_item_mut(&mut self, item_id: Uuid) -> Option<&mut Item> {
        self.items.get_mut(&item_id)
    }

    /// Living NPCs standing in an area, sorted by symbol so that processing
    /// order (and therefore any sequence of random rolls) is reproducible.
    pub fn living_npcs_in_area(&self, area_id: Uuid) -> Vec<Uuid> {
        let Some(area) = self.areas.get(&area_id) else {
            return Vec::new();
        };
        let mut ids: Vec<Uuid> = area
            .npcs
            .iter()
            .filter(|id| self.npcs.get(id).is_some_and(Npc::is_alive))
            .copied()
            .collect();
        ids.sort_by(|a, b| {
            let sa = self.npcs.get(a).map_or("", |n| n.symbol.as_str());
            let sb = self.npcs.get(b).map_or("", |n| n.symbol.as_str());
            sa.cmp(sb).then(a.cmp(b))
        });
        ids
    }

    /// Detach an item from whatever currently holds it, leaving it `Nowhere`.
    fn detach_item(&mut self, item_id: Uuid) -> Result<()> {
        let location = *self
            .items
            .get(&item_id)
            .with_context(|| format!("detaching unknown item {item_id}"))?
            .location();
        match location {
            Location::Area(area_id) => {
                if let Some(area) = self.areas.get_mut(&area_id) {
                    area.contents.remove(&item_id);
                }
            },
            Location::Item(container_id) => {
                if let Some(container) = self.items.get_mut(&container_id) {
                    container.remove_item(item_id);
                }
            },
            Location::Inventory => self.player.remove_item(item_id),
            Location::Npc(npc_id) => {
                if let Some(npc) = self.npcs.get_mut(&npc_id) {
                    npc.remove_item(item_id);
                }
            },
            Location::Nowhere => {},
        }
        if let Some(item) = self.items.get_mut(&item_id) {
            item.set_location_nowhere();
        }
        Ok(())
    }

    /// Move an item onto the ground of an area.
    /// # Errors
    /// - if the item or target area id is unknown
    pub fn move_item_to_area(&mut self, item_id: Uuid, area_id: Uuid) -> Result<()> {
        if !self.areas.contains_key(&area_id) {
            return Err(anyhow!("moving item {item_id} to unknown area {area_id}"));
        }
        self.detach_item(item_id)?;
        if let Some(area) = self.areas.get_mut(&area_id) {
            area.contents.insert(item_id);
        }
        if let Some(item) = self.items.get_mut(&item_id) {
            item.set_location_area(area_id);
        }
        Ok(())
    }

    /// Move an item into the player's inventory.
    /// # Errors
    /// - if the item id is unknown
    pub fn move_item_to_inventory(&mut self, item_id: Uuid) -> Result<()> {
        self.detach_item(item_id)?;
        self.player.add_item(item_id);
        if let Some(item) = self.items.get_mut(&item_id) {
            item.set_location_inventory();
        }
        Ok(())
    }

    /// Move an item into an NPC's inventory.
    /// # Errors
    /// - if the item or NPC id is unknown
    pub fn move_item_to_npc(&mut self, item_id: Uuid, npc_id: Uuid) -> Result<()> {
        if !self.npcs.contains_key(&npc_id) {
            return Err(anyhow!("moving item {item_id} to unknown NPC {npc_id}"));
        }
        self.detach_item(item_id)?;
        if let Some(npc) = self.npcs.get_mut(&npc_id) {
            npc.add_item(item_id);
        }
        if let Some(item) = self.items.get_mut(&item_id) {
            item.set_location_npc(npc_id);
        }
        Ok(())
    }

    /// Move an item inside a container item (or a soil patch).
    /// # Errors
    /// - if either id is unknown, or the target cannot hold items
    pub fn move_item_into_container(&mut self, item_id: Uuid, container_id: Uuid) -> Result<()> {
        let can_hold = self
            .items
            .get(&container_id)
            .with_context(|| format!("moving item {item_id} into unknown container {container_id}"))?
            .can_hold();
        if !can_hold {
            return Err(anyhow!("item {container_id} cannot hold other items"));
        }
        self.detach_item(item_id)?;
        if let Some(container) = self.items.get_mut(&container_id) {
            container.add_item(item_id);
        }
        if let Some(item) = self.items.get_mut(&item_id) {
            item.set_location_item(container_id);
        }
        Ok(())
    }

    /// Remove an item from the world entirely (consumed).
    /// # Errors
    /// - if the item id is unknown
    pub fn consume_item(&mut self, item_id: Uuid) -> Result<Item> {
        self.detach_item(item_id)?;
        let item = self
            .items
            .remove(&item_id)
            .with_context(|| format!("consuming unknown item {item_id}"))?;
        info!("item '{}' ({}) consumed and removed from world", item.name, item.id);
        Ok(item)
    }

    /// Count how many holders reference an item. Always 0 or 1 when the
    /// relocation helpers are the only mutation path.
    pub fn holder_count(&self, item_id: Uuid) -> usize {
        let mut count = 0;
        count += self.areas.values().filter(|a| a.contents.contains(&item_id)).count();
        count += self.items.values().filter(|i| i.contains_item(item_id)).count();
        count += self.npcs.values().filter(|n| n.contains_item(item_id)).count();
        if self.player.contains_item(item_id) {
            count += 1;
        }
        count
    }
}

/// Constructs a set of all reachable item uuids in an area: items on the
/// ground plus the contents of open containers. Items in closed or locked
/// containers and NPC inventories are excluded.
///
/// # Errors
/// - if supplied `area_id` is invalid
pub fn nearby_reachable_items(world: &GameWorld, area_id: Uuid) -> Result<HashSet<Uuid>> {
    let current_area = world
        .areas
        .get(&area_id)
        .with_context(|| format!("{area_id} area id not found"))?;
    let ground_items = &current_area.contents;
    let mut contained_items = HashSet::new();
    for item_id in ground_items {
        if let Some(item) = world.items.get(item_id)
            && item.is_accessible()
        {
            contained_items.extend(&item.contents);
        }
    }
    Ok(ground_items.union(&contained_items).copied().collect())
}
