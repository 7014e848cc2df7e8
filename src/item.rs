//! Item types and related helpers.
//!
//! Every capability an item can have is expressed in the closed [`ItemKind`]
//! sum type, so command handlers dispatch with a `match` instead of sniffing
//! attributes. Some items also act as containers (crates, soil patches) when
//! `container_state` is `Some(_)` or the kind is a [`ItemKind::SoilPatch`].

use std::collections::HashSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use variantly::Variantly;

use crate::effect::{EffectDuration, EffectKind};
use crate::hazard::StaticHazard;
use crate::world::{ItemHolder, Location, WorldObject};

/// Growth ladder for planted crops. A plant at the last index is harvestable.
pub const GROWTH_STAGES: [&str; 5] = ["a seed", "a sprout", "a small plant", "a budding plant", "fully grown"];

/// What comes out of a watering can (or a water source fixture).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaterType {
    Regular,
    HackedMilk,
}
impl WaterType {
    /// The effect carried by a crop grown on this water, if any.
    pub fn crop_effect(self) -> Option<EffectKind> {
        match self {
            WaterType::Regular => None,
            WaterType::HackedMilk => Some(EffectKind::Supervision),
        }
    }
}
impl Display for WaterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterType::Regular => write!(f, "water"),
            WaterType::HackedMilk => write!(f, "hacked milk"),
        }
    }
}

/// States for container items.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "camelCase")]
pub enum ContainerState {
    Open,
    Closed,
    Locked,
}

/// What hacking a fixture does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HackEffect {
    /// The fixture spills, leaving an active hazard in the area.
    SpillHazard(StaticHazard),
    /// Water sources in the area start dispensing hacked milk.
    CorruptWater,
}

/// Growth state of a planted crop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantState {
    pub crop: String,
    #[serde(default)]
    pub growth_stage: usize,
    #[serde(default)]
    pub watered_with: Option<WaterType>,
}
impl PlantState {
    pub fn new(crop: &str) -> PlantState {
        PlantState {
            crop: crop.to_string(),
            growth_stage: 0,
            watered_with: None,
        }
    }

    pub fn is_fully_grown(&self) -> bool {
        self.growth_stage >= GROWTH_STAGES.len() - 1
    }

    /// Water the plant once. Each call advances exactly one growth stage;
    /// once fully grown, further watering changes nothing.
    ///
    /// Hacked water contaminates the plant for good: a single hacked-milk
    /// watering determines the harvested crop's effect no matter what it
    /// drinks afterward.
    pub fn water(&mut self, water: WaterType) -> WaterOutcome {
        if self.is_fully_grown() {
            return WaterOutcome::AlreadyFullyGrown;
        }
        if self.watered_with != Some(WaterType::HackedMilk) {
            self.watered_with = Some(water);
        }
        self.growth_stage += 1;
        WaterOutcome::Grew {
            stage: self.growth_stage,
            stage_name: GROWTH_STAGES[self.growth_stage],
        }
    }

    /// The effect the harvested crop will carry.
    pub fn harvest_effect(&self) -> Option<EffectKind> {
        self.watered_with.and_then(WaterType::crop_effect)
    }
}

/// Result of one watering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WaterOutcome {
    Grew { stage: usize, stage_name: &'static str },
    AlreadyFullyGrown,
}

/// Closed set of item capabilities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Variantly)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemKind {
    Weapon {
        damage: u32,
    },
    Seed {
        crop: String,
    },
    Plant(PlantState),
    Crop {
        #[serde(default)]
        effect: Option<EffectKind>,
        #[serde(default)]
        heal: u32,
    },
    Consumable {
        #[serde(default)]
        heal: u32,
        #[serde(default)]
        effect: Option<EffectKind>,
    },
    WateringCan {
        #[serde(default)]
        water: Option<WaterType>,
    },
    SoilPatch,
    WaterSource {
        water: WaterType,
    },
    Fixture {
        #[serde(default)]
        hack: Option<HackEffect>,
        #[serde(default)]
        hacked: bool,
    },
    Throwable {
        effect: EffectKind,
        duration: EffectDuration,
    },
    Scenery,
}

/// Anything in the world that can be inspected or manipulated apart from NPCs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub portable: bool,
    pub container_state: Option<ContainerState>,
    pub contents: HashSet<Uuid>,
    pub kind: ItemKind,
}

impl WorldObject for Item {
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

impl ItemHolder for Item {
    fn add_item(&mut self, item_id: Uuid) {
        // only containers and soil patches hold things; never an item inside itself
        if self.can_hold() && self.id != item_id {
            self.contents.insert(item_id);
        }
    }
    fn remove_item(&mut self, item_id: Uuid) {
        self.contents.remove(&item_id);
    }
    fn contains_item(&self, item_id: Uuid) -> bool {
        self.contents.contains(&item_id)
    }
}

impl Item {
    /// Returns true if this item can contain other items.
    pub fn can_hold(&self) -> bool {
        self.container_state.is_some() || matches!(self.kind, ItemKind::SoilPatch)
    }

    /// Returns true if this item's contents can be reached directly.
    /// Soil patches are always in the open.
    pub fn is_accessible(&self) -> bool {
        match self.kind {
            ItemKind::SoilPatch => true,
            _ => self.container_state.is_some_and(|cs| cs.is_open()),
        }
    }

    /// Weapon damage, if this is a weapon.
    pub fn weapon_damage(&self) -> Option<u32> {
        match self.kind {
            ItemKind::Weapon { damage } => Some(damage),
            _ => None,
        }
    }

    /// Set location to an `Area` by id.
    pub fn set_location_area(&mut self, area_id: Uuid) {
        self.location = Location::Area(area_id);
    }
    /// Set location to inside another container `Item` by id.
    pub fn set_location_item(&mut self, container_id: Uuid) {
        self.location = Location::Item(container_id);
    }
    /// Set location to player inventory.
    pub fn set_location_inventory(&mut self) {
        self.location = Location::Inventory;
    }
    /// Set location to NPC inventory by id.
    pub fn set_location_npc(&mut self, npc_id: Uuid) {
        self.location = Location::Npc(npc_id);
    }
    /// Detach from the world entirely (consumed / not yet spawned).
    pub fn set_location_nowhere(&mut self) {
        self.location = Location::Nowhere;
    }

    /// Display name including growth stage for plants.
    pub fn display_name(&self) -> String {
        match &self.kind {
            ItemKind::Plant(state) => format!("{} ({})", self.name, GROWTH_STAGES[state.growth_stage]),
            _ => self.name.clone(),
        }
    }
}
