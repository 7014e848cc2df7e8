//! `loader::npcs` module
//!
//! Parses `npc_templates.json` (gang rosters and NPC definitions) and builds
//! the world's characters. Detection and resistance chances are probabilities
//! in [0,1]; out-of-range values are clamped with a warning rather than being
//! silently compared against a differently-scaled roll.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::health::HealthState;
use crate::idgen::{NAMESPACE_CHARACTER, uuid_from_symbol};
use crate::loader::{LoaderError, read_json};
use crate::npc::{Gang, Npc};
use crate::world::{GameWorld, Location};

fn default_max_hp() -> u32 {
    10
}
fn default_detection() -> f64 {
    0.2
}
fn default_resistance() -> f64 {
    0.5
}
fn default_hostile() -> bool {
    true
}

/// Raw gang roster data.
#[derive(Debug, Deserialize, Serialize)]
pub struct RawGangDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_hostile")]
    pub hostile: bool,
}

/// Raw NPC data as authored in JSON.
#[derive(Debug, Deserialize, Serialize)]
pub struct RawNpcDef {
    pub symbol: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub gang: Option<String>,
    #[serde(default = "default_max_hp")]
    pub max_hp: u32,
    #[serde(default = "default_detection")]
    pub detection_chance: f64,
    #[serde(default = "default_resistance")]
    pub hazard_resistance: f64,
    #[serde(default)]
    pub dialogue: Vec<String>,
    pub area: String,
}

/// Container for the NPC template file.
#[derive(Debug, Deserialize, Serialize)]
pub struct NpcFile {
    #[serde(default)]
    pub gangs: Vec<RawGangDef>,
    pub npcs: Vec<RawNpcDef>,
}

/// Load the NPC template file.
///
/// # Errors
/// - if the file is missing or fails to parse
pub fn load(path: &Path) -> Result<NpcFile, LoaderError> {
    read_json(path)
}

fn clamp_chance(value: f64, what: &str, symbol: &str) -> f64 {
    if (0.0..=1.0).contains(&value) {
        value
    } else {
        warn!("npc '{symbol}': {what} {value} outside [0,1], clamping");
        value.clamp(0.0, 1.0)
    }
}

/// Build gangs and NPCs into the world.
///
/// # Errors
/// - on duplicate symbols, unknown home areas, or membership in an
///   undeclared gang
pub fn build(
    file: &NpcFile,
    world: &mut GameWorld,
    area_index: &HashMap<String, Uuid>,
) -> Result<HashMap<String, Uuid>, LoaderError> {
    for gang_def in &file.gangs {
        if world
            .gangs
            .insert(
                gang_def.name.clone(),
                Gang {
                    name: gang_def.name.clone(),
                    description: gang_def.description.clone(),
                    hostile: gang_def.hostile,
                    members: HashSet::new(),
                },
            )
            .is_some()
        {
            return Err(LoaderError::DuplicateSymbol {
                kind: "gang",
                symbol: gang_def.name.clone(),
            });
        }
    }

    let mut index = HashMap::new();
    for def in &file.npcs {
        let id = uuid_from_symbol(&NAMESPACE_CHARACTER, &def.symbol);
        if index.insert(def.symbol.clone(), id).is_some() {
            return Err(LoaderError::DuplicateSymbol {
                kind: "npc",
                symbol: def.symbol.clone(),
            });
        }
        let area_id = *area_index.get(&def.area).ok_or_else(|| LoaderError::UnknownSymbol {
            kind: "area",
            symbol: def.area.clone(),
        })?;
        if let Some(gang_name) = &def.gang {
            let gang = world.gangs.get_mut(gang_name).ok_or_else(|| LoaderError::UnknownSymbol {
                kind: "gang",
                symbol: gang_name.clone(),
            })?;
            gang.members.insert(id);
        }

        world.npcs.insert(
            id,
            Npc {
                id,
                symbol: def.symbol.clone(),
                name: def.name.clone(),
                description: def.description.clone(),
                location: Location::Area(area_id),
                inventory: HashSet::new(),
                gang: def.gang.clone(),
                health: HealthState::new_at_max(def.max_hp),
                effects: Vec::new(),
                detection_chance: clamp_chance(def.detection_chance, "detection_chance", &def.symbol),
                hazard_resistance: clamp_chance(def.hazard_resistance, "hazard_resistance", &def.symbol),
                cooldowns: HashMap::new(),
                dialogue: def.dialogue.clone(),
            },
        );
        if let Some(area) = world.areas.get_mut(&area_id) {
            area.npcs.insert(id);
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::areas::{self, AreaFile};

    fn garden_world() -> (GameWorld, HashMap<String, Uuid>) {
        let area_file: AreaFile = serde_json::from_str(
            r#"{ "areas": [
                { "symbol": "garden", "name": "Garden", "description": "Green.", "start": true }
            ]}"#,
        )
        .unwrap();
        let mut world = GameWorld::new_empty();
        let (index, _) = areas::build(&area_file, &mut world).unwrap();
        (world, index)
    }

    #[test]
    fn builds_gang_membership_both_ways() {
        let (mut world, area_index) = garden_world();
        let file: NpcFile = serde_json::from_str(
            r#"{
                "gangs": [ { "name": "Sprout Boys", "hostile": true } ],
                "npcs": [
                    { "symbol": "wade", "name": "Wade", "description": "Wiry.",
                      "gang": "Sprout Boys", "area": "garden" }
                ]
            }"#,
        )
        .unwrap();
        let index = build(&file, &mut world, &area_index).unwrap();
        let wade = &world.npcs[&index["wade"]];
        assert_eq!(wade.gang.as_deref(), Some("Sprout Boys"));
        assert!(world.gangs["Sprout Boys"].members.contains(&wade.id));
        assert!(world.areas[&area_index["garden"]].npcs.contains(&wade.id));
    }

    #[test]
    fn undeclared_gang_fails() {
        let (mut world, area_index) = garden_world();
        let file: NpcFile = serde_json::from_str(
            r#"{ "npcs": [
                { "symbol": "wade", "name": "Wade", "description": "Wiry.",
                  "gang": "Ghost Crew", "area": "garden" }
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            build(&file, &mut world, &area_index),
            Err(LoaderError::UnknownSymbol { kind: "gang", .. })
        ));
    }

    #[test]
    fn out_of_range_chances_are_clamped() {
        let (mut world, area_index) = garden_world();
        let file: NpcFile = serde_json::from_str(
            r#"{ "npcs": [
                { "symbol": "hawk", "name": "Hawk", "description": "Sharp-eyed.",
                  "detection_chance": 10.0, "area": "garden" }
            ]}"#,
        )
        .unwrap();
        let index = build(&file, &mut world, &area_index).unwrap();
        let hawk = &world.npcs[&index["hawk"]];
        assert!((hawk.detection_chance - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn defaults_fill_in() {
        let (mut world, area_index) = garden_world();
        let file: NpcFile = serde_json::from_str(
            r#"{ "npcs": [
                { "symbol": "meg", "name": "Meg", "description": "Gardener.", "area": "garden" }
            ]}"#,
        )
        .unwrap();
        let index = build(&file, &mut world, &area_index).unwrap();
        let meg = &world.npcs[&index["meg"]];
        assert_eq!(meg.health.max_hp(), 10);
        assert!(meg.gang.is_none());
    }
}
