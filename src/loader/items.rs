//! `loader::items` module
//!
//! Parses `item_templates.json` and builds the world's items. Placement is
//! declared on the item definition and applied afterwards by
//! [`crate::loader::placement`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::idgen::{NAMESPACE_ITEM, uuid_from_symbol};
use crate::item::{ContainerState, Item, ItemKind};
use crate::loader::{LoaderError, read_json};
use crate::world::{GameWorld, Location};

fn default_portable() -> bool {
    true
}

/// Raw item data as authored in JSON.
#[derive(Debug, Deserialize, Serialize)]
pub struct RawItemDef {
    pub symbol: String,
    pub name: String,
    pub description: String,
    #[serde(default = "default_portable")]
    pub portable: bool,
    /// Present when the item is a container.
    #[serde(default)]
    pub container: Option<ContainerState>,
    pub kind: ItemKind,
    /// Starting placement: at most one of the following.
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub npc: Option<String>,
    #[serde(default)]
    pub inside: Option<String>,
    #[serde(default)]
    pub player: bool,
}

/// Container for the item template file.
#[derive(Debug, Deserialize, Serialize)]
pub struct ItemFile {
    pub items: Vec<RawItemDef>,
}

/// Load the item template file.
///
/// # Errors
/// - if the file is missing or fails to parse
pub fn load(path: &Path) -> Result<ItemFile, LoaderError> {
    read_json(path)
}

/// Build all items into the world, located `Nowhere` until placement runs.
///
/// # Errors
/// - on duplicate symbols
pub fn build(file: &ItemFile, world: &mut GameWorld) -> Result<HashMap<String, Uuid>, LoaderError> {
    let mut index = HashMap::new();
    for def in &file.items {
        let id = uuid_from_symbol(&NAMESPACE_ITEM, &def.symbol);
        if index.insert(def.symbol.clone(), id).is_some() {
            return Err(LoaderError::DuplicateSymbol {
                kind: "item",
                symbol: def.symbol.clone(),
            });
        }
        world.items.insert(
            id,
            Item {
                id,
                symbol: def.symbol.clone(),
                name: def.name.clone(),
                description: def.description.clone(),
                location: Location::Nowhere,
                portable: def.portable,
                container_state: def.container,
                contents: HashSet::new(),
                kind: def.kind.clone(),
            },
        );
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_item_kinds() {
        let file: ItemFile = serde_json::from_str(
            r#"{ "items": [
                { "symbol": "crowbar", "name": "Crowbar", "description": "Heavy.",
                  "kind": { "type": "weapon", "damage": 4 }, "area": "alley" },
                { "symbol": "carrot_seed", "name": "Carrot Seed", "description": "Tiny.",
                  "kind": { "type": "seed", "crop": "carrot" }, "player": true },
                { "symbol": "crate", "name": "Crate", "description": "Wooden.",
                  "portable": false, "container": "closed",
                  "kind": { "type": "scenery" } }
            ]}"#,
        )
        .unwrap();
        assert_eq!(file.items.len(), 3);
        assert!(matches!(file.items[0].kind, ItemKind::Weapon { damage: 4 }));
        assert!(file.items[1].player);
        assert_eq!(file.items[2].container, Some(ContainerState::Closed));
        assert!(!file.items[2].portable);
    }

    #[test]
    fn builds_items_nowhere() {
        let file: ItemFile = serde_json::from_str(
            r#"{ "items": [
                { "symbol": "trowel", "name": "Trowel", "description": "Bent.",
                  "kind": { "type": "weapon", "damage": 2 } }
            ]}"#,
        )
        .unwrap();
        let mut world = GameWorld::new_empty();
        let index = build(&file, &mut world).unwrap();
        let item = &world.items[&index["trowel"]];
        assert_eq!(item.location, Location::Nowhere);
    }

    #[test]
    fn duplicate_item_symbols_fail() {
        let file: ItemFile = serde_json::from_str(
            r#"{ "items": [
                { "symbol": "trowel", "name": "A", "description": "x", "kind": { "type": "scenery" } },
                { "symbol": "trowel", "name": "B", "description": "y", "kind": { "type": "scenery" } }
            ]}"#,
        )
        .unwrap();
        let mut world = GameWorld::new_empty();
        assert!(matches!(
            build(&file, &mut world),
            Err(LoaderError::DuplicateSymbol { kind: "item", .. })
        ));
    }
}
