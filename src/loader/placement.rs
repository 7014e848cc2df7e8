//! `loader::placement` module
//!
//! Applies the starting placement declared on each item template, then
//! verifies the containment discipline: every placed item is referenced by
//! exactly one holder and its location back-reference agrees with that
//! holder. All placements go through the world relocation helpers -- there
//! is no second add/remove path to drift out of sync.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use uuid::Uuid;

use crate::loader::LoaderError;
use crate::loader::items::{ItemFile, RawItemDef};
use crate::world::{GameWorld, Location};

fn placement_count(def: &RawItemDef) -> usize {
    usize::from(def.area.is_some()) + usize::from(def.npc.is_some()) + usize::from(def.inside.is_some()) + usize::from(def.player)
}

/// Place every item according to its template.
///
/// # Errors
/// - if a template names more than one placement or an unknown symbol
pub fn place_items(
    world: &mut GameWorld,
    item_file: &ItemFile,
    item_index: &HashMap<String, Uuid>,
    area_index: &HashMap<String, Uuid>,
    npc_index: &HashMap<String, Uuid>,
) -> Result<()> {
    for def in &item_file.items {
        if placement_count(def) > 1 {
            return Err(LoaderError::ConflictingPlacement {
                symbol: def.symbol.clone(),
            }
            .into());
        }
        let item_id = item_index[&def.symbol];

        if let Some(area_symbol) = &def.area {
            let area_id = *area_index.get(area_symbol).ok_or(LoaderError::UnknownSymbol {
                kind: "area",
                symbol: area_symbol.clone(),
            })?;
            world
                .move_item_to_area(item_id, area_id)
                .with_context(|| format!("placing '{}'", def.symbol))?;
        } else if let Some(npc_symbol) = &def.npc {
            let npc_id = *npc_index.get(npc_symbol).ok_or(LoaderError::UnknownSymbol {
                kind: "npc",
                symbol: npc_symbol.clone(),
            })?;
            world
                .move_item_to_npc(item_id, npc_id)
                .with_context(|| format!("placing '{}'", def.symbol))?;
        } else if let Some(container_symbol) = &def.inside {
            let container_id = *item_index.get(container_symbol).ok_or(LoaderError::UnknownSymbol {
                kind: "item",
                symbol: container_symbol.clone(),
            })?;
            world
                .move_item_into_container(item_id, container_id)
                .with_context(|| format!("placing '{}'", def.symbol))?;
        } else if def.player {
            world
                .move_item_to_inventory(item_id)
                .with_context(|| format!("placing '{}'", def.symbol))?;
        }
        // no placement: the item stays Nowhere until something spawns it
    }
    Ok(())
}

/// Verify the containment invariant over the whole world.
///
/// # Errors
/// - if any item is referenced by a number of holders inconsistent with its
///   location back-reference
pub fn check_integrity(world: &GameWorld) -> Result<()> {
    for item in world.items.values() {
        let holders = world.holder_count(item.id);
        let expected = usize::from(!matches!(item.location, Location::Nowhere));
        if holders != expected {
            return Err(anyhow!(
                "item '{}' has {holders} holder(s) but location {:?}",
                item.symbol,
                item.location
            ));
        }
    }
    // NPC area membership must agree with each NPC's location
    for npc in world.npcs.values() {
        let listed = world.areas.values().filter(|a| a.npcs.contains(&npc.id)).count();
        let expected = usize::from(matches!(npc.location, Location::Area(_)));
        if listed != expected {
            return Err(anyhow!(
                "npc '{}' appears in {listed} area list(s) but location {:?}",
                npc.symbol,
                npc.location
            ));
        }
        if let Location::Area(area_id) = npc.location
            && !world.areas.get(&area_id).is_some_and(|a| a.npcs.contains(&npc.id))
        {
            return Err(anyhow!("npc '{}' location does not match area membership", npc.symbol));
        }
    }
    Ok(())
}
