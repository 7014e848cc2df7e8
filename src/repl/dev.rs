//! `repl::dev` module
//!
//! Cheat / debugging handlers. The parser only produces these commands when
//! the `dev-mode` feature is enabled.

use crate::repl::look::describe_area;
use crate::view::{View, ViewItem};
use crate::world::{GameWorld, Location};

use anyhow::Result;
use log::info;

/// Handles `Teleport(area_symbol)` commands.
///
/// # Errors
/// - if the destination area cannot be described
pub fn dev_teleport_handler(world: &mut GameWorld, view: &mut View, area_symbol: &str) -> Result<()> {
    let Some(area_id) = world
        .areas
        .values()
        .find(|a| a.symbol == area_symbol)
        .map(|a| a.id)
    else {
        view.push(ViewItem::Error(format!("No area with symbol '{area_symbol}'.")));
        return Ok(());
    };
    world.player.location = Location::Area(area_id);
    if let Some(area) = world.areas.get_mut(&area_id) {
        area.visited = true;
    }
    info!("dev: teleported player to '{area_symbol}'");
    describe_area(world, view)
}

/// Handles `SpawnItem(item_symbol)` commands: pulls an unplaced item template
/// into the player's inventory.
pub fn dev_spawn_item_handler(world: &mut GameWorld, view: &mut View, item_symbol: &str) {
    let Some(item_id) = world
        .items
        .values()
        .find(|i| i.symbol == item_symbol && matches!(i.location, Location::Nowhere))
        .map(|i| i.id)
    else {
        view.push(ViewItem::Error(format!("No unspawned item with symbol '{item_symbol}'.")));
        return;
    };
    if world.move_item_to_inventory(item_id).is_ok() {
        info!("dev: spawned '{item_symbol}' into inventory");
        view.push(ViewItem::EngineMessage(format!("Spawned '{item_symbol}'.")));
    }
}

/// Handles `ListNpcs` commands.
pub fn dev_list_npcs_handler(world: &GameWorld, view: &mut View) {
    let mut npcs: Vec<&crate::npc::Npc> = world.npcs.values().collect();
    npcs.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    for npc in npcs {
        view.push(ViewItem::EngineMessage(format!(
            "{} [{}] hp {}/{} gang {:?} at {:?}",
            npc.symbol,
            npc.name,
            npc.health.current_hp(),
            npc.health.max_hp(),
            npc.gang,
            npc.location
        )));
    }
}

/// Handles `ListEffects` commands: active effects on everyone, everywhere.
pub fn dev_list_effects_handler(world: &GameWorld, view: &mut View) {
    for fx in &world.player.effects {
        view.push(ViewItem::EngineMessage(format!("player: {} ({:?})", fx.kind, fx.duration)));
    }
    let mut npcs: Vec<&crate::npc::Npc> = world.npcs.values().collect();
    npcs.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    for npc in npcs {
        for fx in &npc.effects {
            view.push(ViewItem::EngineMessage(format!(
                "{}: {} ({:?})",
                npc.symbol, fx.kind, fx.duration
            )));
        }
    }
}
