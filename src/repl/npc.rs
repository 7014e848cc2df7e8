//! `repl::npc` module
//!
//! Handlers for talking to NPCs and handing things over.

use std::collections::HashMap;

use crate::effect::EffectKind;
use crate::npc::Npc;
use crate::repl::{entity_not_found, find_world_object};
use crate::spinners::PhraseKey;
use crate::view::{View, ViewItem};
use crate::world::{GameWorld, Location, WorldObject};

use anyhow::{Context, Result};
use log::{info, warn};
use rand::Rng;
use uuid::Uuid;

/// Selects an NPC in a given location by first partial name match.
fn select_npc<'a>(location: &Location, world_npcs: &'a HashMap<Uuid, Npc>, query: &str) -> Option<&'a Npc> {
    let query = query.to_lowercase();
    world_npcs
        .values()
        .filter(|npc| npc.location() == location)
        .find(|npc| npc.name().to_lowercase().contains(&query))
}

/// Handles `TalkTo(npc)` commands.
///
/// # Errors
/// - none currently; the result is for signature parity with other handlers
pub fn talk_to_handler<R: Rng>(world: &mut GameWorld, view: &mut View, rng: &mut R, npc_name: &str) -> Result<()> {
    let Some(npc) = select_npc(&world.player.location, &world.npcs, npc_name) else {
        entity_not_found(world, view, npc_name);
        return Ok(());
    };
    if !npc.is_alive() {
        view.push(ViewItem::ActionFailure(format!(
            "{} is in no state for conversation.",
            npc.name
        )));
        return Ok(());
    }

    let fallback = world.spin_phrase(PhraseKey::NpcIgnore, "Ignores you.");
    let mut line = npc.random_dialogue(rng, &fallback);
    if npc.has_effect(EffectKind::Friendly) {
        line.push_str(" ...friend!");
    }
    info!("{} talked to NPC \"{}\" ({})", world.player.name, npc.name, npc.id);
    view.push(ViewItem::NpcSpeech {
        name: npc.name.clone(),
        line,
    });
    Ok(())
}

/// Gives an inventory item to an NPC.
///
/// # Errors
/// - if the player's area cannot be resolved or the transfer fails
pub fn give_to_npc_handler(world: &mut GameWorld, view: &mut View, item: &str, npc: &str) -> Result<()> {
    // find the target npc in the current room and collect metadata
    let Some(target) = select_npc(&world.player.location, &world.npcs, npc) else {
        entity_not_found(world, view, npc);
        return Ok(());
    };
    if !target.is_alive() {
        view.push(ViewItem::ActionFailure(format!("{} can't take it.", target.name)));
        return Ok(());
    }
    let (npc_id, npc_name) = (target.id, target.name.clone());

    // find the target item in inventory and collect metadata
    let (item_id, item_name) = if let Some(entity) =
        find_world_object(&world.player.inventory, &world.items, &world.npcs, item)
    {
        if let Some(found) = entity.item() {
            (found.id, found.name.clone())
        } else {
            warn!("non-Item entity matching '{item}' found in inventory");
            entity_not_found(world, view, item);
            return Ok(());
        }
    } else {
        entity_not_found(world, view, item);
        return Ok(());
    };

    world
        .move_item_to_npc(item_id, npc_id)
        .with_context(|| format!("giving item {item_id} to NPC {npc_id}"))?;

    view.push(ViewItem::ActionSuccess(format!(
        "You give the {item_name} to {npc_name}."
    )));
    info!(
        "{} gave '{item_name}' ({item_id}) to '{npc_name}' ({npc_id})",
        world.player.name
    );
    Ok(())
}
