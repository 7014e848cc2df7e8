//! `repl::look` module
//!
//! Handlers for surveying the area and inspecting individual things.

use crate::item::{GROWTH_STAGES, ItemKind};
use crate::repl::{WorldEntity, entity_not_found, find_world_object};
use crate::view::{NpcLine, View, ViewItem};
use crate::world::{GameWorld, nearby_reachable_items};

use anyhow::Result;
use log::info;

/// Push the current area's full description to the view.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn describe_area(world: &GameWorld, view: &mut View) -> Result<()> {
    let area = world.player_area_ref()?;

    let hazards = area.hazards.iter().map(|h| h.hazard.name.clone()).collect();

    let mut items: Vec<String> = area
        .contents
        .iter()
        .filter_map(|id| world.items.get(id))
        .map(crate::item::Item::display_name)
        .collect();
    items.sort();

    let mut npcs: Vec<NpcLine> = area
        .npcs
        .iter()
        .filter_map(|id| world.npcs.get(id))
        .map(|npc| NpcLine {
            name: npc.name.clone(),
            gang: npc.gang.clone(),
            down: !npc.is_alive(),
        })
        .collect();
    npcs.sort_by(|a, b| a.name.cmp(&b.name));

    view.push(ViewItem::AreaDescription {
        name: area.name.clone(),
        description: area.description.clone(),
        hazards,
        items,
        npcs,
        exits: area.exit_names(),
    });
    Ok(())
}

/// Handles bare Look commands.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn look_handler(world: &GameWorld, view: &mut View) -> Result<()> {
    info!("{} looks around", world.player.name);
    describe_area(world, view)
}

/// Handles `LookAt(thing)` commands: items in reach, carried items, and NPCs.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn look_at_handler(world: &GameWorld, view: &mut View, thing: &str) -> Result<()> {
    let area = world.player_area_ref()?;
    let mut nearby = nearby_reachable_items(world, area.id)?;
    nearby.extend(&world.player.inventory);
    nearby.extend(&area.npcs);

    let Some(entity) = find_world_object(&nearby, &world.items, &world.npcs, thing) else {
        entity_not_found(world, view, thing);
        return Ok(());
    };

    match entity {
        WorldEntity::Item(item) => {
            let detail = match &item.kind {
                ItemKind::Plant(state) => Some(format!(
                    "It is {}{}",
                    GROWTH_STAGES[state.growth_stage],
                    if state.is_fully_grown() { ". Ready to harvest." } else { "." }
                )),
                ItemKind::WateringCan { water } => Some(match water {
                    Some(w) => format!("It sloshes with {w}."),
                    None => "It is bone dry.".to_string(),
                }),
                ItemKind::Fixture { hacked: true, .. } => Some("Its status light blinks an unhealthy color.".to_string()),
                _ if item.can_hold() && item.is_accessible() => {
                    let mut names: Vec<String> = item
                        .contents
                        .iter()
                        .filter_map(|id| world.items.get(id))
                        .map(crate::item::Item::display_name)
                        .collect();
                    names.sort();
                    if names.is_empty() {
                        Some("It is empty.".to_string())
                    } else {
                        Some(format!("Inside: {}.", names.join(", ")))
                    }
                },
                _ if item.can_hold() => Some("You'd have to open it to see inside.".to_string()),
                _ => None,
            };
            view.push(ViewItem::ItemDescription {
                name: item.display_name(),
                description: item.description.clone(),
                detail,
            });
        },
        WorldEntity::Npc(npc) => {
            let mut description = npc.description.clone();
            if !npc.is_alive() {
                description.push_str(" They are down for the count.");
            } else if !npc.effects.is_empty() {
                let tags: Vec<String> = npc.effects.iter().map(|fx| fx.kind.to_string()).collect();
                description.push_str(&format!(" They seem {}.", tags.join(" and ")));
            }
            view.push(ViewItem::ItemDescription {
                name: npc.name.clone(),
                description,
                detail: None,
            });
        },
    }
    info!("{} looked at '{}'", world.player.name, entity.name());
    Ok(())
}
