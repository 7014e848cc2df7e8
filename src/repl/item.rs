//! `repl::item` module
//!
//! Handlers for picking up, dropping, stashing, and opening things. All
//! movement of items goes through the world relocation helpers, so nothing
//! here can leave an item in two containers.

use crate::item::ContainerState;
use crate::repl::{WorldEntity, entity_not_found, find_world_object};
use crate::view::{View, ViewItem};
use crate::world::{GameWorld, WorldObject, nearby_reachable_items};

use anyhow::Result;
use log::info;
use uuid::Uuid;

/// Handles `Take(thing)` commands.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn take_handler(world: &mut GameWorld, view: &mut View, thing: &str) -> Result<()> {
    let area_id = world.player_area_ref()?.id;
    let nearby = nearby_reachable_items(world, area_id)?;

    let Some(entity) = find_world_object(&nearby, &world.items, &world.npcs, thing) else {
        entity_not_found(world, view, thing);
        return Ok(());
    };
    let Some(item) = entity.item() else {
        view.push(ViewItem::ActionFailure(format!(
            "{} would object to being taken.",
            entity.name()
        )));
        return Ok(());
    };
    if !item.portable {
        info!("player tried to take fixed item '{}'", item.symbol);
        view.push(ViewItem::ActionFailure(format!(
            "The {} isn't going anywhere.",
            item.name
        )));
        return Ok(());
    }

    let (item_id, item_name) = (item.id, item.display_name());
    world.move_item_to_inventory(item_id)?;
    view.push(ViewItem::ActionSuccess(format!("You take the {item_name}.")));
    info!("{} took '{item_name}' ({item_id})", world.player.name);
    Ok(())
}

/// Handles `Drop(thing)` commands.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn drop_handler(world: &mut GameWorld, view: &mut View, thing: &str) -> Result<()> {
    let area_id = world.player_area_ref()?.id;

    let Some(entity) = find_world_object(&world.player.inventory, &world.items, &world.npcs, thing) else {
        entity_not_found(world, view, thing);
        return Ok(());
    };
    let (item_id, item_name) = (entity.id(), entity.name().to_string());
    world.move_item_to_area(item_id, area_id)?;
    view.push(ViewItem::ActionSuccess(format!("You set the {item_name} down.")));
    info!("{} dropped '{item_name}' ({item_id})", world.player.name);
    Ok(())
}

/// Handles `PutIn { item, container }` commands.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn put_in_handler(world: &mut GameWorld, view: &mut View, item: &str, container: &str) -> Result<()> {
    let area_id = world.player_area_ref()?.id;

    let Some(entity) = find_world_object(&world.player.inventory, &world.items, &world.npcs, item) else {
        entity_not_found(world, view, item);
        return Ok(());
    };
    let (item_id, item_name) = (entity.id(), entity.name().to_string());

    let nearby = nearby_reachable_items(world, area_id)?;
    let Some(target) = find_container(world, &nearby, container) else {
        entity_not_found(world, view, container);
        return Ok(());
    };
    let (container_id, container_name, accessible) = target;
    if !accessible {
        view.push(ViewItem::ActionFailure(format!("The {container_name} isn't open.")));
        return Ok(());
    }
    if container_id == item_id {
        view.push(ViewItem::ActionFailure(
            "Putting a thing inside itself would tear a small hole in the neighborhood.".to_string(),
        ));
        return Ok(());
    }

    world.move_item_into_container(item_id, container_id)?;
    view.push(ViewItem::ActionSuccess(format!(
        "You put the {item_name} in the {container_name}."
    )));
    info!(
        "{} stashed '{item_name}' ({item_id}) in '{container_name}' ({container_id})",
        world.player.name
    );
    Ok(())
}

/// Handles `Open(thing)` commands.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn open_handler(world: &mut GameWorld, view: &mut View, thing: &str) -> Result<()> {
    set_container_state(world, view, thing, ContainerState::Open)
}

/// Handles `Close(thing)` commands.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn close_handler(world: &mut GameWorld, view: &mut View, thing: &str) -> Result<()> {
    set_container_state(world, view, thing, ContainerState::Closed)
}

fn set_container_state(world: &mut GameWorld, view: &mut View, thing: &str, wanted: ContainerState) -> Result<()> {
    let area_id = world.player_area_ref()?.id;
    let mut nearby = nearby_reachable_items(world, area_id)?;
    nearby.extend(&world.player.inventory);

    let Some(entity) = find_world_object(&nearby, &world.items, &world.npcs, thing) else {
        entity_not_found(world, view, thing);
        return Ok(());
    };
    let Some(item) = entity.item() else {
        view.push(ViewItem::ActionFailure(format!("{} is not a container.", entity.name())));
        return Ok(());
    };
    let (item_id, item_name) = (item.id, item.name.clone());

    let verb = if wanted.is_open() { "open" } else { "close" };
    match item.container_state {
        None => {
            view.push(ViewItem::ActionFailure(format!("The {item_name} doesn't {verb}.")));
        },
        Some(ContainerState::Locked) => {
            view.push(ViewItem::ActionFailure(format!("The {item_name} is locked tight.")));
        },
        Some(current) if current == wanted => {
            let already = if wanted.is_open() { "already open" } else { "already closed" };
            view.push(ViewItem::ActionFailure(format!("The {item_name} is {already}.")));
        },
        Some(_) => {
            if let Some(target) = world.get_item_mut(item_id) {
                target.container_state = Some(wanted);
            }
            view.push(ViewItem::ActionSuccess(format!("You {verb} the {item_name}.")));
            info!("{} {verb}ed '{item_name}' ({item_id})", world.player.name);
        },
    }
    Ok(())
}

/// Handles Inventory commands.
pub fn inv_handler(world: &GameWorld, view: &mut View) {
    let mut names: Vec<String> = world
        .player
        .inventory
        .iter()
        .filter_map(|id| world.items.get(id))
        .map(crate::item::Item::display_name)
        .collect();
    names.sort();
    view.push(ViewItem::InventoryList(names));
}

/// Find a container-ish item by name among `nearby` ids.
/// Returns (id, name, accessible).
fn find_container(world: &GameWorld, nearby: &std::collections::HashSet<Uuid>, name: &str) -> Option<(Uuid, String, bool)> {
    let lc_name = name.to_lowercase();
    nearby
        .iter()
        .filter_map(|id| world.items.get(id))
        .find(|item| item.can_hold() && item.name().to_lowercase().contains(&lc_name))
        .map(|item| (item.id, item.name.clone(), item.is_accessible()))
}
