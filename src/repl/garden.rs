//! `repl::garden` module
//!
//! Handlers for the gardening loop: plant a seed in open soil, water it to
//! full growth, harvest the crop, eat the crop. What the crop does depends
//! on what it was watered with.

use std::collections::HashSet;

use crate::effect::{EffectDuration, apply_effect};
use crate::item::{Item, ItemKind, PlantState, WaterOutcome};
use crate::view::{View, ViewItem};
use crate::world::{GameWorld, Location, nearby_reachable_items};

use anyhow::{Context, Result};
use log::info;
use uuid::Uuid;

/// How long the effect of an eaten crop lasts.
const CROP_EFFECT_TURNS: u32 = 10;

/// Hit points restored by a harvested crop.
const CROP_HEAL: u32 = 3;

/// Score awarded for a successful harvest.
const HARVEST_SCORE: usize = 5;

/// Find a carried item matching a name and predicate.
fn carried_matching<'a>(
    world: &'a GameWorld,
    name: &str,
    pred: impl Fn(&Item) -> bool,
) -> Option<&'a Item> {
    let lc_name = name.to_lowercase();
    let mut matches: Vec<&Item> = world
        .player
        .inventory
        .iter()
        .filter_map(|id| world.items.get(id))
        .filter(|item| pred(item) && item.name.to_lowercase().contains(&lc_name))
        .collect();
    matches.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    matches.first().copied()
}

/// Find a reachable item matching a name and predicate.
fn reachable_matching<'a>(
    world: &'a GameWorld,
    nearby: &HashSet<Uuid>,
    name: &str,
    pred: impl Fn(&Item) -> bool,
) -> Option<&'a Item> {
    let lc_name = name.to_lowercase();
    let mut matches: Vec<&Item> = nearby
        .iter()
        .filter_map(|id| world.items.get(id))
        .filter(|item| pred(item) && item.name.to_lowercase().contains(&lc_name))
        .collect();
    matches.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    matches.first().copied()
}

/// Handles `Plant(seed)` commands.
///
/// # Errors
/// - if the player's area cannot be resolved or item relocation fails
pub fn plant_handler(world: &mut GameWorld, view: &mut View, seed_name: &str) -> Result<()> {
    let area_id = world.player_area_ref()?.id;

    let Some(seed) = carried_matching(world, seed_name, |i| matches!(i.kind, ItemKind::Seed { .. })) else {
        view.push(ViewItem::ActionFailure(format!(
            "You aren't carrying a \"{seed_name}\" seed."
        )));
        return Ok(());
    };
    let seed_id = seed.id;
    let ItemKind::Seed { crop } = &seed.kind else {
        return Ok(());
    };
    let crop = crop.clone();

    let nearby = nearby_reachable_items(world, area_id)?;
    let Some(patch) = nearby
        .iter()
        .filter_map(|id| world.items.get(id))
        .find(|item| matches!(item.kind, ItemKind::SoilPatch))
    else {
        view.push(ViewItem::ActionFailure("There's no open soil here to plant in.".to_string()));
        return Ok(());
    };
    if !patch.contents.is_empty() {
        view.push(ViewItem::ActionFailure(format!(
            "The {} already has something growing in it.",
            patch.name
        )));
        return Ok(());
    }
    let (patch_id, patch_name) = (patch.id, patch.name.clone());

    // the seed becomes a growing plant inside the patch
    let plant_id = Uuid::new_v4();
    let plant = Item {
        id: plant_id,
        symbol: format!("plant_{}", plant_id.simple()),
        name: format!("{crop} plant"),
        description: format!("A {crop} plant working its way up through the soil."),
        location: Location::Nowhere,
        portable: false,
        container_state: None,
        contents: HashSet::new(),
        kind: ItemKind::Plant(PlantState::new(&crop)),
    };
    world.items.insert(plant_id, plant);
    world
        .move_item_into_container(plant_id, patch_id)
        .with_context(|| format!("planting in patch {patch_id}"))?;
    world.consume_item(seed_id).context("consuming planted seed")?;

    view.push(ViewItem::GardenUpdate(format!(
        "You tuck the {crop} seed into the {patch_name}. Now it needs water."
    )));
    info!("{} planted '{crop}' in '{patch_name}'", world.player.name);
    Ok(())
}

/// Handles `Water(plant)` commands. Each watering advances the plant exactly
/// one growth stage; once fully grown, more water changes nothing.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn water_handler(world: &mut GameWorld, view: &mut View, plant_name: &str) -> Result<()> {
    let area_id = world.player_area_ref()?.id;

    let Some(can) = carried_matching(world, "", |i| matches!(i.kind, ItemKind::WateringCan { .. })) else {
        view.push(ViewItem::ActionFailure("You have nothing to water with.".to_string()));
        return Ok(());
    };
    let water = match can.kind {
        ItemKind::WateringCan { water } => water,
        _ => None,
    };
    let Some(water) = water else {
        view.push(ViewItem::ActionFailure(format!(
            "The {} is empty. Find something to fill it from.",
            can.name
        )));
        return Ok(());
    };

    let nearby = nearby_reachable_items(world, area_id)?;
    let Some(plant) = reachable_matching(world, &nearby, plant_name, |i| matches!(i.kind, ItemKind::Plant(_))) else {
        view.push(ViewItem::ActionFailure(format!(
            "There's no \"{plant_name}\" growing here."
        )));
        return Ok(());
    };
    let plant_id = plant.id;
    let plant_display = plant.name.clone();

    let outcome = match &mut world
        .items
        .get_mut(&plant_id)
        .with_context(|| format!("looking up plant {plant_id}"))?
        .kind
    {
        ItemKind::Plant(state) => state.water(water),
        _ => WaterOutcome::AlreadyFullyGrown,
    };

    match outcome {
        WaterOutcome::Grew { stage_name, .. } => {
            let message = if stage_name == "fully grown" {
                format!("The {plant_display} is now fully grown. Ready to harvest.")
            } else {
                format!("The {plant_display} grows into {stage_name}.")
            };
            view.push(ViewItem::GardenUpdate(message));
            info!("{} watered '{plant_display}' with {water}", world.player.name);
        },
        WaterOutcome::AlreadyFullyGrown => {
            view.push(ViewItem::GardenUpdate(format!(
                "The {plant_display} is already fully grown."
            )));
        },
    }
    Ok(())
}

/// Handles `Harvest(plant)` commands.
///
/// # Errors
/// - if the player's area cannot be resolved or item bookkeeping fails
pub fn harvest_handler(world: &mut GameWorld, view: &mut View, plant_name: &str) -> Result<()> {
    let area_id = world.player_area_ref()?.id;
    let nearby = nearby_reachable_items(world, area_id)?;

    let Some(plant) = reachable_matching(world, &nearby, plant_name, |i| matches!(i.kind, ItemKind::Plant(_))) else {
        view.push(ViewItem::ActionFailure(format!(
            "There's no \"{plant_name}\" growing here."
        )));
        return Ok(());
    };
    let plant_id = plant.id;
    let ItemKind::Plant(state) = &plant.kind else {
        return Ok(());
    };
    let state = state.clone();
    if !state.is_fully_grown() {
        view.push(ViewItem::ActionFailure(format!(
            "The {} isn't ready to harvest yet.",
            plant.name
        )));
        return Ok(());
    }

    let effect = state.harvest_effect();
    let crop_id = Uuid::new_v4();
    let crop_item = Item {
        id: crop_id,
        symbol: format!("crop_{}", crop_id.simple()),
        name: state.crop.clone(),
        description: format!("A home-grown {}. Looks perfectly normal. Probably.", state.crop),
        location: Location::Nowhere,
        portable: true,
        container_state: None,
        contents: HashSet::new(),
        kind: ItemKind::Crop { effect, heal: CROP_HEAL },
    };
    world.items.insert(crop_id, crop_item);
    world.move_item_to_inventory(crop_id).context("pocketing harvested crop")?;
    world.consume_item(plant_id).context("clearing harvested plant")?;
    world.player.score += HARVEST_SCORE;

    let mut message = format!("You harvest a fresh {}.", state.crop);
    if effect.is_some() {
        message.push_str(" It hums, very faintly.");
    }
    view.push(ViewItem::GardenUpdate(message));
    info!(
        "{} harvested '{}' (effect: {effect:?})",
        world.player.name, state.crop
    );
    Ok(())
}

/// Handles `Fill(can)` commands: refill a watering can from a source in the area.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn fill_handler(world: &mut GameWorld, view: &mut View, can_name: &str) -> Result<()> {
    let area_id = world.player_area_ref()?.id;

    let Some(can) = carried_matching(world, can_name, |i| matches!(i.kind, ItemKind::WateringCan { .. })) else {
        view.push(ViewItem::ActionFailure(format!(
            "You aren't carrying a \"{can_name}\" to fill."
        )));
        return Ok(());
    };
    let (can_id, can_display) = (can.id, can.name.clone());

    let nearby = nearby_reachable_items(world, area_id)?;
    let Some(source) = nearby
        .iter()
        .filter_map(|id| world.items.get(id))
        .find(|item| matches!(item.kind, ItemKind::WaterSource { .. }))
    else {
        view.push(ViewItem::ActionFailure("There's nothing here to fill it from.".to_string()));
        return Ok(());
    };
    let water = match source.kind {
        ItemKind::WaterSource { water } => water,
        _ => return Ok(()),
    };
    let source_name = source.name.clone();

    if let Some(item) = world.get_item_mut(can_id) {
        item.kind = ItemKind::WateringCan { water: Some(water) };
    }
    view.push(ViewItem::GardenUpdate(format!(
        "You fill the {can_display} from the {source_name}. It sloshes with {water}."
    )));
    info!("{} filled '{can_display}' with {water}", world.player.name);
    Ok(())
}

/// Handles `Eat(crop)` commands for crops and consumables.
///
/// # Errors
/// - if item bookkeeping fails
pub fn eat_handler(world: &mut GameWorld, view: &mut View, crop_name: &str) -> Result<()> {
    let Some(snack) = carried_matching(world, crop_name, |i| {
        matches!(i.kind, ItemKind::Crop { .. } | ItemKind::Consumable { .. })
    }) else {
        view.push(ViewItem::ActionFailure(format!(
            "You aren't carrying a \"{crop_name}\" you'd want to eat."
        )));
        return Ok(());
    };
    let snack_id = snack.id;
    let snack_name = snack.name.clone();
    let (heal, effect) = match snack.kind {
        ItemKind::Crop { effect, heal } | ItemKind::Consumable { heal, effect } => (heal, effect),
        _ => (0, None),
    };

    world.consume_item(snack_id).context("consuming eaten item")?;
    world.player.health.heal(heal);
    let mut message = format!("You eat the {snack_name}.");
    if heal > 0 {
        message.push_str(&format!(" (+{heal} hp)"));
    }
    if let Some(kind) = effect {
        apply_effect(&mut world.player.effects, kind, EffectDuration::Turns(CROP_EFFECT_TURNS));
        message.push_str(&format!(" You feel {kind} coming on."));
    }
    view.push(ViewItem::ActionSuccess(message));
    info!("{} ate '{snack_name}' (heal {heal}, effect {effect:?})", world.player.name);
    Ok(())
}
