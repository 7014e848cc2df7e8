//! `repl::hacking` module
//!
//! Handlers for compromising fixtures and for keeping out of sight.

use crate::hazard::ActiveHazard;
use crate::item::{HackEffect, ItemKind, WaterType};
use crate::view::{View, ViewItem};
use crate::world::{GameWorld, nearby_reachable_items};

use anyhow::Result;
use log::info;
use uuid::Uuid;

/// Score awarded for a successful hack.
const HACK_SCORE: usize = 10;

/// Handles bare `Hack` commands: compromise the hackable fixture in the
/// player's area.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn hack_handler(world: &mut GameWorld, view: &mut View) -> Result<()> {
    world.player.break_cover();
    let area_id = world.player_area_ref()?.id;
    let nearby = nearby_reachable_items(world, area_id)?;

    let Some(fixture) = nearby
        .iter()
        .filter_map(|id| world.items.get(id))
        .find(|item| matches!(item.kind, ItemKind::Fixture { hack: Some(_), .. }))
    else {
        view.push(ViewItem::ActionFailure(
            "Nothing here has an exposed port worth the trouble.".to_string(),
        ));
        return Ok(());
    };
    let (fixture_id, fixture_name) = (fixture.id, fixture.name.clone());
    let (hack, hacked) = match &fixture.kind {
        ItemKind::Fixture { hack, hacked } => (hack.clone(), *hacked),
        _ => (None, false),
    };
    if hacked {
        view.push(ViewItem::ActionFailure(format!(
            "The {fixture_name} is already running your code."
        )));
        return Ok(());
    }

    match hack {
        Some(HackEffect::SpillHazard(hazard)) => {
            let hazard_name = hazard.name.clone();
            if let Some(area) = world.areas.get_mut(&area_id) {
                area.hazards.push(ActiveHazard::new(hazard));
            }
            view.push(ViewItem::ActionSuccess(format!(
                "You pop the {fixture_name}'s access panel and get to work. It shudders, then lets go -- a {hazard_name} spreads across the ground."
            )));
        },
        Some(HackEffect::CorruptWater) => {
            let source_ids: Vec<Uuid> = nearby
                .iter()
                .filter(|id| {
                    world
                        .items
                        .get(id)
                        .is_some_and(|i| matches!(i.kind, ItemKind::WaterSource { .. }))
                })
                .copied()
                .collect();
            for source_id in &source_ids {
                if let Some(source) = world.get_item_mut(*source_id) {
                    source.kind = ItemKind::WaterSource {
                        water: WaterType::HackedMilk,
                    };
                }
            }
            let note = if source_ids.is_empty() {
                "Nothing connected responds. Yet.".to_string()
            } else {
                "Every tap in the area now runs white and faintly luminous.".to_string()
            };
            view.push(ViewItem::ActionSuccess(format!(
                "You reroute the {fixture_name}'s supply lines. {note}"
            )));
        },
        None => return Ok(()),
    }

    if let Some(item) = world.get_item_mut(fixture_id)
        && let ItemKind::Fixture { hacked, .. } = &mut item.kind
    {
        *hacked = true;
    }
    world.player.score += HACK_SCORE;
    info!("{} hacked '{fixture_name}' in area {area_id}", world.player.name);
    Ok(())
}

/// Handles `Hide` commands. NPCs make no detection rolls against a hidden
/// player; any loud action breaks cover.
pub fn hide_handler(world: &mut GameWorld, view: &mut View) {
    if world.player.hidden {
        view.push(ViewItem::ActionFailure("You're already keeping out of sight.".to_string()));
        return;
    }
    world.player.hidden = true;
    view.push(ViewItem::ActionSuccess(
        "You tuck yourself out of sight behind the nearest cover.".to_string(),
    ));
    info!("{} is now hidden", world.player.name);
}
