//! `repl::combat` module
//!
//! Handlers for starting trouble: attacking NPCs and throwing hazardous
//! items. Both are loud -- they break cover, and felling a gang member puts
//! the rest of the crew on alert.

use crate::hazard::{ActiveHazard, StaticHazard};
use crate::item::ItemKind;
use crate::view::{View, ViewItem};
use crate::world::{GameWorld, WorldObject};

use anyhow::{Context, Result};
use log::info;
use uuid::Uuid;

/// Damage dealt by the unarmed player.
const FIST_DAMAGE: u32 = 1;

/// Score awarded for taking down a gang member.
const TAKEDOWN_SCORE: usize = 10;

/// The heaviest weapon the player is carrying: (name, damage).
fn player_weapon(world: &GameWorld) -> Option<(String, u32)> {
    world
        .player
        .inventory
        .iter()
        .filter_map(|id| world.items.get(id))
        .filter_map(|item| item.weapon_damage().map(|dmg| (item.name.clone(), dmg)))
        .max_by_key(|(_, dmg)| *dmg)
}

/// Handles `Attack(target)` commands.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn attack_handler(world: &mut GameWorld, view: &mut View, target_name: &str) -> Result<()> {
    world.player.break_cover();
    let area_id = world.player_area_ref()?.id;

    let lc_target = target_name.to_lowercase();
    let Some(npc_id) = world
        .living_npcs_in_area(area_id)
        .into_iter()
        .find(|id| world.npcs.get(id).is_some_and(|n| n.name.to_lowercase().contains(&lc_target)))
    else {
        view.push(ViewItem::ActionFailure(format!(
            "There's no \"{target_name}\" here to fight."
        )));
        return Ok(());
    };

    let (weapon_name, damage) = player_weapon(world).map_or((None, FIST_DAMAGE), |(name, dmg)| (Some(name), dmg));

    let npc = world
        .npcs
        .get_mut(&npc_id)
        .with_context(|| format!("looking up NPC {npc_id}"))?;
    npc.health.damage(damage);
    let npc_name = npc.name.clone();
    let npc_gang = npc.gang.clone();
    let downed = !npc.is_alive();
    if downed {
        // the dead carry no status effects
        npc.effects.clear();
    }
    // the target certainly knows who hit it
    world.player.detected_by.insert(npc_id);

    let with_what = weapon_name.map_or_else(|| "your fists".to_string(), |name| format!("the {name}"));
    view.push(ViewItem::ActionSuccess(format!(
        "You hit {npc_name} with {with_what} for {damage}."
    )));
    info!("{} hit '{npc_name}' for {damage}", world.player.name);

    if downed {
        view.push(ViewItem::CharacterDeath {
            name: npc_name.clone(),
            is_player: false,
        });
        world.player.score += TAKEDOWN_SCORE;
        // dropping one of theirs puts the whole local crew on alert
        if let Some(gang_name) = npc_gang {
            alert_gang_in_area(world, area_id, &gang_name);
        }
    }
    Ok(())
}

fn alert_gang_in_area(world: &mut GameWorld, area_id: Uuid, gang_name: &str) {
    let member_ids: Vec<Uuid> = world
        .living_npcs_in_area(area_id)
        .into_iter()
        .filter(|id| {
            world
                .npcs
                .get(id)
                .is_some_and(|n| n.gang.as_deref() == Some(gang_name))
        })
        .collect();
    for id in member_ids {
        world.player.detected_by.insert(id);
    }
    info!("gang '{gang_name}' in area {area_id} is now alert to the player");
}

/// Handles `Throw(thing)` commands: a throwable becomes an active hazard in
/// the current area and starts rolling against the locals next tick.
///
/// # Errors
/// - if the player's area cannot be resolved or item bookkeeping fails
pub fn throw_handler(world: &mut GameWorld, view: &mut View, thing: &str) -> Result<()> {
    world.player.break_cover();
    let area_id = world.player_area_ref()?.id;

    let lc_thing = thing.to_lowercase();
    let Some(item) = world
        .player
        .inventory
        .iter()
        .filter_map(|id| world.items.get(id))
        .find(|item| {
            matches!(item.kind, ItemKind::Throwable { .. }) && item.name().to_lowercase().contains(&lc_thing)
        })
    else {
        view.push(ViewItem::ActionFailure(format!(
            "You aren't carrying a \"{thing}\" worth throwing."
        )));
        return Ok(());
    };

    let (item_id, item_name) = (item.id, item.name.clone());
    let (effect, duration) = match item.kind {
        ItemKind::Throwable { effect, duration } => (effect, duration),
        _ => return Ok(()),
    };
    let description = item.description.clone();

    world.consume_item(item_id).context("consuming thrown item")?;
    let hazard = StaticHazard {
        name: item_name.clone(),
        description,
        effect,
        duration,
        potency: 0,
    };
    if let Some(area) = world.areas.get_mut(&area_id) {
        area.hazards.push(ActiveHazard::new(hazard));
    }

    view.push(ViewItem::ActionSuccess(format!(
        "You hurl the {item_name}. It bursts across the pavement."
    )));
    info!("{} threw '{item_name}' into area {area_id}", world.player.name);
    Ok(())
}
