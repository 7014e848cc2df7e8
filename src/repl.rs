//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the various command handlers that manipulate the [`GameWorld`].
//! After any command that consumes a turn, the end-of-turn tick runs:
//! hazards re-apply, NPCs roll detection and behavior, effect durations
//! count down, and the collected events are summarized into the turn report.

pub mod combat;
pub mod dev;
pub mod garden;
pub mod hacking;
mod input;
pub mod item;
pub mod look;
pub mod movement;
pub mod npc;
pub mod system;

pub use combat::*;
pub use dev::*;
pub use garden::*;
pub use hacking::*;
pub use item::*;
pub use look::*;
pub use movement::*;
pub use npc::*;
pub use system::*;

use crate::behavior;
use crate::command::{Command, parse_command};
use crate::effect::tick_effects;
use crate::hazard;
use crate::npc::Npc;
use crate::report;
use crate::spinners::PhraseKey;
use crate::style::GameStyle;
use crate::view::{View, ViewItem};
use crate::world::GameWorld;
use crate::{Item, WorldObject};

use anyhow::Result;
use log::info;
use rand::rngs::StdRng;
use std::collections::HashMap;
use uuid::Uuid;
use variantly::Variantly;

use input::{InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read-eval-print loop until the user quits or goes down.
///
/// Handles prompting, command parsing, dispatching to the various handler
/// modules, and advancing world time.
///
/// # Errors
/// - Propagates failures from handlers, such as a missing area for the player.
pub fn run_repl(world: &mut GameWorld, rng: &mut StdRng) -> Result<()> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;
    let mut view = View::new();
    let mut input_manager = InputManager::new();

    look::describe_area(world, &mut view)?;
    view.flush();

    loop {
        let mut status = String::new();
        for tag in world.player.status_tags() {
            status.push_str(&format!(" [{}]", tag.status_style()));
        }
        let prompt = format!(
            "\n[Turn: {}|HP: {}/{}{}]>> ",
            world.turn_count,
            world.player.health.current_hp(),
            world.player.health.max_hp(),
            status
        )
        .prompt_style()
        .to_string();

        let input_event = if let Ok(event) = input_manager.read_line(&prompt) {
            event
        } else {
            view.push(ViewItem::Error("Failed to read input. Try again.".to_string()));
            view.flush();
            continue;
        };

        let input = match input_event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => "quit".to_string(),
            InputEvent::Interrupted => {
                view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                view.flush();
                continue;
            },
        };

        let command = parse_command(&input);
        match &command {
            Look => look_handler(world, &mut view)?,
            LookAt(thing) => look_at_handler(world, &mut view, thing)?,
            MoveTo(direction) => move_to_handler(world, &mut view, direction)?,
            Take(thing) => take_handler(world, &mut view, thing)?,
            Drop(thing) => drop_handler(world, &mut view, thing)?,
            PutIn { item, container } => put_in_handler(world, &mut view, item, container)?,
            Open(thing) => open_handler(world, &mut view, thing)?,
            Close(thing) => close_handler(world, &mut view, thing)?,
            Inventory => inv_handler(world, &mut view),
            TalkTo(npc_name) => talk_to_handler(world, &mut view, rng, npc_name)?,
            GiveToNpc { item, npc } => give_to_npc_handler(world, &mut view, item, npc)?,
            Attack(target) => attack_handler(world, &mut view, target)?,
            Plant(seed) => plant_handler(world, &mut view, seed)?,
            Water(plant) => water_handler(world, &mut view, plant)?,
            Harvest(plant) => harvest_handler(world, &mut view, plant)?,
            Fill(can) => fill_handler(world, &mut view, can)?,
            Eat(crop) => eat_handler(world, &mut view, crop)?,
            Hack => hack_handler(world, &mut view)?,
            Throw(thing) => throw_handler(world, &mut view, thing)?,
            Hide => hide_handler(world, &mut view),
            Save(slot) => save_handler(world, &mut view, slot.as_deref()),
            Load(slot) => load_handler(world, &mut view, slot.as_deref()),
            ListSaves => list_saves_handler(&mut view),
            Help => help_handler(&mut view),
            Quit => {
                if let ReplControl::Quit = quit_handler(world, &mut view) {
                    view.flush();
                    break;
                }
            },
            Unknown => {
                view.push(ViewItem::Error(
                    world.spin_phrase(PhraseKey::UnrecognizedCommand, "Didn't quite catch that."),
                ));
            },
            // Commands below are only produced with the dev-mode feature enabled.
            Teleport(area_symbol) => dev_teleport_handler(world, &mut view, area_symbol)?,
            SpawnItem(item_symbol) => dev_spawn_item_handler(world, &mut view, item_symbol),
            ListNpcs => dev_list_npcs_handler(world, &mut view),
            ListEffects => dev_list_effects_handler(world, &mut view),
        }

        if command.consumes_turn() {
            world.turn_count += 1;
            info!("================> END OF TURN {} <================", world.turn_count);
            end_of_turn(world, &mut view, rng)?;
            if !world.player.health.is_alive() {
                view.push(ViewItem::CharacterDeath {
                    name: world.player.name.clone(),
                    is_player: true,
                });
                view.flush();
                break;
            }
        }
        view.flush();
    }
    Ok(())
}

/// The end-of-turn tick: hazards, detection, NPC behavior, effect durations,
/// then the summarized turn report.
///
/// # Errors
/// - on failed lookup of the player's area
pub fn end_of_turn(world: &mut GameWorld, view: &mut View, rng: &mut StdRng) -> Result<()> {
    let area_id = world.player_area_ref()?.id;
    let hp_before = world.player.health.current_hp();

    let mut events = hazard::tick_hazards(world, area_id, rng);
    events.extend(behavior::tick_detection(world, rng));
    events.extend(behavior::run_npc_turns(world, rng));
    tick_all_effects(world);

    for line in report::summarize(world, &events) {
        view.push(ViewItem::ReportLine(line));
    }

    let hp_after = world.player.health.current_hp();
    if hp_after < hp_before {
        view.push(ViewItem::PlayerHarmed {
            amount: hp_before - hp_after,
        });
    }
    Ok(())
}

/// Count down every active status effect in the world by one turn.
fn tick_all_effects(world: &mut GameWorld) {
    for npc in world.npcs.values_mut() {
        if !npc.is_alive() {
            continue;
        }
        for kind in tick_effects(&mut npc.effects) {
            info!("effect '{kind}' wore off for '{}'", npc.symbol);
        }
    }
    for kind in tick_effects(&mut world.player.effects) {
        info!("effect '{kind}' wore off for the player");
    }
}

/// Encapsulates references to different types of `WorldObjects` to allow search across types.
#[derive(Clone, Copy, Debug, Variantly)]
pub enum WorldEntity<'a> {
    Item(&'a Item),
    Npc(&'a Npc),
}
impl WorldEntity<'_> {
    /// Get the name of the entity
    pub fn name(&self) -> &str {
        match self {
            WorldEntity::Item(item) => item.name(),
            WorldEntity::Npc(npc) => npc.name(),
        }
    }
    /// Get the UUID of the entity
    pub fn id(&self) -> Uuid {
        match self {
            WorldEntity::Item(item) => item.id(),
            WorldEntity::Npc(npc) => npc.id(),
        }
    }
}

/// Searches a list of entity uuids to find a `WorldObject` with a matching name.
/// Returns Some(`WorldEntity`) or None.
pub fn find_world_object<'a>(
    nearby_ids: impl IntoIterator<Item = &'a Uuid>,
    world_items: &'a HashMap<Uuid, Item>,
    world_npcs: &'a HashMap<Uuid, Npc>,
    search_term: &str,
) -> Option<WorldEntity<'a>> {
    let lc_term = search_term.to_lowercase();
    for uuid in nearby_ids {
        if let Some(found_item) = world_items.get(uuid) {
            if found_item.name().to_lowercase().contains(&lc_term) {
                return Some(WorldEntity::Item(found_item));
            }
        }
        if let Some(found_npc) = world_npcs.get(uuid) {
            if found_npc.name().to_lowercase().contains(&lc_term) {
                return Some(WorldEntity::Npc(found_npc));
            }
        }
    }
    None
}

/// Feedback to player if an entity search comes up empty.
pub fn entity_not_found(world: &GameWorld, view: &mut View, search_text: &str) {
    view.push(ViewItem::Error(format!(
        "\"{}\"? {}",
        search_text,
        world.spin_phrase(PhraseKey::EntityNotFound, "What's that?")
    )));
}
