//! `repl::system` module
//!
//! Handlers for the game-level commands: help, save, load, and quit. Save
//! and load failures are reported to the player and the game continues.

use crate::command::help_entries;
use crate::repl::ReplControl;
use crate::save_files::{DEFAULT_SLOT, active_save_dir, collect_save_slots, format_modified, load_world_file, save_world};
use crate::spinners::PhraseKey;
use crate::view::{SaveLine, View, ViewItem};
use crate::world::GameWorld;

use log::{error, info};

/// Handles Help commands.
pub fn help_handler(view: &mut View) {
    view.push(ViewItem::HelpText(help_entries()));
}

/// Handles `Save(slot)` commands.
pub fn save_handler(world: &GameWorld, view: &mut View, slot: Option<&str>) {
    let slot = slot.unwrap_or(DEFAULT_SLOT);
    match save_world(world, slot) {
        Ok(path) => {
            view.push(ViewItem::GameSaved {
                slot: slot.to_string(),
                file: path.display().to_string(),
            });
        },
        Err(e) => {
            error!("save to slot '{slot}' failed: {e:#}");
            view.push(ViewItem::Error(format!("Couldn't save the game: {e}")));
        },
    }
}

/// Handles `Load(slot)` commands, replacing the running world on success.
pub fn load_handler(world: &mut GameWorld, view: &mut View, slot: Option<&str>) {
    let slot = slot.unwrap_or(DEFAULT_SLOT);
    match load_world_file(slot) {
        Ok(loaded) => {
            *world = loaded;
            view.push(ViewItem::GameLoaded {
                slot: slot.to_string(),
                file: active_save_dir().display().to_string(),
            });
        },
        Err(e) => {
            info!("load from slot '{slot}' failed: {e:#}");
            view.push(ViewItem::Error(format!("Couldn't load \"{slot}\": {e}")));
        },
    }
}

/// Handles `ListSaves` commands.
pub fn list_saves_handler(view: &mut View) {
    match collect_save_slots(&active_save_dir()) {
        Ok(slots) => {
            let lines = slots
                .into_iter()
                .map(|s| SaveLine {
                    slot: s.slot,
                    version: s.version,
                    modified: format_modified(s.modified),
                })
                .collect();
            view.push(ViewItem::SaveList(lines));
        },
        Err(e) => {
            error!("listing saves failed: {e:#}");
            view.push(ViewItem::Error(format!("Couldn't list saved games: {e}")));
        },
    }
}

/// Handles Quit commands.
pub fn quit_handler(world: &GameWorld, view: &mut View) -> ReplControl {
    view.push(ViewItem::EngineMessage(
        world.spin_phrase(PhraseKey::QuitMsg, "Root session closed."),
    ));
    info!("player quit on turn {}", world.turn_count);
    ReplControl::Quit
}
