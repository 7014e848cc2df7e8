//! `repl::movement` module
//!
//! Handlers for moving the player through area exits.

use crate::repl::look::describe_area;
use crate::spinners::PhraseKey;
use crate::view::{View, ViewItem};
use crate::world::{GameWorld, Location};

use anyhow::{Context, Result};
use log::info;

/// Handles `MoveTo(direction)` commands.
///
/// # Errors
/// - if the player's area cannot be resolved
pub fn move_to_handler(world: &mut GameWorld, view: &mut View, direction: &str) -> Result<()> {
    let area = world.player_area_ref()?;
    let Some(target_id) = area.exit_to(direction) else {
        view.push(ViewItem::ActionFailure(format!(
            "You can't go \"{direction}\" from here."
        )));
        return Ok(());
    };

    let from_name = area.name.clone();
    world.player.location = Location::Area(target_id);
    let target = world
        .areas
        .get_mut(&target_id)
        .with_context(|| format!("exit target {target_id} missing from world"))?;
    target.visited = true;
    let to_name = target.name.clone();

    let stem = world.spin_phrase(PhraseKey::Movement, "You head");
    view.push(ViewItem::TransitionMessage(format!("{stem} {direction}.")));
    info!("{} moved from '{from_name}' to '{to_name}'", world.player.name);

    describe_area(world, view)
}
