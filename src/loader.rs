//! World loading.
//!
//! World content lives in JSON template files under the data directory
//! (`area_templates.json`, `item_templates.json`, `npc_templates.json`) with
//! phrase tables in `npc_actions.json` and `npc_reactions.json`. Each loader
//! submodule parses one concern into raw definition structs; `build_world`
//! cross-links them into a runtime [`GameWorld`] and validates the result.

pub mod areas;
pub mod items;
pub mod npcs;
pub mod phrases;
pub mod placement;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::world::{GameWorld, Location};

/// Environment variable overriding the default `data/` directory.
pub const DATA_DIR_ENV: &str = "ROOT_ACCESS_DATA";

/// Structured failures while reading or cross-linking world templates.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("reading data file {path}: {source}")]
    MissingFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing data file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unknown {kind} symbol '{symbol}'")]
    UnknownSymbol { kind: &'static str, symbol: String },
    #[error("duplicate {kind} symbol '{symbol}'")]
    DuplicateSymbol { kind: &'static str, symbol: String },
    #[error("item '{symbol}' specifies more than one starting placement")]
    ConflictingPlacement { symbol: String },
    #[error("no area is marked as the start")]
    NoStartArea,
    #[error("more than one area is marked as the start")]
    MultipleStartAreas,
}

/// Resolve the active data directory.
pub fn data_dir() -> PathBuf {
    env::var(DATA_DIR_ENV).map_or_else(|_| PathBuf::from("data"), PathBuf::from)
}

/// Read and parse one JSON data file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoaderError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoaderError::MissingFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoaderError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the complete world from the data directory.
///
/// # Errors
/// Returns an error if a template file is missing or malformed, or if the
/// templates cross-link inconsistently.
pub fn load_world() -> Result<GameWorld> {
    let dir = data_dir();
    info!("loading world templates from {}", dir.display());

    let area_file = areas::load(&dir.join("area_templates.json")).context("loading area templates")?;
    let item_file = items::load(&dir.join("item_templates.json")).context("loading item templates")?;
    let npc_file = npcs::load(&dir.join("npc_templates.json")).context("loading NPC templates")?;
    let phrase_map = phrases::load_phrase_tables(&dir);

    let world = build_world(&area_file, &item_file, &npc_file, phrase_map)?;
    info!(
        "world built: {} areas, {} items, {} NPCs, {} gangs",
        world.areas.len(),
        world.items.len(),
        world.npcs.len(),
        world.gangs.len()
    );
    Ok(world)
}

/// Cross-link parsed template files into a runtime world.
///
/// # Errors
/// Returns an error on unknown or duplicate symbols, conflicting placements,
/// or a missing/ambiguous start area.
pub fn build_world(
    area_file: &areas::AreaFile,
    item_file: &items::ItemFile,
    npc_file: &npcs::NpcFile,
    phrase_map: std::collections::HashMap<crate::spinners::PhraseKey, gametools::Spinner<String>>,
) -> Result<GameWorld> {
    let mut world = GameWorld::new_empty();

    let (area_index, start_area) = areas::build(area_file, &mut world).context("building areas")?;
    let npc_index = npcs::build(npc_file, &mut world, &area_index).context("building NPCs")?;
    let item_index = items::build(item_file, &mut world).context("building items")?;
    placement::place_items(&mut world, item_file, &item_index, &area_index, &npc_index)
        .context("placing items")?;

    world.phrases = phrase_map;
    world.player.location = Location::Area(start_area);
    if let Some(area) = world.areas.get_mut(&start_area) {
        area.visited = true;
    }

    placement::check_integrity(&world).context("validating world integrity")?;
    Ok(world)
}
