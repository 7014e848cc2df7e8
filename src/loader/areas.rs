//! `loader::areas` module
//!
//! Parses `area_templates.json` and builds the world's area graph.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::area::Area;
use crate::idgen::{NAMESPACE_AREA, uuid_from_symbol};
use crate::loader::{LoaderError, read_json};
use crate::world::{GameWorld, Location};

/// Raw area data as authored in JSON.
#[derive(Debug, Deserialize, Serialize)]
pub struct RawAreaDef {
    pub symbol: String,
    pub name: String,
    pub description: String,
    /// direction phrase -> area symbol
    #[serde(default)]
    pub exits: HashMap<String, String>,
    #[serde(default)]
    pub start: bool,
}

/// Container for the area template file.
#[derive(Debug, Deserialize, Serialize)]
pub struct AreaFile {
    pub areas: Vec<RawAreaDef>,
}

/// Load the area template file.
///
/// # Errors
/// - if the file is missing or fails to parse
pub fn load(path: &Path) -> Result<AreaFile, LoaderError> {
    read_json(path)
}

/// Build areas into the world and link exits.
///
/// Returns the symbol index and the starting area id.
///
/// # Errors
/// - on duplicate symbols, exits to unknown symbols, or zero / multiple
///   start areas
pub fn build(file: &AreaFile, world: &mut GameWorld) -> Result<(HashMap<String, Uuid>, Uuid), LoaderError> {
    let mut index: HashMap<String, Uuid> = HashMap::new();
    let mut start_area: Option<Uuid> = None;

    for def in &file.areas {
        let id = uuid_from_symbol(&NAMESPACE_AREA, &def.symbol);
        if index.insert(def.symbol.clone(), id).is_some() {
            return Err(LoaderError::DuplicateSymbol {
                kind: "area",
                symbol: def.symbol.clone(),
            });
        }
        if def.start {
            if start_area.is_some() {
                return Err(LoaderError::MultipleStartAreas);
            }
            start_area = Some(id);
        }
        world.areas.insert(
            id,
            Area {
                id,
                symbol: def.symbol.clone(),
                name: def.name.clone(),
                description: def.description.clone(),
                location: Location::Nowhere,
                visited: false,
                exits: HashMap::new(),
                contents: std::collections::HashSet::new(),
                npcs: std::collections::HashSet::new(),
                hazards: Vec::new(),
            },
        );
    }

    // second pass: exits can point at any area, including later ones
    for def in &file.areas {
        let from_id = index[&def.symbol];
        for (direction, target_symbol) in &def.exits {
            let target_id = *index.get(target_symbol).ok_or_else(|| LoaderError::UnknownSymbol {
                kind: "area",
                symbol: target_symbol.clone(),
            })?;
            if let Some(area) = world.areas.get_mut(&from_id) {
                area.exits.insert(direction.clone(), target_id);
            }
        }
    }

    let start = start_area.ok_or(LoaderError::NoStartArea)?;
    Ok((index, start))
}
