//! Save-game discovery and serialization helpers.
//!
//! Saves are whole-world JSON snapshots in per-slot files under
//! `saved_games/`, stamped with the engine version. Loading a save written
//! by a different engine version warns but proceeds.

use crate::{GameWorld, ROOT_ACCESS_VERSION};
use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};
use std::time::SystemTime;
use time::OffsetDateTime;

pub const SAVE_DIR: &str = "saved_games";
pub const DEFAULT_SLOT: &str = "savegame";

static ACTIVE_SAVE_DIR: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| RwLock::new(PathBuf::from(SAVE_DIR)));

/// One discovered save file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub slot: String,
    pub version: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

/// Just enough of a save file to list it without deserializing the world.
#[derive(Debug, Deserialize)]
struct SaveProbe {
    #[serde(default)]
    version: String,
}

/// Return the active save directory used for save operations and listings.
pub fn active_save_dir() -> PathBuf {
    ACTIVE_SAVE_DIR
        .read()
        .map(|guard| guard.clone())
        .unwrap_or_else(|_| PathBuf::from(SAVE_DIR))
}

/// Set the active save directory (used by tests to point at a temp dir).
pub fn set_active_save_dir(path: PathBuf) {
    if let Ok(mut guard) = ACTIVE_SAVE_DIR.write() {
        *guard = path;
    }
}

/// Reduce a requested slot name to a safe file stem.
pub fn sanitize_slug(raw: &str) -> String {
    let slug: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let trimmed = slug.trim_matches('_');
    if trimmed.is_empty() {
        DEFAULT_SLOT.to_string()
    } else {
        trimmed.to_string()
    }
}

fn slot_path(slot: &str) -> PathBuf {
    active_save_dir().join(format!("{}.json", sanitize_slug(slot)))
}

/// Serialize the world to the named slot.
///
/// # Errors
/// Returns an error if the save directory cannot be created or the file
/// cannot be written.
pub fn save_world(world: &GameWorld, slot: &str) -> Result<PathBuf> {
    let dir = active_save_dir();
    fs::create_dir_all(&dir).with_context(|| format!("creating save directory {}", dir.display()))?;
    let path = slot_path(slot);
    let json = serde_json::to_string_pretty(world).context("serializing world state")?;
    fs::write(&path, json).with_context(|| format!("writing save file {}", path.display()))?;
    info!("world saved to {}", path.display());
    Ok(path)
}

/// Deserialize a world from the named slot.
///
/// # Errors
/// Returns an error if the file is missing or does not parse as a world.
pub fn load_world_file(slot: &str) -> Result<GameWorld> {
    let path = slot_path(slot);
    if !path.exists() {
        return Err(anyhow!("no save file found at {}", path.display()));
    }
    let json = fs::read_to_string(&path).with_context(|| format!("reading save file {}", path.display()))?;
    let world: GameWorld =
        serde_json::from_str(&json).with_context(|| format!("parsing save file {}", path.display()))?;
    if world.version != ROOT_ACCESS_VERSION {
        warn!(
            "save file {} was written by engine v{} (running v{ROOT_ACCESS_VERSION})",
            path.display(),
            world.version
        );
    }
    info!("world loaded from {}", path.display());
    Ok(world)
}

/// Discover save slot files stored in `dir`.
///
/// # Errors
/// Returns an error if the directory contents cannot be read or enumerated.
pub fn collect_save_slots(dir: &Path) -> Result<Vec<SaveSlot>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry.with_context(|| format!("enumerating {}", dir.display()))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let version = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str::<SaveProbe>(&json).ok())
            .map_or_else(|| "?".to_string(), |probe| probe.version);
        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
        slots.push(SaveSlot {
            slot: stem.to_string(),
            version,
            path,
            modified,
        });
    }
    slots.sort_by(|a, b| a.slot.cmp(&b.slot));
    Ok(slots)
}

/// Human-readable modification time for save listings.
pub fn format_modified(modified: Option<SystemTime>) -> String {
    let Some(system_time) = modified else {
        return "unknown".to_string();
    };
    let datetime = OffsetDateTime::from(system_time);
    match time::format_description::parse("[year]-[month]-[day] [hour]:[minute]") {
        Ok(format) => datetime.format(&format).unwrap_or_else(|_| "unknown".to_string()),
        Err(_) => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_slug_keeps_alphanumerics() {
        assert_eq!(sanitize_slug("Garden Run 2"), "garden_run_2");
        assert_eq!(sanitize_slug("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_slug("   "), DEFAULT_SLOT);
        assert_eq!(sanitize_slug("___"), DEFAULT_SLOT);
    }

    #[test]
    fn missing_directory_lists_no_slots() {
        let slots = collect_save_slots(Path::new("/definitely/not/a/real/dir")).unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn format_modified_handles_unknown() {
        assert_eq!(format_modified(None), "unknown");
    }
}
