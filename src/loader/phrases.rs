//! `loader::phrases` module
//!
//! This module implements the loading of phrase tables from JSON
//! (`npc_actions.json` for behavior phrasing, `npc_reactions.json` for
//! hazard / effect phrasing). Compiled-in defaults for every key are
//! created first, then any overrides from the files are applied, so a
//! missing or partial table never fails the load.

use std::collections::HashMap;
use std::path::Path;

use gametools::{Spinner, Wedge};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::spinners::{PhraseKey, default_phrase_map};

/// Raw phrase wheel data loaded from JSON.
#[derive(Debug, Deserialize, Serialize)]
pub struct RawPhraseData {
    pub key: String,
    pub values: Vec<String>,
    #[serde(default)]
    pub widths: Vec<usize>,
}

/// Container for multiple phrase wheel definitions in a JSON file.
#[derive(Debug, Deserialize, Serialize)]
pub struct PhraseFile {
    pub phrases: Vec<RawPhraseData>,
}

impl PhraseFile {
    /// Apply this file's entries over an existing phrase map.
    pub fn apply(&self, phrases: &mut HashMap<PhraseKey, Spinner<String>>) {
        for entry in &self.phrases {
            let Some(key) = PhraseKey::from_key(&entry.key) else {
                warn!("phrase table references unknown key '{}', skipping", entry.key);
                continue;
            };
            let wedges = create_wedges(entry);
            if wedges.is_empty() {
                warn!("phrase wheel '{}' has no values, skipping", entry.key);
                continue;
            }
            info!("phrase wheel '{}' overridden with {} values", entry.key, wedges.len());
            phrases.insert(key, Spinner::new(wedges));
        }
    }
}

/// Create weighted wedges from raw data, defaulting each width to 1.
fn create_wedges(entry: &RawPhraseData) -> Vec<Wedge<String>> {
    entry
        .values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let width = entry.widths.get(i).copied().unwrap_or(1);
            Wedge::new_weighted(value.clone(), width)
        })
        .collect()
}

/// Load the phrase tables from the data directory over the built-in defaults.
/// Unreadable or malformed files only cost their overrides.
pub fn load_phrase_tables(data_dir: &Path) -> HashMap<PhraseKey, Spinner<String>> {
    let mut phrases = default_phrase_map();
    for file_name in ["npc_actions.json", "npc_reactions.json"] {
        let path = data_dir.join(file_name);
        match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<PhraseFile>(&text) {
                Ok(file) => file.apply(&mut phrases),
                Err(e) => warn!("could not parse phrase table '{}': {e}. Using defaults.", path.display()),
            },
            Err(e) => warn!("could not read phrase table '{}': {e}. Using defaults.", path.display()),
        }
    }
    phrases
}
