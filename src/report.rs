//! Turn report: collapses the tick's structured events into a few lines of
//! natural language.
//!
//! Events are grouped by category and gang (or lone actor), repeated idling
//! is dropped, each group is phrased through the matching spinner template,
//! and anything past the line cap collapses into a single overflow line.
//! This is a pure formatting pass -- nothing here inspects rendered text.

use std::collections::HashMap;

use crate::event::{EventCategory, NpcEvent};
use crate::spinners::PhraseKey;
use crate::world::GameWorld;

/// Most lines a single turn report may occupy.
pub const MAX_REPORT_LINES: usize = 6;

/// Small counts read better as words.
fn count_word(n: usize) -> String {
    match n {
        2 => "Two".to_string(),
        3 => "Three".to_string(),
        4 => "Four".to_string(),
        5 => "Five".to_string(),
        6 => "Six".to_string(),
        7 => "Seven".to_string(),
        8 => "Eight".to_string(),
        9 => "Nine".to_string(),
        other => other.to_string(),
    }
}

/// Fill a phrase template's placeholders from a group of events.
fn fill_template(template: &str, events: &[&NpcEvent]) -> String {
    let first = events[0];
    let gang = first.gang.as_deref().unwrap_or("assorted");
    let target = events.iter().find_map(|e| e.target.as_deref()).unwrap_or("someone");
    let detail = events.iter().find_map(|e| e.detail.as_deref()).unwrap_or("something");
    template
        .replace("{name}", &first.actor_name)
        .replace("{gang}", gang)
        .replace("{count}", &count_word(events.len()))
        .replace("{target}", target)
        .replace("{detail}", detail)
}

/// Summarize one turn's events into at most [`MAX_REPORT_LINES`] lines.
pub fn summarize(world: &GameWorld, events: &[NpcEvent]) -> Vec<String> {
    // group by (category, gang-or-actor), keeping first-seen order
    let mut order: Vec<(EventCategory, String)> = Vec::new();
    let mut groups: HashMap<(EventCategory, String), Vec<&NpcEvent>> = HashMap::new();
    for event in events {
        let key = (event.category, event.group_key().to_string());
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(event);
    }

    let mut lines = Vec::new();
    let mut overflow_groups = 0usize;
    for key in &order {
        let mut group = groups.remove(key).unwrap_or_default();

        // a crowd of idlers is one observation, not many
        if key.0 == EventCategory::Idle && group.len() > 1 {
            // distinct actors only; the same loiterer twice is still one line
            group.dedup_by(|a, b| a.actor_id == b.actor_id);
        }
        if group.is_empty() {
            continue;
        }

        if lines.len() >= MAX_REPORT_LINES - 1 {
            overflow_groups += 1;
            continue;
        }

        let grouped = group.len() > 1;
        let phrase_key = PhraseKey::for_category(key.0, grouped);
        let template = world.spin_phrase(phrase_key, "{name} does something.");
        lines.push(fill_template(&template, &group));
    }

    if overflow_groups > 0 {
        let template = world.spin_phrase(
            PhraseKey::ReportOverflow,
            "...and {count} other things happen nearby.",
        );
        lines.push(template.replace("{count}", &overflow_groups.to_string()));
    }
    lines
}
