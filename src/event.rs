//! Structured event records produced by the simulation.
//!
//! Everything an NPC does during the end-of-turn tick is recorded as an
//! [`NpcEvent`] rather than printed text. The turn report groups and phrases
//! these records as a separate formatting step, so no code ever has to parse
//! a sentence it just generated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effect::EffectKind;

/// Classification of an NPC event, used for grouping in the turn report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventCategory {
    Attack,
    Hallucination,
    Friendly,
    Gift,
    Idle,
    Unnoticed,
    Spotted,
    Interaction,
    Other,
}
impl EventCategory {
    /// The category under which a newly-applied status effect is reported.
    pub fn for_effect(kind: EffectKind) -> EventCategory {
        match kind {
            EffectKind::Hallucinating => EventCategory::Hallucination,
            EffectKind::Friendly => EventCategory::Friendly,
            EffectKind::GiftGiving => EventCategory::Gift,
            EffectKind::Supervision => EventCategory::Other,
        }
    }
}

/// One thing an NPC did (or had done to it) during a tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcEvent {
    pub actor_id: Uuid,
    pub actor_name: String,
    pub gang: Option<String>,
    pub category: EventCategory,
    pub target: Option<String>,
    pub detail: Option<String>,
}
impl NpcEvent {
    pub fn new(actor_id: Uuid, actor_name: &str, gang: Option<&str>, category: EventCategory) -> NpcEvent {
        NpcEvent {
            actor_id,
            actor_name: actor_name.to_string(),
            gang: gang.map(str::to_string),
            category,
            target: None,
            detail: None,
        }
    }

    pub fn with_target(mut self, target: &str) -> NpcEvent {
        self.target = Some(target.to_string());
        self
    }

    pub fn with_detail(mut self, detail: &str) -> NpcEvent {
        self.detail = Some(detail.to_string());
        self
    }

    /// Key used when grouping events for the report: the gang name when the
    /// actor has one, otherwise the actor itself.
    pub fn group_key(&self) -> &str {
        self.gang.as_deref().unwrap_or(&self.actor_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_kinds_map_to_report_categories() {
        assert_eq!(
            EventCategory::for_effect(EffectKind::Hallucinating),
            EventCategory::Hallucination
        );
        assert_eq!(EventCategory::for_effect(EffectKind::GiftGiving), EventCategory::Gift);
    }

    #[test]
    fn group_key_prefers_gang() {
        let id = Uuid::new_v4();
        let solo = NpcEvent::new(id, "Meg", None, EventCategory::Idle);
        assert_eq!(solo.group_key(), "Meg");

        let ganged = NpcEvent::new(id, "Wade", Some("Sprout Boys"), EventCategory::Idle);
        assert_eq!(ganged.group_key(), "Sprout Boys");
    }
}
