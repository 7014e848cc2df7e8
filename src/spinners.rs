//! Phrase wheels for randomized flavor text.
//!
//! Every phrase the game varies at random lives on a [`Spinner`] keyed by
//! [`PhraseKey`]. Report phrases are templates with `{name}`, `{gang}`,
//! `{count}`, `{target}` and `{detail}` placeholders filled in by the turn
//! report. Compiled-in defaults exist for every key, so a missing or partial
//! phrase table degrades instead of failing.

use gametools::spinners::{Spinner, Wedge};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::event::EventCategory;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhraseKey {
    AttackOne,
    AttackGroup,
    HallucinationOne,
    HallucinationGroup,
    FriendlyOne,
    FriendlyGroup,
    GiftOne,
    GiftGroup,
    IdleOne,
    IdleGroup,
    UnnoticedOne,
    UnnoticedGroup,
    SpottedOne,
    SpottedGroup,
    InteractionOne,
    InteractionGroup,
    OtherOne,
    OtherGroup,
    ReportOverflow,
    EntityNotFound,
    UnrecognizedCommand,
    QuitMsg,
    Movement,
    NoEffect,
    NpcIgnore,
}

impl PhraseKey {
    /// Every key, for building the default map.
    pub fn all() -> &'static [PhraseKey] {
        use PhraseKey::*;
        &[
            AttackOne,
            AttackGroup,
            HallucinationOne,
            HallucinationGroup,
            FriendlyOne,
            FriendlyGroup,
            GiftOne,
            GiftGroup,
            IdleOne,
            IdleGroup,
            UnnoticedOne,
            UnnoticedGroup,
            SpottedOne,
            SpottedGroup,
            InteractionOne,
            InteractionGroup,
            OtherOne,
            OtherGroup,
            ReportOverflow,
            EntityNotFound,
            UnrecognizedCommand,
            QuitMsg,
            Movement,
            NoEffect,
            NpcIgnore,
        ]
    }

    /// Parse a camelCase key from the JSON phrase tables.
    pub fn from_key(key: &str) -> Option<PhraseKey> {
        use PhraseKey::*;
        match key {
            "attackOne" => Some(AttackOne),
            "attackGroup" => Some(AttackGroup),
            "hallucinationOne" => Some(HallucinationOne),
            "hallucinationGroup" => Some(HallucinationGroup),
            "friendlyOne" => Some(FriendlyOne),
            "friendlyGroup" => Some(FriendlyGroup),
            "giftOne" => Some(GiftOne),
            "giftGroup" => Some(GiftGroup),
            "idleOne" => Some(IdleOne),
            "idleGroup" => Some(IdleGroup),
            "unnoticedOne" => Some(UnnoticedOne),
            "unnoticedGroup" => Some(UnnoticedGroup),
            "spottedOne" => Some(SpottedOne),
            "spottedGroup" => Some(SpottedGroup),
            "interactionOne" => Some(InteractionOne),
            "interactionGroup" => Some(InteractionGroup),
            "otherOne" => Some(OtherOne),
            "otherGroup" => Some(OtherGroup),
            "reportOverflow" => Some(ReportOverflow),
            "entityNotFound" => Some(EntityNotFound),
            "unrecognizedCommand" => Some(UnrecognizedCommand),
            "quitMsg" => Some(QuitMsg),
            "movement" => Some(Movement),
            "noEffect" => Some(NoEffect),
            "npcIgnore" => Some(NpcIgnore),
            _ => None,
        }
    }

    /// The phrase key used to report an event of `category` -- the singular
    /// wheel for a lone actor, the group wheel for a collapsed group.
    pub fn for_category(category: EventCategory, group: bool) -> PhraseKey {
        use PhraseKey::*;
        match (category, group) {
            (EventCategory::Attack, false) => AttackOne,
            (EventCategory::Attack, true) => AttackGroup,
            (EventCategory::Hallucination, false) => HallucinationOne,
            (EventCategory::Hallucination, true) => HallucinationGroup,
            (EventCategory::Friendly, false) => FriendlyOne,
            (EventCategory::Friendly, true) => FriendlyGroup,
            (EventCategory::Gift, false) => GiftOne,
            (EventCategory::Gift, true) => GiftGroup,
            (EventCategory::Idle, false) => IdleOne,
            (EventCategory::Idle, true) => IdleGroup,
            (EventCategory::Unnoticed, false) => UnnoticedOne,
            (EventCategory::Unnoticed, true) => UnnoticedGroup,
            (EventCategory::Spotted, false) => SpottedOne,
            (EventCategory::Spotted, true) => SpottedGroup,
            (EventCategory::Interaction, false) => InteractionOne,
            (EventCategory::Interaction, true) => InteractionGroup,
            (EventCategory::Other, false) => OtherOne,
            (EventCategory::Other, true) => OtherGroup,
        }
    }

    /// Built-in phrasing for this key.
    pub fn default_values(self) -> &'static [&'static str] {
        use PhraseKey::*;
        match self {
            AttackOne => &[
                "{name} lunges at {target}!",
                "{name} takes a wild swing at {target}!",
                "{name} comes at {target} swinging.",
            ],
            AttackGroup => &[
                "{count} {gang} members pile onto {target}!",
                "{count} {gang} members close in on {target}, fists up.",
            ],
            HallucinationOne => &[
                "{name} stares hard at something that isn't there.",
                "{name} swats at invisible drones.",
                "{name} whispers urgently to a parked bicycle.",
            ],
            HallucinationGroup => &[
                "{count} {gang} members stumble around wide-eyed, babbling at thin air.",
                "{count} {gang} members are busy arguing with hallucinations.",
            ],
            FriendlyOne => &[
                "{name} beams at you warmly.",
                "{name} gives you a big, slightly unsettling smile.",
                "{name} waves you over like an old friend.",
            ],
            FriendlyGroup => &["{count} {gang} members grin at you with sudden, suspicious warmth."],
            GiftOne => &[
                "{name} presses {detail} into your hands.",
                "{name} insists you take {detail}.",
            ],
            GiftGroup => &["{count} {gang} members crowd around, pushing presents at you."],
            IdleOne => &[
                "{name} loiters nearby.",
                "{name} scrolls a cracked phone.",
                "{name} kicks at loose gravel.",
            ],
            IdleGroup => &[
                "{count} {gang} members loiter about, up to nothing much.",
                "{count} {gang} members mill around, killing time.",
            ],
            UnnoticedOne => &[
                "{name} looks right past you.",
                "{name} hasn't clocked you yet.",
            ],
            UnnoticedGroup => &["{count} {gang} members scan the area and miss you completely."],
            SpottedOne => &["{name} locks eyes with you. You've been made."],
            SpottedGroup => &["Heads snap up. {count} {gang} members have made you."],
            InteractionOne => &["{name} says: \"{detail}\"", "{name} mutters: \"{detail}\""],
            InteractionGroup => &["{count} {gang} members trade low words and glances."],
            OtherOne => &["{name} fiddles with {detail}.", "{name} is preoccupied with {detail}."],
            OtherGroup => &["{count} {gang} members are busy with their own business."],
            ReportOverflow => &["...and {count} other things happen nearby."],
            EntityNotFound => &["What's that?", "Never heard of it.", "You don't see that here."],
            UnrecognizedCommand => &[
                "Didn't quite catch that.",
                "Come again?",
                "That's not a thing you can do here.",
            ],
            QuitMsg => &[
                "Logging out. The garden grows on without you.",
                "Root session closed.",
            ],
            Movement => &["You head", "You make your way", "You slip"],
            NoEffect => &["Nothing happens.", "No visible effect."],
            NpcIgnore => &["Ignores you.", "Pretends not to hear.", "Stares through you."],
        }
    }
}

/// Create the phrase map with compiled-in defaults for every key.
pub fn default_phrase_map() -> HashMap<PhraseKey, Spinner<String>> {
    let mut phrases = HashMap::new();
    for key in PhraseKey::all() {
        let wedges: Vec<Wedge<String>> = key
            .default_values()
            .iter()
            .map(|v| Wedge::new((*v).to_string()))
            .collect();
        phrases.insert(*key, Spinner::new(wedges));
    }
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_default_phrasing() {
        for key in PhraseKey::all() {
            assert!(!key.default_values().is_empty(), "no defaults for {key:?}");
        }
    }

    #[test]
    fn default_map_covers_all_keys() {
        let map = default_phrase_map();
        assert_eq!(map.len(), PhraseKey::all().len());
        for key in PhraseKey::all() {
            assert!(map[key].spin().is_some());
        }
    }

    #[test]
    fn from_key_round_trips_serde_names() {
        for key in PhraseKey::all() {
            let json = serde_json::to_string(key).unwrap();
            let name = json.trim_matches('"');
            assert_eq!(PhraseKey::from_key(name), Some(*key));
        }
        assert_eq!(PhraseKey::from_key("notAKey"), None);
    }

    #[test]
    fn phrase_key_serde_round_trip() {
        let key = PhraseKey::HallucinationGroup;
        let s = serde_json::to_string(&key).unwrap();
        let back: PhraseKey = serde_json::from_str(&s).unwrap();
        assert_eq!(key, back);
    }
}
