//! Status effects applied to characters by hazards, crops, and thrown items.
//!
//! Durations are an explicit tagged variant rather than an overloaded null:
//! an effect is either [`EffectDuration::Permanent`] or counts down a fixed
//! number of turns and is removed exactly when the counter hits zero.

use std::fmt::Display;

use log::info;
use serde::{Deserialize, Serialize};

/// The named status effects that can be active on a character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    Hallucinating,
    Friendly,
    GiftGiving,
    Supervision,
}
impl Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectKind::Hallucinating => write!(f, "hallucinating"),
            EffectKind::Friendly => write!(f, "friendly"),
            EffectKind::GiftGiving => write!(f, "gift-giving"),
            EffectKind::Supervision => write!(f, "supervision"),
        }
    }
}

/// How long an effect (or an area hazard) lasts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectDuration {
    Permanent,
    Turns(u32),
}
impl EffectDuration {
    /// Advance one turn. Returns `None` when the duration has expired.
    /// A zero-turn duration counts as already expired; counters never go negative.
    pub fn tick(self) -> Option<EffectDuration> {
        match self {
            EffectDuration::Permanent => Some(EffectDuration::Permanent),
            EffectDuration::Turns(n) if n > 1 => Some(EffectDuration::Turns(n - 1)),
            EffectDuration::Turns(_) => None,
        }
    }

    /// The longer of two durations. `Permanent` dominates everything.
    pub fn longer(self, other: EffectDuration) -> EffectDuration {
        match (self, other) {
            (EffectDuration::Permanent, _) | (_, EffectDuration::Permanent) => EffectDuration::Permanent,
            (EffectDuration::Turns(a), EffectDuration::Turns(b)) => EffectDuration::Turns(a.max(b)),
        }
    }
}

/// One active effect on a character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: EffectKind,
    pub duration: EffectDuration,
}

/// Apply an effect to a character's active list.
///
/// Effects never stack: reapplying an active kind refreshes its duration to
/// the longer of the existing and incoming durations.
pub fn apply_effect(effects: &mut Vec<StatusEffect>, kind: EffectKind, duration: EffectDuration) {
    if let Some(existing) = effects.iter_mut().find(|fx| fx.kind == kind) {
        existing.duration = existing.duration.longer(duration);
        info!("effect '{kind}' refreshed to {:?}", existing.duration);
    } else {
        effects.push(StatusEffect { kind, duration });
        info!("effect '{kind}' applied ({duration:?})");
    }
}

/// Advance every active effect one turn, removing the expired ones.
/// Returns the kinds that expired this tick.
pub fn tick_effects(effects: &mut Vec<StatusEffect>) -> Vec<EffectKind> {
    let mut expired = Vec::new();
    effects.retain_mut(|fx| match fx.duration.tick() {
        Some(remaining) => {
            fx.duration = remaining;
            true
        },
        None => {
            expired.push(fx.kind);
            false
        },
    });
    expired
}

/// Returns true if the given kind is active in the list.
pub fn has_effect(effects: &[StatusEffect], kind: EffectKind) -> bool {
    effects.iter().any(|fx| fx.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_count_down_and_expire_at_zero() {
        let mut effects = Vec::new();
        apply_effect(&mut effects, EffectKind::Hallucinating, EffectDuration::Turns(3));

        assert!(tick_effects(&mut effects).is_empty());
        assert_eq!(effects[0].duration, EffectDuration::Turns(2));
        assert!(tick_effects(&mut effects).is_empty());
        assert_eq!(effects[0].duration, EffectDuration::Turns(1));

        let expired = tick_effects(&mut effects);
        assert_eq!(expired, vec![EffectKind::Hallucinating]);
        assert!(effects.is_empty());
    }

    #[test]
    fn permanent_effects_never_expire() {
        let mut effects = Vec::new();
        apply_effect(&mut effects, EffectKind::Supervision, EffectDuration::Permanent);
        for _ in 0..10 {
            assert!(tick_effects(&mut effects).is_empty());
        }
        assert!(has_effect(&effects, EffectKind::Supervision));
    }

    #[test]
    fn reapplying_refreshes_rather_than_stacking() {
        let mut effects = Vec::new();
        apply_effect(&mut effects, EffectKind::Friendly, EffectDuration::Turns(2));
        apply_effect(&mut effects, EffectKind::Friendly, EffectDuration::Turns(5));
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].duration, EffectDuration::Turns(5));

        // a shorter incoming duration never truncates the active one
        apply_effect(&mut effects, EffectKind::Friendly, EffectDuration::Turns(1));
        assert_eq!(effects[0].duration, EffectDuration::Turns(5));
    }

    #[test]
    fn zero_turn_duration_is_already_expired() {
        let mut effects = vec![StatusEffect {
            kind: EffectKind::Friendly,
            duration: EffectDuration::Turns(0),
        }];
        let expired = tick_effects(&mut effects);
        assert_eq!(expired, vec![EffectKind::Friendly]);
        assert!(effects.is_empty());
    }
}
