//! Hazard engine.
//!
//! A [`StaticHazard`] describes what a spill or thrown device does; an
//! [`ActiveHazard`] is one sitting in an area, re-rolled against everyone
//! standing in it each end-of-turn tick until it expires. Application
//! partitions the area's living gang members into resisted and affected
//! sets; members are processed in symbol order so a fixed RNG seed
//! reproduces the same partition.

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effect::{EffectDuration, EffectKind, apply_effect};
use crate::event::{EventCategory, NpcEvent};
use crate::world::GameWorld;

/// Definition of a hazard: what it is and what it does to the affected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticHazard {
    pub name: String,
    pub description: String,
    pub effect: EffectKind,
    pub duration: EffectDuration,
    /// Damage dealt to each affected character on application. Usually zero.
    pub potency: u32,
}

/// A hazard currently active in an area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveHazard {
    pub hazard: StaticHazard,
    pub remaining: EffectDuration,
}
impl ActiveHazard {
    pub fn new(hazard: StaticHazard) -> ActiveHazard {
        let remaining = hazard.duration;
        ActiveHazard { hazard, remaining }
    }
}

/// Partition of one hazard application over an area's gang members.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HazardOutcome {
    pub resisted: Vec<Uuid>,
    pub affected: Vec<Uuid>,
}

/// Apply a hazard to every living gang member standing in an area.
///
/// Each member rolls once against its own `hazard_resistance`; those who fail
/// receive the hazard's effect (refreshing, never stacking) and any potency
/// damage. Civilians and the dead are skipped. The two returned sets always
/// partition the members rolled.
pub fn apply_to_area<R: Rng>(
    world: &mut GameWorld,
    area_id: Uuid,
    hazard: &StaticHazard,
    rng: &mut R,
) -> HazardOutcome {
    let mut outcome = HazardOutcome::default();
    let member_ids: Vec<Uuid> = world
        .living_npcs_in_area(area_id)
        .into_iter()
        .filter(|id| world.npcs.get(id).is_some_and(|n| n.is_gang_member()))
        .collect();

    for npc_id in member_ids {
        let Some(npc) = world.npcs.get_mut(&npc_id) else {
            continue;
        };
        if rng.random::<f64>() < npc.hazard_resistance {
            info!("'{}' resisted hazard '{}'", npc.name, hazard.name);
            outcome.resisted.push(npc_id);
        } else {
            apply_effect(&mut npc.effects, hazard.effect, hazard.duration);
            if hazard.potency > 0 {
                npc.health.damage(hazard.potency);
            }
            if !npc.is_alive() {
                // the dead carry no status effects
                npc.effects.clear();
                info!("'{}' succumbed to hazard '{}'", npc.name, hazard.name);
            }
            outcome.affected.push(npc_id);
        }
    }
    outcome
}

/// End-of-turn hazard pass over the whole world.
///
/// Every active hazard re-applies to its area and counts down one turn;
/// expired hazards are removed. Only applications in `report_area` produce
/// events for the turn report -- elsewhere, the effects still land but go
/// unreported.
pub fn tick_hazards<R: Rng>(world: &mut GameWorld, report_area: Uuid, rng: &mut R) -> Vec<NpcEvent> {
    let mut events = Vec::new();

    let mut area_ids: Vec<Uuid> = world.areas.keys().copied().collect();
    area_ids.sort_by(|a, b| {
        let sa = world.areas.get(a).map_or("", |ar| ar.symbol.as_str());
        let sb = world.areas.get(b).map_or("", |ar| ar.symbol.as_str());
        sa.cmp(sb).then(a.cmp(b))
    });

    for area_id in area_ids {
        let Some(area) = world.areas.get_mut(&area_id) else {
            continue;
        };
        let mut active = std::mem::take(&mut area.hazards);
        let mut kept = Vec::with_capacity(active.len());

        for mut entry in active.drain(..) {
            let outcome = apply_to_area(world, area_id, &entry.hazard, rng);
            if area_id == report_area {
                for npc_id in &outcome.affected {
                    if let Some(npc) = world.npcs.get(npc_id) {
                        events.push(
                            NpcEvent::new(
                                *npc_id,
                                &npc.name,
                                npc.gang.as_deref(),
                                EventCategory::for_effect(entry.hazard.effect),
                            )
                            .with_detail(&entry.hazard.name),
                        );
                    }
                }
            }
            match entry.remaining.tick() {
                Some(remaining) => {
                    entry.remaining = remaining;
                    kept.push(entry);
                },
                None => info!("hazard '{}' dissipated", entry.hazard.name),
            }
        }

        if let Some(area) = world.areas.get_mut(&area_id) {
            area.hazards = kept;
        }
    }
    events
}
