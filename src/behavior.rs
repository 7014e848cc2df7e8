//! NPC behavior engine.
//!
//! Once per turn, every living NPC in the player's area picks one behavior
//! by weighted random choice over {Idle, Talk, Fight, UseItem}. Weights are
//! adjusted for gang membership, whether the player has been spotted, and
//! any active status effects; a per-NPC cooldown zeroes the weight of a
//! behavior repeated too soon. A behavior with no valid target falls back
//! to idling. Everything an NPC does is returned as structured events for
//! the turn report -- nothing is printed here.

use std::fmt::Display;

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effect::EffectKind;
use crate::event::{EventCategory, NpcEvent};
use crate::item::ItemKind;
use crate::npc::Npc;
use crate::spinners::PhraseKey;
use crate::world::{GameWorld, WorldObject};

/// Turns that must pass before an NPC repeats the same behavior.
pub const BEHAVIOR_COOLDOWN_TURNS: usize = 2;

/// Damage dealt by an unarmed NPC.
const UNARMED_DAMAGE: u32 = 1;

/// The behaviors an NPC can choose each tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BehaviorKind {
    Idle,
    Talk,
    Fight,
    UseItem,
}
impl Display for BehaviorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BehaviorKind::Idle => write!(f, "idle"),
            BehaviorKind::Talk => write!(f, "talk"),
            BehaviorKind::Fight => write!(f, "fight"),
            BehaviorKind::UseItem => write!(f, "use-item"),
        }
    }
}

/// Weight table for one NPC this tick.
///
/// Idle is exempt from cooldown so there is always a choice left.
pub fn behavior_weights(
    npc: &Npc,
    gang_hostile: bool,
    player_detected: bool,
    current_turn: usize,
) -> Vec<(BehaviorKind, u32)> {
    let mut weights: Vec<(BehaviorKind, u32)> = if npc.is_gang_member() {
        vec![
            (BehaviorKind::Idle, 35),
            (BehaviorKind::Talk, 20),
            (BehaviorKind::Fight, 20),
            (BehaviorKind::UseItem, 25),
        ]
    } else {
        vec![
            (BehaviorKind::Idle, 50),
            (BehaviorKind::Talk, 30),
            (BehaviorKind::Fight, 5),
            (BehaviorKind::UseItem, 15),
        ]
    };

    let set = |weights: &mut Vec<(BehaviorKind, u32)>, kind: BehaviorKind, f: &dyn Fn(u32) -> u32| {
        if let Some(entry) = weights.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = f(entry.1);
        }
    };

    if npc.is_gang_member() && gang_hostile && player_detected {
        set(&mut weights, BehaviorKind::Fight, &|_| 60);
    }
    if npc.has_effect(EffectKind::Friendly) {
        set(&mut weights, BehaviorKind::Fight, &|_| 0);
        set(&mut weights, BehaviorKind::Talk, &|w| w + 25);
    }
    if npc.has_effect(EffectKind::Hallucinating) {
        set(&mut weights, BehaviorKind::Idle, &|_| 80);
        set(&mut weights, BehaviorKind::Fight, &|w| w / 2);
    }
    if npc.has_effect(EffectKind::GiftGiving) {
        set(&mut weights, BehaviorKind::UseItem, &|w| w + 30);
    }

    for (kind, weight) in &mut weights {
        if *kind != BehaviorKind::Idle && npc.on_cooldown(*kind, current_turn, BEHAVIOR_COOLDOWN_TURNS) {
            *weight = 0;
        }
    }
    weights
}

/// Roll one behavior from a weight table. An all-zero table idles.
pub fn pick_weighted<R: Rng>(weights: &[(BehaviorKind, u32)], rng: &mut R) -> BehaviorKind {
    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return BehaviorKind::Idle;
    }
    let mut roll = rng.random_range(0..total);
    for (kind, weight) in weights {
        if roll < *weight {
            return *kind;
        }
        roll -= weight;
    }
    BehaviorKind::Idle
}

/// Detection pass: each living NPC in the player's area that has not already
/// spotted the player rolls its detection chance. No rolls while the player
/// is hidden. Already-alerted NPCs stay alerted.
pub fn tick_detection<R: Rng>(world: &mut GameWorld, rng: &mut R) -> Vec<NpcEvent> {
    let mut events = Vec::new();
    if world.player.hidden {
        return events;
    }
    let Ok(area) = world.player_area_ref() else {
        return events;
    };
    let area_id = area.id;

    for npc_id in world.living_npcs_in_area(area_id) {
        if world.player.detected_by.contains(&npc_id) {
            continue;
        }
        let Some(npc) = world.npcs.get(&npc_id) else {
            continue;
        };
        let (name, gang) = (npc.name.clone(), npc.gang.clone());
        if world.npcs[&npc_id].rolls_detection(rng) {
            world.player.detected_by.insert(npc_id);
            info!("'{name}' spotted the player");
            events.push(NpcEvent::new(npc_id, &name, gang.as_deref(), EventCategory::Spotted));
        } else {
            events.push(NpcEvent::new(npc_id, &name, gang.as_deref(), EventCategory::Unnoticed));
        }
    }
    events
}

/// What a behavior resolved to, decided before any mutation.
enum PlannedAction {
    Idle,
    Hallucinate,
    Speak { friendly: bool },
    AttackPlayer { damage: u32, weapon: Option<String> },
    AttackNpc { target_id: Uuid, damage: u32 },
    Gift { item_id: Uuid },
    SelfUse { item_id: Uuid, heal: u32 },
}

/// Run one behavior turn for every living NPC in the player's area.
pub fn run_npc_turns<R: Rng>(world: &mut GameWorld, rng: &mut R) -> Vec<NpcEvent> {
    let mut events = Vec::new();
    let Ok(area) = world.player_area_ref() else {
        warn!("behavior tick skipped: player is not in an area");
        return events;
    };
    let area_id = area.id;
    let current_turn = world.turn_count;

    for npc_id in world.living_npcs_in_area(area_id) {
        let Some(npc) = world.npcs.get(&npc_id) else {
            continue;
        };
        // a rival may have dropped this NPC earlier in the same tick
        if !npc.is_alive() {
            continue;
        }
        let gang_hostile = npc
            .gang
            .as_ref()
            .and_then(|g| world.gangs.get(g))
            .is_some_and(|g| g.hostile);
        let player_detected = world.player.detected_by.contains(&npc_id);

        let weights = behavior_weights(npc, gang_hostile, player_detected, current_turn);
        let chosen = pick_weighted(&weights, rng);
        info!("npc '{}' behavior roll: {chosen}", npc.symbol);

        let action = plan_action(world, npc_id, chosen, player_detected);
        if let Some(event) = execute_action(world, npc_id, &action, rng) {
            events.push(event);
        }
        if let Some(npc) = world.npcs.get_mut(&npc_id) {
            npc.cooldowns.insert(chosen, current_turn);
        }
    }
    events
}

/// Resolve a chosen behavior against the current surroundings, falling back
/// to idling when it has no valid target.
fn plan_action(world: &GameWorld, npc_id: Uuid, chosen: BehaviorKind, player_detected: bool) -> PlannedAction {
    let Some(npc) = world.npcs.get(&npc_id) else {
        return PlannedAction::Idle;
    };
    let hallucinating = npc.has_effect(EffectKind::Hallucinating);

    match chosen {
        BehaviorKind::Idle => {
            if hallucinating {
                PlannedAction::Hallucinate
            } else {
                PlannedAction::Idle
            }
        },
        BehaviorKind::Talk => {
            if hallucinating {
                PlannedAction::Hallucinate
            } else {
                PlannedAction::Speak {
                    friendly: npc.has_effect(EffectKind::Friendly),
                }
            }
        },
        BehaviorKind::Fight => {
            let damage = best_weapon(world, npc).map_or(UNARMED_DAMAGE, |(_, dmg)| dmg);
            if player_detected {
                let weapon = best_weapon(world, npc).map(|(name, _)| name);
                PlannedAction::AttackPlayer { damage, weapon }
            } else if let Some(target_id) = rival_in_area(world, npc) {
                PlannedAction::AttackNpc { target_id, damage }
            } else {
                // no eligible target -- fall back to idling
                PlannedAction::Idle
            }
        },
        BehaviorKind::UseItem => {
            if npc.has_effect(EffectKind::GiftGiving)
                && let Some(item_id) = first_carried(world, npc)
            {
                return PlannedAction::Gift { item_id };
            }
            if let Some((item_id, heal)) = carried_consumable(world, npc) {
                PlannedAction::SelfUse { item_id, heal }
            } else {
                PlannedAction::Idle
            }
        },
    }
}

/// Apply a planned action to the world and record its event.
fn execute_action<R: Rng>(
    world: &mut GameWorld,
    npc_id: Uuid,
    action: &PlannedAction,
    rng: &mut R,
) -> Option<NpcEvent> {
    let npc = world.npcs.get(&npc_id)?;
    let (name, gang) = (npc.name.clone(), npc.gang.clone());
    let event = |category| NpcEvent::new(npc_id, &name, gang.as_deref(), category);

    match action {
        PlannedAction::Idle => Some(event(EventCategory::Idle)),
        PlannedAction::Hallucinate => Some(event(EventCategory::Hallucination)),
        PlannedAction::Speak { friendly } => {
            let fallback = world.spin_phrase(PhraseKey::NpcIgnore, "Ignores you.");
            let line = world.npcs[&npc_id].random_dialogue(rng, &fallback);
            let category = if *friendly {
                EventCategory::Friendly
            } else {
                EventCategory::Interaction
            };
            Some(event(category).with_detail(&line))
        },
        PlannedAction::AttackPlayer { damage, weapon } => {
            world.player.health.damage(*damage);
            info!("'{name}' hit the player for {damage} (weapon: {weapon:?})");
            Some(event(EventCategory::Attack).with_target("you"))
        },
        PlannedAction::AttackNpc { target_id, damage } => {
            let target_name = world.npcs.get(target_id)?.name.clone();
            if let Some(target) = world.npcs.get_mut(target_id) {
                target.health.damage(*damage);
                if !target.is_alive() {
                    target.effects.clear();
                    info!("'{target_name}' was taken down by '{name}'");
                }
            }
            Some(event(EventCategory::Attack).with_target(&target_name))
        },
        PlannedAction::Gift { item_id } => {
            let item_name = world.items.get(item_id).map(|i| i.display_name())?;
            if world.move_item_to_inventory(*item_id).is_err() {
                return Some(event(EventCategory::Idle));
            }
            info!("'{name}' gifted '{item_name}' to the player");
            Some(event(EventCategory::Gift).with_detail(&item_name))
        },
        PlannedAction::SelfUse { item_id, heal } => {
            let item_name = world.items.get(item_id).map(|i| i.name.clone())?;
            world.consume_item(*item_id).ok()?;
            if let Some(npc) = world.npcs.get_mut(&npc_id) {
                npc.health.heal(*heal);
            }
            Some(event(EventCategory::Other).with_detail(&item_name))
        },
    }
}

/// Best weapon in an NPC's inventory: (name, damage).
fn best_weapon(world: &GameWorld, npc: &Npc) -> Option<(String, u32)> {
    npc.inventory
        .iter()
        .filter_map(|id| world.items.get(id))
        .filter_map(|item| item.weapon_damage().map(|dmg| (item.name.clone(), dmg)))
        .max_by_key(|(_, dmg)| *dmg)
}

/// A living NPC from a different gang standing in the same area.
fn rival_in_area(world: &GameWorld, npc: &Npc) -> Option<Uuid> {
    let area_id = npc.location.area()?;
    world
        .living_npcs_in_area(area_id)
        .into_iter()
        .find(|other_id| {
            *other_id != npc.id
                && world
                    .npcs
                    .get(other_id)
                    .is_some_and(|other| other.is_gang_member() && other.gang != npc.gang)
        })
}

/// First carried item by symbol order, for deterministic gift choice.
fn first_carried(world: &GameWorld, npc: &Npc) -> Option<Uuid> {
    let mut carried: Vec<&crate::item::Item> = npc.inventory.iter().filter_map(|id| world.items.get(id)).collect();
    carried.sort_by(|a, b| a.symbol().cmp(b.symbol()));
    carried.first().map(|item| item.id)
}

/// A consumable the NPC is carrying: (id, heal amount).
fn carried_consumable(world: &GameWorld, npc: &Npc) -> Option<(Uuid, u32)> {
    let mut carried: Vec<&crate::item::Item> = npc
        .inventory
        .iter()
        .filter_map(|id| world.items.get(id))
        .filter(|item| matches!(item.kind, ItemKind::Consumable { .. }))
        .collect();
    carried.sort_by(|a, b| a.symbol().cmp(b.symbol()));
    carried.first().map(|item| match item.kind {
        ItemKind::Consumable { heal, .. } => (item.id, heal),
        _ => (item.id, 0),
    })
}
