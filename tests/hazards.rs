//! Hazard application and effect duration properties: partitions always
//! cover the gang members present, fixed seeds reproduce fixed partitions,
//! and effect counters tick down to exactly zero.

use root_access::Area;
use root_access::effect::{EffectDuration, EffectKind, StatusEffect, tick_effects};
use root_access::hazard::{ActiveHazard, StaticHazard, apply_to_area, tick_hazards};
use root_access::health::HealthState;
use root_access::npc::Npc;
use root_access::world::{GameWorld, Location};

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn milk_spill() -> StaticHazard {
    StaticHazard {
        name: "Hacked Milk Spill".into(),
        description: "A spreading puddle of milk that is definitely transmitting something.".into(),
        effect: EffectKind::Hallucinating,
        duration: EffectDuration::Turns(3),
        potency: 0,
    }
}

fn gang_member(symbol: &str, area_id: Uuid, resistance: f64) -> Npc {
    Npc {
        id: Uuid::new_v4(),
        symbol: symbol.into(),
        name: symbol.into(),
        description: String::new(),
        location: Location::Area(area_id),
        inventory: HashSet::new(),
        gang: Some("Sprout Boys".into()),
        health: HealthState::new_at_max(10),
        effects: Vec::new(),
        detection_chance: 0.2,
        hazard_resistance: resistance,
        cooldowns: HashMap::new(),
        dialogue: Vec::new(),
    }
}

fn world_with_members(count: usize, resistance: f64) -> (GameWorld, Uuid) {
    let mut world = GameWorld::new_empty();
    let area_id = Uuid::new_v4();
    let mut area = Area {
        id: area_id,
        symbol: "alley".into(),
        name: "Alley".into(),
        description: String::new(),
        location: Location::Nowhere,
        visited: false,
        exits: HashMap::new(),
        contents: HashSet::new(),
        npcs: HashSet::new(),
        hazards: Vec::new(),
    };
    for i in 0..count {
        let npc = gang_member(&format!("member_{i}"), area_id, resistance);
        area.npcs.insert(npc.id);
        world.npcs.insert(npc.id, npc);
    }
    world.areas.insert(area_id, area);
    world.player.location = Location::Area(area_id);
    (world, area_id)
}

#[test]
fn partition_covers_all_members() {
    let (mut world, area_id) = world_with_members(3, 0.5);
    let mut rng = StdRng::seed_from_u64(42);
    let outcome = apply_to_area(&mut world, area_id, &milk_spill(), &mut rng);
    assert_eq!(outcome.resisted.len() + outcome.affected.len(), 3);

    // no member appears on both sides
    for id in &outcome.resisted {
        assert!(!outcome.affected.contains(id));
    }
}

#[test]
fn fixed_seed_reproduces_partition() {
    let seed = 20_260_807;
    let run = || {
        let (mut world, area_id) = world_with_members(3, 0.5);
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = apply_to_area(&mut world, area_id, &milk_spill(), &mut rng);
        let names = |ids: &[Uuid]| -> Vec<String> {
            ids.iter().map(|id| world.npcs[id].symbol.clone()).collect()
        };
        (names(&outcome.resisted), names(&outcome.affected))
    };
    assert_eq!(run(), run());
}

#[test]
fn extreme_resistances_are_certainties() {
    let (mut world, area_id) = world_with_members(4, 1.0);
    let mut rng = StdRng::seed_from_u64(7);
    let outcome = apply_to_area(&mut world, area_id, &milk_spill(), &mut rng);
    assert_eq!(outcome.resisted.len(), 4);

    let (mut world, area_id) = world_with_members(4, 0.0);
    let outcome = apply_to_area(&mut world, area_id, &milk_spill(), &mut rng);
    assert_eq!(outcome.affected.len(), 4);
}

#[test]
fn effect_counters_decrease_by_one_and_stop_at_zero() {
    let mut effects = vec![StatusEffect {
        kind: EffectKind::Hallucinating,
        duration: EffectDuration::Turns(3),
    }];

    assert!(tick_effects(&mut effects).is_empty());
    assert_eq!(effects[0].duration, EffectDuration::Turns(2));

    assert!(tick_effects(&mut effects).is_empty());
    assert_eq!(effects[0].duration, EffectDuration::Turns(1));

    let expired = tick_effects(&mut effects);
    assert_eq!(expired, vec![EffectKind::Hallucinating]);
    assert!(effects.is_empty(), "removed exactly at zero, never negative");
}

#[test]
fn area_hazards_expire_after_their_duration() {
    let (mut world, area_id) = world_with_members(2, 0.5);
    let mut hazard = milk_spill();
    hazard.duration = EffectDuration::Turns(2);
    world
        .areas
        .get_mut(&area_id)
        .unwrap()
        .hazards
        .push(ActiveHazard::new(hazard));

    let mut rng = StdRng::seed_from_u64(3);
    tick_hazards(&mut world, area_id, &mut rng);
    assert_eq!(world.areas[&area_id].hazards.len(), 1);
    tick_hazards(&mut world, area_id, &mut rng);
    assert!(world.areas[&area_id].hazards.is_empty());
}

#[test]
fn affected_members_carry_the_named_effect() {
    let (mut world, area_id) = world_with_members(3, 0.0);
    let mut rng = StdRng::seed_from_u64(9);
    let outcome = apply_to_area(&mut world, area_id, &milk_spill(), &mut rng);
    assert_eq!(outcome.affected.len(), 3);
    for id in &outcome.affected {
        let npc = &world.npcs[id];
        assert!(npc.effects.iter().any(|fx| {
            fx.kind == EffectKind::Hallucinating && fx.duration == EffectDuration::Turns(3)
        }));
    }
}
