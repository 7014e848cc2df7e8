//! The shipped data files load into a consistent world, and the chaos loop
//! (hack / throw / tick) works against it.

use root_access::effect::{EffectKind, has_effect};
use root_access::item::{HackEffect, ItemKind, WaterType};
use root_access::load_world;
use root_access::repl::{end_of_turn, fill_handler, hack_handler, throw_handler};
use root_access::view::View;
use root_access::world::Location;

use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn shipped_world_loads_and_cross_links() {
    let world = load_world().unwrap();

    let start = world.player_area_ref().unwrap();
    assert_eq!(start.symbol, "community_garden");
    assert!(start.visited);

    // the player starts tooled up for gardening
    let carried: Vec<&str> = world
        .player
        .inventory
        .iter()
        .filter_map(|id| world.items.get(id))
        .map(|i| i.symbol.as_str())
        .collect();
    assert!(carried.contains(&"carrot_seed"));
    assert!(carried.contains(&"trowel"));

    // gang roster and membership agree
    let sprout_boys = &world.gangs["Sprout Boys"];
    assert!(sprout_boys.hostile);
    assert_eq!(sprout_boys.members.len(), 3);
    for member_id in &sprout_boys.members {
        assert_eq!(world.npcs[member_id].gang.as_deref(), Some("Sprout Boys"));
    }

    // the milk dispenser carries its spill payload
    let dispenser = world.items.values().find(|i| i.symbol == "milk_dispenser").unwrap();
    match &dispenser.kind {
        ItemKind::Fixture {
            hack: Some(HackEffect::SpillHazard(hazard)),
            hacked: false,
        } => {
            assert_eq!(hazard.name, "Hacked Milk Spill");
            assert_eq!(hazard.effect, EffectKind::Hallucinating);
        },
        other => panic!("unexpected dispenser kind: {other:?}"),
    }
}

#[test]
fn hacking_the_sprinkler_corrupts_the_water_supply() {
    let mut world = load_world().unwrap();
    let mut view = View::new();

    // the can starts in the garden, not the player's hands -- pick it up,
    // then a normal fill draws plain water
    let can_id = world.items.values().find(|i| i.symbol == "watering_can").unwrap().id;
    world.move_item_to_inventory(can_id).unwrap();
    fill_handler(&mut world, &mut view, "watering").unwrap();
    assert!(matches!(
        world.items[&can_id].kind,
        ItemKind::WateringCan {
            water: Some(WaterType::Regular)
        }
    ));

    hack_handler(&mut world, &mut view).unwrap();
    let barrel = world.items.values().find(|i| i.symbol == "rain_barrel").unwrap();
    assert!(matches!(
        barrel.kind,
        ItemKind::WaterSource {
            water: WaterType::HackedMilk
        }
    ));

    // refilling now draws the good stuff
    fill_handler(&mut world, &mut view, "watering").unwrap();
    assert!(matches!(
        world.items[&can_id].kind,
        ItemKind::WateringCan {
            water: Some(WaterType::HackedMilk)
        }
    ));

    // hacking twice reports the fixture as already compromised
    let score_after_first = world.player.score;
    hack_handler(&mut world, &mut view).unwrap();
    assert_eq!(world.player.score, score_after_first);
}

#[test]
fn thrown_carton_hazes_the_hideout() {
    let mut world = load_world().unwrap();
    let mut view = View::new();
    let mut rng = StdRng::seed_from_u64(99);

    // walk the player into the hideout with the carton, certainty on the rolls
    let hideout_id = world.areas.values().find(|a| a.symbol == "gang_hideout").unwrap().id;
    world.player.location = Location::Area(hideout_id);
    for npc in world.npcs.values_mut() {
        npc.hazard_resistance = 0.0;
    }
    let carton_id = world
        .items
        .values()
        .find(|i| i.symbol == "sour_milk_carton")
        .unwrap()
        .id;
    world.move_item_to_inventory(carton_id).unwrap();

    throw_handler(&mut world, &mut view, "sour milk").unwrap();
    assert!(!world.items.contains_key(&carton_id), "thrown carton is consumed");
    assert_eq!(world.areas[&hideout_id].hazards.len(), 1);

    // next tick, everyone present fails the roll and starts hallucinating
    world.turn_count += 1;
    end_of_turn(&mut world, &mut view, &mut rng).unwrap();
    for npc in world.npcs.values().filter(|n| n.location == Location::Area(hideout_id)) {
        assert!(
            has_effect(&npc.effects, EffectKind::Hallucinating),
            "{} should be hallucinating",
            npc.symbol
        );
    }
}
