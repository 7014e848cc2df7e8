//! The full gardening loop, end to end: plant, water to maturity, harvest,
//! eat. Watering with hacked milk grows a crop that carries the supervision
//! effect.

use root_access::effect::{EffectKind, has_effect};
use root_access::item::{ContainerState, Item, ItemKind, WaterType};
use root_access::repl::{eat_handler, harvest_handler, plant_handler, water_handler};
use root_access::view::{View, ViewItem};
use root_access::world::{GameWorld, Location};
use root_access::Area;
use root_access::item::GROWTH_STAGES;

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn bare_item(symbol: &str, name: &str, kind: ItemKind) -> Item {
    Item {
        id: Uuid::new_v4(),
        symbol: symbol.into(),
        name: name.into(),
        description: String::new(),
        location: Location::Nowhere,
        portable: true,
        container_state: None,
        contents: HashSet::new(),
        kind,
    }
}

/// World with one area, a soil patch, a filled can, and a carrot seed.
fn garden_world(water: WaterType) -> GameWorld {
    let mut world = GameWorld::new_empty();
    let area_id = Uuid::new_v4();
    world.areas.insert(
        area_id,
        Area {
            id: area_id,
            symbol: "garden".into(),
            name: "Garden".into(),
            description: String::new(),
            location: Location::Nowhere,
            visited: true,
            exits: HashMap::new(),
            contents: HashSet::new(),
            npcs: HashSet::new(),
            hazards: Vec::new(),
        },
    );
    world.player.location = Location::Area(area_id);

    let mut patch = bare_item("soil_patch", "Soil Patch", ItemKind::SoilPatch);
    patch.portable = false;
    let patch_id = patch.id;
    world.items.insert(patch_id, patch);
    world.move_item_to_area(patch_id, area_id).unwrap();

    let can = bare_item(
        "watering_can",
        "Watering Can",
        ItemKind::WateringCan { water: Some(water) },
    );
    let can_id = can.id;
    world.items.insert(can_id, can);
    world.move_item_to_inventory(can_id).unwrap();

    let seed = bare_item("carrot_seed", "Carrot Seed", ItemKind::Seed { crop: "carrot".into() });
    let seed_id = seed.id;
    world.items.insert(seed_id, seed);
    world.move_item_to_inventory(seed_id).unwrap();

    world
}

fn last_garden_update(view: &View) -> String {
    view.items
        .iter()
        .rev()
        .find_map(|item| match item {
            ViewItem::GardenUpdate(msg) => Some(msg.clone()),
            _ => None,
        })
        .expect("expected a garden update in the view")
}

fn plant_growth_stage(world: &GameWorld) -> Option<usize> {
    world.items.values().find_map(|item| match &item.kind {
        ItemKind::Plant(state) => Some(state.growth_stage),
        _ => None,
    })
}

#[test]
fn carrot_scenario_with_hacked_milk() {
    let mut world = garden_world(WaterType::HackedMilk);
    let mut view = View::new();

    // plant the seed: the packet is consumed and a stage-0 plant appears
    plant_handler(&mut world, &mut view, "carrot").unwrap();
    assert_eq!(plant_growth_stage(&world), Some(0));
    assert!(!world.items.values().any(|i| matches!(i.kind, ItemKind::Seed { .. })));

    // first watering: "grows into a sprout"
    water_handler(&mut world, &mut view, "carrot").unwrap();
    assert_eq!(plant_growth_stage(&world), Some(1));
    assert!(last_garden_update(&view).contains("grows into a sprout"));

    // second watering: small plant
    water_handler(&mut world, &mut view, "carrot").unwrap();
    assert_eq!(plant_growth_stage(&world), Some(2));
    assert!(last_garden_update(&view).contains("a small plant"));

    // water to full growth
    while plant_growth_stage(&world) < Some(GROWTH_STAGES.len() - 1) {
        water_handler(&mut world, &mut view, "carrot").unwrap();
    }
    assert!(last_garden_update(&view).contains("fully grown"));

    // extra watering is idempotent and says so
    water_handler(&mut world, &mut view, "carrot").unwrap();
    assert_eq!(plant_growth_stage(&world), Some(GROWTH_STAGES.len() - 1));
    assert!(last_garden_update(&view).contains("already fully grown"));

    // harvest: the plant is gone, a carrot crop with the supervision effect is carried
    harvest_handler(&mut world, &mut view, "carrot").unwrap();
    assert_eq!(plant_growth_stage(&world), None);
    let crop = world
        .items
        .values()
        .find(|i| matches!(i.kind, ItemKind::Crop { .. }))
        .expect("harvest should yield a crop");
    assert_eq!(crop.name, "carrot");
    assert!(matches!(
        crop.kind,
        ItemKind::Crop {
            effect: Some(EffectKind::Supervision),
            ..
        }
    ));
    assert_eq!(crop.location, Location::Inventory);

    // eating it applies the effect to the player
    eat_handler(&mut world, &mut view, "carrot").unwrap();
    assert!(has_effect(&world.player.effects, EffectKind::Supervision));
}

#[test]
fn regular_water_grows_a_plain_crop() {
    let mut world = garden_world(WaterType::Regular);
    let mut view = View::new();

    plant_handler(&mut world, &mut view, "carrot").unwrap();
    while plant_growth_stage(&world) < Some(GROWTH_STAGES.len() - 1) {
        water_handler(&mut world, &mut view, "carrot").unwrap();
    }
    harvest_handler(&mut world, &mut view, "carrot").unwrap();

    let crop = world
        .items
        .values()
        .find(|i| matches!(i.kind, ItemKind::Crop { .. }))
        .unwrap();
    assert!(matches!(crop.kind, ItemKind::Crop { effect: None, .. }));
}

#[test]
fn harvest_refuses_an_immature_plant() {
    let mut world = garden_world(WaterType::Regular);
    let mut view = View::new();

    plant_handler(&mut world, &mut view, "carrot").unwrap();
    water_handler(&mut world, &mut view, "carrot").unwrap();
    harvest_handler(&mut world, &mut view, "carrot").unwrap();

    // still a plant, no crop yet
    assert_eq!(plant_growth_stage(&world), Some(1));
    assert!(!world.items.values().any(|i| matches!(i.kind, ItemKind::Crop { .. })));
}

#[test]
fn planting_requires_open_soil() {
    let mut world = garden_world(WaterType::Regular);
    let mut view = View::new();

    plant_handler(&mut world, &mut view, "carrot").unwrap();

    // a second seed has nowhere to go while the patch is occupied
    let seed = bare_item("beet_seed", "Beet Seed", ItemKind::Seed { crop: "beet".into() });
    let seed_id = seed.id;
    world.items.insert(seed_id, seed);
    world.move_item_to_inventory(seed_id).unwrap();

    plant_handler(&mut world, &mut view, "beet").unwrap();
    assert!(world.items.contains_key(&seed_id), "unplantable seed is not consumed");
}

#[test]
fn watering_with_empty_can_fails() {
    let mut world = garden_world(WaterType::Regular);
    let mut view = View::new();
    plant_handler(&mut world, &mut view, "carrot").unwrap();

    // drain the can
    let can_id = world
        .items
        .values()
        .find(|i| matches!(i.kind, ItemKind::WateringCan { .. }))
        .map(|i| i.id)
        .unwrap();
    world.items.get_mut(&can_id).unwrap().kind = ItemKind::WateringCan { water: None };

    water_handler(&mut world, &mut view, "carrot").unwrap();
    assert_eq!(plant_growth_stage(&world), Some(0));
    assert!(
        view.items
            .iter()
            .any(|i| matches!(i, ViewItem::ActionFailure(msg) if msg.contains("empty")))
    );
}

#[test]
fn closed_container_contents_are_not_plantable_targets() {
    // a seed inside a closed crate is out of reach for planting
    let mut world = garden_world(WaterType::Regular);
    let mut view = View::new();
    let area_id = world.player_area_ref().unwrap().id;

    let mut crate_item = bare_item("crate", "Crate", ItemKind::Scenery);
    crate_item.container_state = Some(ContainerState::Closed);
    let crate_id = crate_item.id;
    world.items.insert(crate_id, crate_item);
    world.move_item_to_area(crate_id, area_id).unwrap();

    // move the carried seed into the crate, then try to plant it
    let seed_id = world
        .items
        .values()
        .find(|i| matches!(i.kind, ItemKind::Seed { .. }))
        .map(|i| i.id)
        .unwrap();
    world.move_item_into_container(seed_id, crate_id).unwrap();

    plant_handler(&mut world, &mut view, "carrot").unwrap();
    assert!(world.items.contains_key(&seed_id));
    assert_eq!(plant_growth_stage(&world), None);
}
