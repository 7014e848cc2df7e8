//! Whole-world JSON save slots: round trips through real files, slot
//! listings, and the missing-file failure mode.

use root_access::ROOT_ACCESS_VERSION;
use root_access::item::{Item, ItemKind};
use root_access::save_files::{collect_save_slots, load_world_file, save_world, set_active_save_dir};
use root_access::world::{GameWorld, Location};

use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

// the active save directory is process-global, so these tests take turns
static DIR_LOCK: Mutex<()> = Mutex::new(());

fn sample_world() -> GameWorld {
    let mut world = GameWorld::new_empty();
    world.turn_count = 17;
    world.player.score = 25;
    world.player.hidden = true;

    let item = Item {
        id: Uuid::new_v4(),
        symbol: "crowbar".into(),
        name: "Crowbar".into(),
        description: "The universal adapter.".into(),
        location: Location::Nowhere,
        portable: true,
        container_state: None,
        contents: HashSet::new(),
        kind: ItemKind::Weapon { damage: 4 },
    };
    let item_id = item.id;
    world.items.insert(item_id, item);
    world.move_item_to_inventory(item_id).unwrap();
    world
}

#[test]
fn save_then_load_round_trips_world_state() {
    let _guard = DIR_LOCK.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    set_active_save_dir(dir.path().to_path_buf());

    let world = sample_world();
    let path = save_world(&world, "roundtrip").unwrap();
    assert!(path.exists());

    let loaded = load_world_file("roundtrip").unwrap();
    assert_eq!(loaded.turn_count, 17);
    assert_eq!(loaded.player.score, 25);
    assert!(loaded.player.hidden);
    assert_eq!(loaded.version, ROOT_ACCESS_VERSION);
    assert_eq!(loaded.items.len(), 1);

    let crowbar = loaded.items.values().next().unwrap();
    assert_eq!(crowbar.symbol, "crowbar");
    assert_eq!(crowbar.location, Location::Inventory);
    assert!(loaded.player.inventory.contains(&crowbar.id));
}

#[test]
fn listing_discovers_saved_slots() {
    let _guard = DIR_LOCK.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    set_active_save_dir(dir.path().to_path_buf());

    let world = sample_world();
    save_world(&world, "alpha").unwrap();
    save_world(&world, "beta").unwrap();

    let slots = collect_save_slots(dir.path()).unwrap();
    let names: Vec<&str> = slots.iter().map(|s| s.slot.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert!(slots.iter().all(|s| s.version == ROOT_ACCESS_VERSION));
}

#[test]
fn loading_a_missing_slot_is_an_error_not_a_panic() {
    let _guard = DIR_LOCK.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    set_active_save_dir(dir.path().to_path_buf());

    let result = load_world_file("never_saved");
    assert!(result.is_err());
}

#[test]
fn slot_names_are_sanitized_to_safe_files() {
    let _guard = DIR_LOCK.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    set_active_save_dir(dir.path().to_path_buf());

    let world = sample_world();
    let path = save_world(&world, "My Garden Run!").unwrap();
    assert!(path.file_name().unwrap().to_str().unwrap().starts_with("my_garden_run"));
    assert!(load_world_file("My Garden Run!").is_ok());
}
