use ra::command::{Command, parse_command};
use ra::*;
use root_access as ra;

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[test]
fn test_command_parse() {
    assert!(matches!(parse_command("look"), Command::Look));
    assert!(matches!(parse_command("hack"), Command::Hack));
}

#[test]
fn test_idgen_uuid_deterministic() {
    let u1 = idgen::uuid_from_symbol(&idgen::NAMESPACE_AREA, "community_garden");
    let u2 = idgen::uuid_from_symbol(&idgen::NAMESPACE_AREA, "community_garden");
    assert_eq!(u1, u2);
}

#[test]
fn test_lib_version() {
    assert!(!ra::ROOT_ACCESS_VERSION.is_empty());
}

#[test]
fn test_new_empty_world() {
    let world = GameWorld::new_empty();
    assert!(world.areas.is_empty());
    assert!(world.items.is_empty());
    assert!(world.npcs.is_empty());
    assert!(world.gangs.is_empty());
    assert_eq!(world.turn_count, 0);
    assert_eq!(world.version, ra::ROOT_ACCESS_VERSION);
    assert_eq!(world.player.name, "The Gardener");
}

#[test]
fn test_find_world_object() {
    let id = Uuid::new_v4();
    let item = Item {
        id,
        symbol: "foo".into(),
        name: "Foo Widget".into(),
        description: String::new(),
        location: Location::Inventory,
        portable: true,
        container_state: None,
        contents: HashSet::new(),
        kind: ItemKind::Scenery,
    };
    let mut items = HashMap::new();
    items.insert(id, item);
    let npcs = HashMap::new();
    let res = ra::repl::find_world_object(std::iter::once(&id), &items, &npcs, "foo");
    assert!(res.is_some());
    assert_eq!(res.unwrap().id(), id);
}

#[test]
fn test_spin_phrase_falls_back_without_tables() {
    let world = GameWorld::new_empty();
    let spun = world.spin_phrase(ra::spinners::PhraseKey::QuitMsg, "bye");
    assert_eq!(spun, "bye");
}

#[test]
fn test_phrase_key_for_category() {
    use ra::spinners::PhraseKey;
    assert_eq!(
        PhraseKey::for_category(EventCategory::Attack, true),
        PhraseKey::AttackGroup
    );
    assert_eq!(
        PhraseKey::for_category(EventCategory::Idle, false),
        PhraseKey::IdleOne
    );
}
