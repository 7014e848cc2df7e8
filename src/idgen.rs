//! ** idgen module **
//! Contains namespaces and helpers for generating stable v5 uuids for loaded `WorldObjects`.
//! Dynamically spawned objects (harvested crops, dev-spawned items) use v4 (random) UUIDs instead.
use uuid::Uuid;

pub const NAMESPACE_AREA: Uuid = uuid::uuid!("8f2c9b1e-31dd-4aa6-9c7e-52fb90a1d204");

pub const NAMESPACE_ITEM: Uuid = uuid::uuid!("c4e8b7d0-6a5f-4f3a-8d21-7e94cc08b5f1");

pub const NAMESPACE_CHARACTER: Uuid = uuid::uuid!("1da4f682-0b9c-49e5-b7a3-dd6810c3e9a7");

/// Generate a v5 UUID for a given symbol from the JSON template files.
///
/// Uses the namespaces above to separate areas / items / characters.
pub fn uuid_from_symbol(namespace: &Uuid, symbol: &str) -> Uuid {
    Uuid::new_v5(namespace, symbol.as_bytes())
}
