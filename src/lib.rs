#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const ROOT_ACCESS_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod area;
pub mod behavior;
pub mod command;
pub mod effect;
pub mod event;
pub mod hazard;
pub mod health;
pub mod idgen;
pub mod item;
pub mod loader;
pub mod npc;
pub mod player;
pub mod repl;
pub mod report;
pub mod save_files;
pub mod spinners;
pub mod style;
pub mod view;
pub mod world;

// Re-exports for convenience
pub use area::Area;
pub use event::{EventCategory, NpcEvent};
pub use item::{Item, ItemKind};
pub use loader::load_world;
pub use npc::{Gang, Npc};
pub use player::Player;
pub use repl::run_repl;
pub use view::{View, ViewItem};
pub use world::{GameWorld, ItemHolder, Location, WorldObject};
