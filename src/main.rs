#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Root Access **
//! Guerrilla gardening adventure / engine project

use root_access::style::GameStyle;
use root_access::{WorldObject, load_world, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use std::fs;
use std::io::Write;

/// Environment variable that pins the simulation RNG for reproducible runs.
const SEED_ENV: &str = "ROOT_ACCESS_SEED";

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: loading Root Access world...");
    let mut world = load_world().context("while loading GameWorld")?;
    info!("GameWorld loaded successfully.");

    let mut rng = match std::env::var(SEED_ENV).ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => {
            info!("seeding simulation RNG from {SEED_ENV}={seed}");
            StdRng::seed_from_u64(seed)
        },
        None => StdRng::from_os_rng(),
    };

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush()?;
    info!("Starting the game!");

    println!("{:^84}", "ROOT ACCESS".bright_green().underline());
    println!(
        "\nYou are {}, {}\n",
        world.player.name().bold().bright_blue(),
        world.player.description()
    );

    match fs::read_to_string(root_access::loader::data_dir().join("intro.txt")) {
        Ok(introduction) => println!("{}", introduction.description_style()),
        Err(e) => warn!("intro text unavailable: {e}"),
    }

    run_repl(&mut world, &mut rng)
}
