//! Drillion - headless block-drilling simulation
//!
//! Runs the block field, ship and bullets through the collision engine on a
//! fixed timestep and logs what happened.
//!
//! Usage: `drillion [config.toml|config.ron]`

mod components;
mod config;
mod world;

use config::GameConfig;
use drillion_engine::foundation::logging;
use drillion_engine::foundation::time::{FixedTimestep, Stopwatch};
use log::info;
use std::path::PathBuf;
use world::World;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = GameConfig::load_or_default(config_path.as_deref())?;
    logging::init_with_filters(&config.engine.log_level);

    match &config_path {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("Using default configuration"),
    }

    let mut world = World::new(&config)?;
    let ship = world.populate();

    let mut timestep = FixedTimestep::new(config.engine.world_dt, config.engine.max_steps_per_frame);
    let mut stopwatch = Stopwatch::new();
    let frame_dt = config.gameplay.frame_dt;
    let frames = (config.gameplay.duration / frame_dt).ceil() as u32;
    let frames_per_report = (1.0 / frame_dt).round().max(1.0) as u32;

    for frame in 1..=frames {
        for _ in 0..timestep.advance(frame_dt) {
            stopwatch.measure(|| world.step(timestep.world_dt()));
        }

        if frame % frames_per_report == 0 {
            let stats = world.detector().last_stats();
            info!(
                "t={:.1}s blocks={} bullets={} last update: {} processed, {} reindexed, {} collisions",
                timestep.world_time(),
                world.count(components::Kind::Block),
                world.count(components::Kind::Bullet),
                stats.bodies_processed,
                stats.bodies_reindexed,
                stats.collisions
            );
        }
    }

    let stats = world.stats();
    info!(
        "Simulated {} steps in {:.2}ms ({:.3}ms/step)",
        stats.steps,
        stopwatch.elapsed_millis(),
        stopwatch.elapsed_millis() / stats.steps.max(1) as f32
    );
    info!(
        "Fired {} bullets, destroyed {} blocks, {} collisions, ships lost {}, ship {}",
        stats.bullets_fired,
        stats.blocks_destroyed,
        stats.collisions,
        stats.ships_lost,
        if world.entity(ship).is_some() { "survived" } else { "lost" }
    );
    Ok(())
}
