//! Headless симуляция охотника
//!
//! Запускает Bevy App без рендера: один охотник, несколько игроков,
//! стены; печатает смены состояния, которые видит observer.

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;
use thiserror::Error;

use pursuer_simulation::logger::{self, LogLevel};
use pursuer_simulation::{
    create_headless_app, occluder_bundle, player_bundle, pursuer_bundle, ConfigError, DriversPlugin,
    FlatNavArea, Navigation, ObserverMirror, Pursuer, PursuerConfig, ReplicationChannel,
    SimulationPlugin,
};

/// Headless pursuer simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed (roam cone, teleport roll)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Максимум fixed тиков (60 Hz)
    #[arg(long, default_value_t = 3600)]
    ticks: u32,

    /// JSON файл с PursuerConfig (отсутствующие поля = defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Количество игроков на кольце вокруг охотника
    #[arg(long, default_value_t = 3)]
    players: u32,

    /// Порог логов: debug, info, warn, error
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Error)]
enum RunError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

fn load_config(path: Option<&PathBuf>) -> Result<PursuerConfig, RunError> {
    let Some(path) = path else {
        return Ok(PursuerConfig::default());
    };
    let json = std::fs::read_to_string(path).map_err(|source| RunError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(PursuerConfig::from_json_str(&json)?)
}

fn main() -> Result<(), RunError> {
    let args = Args::parse();

    let level = LogLevel::parse(&args.log_level).ok_or_else(|| RunError::LogLevel(args.log_level.clone()))?;
    let config = load_config(args.config.as_ref())?;

    let mut app = create_headless_app(args.seed);
    logger::set_log_level(level);
    app.add_plugins((SimulationPlugin, DriversPlugin))
        .insert_resource(Navigation::new(FlatNavArea::square(60.0)));

    let mut channel = ReplicationChannel::default();
    channel.add_observer(ObserverMirror::new(|net_id, previous, state| {
        logger::log_info(&format!("📡 observer: pursuer {} {:?} → {:?}", net_id, previous, state));
    }));
    app.insert_resource(channel);

    let world = app.world_mut();
    world.spawn(pursuer_bundle(Vec3::ZERO, Vec3::NEG_Z, config));
    for index in 0..args.players {
        let angle = index as f32 / args.players.max(1) as f32 * std::f32::consts::TAU;
        let position = Vec3::new(angle.sin(), 0.0, -angle.cos()) * 30.0;
        // Игроки смотрят от охотника
        world.spawn(player_bundle(position, position.normalize_or_zero()));
    }
    world.spawn(occluder_bundle(Vec3::new(0.0, 1.5, -12.0), Vec3::new(4.0, 2.0, 0.5)));
    world.spawn(occluder_bundle(Vec3::new(12.0, 1.5, 6.0), Vec3::new(0.5, 2.0, 5.0)));

    logger::log_info(&format!("Starting pursuer headless simulation (seed: {})", args.seed));

    for tick in 0..args.ticks {
        app.update();

        let world = app.world_mut();
        let alive = world.query_filtered::<Entity, With<Pursuer>>().iter(world).count();
        if tick % 600 == 0 {
            logger::log_info(&format!("Tick {}: {} pursuer(s) active", tick, alive));
        }
        if alive == 0 {
            logger::log_info(&format!("Pursuer vanished at tick {}", tick));
            break;
        }
    }

    logger::log_info("Simulation complete!");
    Ok(())
}
