//! Headless arena runner.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin arena -- --ticks 5000 --autoswing --seed 7
//! cargo run --bin arena -- --schedule 30
//! ```

use clap::Parser;
use hecs::Entity;
use tracing::info;

use arena_rs::{
    cli::ArenaArgs,
    sim::{Arena, Body, InputCmd, Kind, delay_schedule},
    world::{Direction, angle_between},
};

#[derive(Parser)]
#[command(about = "Run the survival arena without a window")]
struct Cli {
    #[command(flatten)]
    arena: ArenaArgs,

    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 2000)]
    ticks: u64,

    /// Keep turning toward the nearest enemy and swinging.
    #[arg(long)]
    autoswing: bool,

    /// Print the first N inter-wave delays and exit.
    #[arg(long, value_name = "N")]
    schedule: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = cli.arena.to_config();

    if let Some(n) = cli.schedule {
        for (i, d) in delay_schedule(cfg.wave_delay_ms, cfg.wave_rate).take(n).enumerate() {
            println!("after wave {:>3}: {:>9.3} s", i + 1, d / 1000.0);
        }
        return Ok(());
    }

    let mut arena = Arena::new(cfg)?;
    let step = arena.config().tick_ms;

    while arena.stats().ticks < cli.ticks {
        if cli.autoswing {
            let cmd = InputCmd {
                face: nearest_enemy_direction(&arena),
                swing: true,
                ..Default::default()
            };
            arena.apply_input(cmd);
        }
        arena.advance(step);
    }

    let stats = arena.stats();
    info!(
        ticks = stats.ticks,
        wave = arena.scheduler().wave(),
        enemies = arena.enemy_count(),
        kills = stats.kills,
        deaths = stats.deaths,
        "run finished"
    );
    Ok(())
}

fn nearest_enemy_direction(arena: &Arena) -> Option<Direction> {
    let world = arena.world();
    let me = world.get::<&Body>(arena.player()).ok()?.center();
    let centre = |e: Entity| world.get::<&Body>(e).ok().map(|b| b.center());
    arena
        .entities_of(Kind::Enemy)
        .into_iter()
        .filter_map(centre)
        .min_by(|a, b| a.distance(me).total_cmp(&b.distance(me)))
        .map(|target| Direction::from_degrees(angle_between(me, target)))
}
