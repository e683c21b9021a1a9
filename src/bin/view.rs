use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{debug, info};

use arena_rs::{
    cli::ArenaArgs,
    defs::weapons::{MASTER, SPEAR},
    renderer::{RendererExt, Software},
    sim::{Arena, InputCmd, TicRunner},
    world::Direction,
};

#[derive(Parser)]
#[command(about = "Play the survival arena in a window")]
struct Cli {
    #[command(flatten)]
    arena: ArenaArgs,
}

/// Movement keys: two bindings per direction.
const MOVE_KEYS: [(Key, Key, Direction); 4] = [
    (Key::W, Key::Up, Direction::Up),
    (Key::S, Key::Down, Direction::Down),
    (Key::A, Key::Left, Direction::Left),
    (Key::D, Key::Right, Direction::Right),
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let arena = Arena::new(cli.arena.to_config())?;
    let field = arena.field();
    let (w, h) = (field.x as usize, field.y as usize);

    let mut sim = TicRunner::new(arena);
    let mut renderer = Software::default();

    let mut win = Window::new(
        "arena",
        w,
        h,
        WindowOptions {
            scale: Scale::X2,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(60);
    info!("WASD/arrows move, space swings, P pauses, R clears, I/O equip sword/spear");

    let mut title = String::new();
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* --------------- input ------------------------------------------ */
        let mut cmd = InputCmd::default();
        for (a, b, dir) in MOVE_KEYS {
            let held = win.is_key_down(a) || win.is_key_down(b);
            match dir {
                Direction::Up => cmd.up = held,
                Direction::Down => cmd.down = held,
                Direction::Left => cmd.left = held,
                Direction::Right => cmd.right = held,
            }
            if win.is_key_pressed(a, KeyRepeat::No) || win.is_key_pressed(b, KeyRepeat::No) {
                cmd.face = Some(dir);
            }
        }
        cmd.swing = win.is_key_pressed(Key::Space, KeyRepeat::Yes);

        let arena = sim.arena_mut();
        arena.apply_input(cmd);

        /* debug keys fire on release ------------------------------------- */
        if win.is_key_released(Key::R) {
            arena.clear_enemies();
        }
        if win.is_key_released(Key::I) {
            arena.equip_player(&MASTER);
        }
        if win.is_key_released(Key::O) {
            arena.equip_player(&SPEAR);
        }
        if win.is_key_released(Key::P) {
            arena.toggle_pause();
        }

        sim.pump();

        /* --------------- HUD + draw -------------------------------------- */
        let arena = sim.arena();
        let hud = hud_line(arena);
        if hud != title {
            win.set_title(&hud);
            title = hud;
        }

        let mut shown = Ok(());
        renderer.draw_scene(arena.map(), &arena.sprites(), arena.is_paused(), |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            shown = win.update_with_buffer(fb, w, h);
        });
        shown?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            debug!(avg_ms, "frame time");
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

fn hud_line(arena: &Arena) -> String {
    let stats = arena.stats();
    let mut s = format!(
        "Wave: {}  |  {} Seconds  |  kills {}  deaths {}",
        arena.scheduler().wave(),
        arena.scheduler().delay_ms() / 1000.0,
        stats.kills,
        stats.deaths,
    );
    if arena.is_paused() {
        s.push_str("  |  Paused");
    }
    s
}
