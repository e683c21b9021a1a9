mod ai;
mod collision;
mod components;
mod config;
mod countdown;
mod mob;
mod systems;
mod tic;
mod waves;
mod weapon;
mod xy_movement;

pub use collision::{SPAWN_ATTEMPTS, SpawnError, collides_with, find_spawn_point, out_of_bounds};
pub use components::{
    Body, Brain, Facing, Flags, Health, InputCmd, Kind, MoveInput, Pilot, Projectile, Speed, Tint,
};
pub use config::{ArenaConfig, ConfigError};
pub use countdown::Countdown;
pub use mob::wave_hp;
pub use systems::PlayerFate;
pub use tic::{Arena, Sprite, Stats, TicRunner};
pub use waves::{WaveOutcome, WavePhase, WaveScheduler, delay_key, delay_schedule, next_delay};
pub use weapon::{Phase, Weapon};
pub use xy_movement::{check_tile, move_in};
