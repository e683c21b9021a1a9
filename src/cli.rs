//! Command-line knobs shared by the binaries.

use clap::{Args, ValueEnum};

use crate::sim::ArenaConfig;
use crate::world::FloorStyle;

/// `--floor` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FloorArg {
    Grass,
    Stone,
    Dirt,
}

impl From<FloorArg> for FloorStyle {
    fn from(arg: FloorArg) -> Self {
        match arg {
            FloorArg::Grass => FloorStyle::Grass,
            FloorArg::Stone => FloorStyle::Stone,
            FloorArg::Dirt => FloorStyle::Dirt,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ArenaArgs {
    /// RNG seed for floor choice, spawn points and generated waves.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Floor style; random when omitted.
    #[arg(long, value_enum)]
    pub floor: Option<FloorArg>,

    /// Hold back new waves while this many enemies are alive.
    #[arg(long, default_value_t = 25)]
    pub max_enemies: usize,

    /// Delay before the first wave (ms).
    #[arg(long, default_value_t = 6000.0)]
    pub wave_delay: f64,

    /// Growth rate of the delay between waves.
    #[arg(long, default_value_t = 180.0)]
    pub wave_rate: f64,

    /// Simulation step (ms).
    #[arg(long, default_value_t = 60.0)]
    pub tick_ms: f64,
}

impl ArenaArgs {
    pub fn to_config(&self) -> ArenaConfig {
        ArenaConfig {
            tick_ms: self.tick_ms,
            wave_delay_ms: self.wave_delay,
            wave_rate: self.wave_rate,
            max_enemies: self.max_enemies,
            floor: self.floor.map(FloorStyle::from),
            seed: self.seed,
            ..ArenaConfig::default()
        }
    }
}
