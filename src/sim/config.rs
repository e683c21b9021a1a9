use crate::world::FloorStyle;

/// Tunables for one arena run. `Default` reproduces the stock game.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaConfig {
    /// Fixed simulation step, in milliseconds.
    pub tick_ms: f64,
    /// Delay before the first wave, in milliseconds.
    pub wave_delay_ms: f64,
    /// Growth factor of the inter-wave delay.
    pub wave_rate: f64,
    /// Live enemy cap; a wave that would start at or above it is held back.
    pub max_enemies: usize,
    /// Minimum centre distance between a new enemy and the player.
    pub spawn_dist: f32,
    /// Enemy hit points grow by half every this many waves.
    pub hp_wave_step: u32,
    pub player_regen: f32,
    /// `None` picks one at random from the seed.
    pub floor: Option<FloorStyle>,
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tick_ms: 60.0,
            wave_delay_ms: 6000.0,
            wave_rate: 180.0,
            max_enemies: 25,
            spawn_dist: 80.0,
            hp_wave_step: 15,
            player_regen: 0.05,
            floor: None,
            seed: 0,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("tick interval must be positive, got {0} ms")]
    BadTick(f64),
    #[error("wave delay must be positive, got {0} ms")]
    BadWaveDelay(f64),
    #[error("wave rate must be non-negative, got {0}")]
    BadWaveRate(f64),
    #[error("enemy cap must be at least 1")]
    ZeroCap,
    #[error("spawn distance must be non-negative, got {0}")]
    BadSpawnDist(f32),
    #[error("hp wave step must be at least 1")]
    ZeroHpStep,
    #[error("player regen must be non-negative, got {0}")]
    BadRegen(f32),
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_ms > 0.0) {
            return Err(ConfigError::BadTick(self.tick_ms));
        }
        if !(self.wave_delay_ms > 0.0) {
            return Err(ConfigError::BadWaveDelay(self.wave_delay_ms));
        }
        if !(self.wave_rate >= 0.0) {
            return Err(ConfigError::BadWaveRate(self.wave_rate));
        }
        if self.max_enemies == 0 {
            return Err(ConfigError::ZeroCap);
        }
        if !(self.spawn_dist >= 0.0) {
            return Err(ConfigError::BadSpawnDist(self.spawn_dist));
        }
        if self.hp_wave_step == 0 {
            return Err(ConfigError::ZeroHpStep);
        }
        if !(self.player_regen >= 0.0) {
            return Err(ConfigError::BadRegen(self.player_regen));
        }
        Ok(())
    }
}
