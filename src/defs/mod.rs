//! Immutable game data: enemy archetypes, weapon kits and wave scripts.
//!
//! Everything here is plain `static` data checked by `validate()`; the
//! simulation only ever holds `&'static` references into these tables.

pub mod classes;
pub mod flags;
pub mod waves;
pub mod weapons;

pub use self::{
    classes::{AiPolicy, ENEMY_CLASSES, EnemyClass},
    flags::ActorFlags,
    waves::{SCRIPTED_WAVES, WaveDesc},
    weapons::{ENEMY_WEAPONS, PLAYER_WEAPONS, ProjectileTemplate, WeaponKind, WeaponTemplate},
};

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A template failed validation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DefError {
    #[error("`{name}`: size must be positive, got {width}x{height}")]
    BadSize {
        name: &'static str,
        width: f32,
        height: f32,
    },

    #[error("`{0}`: speed must be non-negative")]
    BadSpeed(&'static str),

    #[error("`{0}`: hit points must be positive")]
    BadHp(&'static str),

    #[error("`{0}`: a swing must last at least one tick")]
    ZeroSwing(&'static str),

    #[error("`{0}`: damage must be non-negative")]
    NegativeDamage(&'static str),

    #[error("`{0}`: re-aim interval must be at least one tick")]
    ZeroSteps(&'static str),

    #[error("a wave needs at least one enemy")]
    EmptyWave,
}

static CLASS_BY_NAME: Lazy<HashMap<&'static str, &'static EnemyClass>> =
    Lazy::new(|| ENEMY_CLASSES.iter().map(|c| (c.name, *c)).collect());

pub fn enemy_class(name: &str) -> Option<&'static EnemyClass> {
    CLASS_BY_NAME.get(name).copied()
}

static PLAYER_WEAPON_BY_NAME: Lazy<HashMap<&'static str, &'static WeaponTemplate>> =
    Lazy::new(|| PLAYER_WEAPONS.iter().map(|w| (w.name, *w)).collect());

pub fn player_weapon(name: &str) -> Option<&'static WeaponTemplate> {
    PLAYER_WEAPON_BY_NAME.get(name).copied()
}

static ENEMY_WEAPON_BY_NAME: Lazy<HashMap<&'static str, &'static WeaponTemplate>> =
    Lazy::new(|| ENEMY_WEAPONS.iter().map(|w| (w.name, *w)).collect());

pub fn enemy_weapon(name: &str) -> Option<&'static WeaponTemplate> {
    ENEMY_WEAPON_BY_NAME.get(name).copied()
}
