use super::classes::{BASIC, BIG, BOSS, EnemyClass, SMALL};
use super::weapons::{ENEMY_BASIC, ENEMY_BIG, ENEMY_BOSS, ENEMY_SMALL, ENEMY_SPEAR, WeaponTemplate};
use super::DefError;

/// One wave: `count` enemies of `class`, each armed with `weapon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveDesc {
    pub count: u32,
    pub class: &'static EnemyClass,
    pub weapon: &'static WeaponTemplate,
}

impl WaveDesc {
    pub fn new(
        count: u32,
        class: &'static EnemyClass,
        weapon: &'static WeaponTemplate,
    ) -> Result<Self, DefError> {
        if count == 0 {
            return Err(DefError::EmptyWave);
        }
        class.validate()?;
        weapon.validate()?;
        Ok(Self {
            count,
            class,
            weapon,
        })
    }
}

const fn wave(
    count: u32,
    class: &'static EnemyClass,
    weapon: &'static WeaponTemplate,
) -> WaveDesc {
    WaveDesc {
        count,
        class,
        weapon,
    }
}

/// Hand-authored opening waves, consumed in order before generation kicks in.
pub static SCRIPTED_WAVES: [WaveDesc; 6] = [
    wave(1, &BASIC, &ENEMY_BASIC),
    wave(2, &BASIC, &ENEMY_BASIC),
    wave(3, &BIG, &ENEMY_BASIC),
    wave(2, &BIG, &ENEMY_BIG),
    wave(5, &SMALL, &ENEMY_SMALL),
    wave(2, &BASIC, &ENEMY_BIG),
];

/// Pools the procedural generator draws from.
pub static PROCEDURAL_CLASSES: [&EnemyClass; 3] = [&BIG, &BASIC, &SMALL];
pub static PROCEDURAL_WEAPONS: [&WeaponTemplate; 4] =
    [&ENEMY_BIG, &ENEMY_BASIC, &ENEMY_SMALL, &ENEMY_SPEAR];

/// Every tenth generated wave is a boss fight.
pub static BOSS_CLASS: &EnemyClass = &BOSS;
pub static BOSS_WEAPON: &WeaponTemplate = &ENEMY_BOSS;
