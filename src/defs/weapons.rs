use super::DefError;
use crate::world::Color;

/// Base sideways sweep of a sword; spears thrust this far plus `SPEAR_REACH`.
pub const SWING_DISTANCE: f32 = 10.0;
pub const SPEAR_REACH: f32 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponKind {
    /// Sweeps sideways across the facing, alternating sides every swing.
    Sword,
    /// Thrusts straight out along the facing.
    Spear,
}

/// Weapon kit: everything needed to equip an entity with a weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponTemplate {
    pub name: &'static str,
    pub kind: WeaponKind,
    /// Hitbox width when swung up/down (becomes the height left/right).
    pub width: f32,
    /// Hitbox height when swung up/down; also the weapon's reach.
    pub height: f32,
    pub color: Color,
    pub swing_ticks: u32,
    pub cooldown_ticks: u32,
    pub damage: f32,
}

impl WeaponTemplate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &'static str,
        kind: WeaponKind,
        width: f32,
        height: f32,
        color: Color,
        swing_ticks: u32,
        cooldown_ticks: u32,
        damage: f32,
    ) -> Result<Self, DefError> {
        let t = Self {
            name,
            kind,
            width,
            height,
            color,
            swing_ticks,
            cooldown_ticks,
            damage,
        };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> Result<(), DefError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(DefError::BadSize {
                name: self.name,
                width: self.width,
                height: self.height,
            });
        }
        if self.swing_ticks == 0 {
            return Err(DefError::ZeroSwing(self.name));
        }
        if !(self.damage >= 0.0) {
            return Err(DefError::NegativeDamage(self.name));
        }
        Ok(())
    }

    /// Total travel of the hitbox over one complete swing.
    #[inline]
    pub fn swing_distance(&self) -> f32 {
        match self.kind {
            WeaponKind::Sword => SWING_DISTANCE,
            WeaponKind::Spear => SWING_DISTANCE + SPEAR_REACH,
        }
    }
}

/// Straight-line projectile kit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileTemplate {
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl ProjectileTemplate {
    pub fn new(speed: f32, width: f32, height: f32, color: Color) -> Result<Self, DefError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(DefError::BadSize {
                name: "projectile",
                width,
                height,
            });
        }
        if !(speed >= 0.0) {
            return Err(DefError::BadSpeed("projectile"));
        }
        Ok(Self {
            speed,
            width,
            height,
            color,
        })
    }
}

/* ── player armory ─────────────────────────────────────────────────── */

const fn sword(
    name: &'static str,
    width: f32,
    height: f32,
    color: Color,
    swing_ticks: u32,
    cooldown_ticks: u32,
    damage: f32,
) -> WeaponTemplate {
    WeaponTemplate {
        name,
        kind: WeaponKind::Sword,
        width,
        height,
        color,
        swing_ticks,
        cooldown_ticks,
        damage,
    }
}

const fn spear(
    name: &'static str,
    width: f32,
    height: f32,
    color: Color,
    swing_ticks: u32,
    cooldown_ticks: u32,
    damage: f32,
) -> WeaponTemplate {
    WeaponTemplate {
        kind: WeaponKind::Spear,
        ..sword(name, width, height, color, swing_ticks, cooldown_ticks, damage)
    }
}

pub static START: WeaponTemplate = sword("start", 10.0, 33.0, Color::GREY, 13, 7, 1.0);
pub static MASTER: WeaponTemplate = sword("master", 12.0, 45.0, Color::ROYAL_BLUE, 12, 7, 1.5);
pub static RAPIER: WeaponTemplate = sword("rapier", 8.0, 30.0, Color::LIGHT_GREY, 5, 1, 1.0);
pub static SPEAR: WeaponTemplate = spear("spear", 4.0, 35.0, Color::BROWN, 10, 8, 1.0);

pub static PLAYER_WEAPONS: [&WeaponTemplate; 4] = [&START, &MASTER, &RAPIER, &SPEAR];

/* ── enemy armory ──────────────────────────────────────────────────── */

pub static ENEMY_BASIC: WeaponTemplate = sword("basic", 5.0, 10.0, Color::LIGHT_GREY, 10, 5, 0.5);
pub static ENEMY_BIG: WeaponTemplate = sword("big", 6.0, 14.0, Color::DARK_GREY, 14, 8, 1.0);
pub static ENEMY_SMALL: WeaponTemplate = sword("small", 4.0, 8.0, Color::YELLOW, 9, 4, 0.25);
pub static ENEMY_BOSS: WeaponTemplate = sword("boss", 8.0, 18.0, Color::ORANGE, 20, 15, 3.0);
pub static ENEMY_SPEAR: WeaponTemplate = spear("bspear", 4.0, 20.0, Color::BROWN, 20, 8, 1.0);

pub static ENEMY_WEAPONS: [&WeaponTemplate; 5] = [
    &ENEMY_BASIC,
    &ENEMY_BIG,
    &ENEMY_SMALL,
    &ENEMY_BOSS,
    &ENEMY_SPEAR,
];
