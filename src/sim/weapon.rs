//! Melee weapon swing / cooldown state machine.
//!
//! ```text
//!   Idle --swing()--> Swinging --(swing_max ticks)--> Cooldown --(cooldown_max+1 ticks)--> Idle
//! ```
//!
//! The weapon lives as a component on its parent entity; the parent's
//! `CAN_MOVE` bit is cleared for the whole swing and its `BEING_HIT` bit
//! freezes the cooldown.

use glam::Vec2;

use super::Body;
use crate::defs::{ActorFlags, WeaponKind, WeaponTemplate};
use crate::world::{Color, Direction};

/// Fraction of the parent's extent the hitbox is pushed out by.
const OFFSET_RATIO: f32 = 4.0 / 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Swinging,
    Cooldown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub template: &'static WeaponTemplate,
    pub hitbox: Body,
    /// Un-swung width/height as authored in the template.
    pub base: Vec2,
    pub dir: Direction,
    pub swing_count: u32,
    pub swing_max: u32,
    pub cooldown_count: u32,
    pub cooldown_max: u32,
    pub damage: f32,
    pub alternate: bool,
    pub can_swing: bool,
    pub active: bool,
    pub swing_dist: f32,
    pub color: Color,
}

impl Weapon {
    pub fn new(template: &'static WeaponTemplate, parent: &Body) -> Self {
        let base = Vec2::new(template.width, template.height);
        Self {
            template,
            hitbox: Body::new(parent.pos - base * 0.5, base),
            base,
            dir: Direction::Right,
            swing_count: 0,
            swing_max: template.swing_ticks,
            cooldown_count: 0,
            cooldown_max: template.cooldown_ticks,
            damage: template.damage,
            alternate: true,
            can_swing: true,
            active: false,
            swing_dist: template.swing_distance(),
            color: template.color,
        }
    }

    #[inline]
    pub fn kind(&self) -> WeaponKind {
        self.template.kind
    }

    pub fn phase(&self) -> Phase {
        if self.active {
            Phase::Swinging
        } else if !self.can_swing {
            Phase::Cooldown
        } else {
            Phase::Idle
        }
    }

    /// How far the weapon reaches, used by the AI's "close enough" test.
    #[inline]
    pub fn reach(&self) -> f32 {
        self.base.y
    }

    /// Start a swing from `parent` towards `facing` (degrees).
    ///
    /// Does nothing (returns `false`) mid-swing, during cooldown, or while
    /// the game is paused.
    pub fn swing(
        &mut self,
        parent: &Body,
        facing: f32,
        parent_flags: &mut ActorFlags,
        paused: bool,
    ) -> bool {
        if self.active || paused || !self.can_swing {
            return false;
        }
        self.alternate = !self.alternate;
        self.active = true;
        parent_flags.remove(ActorFlags::CAN_MOVE);
        self.dir = Direction::from_degrees(facing);

        let (size, offset) = if self.dir.is_vertical() {
            (self.base, OFFSET_RATIO * parent.size.y)
        } else {
            (Vec2::new(self.base.y, self.base.x), OFFSET_RATIO * parent.size.x)
        };
        self.hitbox.size = size;
        self.hitbox.pos = parent.center() - size * 0.5;

        if self.kind() == WeaponKind::Sword {
            let sign = if self.alternate { 1.0 } else { -1.0 };
            let side = sign * self.swing_dist / 2.0;
            let p = &mut self.hitbox.pos;
            match self.dir {
                Direction::Up => {
                    p.y -= offset;
                    p.x -= side;
                }
                Direction::Down => {
                    p.y += offset;
                    p.x += side;
                }
                Direction::Left => {
                    p.x -= offset;
                    p.y += side;
                }
                Direction::Right => {
                    p.x += offset;
                    p.y -= side;
                }
            }
        }
        true
    }

    /// One tick of the state machine.
    pub fn advance(&mut self, parent_flags: &mut ActorFlags) {
        if self.active {
            if self.swing_count < self.swing_max {
                self.swing_count += 1;
                self.sweep(self.swing_dist / self.swing_max as f32);
            } else {
                self.swing_count = 0;
                self.active = false;
                parent_flags.insert(ActorFlags::CAN_MOVE);
                self.can_swing = false;
            }
        }

        if !self.can_swing && !parent_flags.contains(ActorFlags::BEING_HIT) {
            if self.cooldown_count < self.cooldown_max {
                self.cooldown_count += 1;
            } else {
                self.cooldown_count = 0;
                self.can_swing = true;
            }
        }
    }

    fn sweep(&mut self, step: f32) {
        let kind = self.kind();
        let p = &mut self.hitbox.pos;
        match kind {
            WeaponKind::Sword => {
                let s = if self.alternate { step } else { -step };
                match self.dir {
                    Direction::Up => p.x += s,
                    Direction::Down => p.x -= s,
                    Direction::Right => p.y += s,
                    Direction::Left => p.y -= s,
                }
            }
            WeaponKind::Spear => match self.dir {
                Direction::Up => p.y -= step,
                Direction::Down => p.y += step,
                Direction::Right => p.x += step,
                Direction::Left => p.x -= step,
            },
        }
    }

    /// Active hitbox overlapping an active `target`.
    pub fn strikes(&self, target: &Body, target_flags: ActorFlags) -> bool {
        self.active
            && target_flags.contains(ActorFlags::ACTIVE)
            && self.hitbox.aabb().intersects(&target.aabb())
    }

    /// Run both counters to their limits so the next tick ends whatever
    /// phase the weapon is in.
    pub fn saturate(&mut self) {
        self.swing_count = self.swing_max;
        self.cooldown_count = self.cooldown_max;
    }
}
