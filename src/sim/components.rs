use glam::Vec2;
use hecs::Entity;
use smallvec::SmallVec;

use crate::defs::{ActorFlags, EnemyClass};
use crate::world::{Aabb, Color, Direction};

/// Top-left position and size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Body {
    #[inline]
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Heading in degrees, 0 = right, 90 = up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing(pub f32);

/// Pixels travelled per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed(pub f32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    /// May dip below zero before the entity is swept.
    pub hp: f32,
    pub max: f32,
}

impl Health {
    #[inline]
    pub fn full(max: f32) -> Self {
        Self { hp: max, max }
    }

    /// Remaining health in `[0, 1]`, `None` while untouched.
    pub fn hurt_ratio(&self) -> Option<f32> {
        (self.hp < self.max).then(|| (self.hp / self.max).clamp(0.0, 1.0))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags(pub ActorFlags);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint(pub Color);

/// Behaviour tag; each tick dispatches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Player,
    Enemy,
    Projectile,
}

/// Direction keys currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    /// Held directions, in the order they are stepped: up, down, left, right.
    pub fn pressed(&self) -> SmallVec<[Direction; 4]> {
        let held = [self.up, self.down, self.left, self.right];
        Direction::ALL
            .into_iter()
            .zip(held)
            .filter_map(|(d, on)| on.then_some(d))
            .collect()
    }
}

/// Marks the human-controlled entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pilot {
    pub input: MoveInput,
    /// Hit points recovered per tick while not being struck.
    pub regen: f32,
}

/// Enemy AI state.
#[derive(Debug, Clone, Copy)]
pub struct Brain {
    pub class: &'static EnemyClass,
    pub move_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub owner: Entity,
    pub dir: f32,
}

/// One frame's worth of player intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputCmd {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Snap the player's facing (set on key press).
    pub face: Option<Direction>,
    pub swing: bool,
}

impl InputCmd {
    #[inline]
    pub fn held(&self) -> MoveInput {
        MoveInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_keeps_step_order() {
        let input = MoveInput {
            up: false,
            down: true,
            left: false,
            right: true,
        };
        assert_eq!(input.pressed().as_slice(), &[Direction::Down, Direction::Right]);
        let all = MoveInput {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        assert_eq!(
            all.pressed().as_slice(),
            &[Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn health_ratio_only_when_hurt() {
        let mut h = Health::full(20.0);
        assert_eq!(h.hurt_ratio(), None);
        h.hp = 5.0;
        assert_eq!(h.hurt_ratio(), Some(0.25));
        h.hp = -3.0;
        assert_eq!(h.hurt_ratio(), Some(0.0));
    }

    #[test]
    fn body_center() {
        let b = Body::new(Vec2::new(10.0, 20.0), Vec2::new(20.0, 10.0));
        assert_eq!(b.center(), Vec2::new(20.0, 25.0));
        assert_eq!(b.aabb().max, Vec2::new(30.0, 30.0));
    }
}
