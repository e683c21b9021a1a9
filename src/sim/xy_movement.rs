//! Axis-separated movement with per-axis rollback.
//!
//! Each step tries x first and then y; an axis that would leave the field
//! or overlap another solid entity is restored exactly, so sliding along a
//! wall keeps the free axis.

use glam::Vec2;
use hecs::{Entity, World};

use super::collision::{out_of_bounds, overlaps_any, overlaps_entity};
use super::{Body, Flags, Projectile, Speed};
use crate::defs::ActorFlags;
use crate::world::heading;

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// What blocks a mover: everybody, or (for projectiles) only the shooter.
#[derive(Clone, Copy)]
enum Blockers {
    Everyone,
    Owner(Entity),
}

fn is_blocked(world: &World, me: Entity, body: &Body, flags: ActorFlags, by: Blockers) -> bool {
    match by {
        Blockers::Everyone => overlaps_any(world, body, flags, Some(me)),
        Blockers::Owner(owner) => owner != me && overlaps_entity(world, body, flags, owner),
    }
}

/// Step entity `e` once along heading `theta` (degrees).
///
/// Returns `true` if at least one axis actually changed position. A projectile is only
/// stopped by its owner and is flagged for removal by any axis that
/// goes through.
pub fn move_in(world: &mut World, e: Entity, theta: f32, field: Vec2) -> bool {
    let Some((mut body, speed, mut flags)) = snapshot(world, e) else {
        return false;
    };
    if !flags.contains(ActorFlags::CAN_MOVE) {
        return false;
    }

    let blockers = match world.get::<&Projectile>(e) {
        Ok(p) => Blockers::Owner(p.owner),
        Err(_) => Blockers::Everyone,
    };
    let is_projectile = matches!(blockers, Blockers::Owner(_));
    let delta = heading(theta) * speed;
    let mut moved = false;

    for axis in [Axis::X, Axis::Y] {
        let old = body.pos;
        let step = match axis {
            Axis::X => delta.x,
            Axis::Y => delta.y,
        };
        match axis {
            Axis::X => body.pos.x += step,
            Axis::Y => body.pos.y += step,
        }
        if out_of_bounds(&body, field) || is_blocked(world, e, &body, flags, blockers) {
            body.pos = old;
        } else {
            moved |= step != 0.0;
            if is_projectile {
                flags.insert(ActorFlags::TO_REMOVE);
            }
        }
    }

    if let Ok(mut b) = world.get::<&mut Body>(e) {
        b.pos = body.pos;
    }
    if let Ok(mut f) = world.get::<&mut Flags>(e) {
        f.0 = flags;
    }
    moved
}

/// `true` when `e` is out of bounds or overlapping another solid entity.
pub fn check_tile(world: &World, e: Entity, field: Vec2) -> bool {
    let Ok(mut q) = world.query_one::<(&Body, &Flags)>(e) else {
        return false;
    };
    let Some((body, flags)) = q.get() else {
        return false;
    };
    out_of_bounds(body, field) || overlaps_any(world, body, flags.0, Some(e))
}

fn snapshot(world: &World, e: Entity) -> Option<(Body, f32, ActorFlags)> {
    let mut q = world.query_one::<(&Body, &Speed, &Flags)>(e).ok()?;
    q.get().map(|(b, s, f)| (*b, s.0, f.0))
}
