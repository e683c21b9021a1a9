//! Per-kind tick logic and input handling.

use glam::Vec2;
use hecs::{Entity, World};

use super::ai::{self, Quarry};
use super::xy_movement::{check_tile, move_in};
use super::{Body, Facing, Flags, Health, InputCmd, Pilot, Projectile, Weapon};
use crate::defs::ActorFlags;

/// How a player tick ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerFate {
    Alive,
    Died,
}

/// Latch the held keys, snap facing, and trigger a swing.
pub fn apply_input(world: &mut World, player: Entity, cmd: InputCmd, paused: bool) {
    if let Ok(mut pilot) = world.get::<&mut Pilot>(player) {
        pilot.input = cmd.held();
    }
    if let Some(dir) = cmd.face {
        if let Ok(mut facing) = world.get::<&mut Facing>(player) {
            facing.0 = dir.degrees();
        }
    }
    if cmd.swing {
        swing(world, player, paused);
    }
}

/// Swing `e`'s weapon toward its current facing.
pub fn swing(world: &mut World, e: Entity, paused: bool) -> bool {
    let Ok(mut q) = world.query_one::<(&Body, &Facing, &mut Flags, &mut Weapon)>(e) else {
        return false;
    };
    match q.get() {
        Some((body, facing, flags, weapon)) => weapon.swing(body, facing.0, &mut flags.0, paused),
        None => false,
    }
}

/// Tick `e`'s weapon state machine.
pub fn advance_weapon(world: &mut World, e: Entity) {
    if let Ok(mut q) = world.query_one::<(&mut Flags, &mut Weapon)>(e) {
        if let Some((flags, weapon)) = q.get() {
            weapon.advance(&mut flags.0);
        }
    }
}

/*---------------------------------------------------------------------*/
/* player                                                              */
/*---------------------------------------------------------------------*/

pub fn player_tick(world: &mut World, player: Entity, field: Vec2) -> PlayerFate {
    let Ok(pilot) = world.get::<&Pilot>(player).map(|p| *p) else {
        return PlayerFate::Alive;
    };
    let can_move = world
        .get::<&Flags>(player)
        .is_ok_and(|f| f.0.contains(ActorFlags::CAN_MOVE));

    if can_move {
        for dir in pilot.input.pressed() {
            move_in(world, player, dir.degrees(), field);
            if check_tile(world, player, field) {
                move_in(world, player, dir.opposite().degrees(), field);
            }
        }
    }

    let being_hit = world
        .get::<&Flags>(player)
        .is_ok_and(|f| f.0.contains(ActorFlags::BEING_HIT));
    if let Ok(mut h) = world.get::<&mut Health>(player) {
        if h.hp < 0.0 {
            return PlayerFate::Died;
        }
        if !being_hit && h.hp < h.max {
            h.hp = (h.hp + pilot.regen).min(h.max);
        }
    }

    advance_weapon(world, player);
    if let Ok(mut f) = world.get::<&mut Flags>(player) {
        f.0.remove(ActorFlags::BEING_HIT);
    }
    PlayerFate::Alive
}

/*---------------------------------------------------------------------*/
/* enemy                                                               */
/*---------------------------------------------------------------------*/

pub fn enemy_tick(world: &mut World, e: Entity, player: Entity, field: Vec2, paused: bool) {
    let Some(quarry) = Quarry::observe(world, player) else {
        advance_weapon(world, e);
        return;
    };

    ai::think(world, e, &quarry, field, paused);

    if world.get::<&Health>(e).is_ok_and(|h| h.hp <= 0.0) {
        if let Ok(mut f) = world.get::<&mut Flags>(e) {
            f.0.insert(ActorFlags::TO_REMOVE);
        }
    }

    let landed = world
        .get::<&Weapon>(e)
        .ok()
        .filter(|w| w.strikes(&quarry.body, quarry.flags))
        .map(|w| w.damage);
    if let Some(damage) = landed {
        if let Ok(mut q) = world.query_one::<(&mut Health, &mut Flags)>(player) {
            if let Some((h, f)) = q.get() {
                h.hp -= damage;
                f.0.insert(ActorFlags::BEING_HIT);
            }
        }
    }

    advance_weapon(world, e);
}

/*---------------------------------------------------------------------*/
/* projectile                                                          */
/*---------------------------------------------------------------------*/

pub fn projectile_tick(world: &mut World, e: Entity, field: Vec2) {
    let Ok(dir) = world.get::<&Projectile>(e).map(|p| p.dir) else {
        return;
    };
    move_in(world, e, dir, field);
}
