//! Enemy decision making: the two movement policies.

use glam::Vec2;
use hecs::{Entity, World};

use super::collision::collides_with;
use super::xy_movement::move_in;
use super::{Body, Brain, Facing, Flags, Health, Weapon, systems};
use crate::defs::{ActorFlags, AiPolicy};
use crate::world::angle_between;

/// What an enemy can see of the player this tick.
#[derive(Debug, Clone, Copy)]
pub struct Quarry {
    pub body: Body,
    pub flags: ActorFlags,
    pub weapon: Option<Weapon>,
}

impl Quarry {
    pub fn observe(world: &World, player: Entity) -> Option<Self> {
        let mut q = world.query_one::<(&Body, &Flags, Option<&Weapon>)>(player).ok()?;
        q.get().map(|(b, f, w)| Self {
            body: *b,
            flags: f.0,
            weapon: w.copied(),
        })
    }

    /// The player's swing is landing on `body` right now.
    fn hits(&self, body: &Body, flags: ActorFlags) -> bool {
        self.weapon.is_some_and(|w| w.strikes(body, flags))
    }

    fn damage(&self) -> f32 {
        self.weapon.map_or(0.0, |w| w.damage)
    }
}

/// Run `e`'s policy for one tick against `quarry`.
pub fn think(world: &mut World, e: Entity, quarry: &Quarry, field: Vec2, paused: bool) {
    let Some((body, flags, brain)) = read(world, e) else {
        return;
    };

    let hit = quarry.hits(&body, flags);
    set_being_hit(world, e, hit);

    match brain.class.policy {
        AiPolicy::Pursue => pursue(world, e, quarry, field, paused, hit, &body, flags),
        AiPolicy::PursueThenHold { steps } => {
            pursue_then_hold(world, e, quarry, field, paused, hit, steps)
        }
    }
}

/// Re-aim every tick and close in until touching.
#[allow(clippy::too_many_arguments)]
fn pursue(
    world: &mut World,
    e: Entity,
    quarry: &Quarry,
    field: Vec2,
    paused: bool,
    hit: bool,
    body: &Body,
    flags: ActorFlags,
) {
    if !hit && !collides_with(body, flags, &quarry.body, quarry.flags) {
        let theta = face_quarry(world, e, quarry);
        move_in(world, e, theta, field);
    } else if hit {
        take_damage(world, e, quarry.damage());
    }
    if !hit && close_enough(world, e, quarry) {
        systems::swing(world, e, paused);
    }
}

/// Walk straight for `steps` ticks, then re-aim.
fn pursue_then_hold(
    world: &mut World,
    e: Entity,
    quarry: &Quarry,
    field: Vec2,
    paused: bool,
    hit: bool,
    steps: u32,
) {
    let reaim = match world.get::<&mut Brain>(e) {
        Ok(mut brain) if brain.move_count < steps => {
            brain.move_count += 1;
            false
        }
        Ok(mut brain) => {
            brain.move_count = 0;
            true
        }
        Err(_) => false,
    };
    if reaim {
        face_quarry(world, e, quarry);
    }

    if !hit && close_enough(world, e, quarry) {
        systems::swing(world, e, paused);
    } else if !hit {
        let theta = world.get::<&Facing>(e).map_or(0.0, |f| f.0);
        move_in(world, e, theta, field);
    } else {
        take_damage(world, e, quarry.damage());
    }
}

/// Centre distance below the weapon's reach plus our own height.
fn close_enough(world: &World, e: Entity, quarry: &Quarry) -> bool {
    let Ok(mut q) = world.query_one::<(&Body, &Weapon)>(e) else {
        return false;
    };
    q.get().is_some_and(|(body, weapon)| {
        body.center().distance(quarry.body.center()) < weapon.reach() + body.size.y
    })
}

fn face_quarry(world: &mut World, e: Entity, quarry: &Quarry) -> f32 {
    let Ok(mut q) = world.query_one::<(&Body, &mut Facing)>(e) else {
        return 0.0;
    };
    match q.get() {
        Some((body, facing)) => {
            facing.0 = angle_between(body.center(), quarry.body.center());
            facing.0
        }
        None => 0.0,
    }
}

fn take_damage(world: &mut World, e: Entity, amount: f32) {
    if let Ok(mut h) = world.get::<&mut Health>(e) {
        h.hp -= amount;
    }
}

fn set_being_hit(world: &mut World, e: Entity, hit: bool) {
    if let Ok(mut f) = world.get::<&mut Flags>(e) {
        f.0.set(ActorFlags::BEING_HIT, hit);
    }
}

fn read(world: &World, e: Entity) -> Option<(Body, ActorFlags, Brain)> {
    let mut q = world.query_one::<(&Body, &Flags, &Brain)>(e).ok()?;
    q.get().map(|(b, f, br)| (*b, f.0, *br))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::classes::{BASIC, BIG};
    use crate::defs::weapons::{ENEMY_BASIC, START};
    use crate::sim::{Kind, Speed, Tint, mob};
    use crate::world::Color;

    const FIELD: Vec2 = Vec2::new(350.0, 350.0);

    fn player_at(world: &mut World, x: f32, y: f32) -> Entity {
        let body = Body::new(Vec2::new(x, y), Vec2::splat(20.0));
        let e = world.spawn((
            body,
            Facing(90.0),
            Speed(5.0),
            Health::full(100.0),
            Flags(ActorFlags::SPAWN),
            Tint(Color::BLUE),
            Kind::Player,
        ));
        mob::equip_weapon(world, e, &START);
        e
    }

    fn pos(world: &World, e: Entity) -> Vec2 {
        world.get::<&Body>(e).unwrap().pos
    }

    #[test]
    fn pursuer_closes_in() {
        let mut world = World::new();
        let p = player_at(&mut world, 200.0, 100.0);
        let e = mob::spawn_enemy_at(&mut world, &BIG, &ENEMY_BASIC, Vec2::new(20.0, 100.0), 1, 15, None);
        let q = Quarry::observe(&world, p).unwrap();
        think(&mut world, e, &q, FIELD, false);
        assert_eq!(world.get::<&Facing>(e).unwrap().0, 0.0);
        assert_eq!(pos(&world, e), Vec2::new(23.0, 100.0));
    }

    #[test]
    fn holder_keeps_heading_between_reaims() {
        let mut world = World::new();
        let p = player_at(&mut world, 200.0, 100.0);
        let e = mob::spawn_enemy_at(&mut world, &BASIC, &ENEMY_BASIC, Vec2::new(20.0, 100.0), 1, 15, None);
        world.get::<&mut Facing>(e).unwrap().0 = 270.0;
        let q = Quarry::observe(&world, p).unwrap();

        for _ in 0..10 {
            think(&mut world, e, &q, FIELD, false);
        }
        // Ten straight steps down without re-aiming.
        assert_eq!(pos(&world, e), Vec2::new(20.0, 150.0));
        assert_eq!(world.get::<&Brain>(e).unwrap().move_count, 10);

        // Eleventh tick resets the counter and turns toward the player.
        think(&mut world, e, &q, FIELD, false);
        assert_eq!(world.get::<&Brain>(e).unwrap().move_count, 0);
        let facing = world.get::<&Facing>(e).unwrap().0;
        assert!(facing > 0.0 && facing < 90.0);
    }

    #[test]
    fn struck_enemy_takes_damage_and_stays_put() {
        let mut world = World::new();
        let p = player_at(&mut world, 100.0, 100.0);
        let e = mob::spawn_enemy_at(&mut world, &BIG, &ENEMY_BASIC, Vec2::new(125.0, 100.0), 1, 15, None);
        {
            let mut q = world
                .query_one::<(&Body, &Facing, &mut Flags, &mut Weapon)>(p)
                .unwrap();
            let (b, f, fl, w) = q.get().unwrap();
            assert!(w.swing(b, f.0 - 90.0, &mut fl.0, false));
        }
        let q = Quarry::observe(&world, p).unwrap();
        think(&mut world, e, &q, FIELD, false);
        let hp = world.get::<&Health>(e).unwrap().hp;
        assert_eq!(hp, 25.0 - 1.0);
        assert_eq!(pos(&world, e), Vec2::new(125.0, 100.0));
        assert!(world.get::<&Flags>(e).unwrap().0.contains(ActorFlags::BEING_HIT));
    }

    #[test]
    fn close_enemy_swings() {
        let mut world = World::new();
        let p = player_at(&mut world, 100.0, 100.0);
        let e = mob::spawn_enemy_at(&mut world, &BIG, &ENEMY_BASIC, Vec2::new(120.0, 100.0), 1, 15, None);
        let q = Quarry::observe(&world, p).unwrap();
        think(&mut world, e, &q, FIELD, false);
        assert!(world.get::<&Weapon>(e).unwrap().active);
        assert!(!world.get::<&Flags>(e).unwrap().0.contains(ActorFlags::CAN_MOVE));
    }
}
