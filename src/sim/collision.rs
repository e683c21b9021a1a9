//! Entity-vs-entity overlap, field bounds and spawn placement.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use super::{Body, Flags};
use crate::defs::ActorFlags;

/// Upper bound on random placements tried before giving up.
pub const SPAWN_ATTEMPTS: u32 = 500;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("no free spawn point after {attempts} attempts")]
    NoRoom { attempts: u32 },
}

/// Both boxes active and strictly overlapping.
#[inline]
pub fn collides_with(a: &Body, af: ActorFlags, b: &Body, bf: ActorFlags) -> bool {
    af.contains(ActorFlags::ACTIVE)
        && bf.contains(ActorFlags::ACTIVE)
        && a.aabb().intersects(&b.aabb())
}

/// `true` if any part of `body` lies outside a `field`-sized play area.
#[inline]
pub fn out_of_bounds(body: &Body, field: Vec2) -> bool {
    body.aabb().exceeds(field)
}

/// Does `body` overlap any solid entity other than `skip`?
pub fn overlaps_any(world: &World, body: &Body, flags: ActorFlags, skip: Option<Entity>) -> bool {
    let mut q = world.query::<(&Body, &Flags)>();
    q.iter().any(|(e, (other, of))| {
        Some(e) != skip && of.0.is_solid() && collides_with(body, flags, other, of.0)
    })
}

/// Does `body` overlap the one entity `other`?
pub fn overlaps_entity(world: &World, body: &Body, flags: ActorFlags, other: Entity) -> bool {
    let Ok(mut q) = world.query_one::<(&Body, &Flags)>(other) else {
        return false;
    };
    q.get()
        .is_some_and(|(ob, of)| of.0.is_solid() && collides_with(body, flags, ob, of.0))
}

/// Random top-left position for a `size` box that is inside the field,
/// overlaps nothing, and keeps its centre more than `spawn_dist` away
/// from `keep_away` (normally the player's centre).
pub fn find_spawn_point<R: Rng + ?Sized>(
    world: &World,
    rng: &mut R,
    size: Vec2,
    field: Vec2,
    keep_away: Option<Vec2>,
    spawn_dist: f32,
    skip: Option<Entity>,
) -> Result<Vec2, SpawnError> {
    let hi = (field - size).max(Vec2::ZERO);
    for _ in 0..SPAWN_ATTEMPTS {
        let pos = Vec2::new(rng.gen_range(0.0..=hi.x), rng.gen_range(0.0..=hi.y));
        let probe = Body::new(pos, size);

        let far = keep_away.is_none_or(|c| probe.center().distance(c) > spawn_dist);
        if far
            && !out_of_bounds(&probe, field)
            && !overlaps_any(world, &probe, ActorFlags::SPAWN, skip)
        {
            return Ok(pos);
        }
    }
    Err(SpawnError::NoRoom {
        attempts: SPAWN_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn body(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn collision_is_symmetric() {
        let a = body(0.0, 0.0, 10.0, 10.0);
        let b = body(5.0, 5.0, 10.0, 10.0);
        let on = ActorFlags::SPAWN;
        assert!(collides_with(&a, on, &b, on));
        assert!(collides_with(&b, on, &a, on));
    }

    #[test]
    fn inactive_never_collides() {
        let a = body(0.0, 0.0, 10.0, 10.0);
        let off = ActorFlags::CAN_MOVE;
        assert!(!collides_with(&a, off, &a, ActorFlags::SPAWN));
        assert!(!collides_with(&a, ActorFlags::SPAWN, &a, off));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = body(0.0, 0.0, 10.0, 10.0);
        let b = body(10.0, 0.0, 10.0, 10.0);
        assert!(!collides_with(&a, ActorFlags::SPAWN, &b, ActorFlags::SPAWN));
    }

    #[test]
    fn bounds() {
        let field = Vec2::new(100.0, 100.0);
        assert!(!out_of_bounds(&body(0.0, 0.0, 100.0, 100.0), field));
        assert!(out_of_bounds(&body(-0.5, 0.0, 10.0, 10.0), field));
        assert!(out_of_bounds(&body(95.0, 0.0, 10.0, 10.0), field));
    }

    #[test]
    fn removed_entities_are_ignored() {
        let mut world = World::new();
        let probe = body(0.0, 0.0, 10.0, 10.0);
        let e = world.spawn((probe, Flags(ActorFlags::SPAWN)));
        assert!(overlaps_any(&world, &probe, ActorFlags::SPAWN, None));
        assert!(!overlaps_any(&world, &probe, ActorFlags::SPAWN, Some(e)));
        world.get::<&mut Flags>(e).unwrap().0.insert(ActorFlags::TO_REMOVE);
        assert!(!overlaps_any(&world, &probe, ActorFlags::SPAWN, None));
    }

    #[test]
    fn spawn_point_respects_distance_and_occupancy() {
        let mut world = World::new();
        let blocker = body(0.0, 0.0, 200.0, 100.0);
        world.spawn((blocker, Flags(ActorFlags::SPAWN)));
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let field = Vec2::new(200.0, 200.0);
        let centre = Vec2::new(100.0, 150.0);
        for _ in 0..20 {
            let p = find_spawn_point(
                &world,
                &mut rng,
                Vec2::splat(10.0),
                field,
                Some(centre),
                60.0,
                None,
            )
            .unwrap();
            let probe = body(p.x, p.y, 10.0, 10.0);
            assert!(p.y >= 100.0);
            assert!(probe.center().distance(centre) > 60.0);
            assert!(!out_of_bounds(&probe, field));
        }
    }

    #[test]
    fn spawn_point_gives_up_when_full() {
        let mut world = World::new();
        world.spawn((body(0.0, 0.0, 50.0, 50.0), Flags(ActorFlags::SPAWN)));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = find_spawn_point(
            &world,
            &mut rng,
            Vec2::splat(10.0),
            Vec2::splat(50.0),
            None,
            0.0,
            None,
        );
        assert_eq!(err, Err(SpawnError::NoRoom { attempts: SPAWN_ATTEMPTS }));
    }
}
