use glam::Vec2;
use hecs::{Entity, World};

use super::{
    Body, Brain, Facing, Flags, Health, Kind, MoveInput, Pilot, Projectile, Speed, Tint, Weapon,
};
use crate::defs::{ActorFlags, EnemyClass, ProjectileTemplate, WeaponTemplate};
use crate::world::{Color, TileMap, angle_between};

pub const PLAYER_SIZE: f32 = 20.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_HP: f32 = 100.0;
pub const PLAYER_COLOR: Color = Color::BLUE;

/// Enemy hit points scaled by how far into the game it spawned:
/// +50% for every `step` waves.
#[inline]
pub fn wave_hp(base: f32, wave: u32, step: u32) -> f32 {
    base * ((wave / step.max(1)) as f32 * 0.5 + 1.0)
}

/// Create the player in the centre tile, facing up.
pub fn spawn_player(
    world: &mut World,
    map: &TileMap,
    weapon: &'static WeaponTemplate,
    regen: f32,
) -> Entity {
    let size = Vec2::splat(PLAYER_SIZE);
    let (tx, ty) = map.middle();
    let body = Body::new(TileMap::centre_in_tile(tx, ty, size), size);
    let e = world.spawn((
        body,
        Facing(90.0),
        Speed(PLAYER_SPEED),
        Health::full(PLAYER_HP),
        Flags(ActorFlags::SPAWN),
        Tint(PLAYER_COLOR),
        Kind::Player,
        Pilot {
            input: MoveInput::default(),
            regen,
        },
    ));
    equip_weapon(world, e, weapon);
    e
}

/// Create an enemy at `pos`, armed and facing `target` if given.
#[allow(clippy::too_many_arguments)]
pub fn spawn_enemy_at(
    world: &mut World,
    class: &'static EnemyClass,
    weapon: &'static WeaponTemplate,
    pos: Vec2,
    wave: u32,
    hp_step: u32,
    target: Option<Vec2>,
) -> Entity {
    let body = Body::new(pos, Vec2::new(class.width, class.height));
    let facing = target.map_or(0.0, |t| angle_between(body.center(), t));
    let e = world.spawn((
        body,
        Facing(facing),
        Speed(class.speed),
        Health::full(wave_hp(class.hp, wave, hp_step)),
        Flags(ActorFlags::SPAWN),
        Tint(class.color),
        Kind::Enemy,
        Brain {
            class,
            move_count: 0,
        },
    ));
    equip_weapon(world, e, weapon);
    e
}

/// Attach a fresh weapon, replacing any previous one.
///
/// The replaced weapon may have been mid-swing, so the parent is freed to
/// move again.
pub fn equip_weapon(world: &mut World, e: Entity, template: &'static WeaponTemplate) -> bool {
    let Ok(body) = world.get::<&Body>(e).map(|b| *b) else {
        return false;
    };
    if world.insert_one(e, Weapon::new(template, &body)).is_err() {
        return false;
    }
    if let Ok(mut f) = world.get::<&mut Flags>(e) {
        f.0.insert(ActorFlags::CAN_MOVE);
    }
    true
}

/// Launch a projectile from `owner`'s top-left corner along `dir` degrees.
pub fn spawn_projectile(
    world: &mut World,
    owner: Entity,
    template: &ProjectileTemplate,
    dir: f32,
) -> Option<Entity> {
    let origin = world.get::<&Body>(owner).ok()?.pos;
    Some(world.spawn((
        Body::new(origin, Vec2::new(template.width, template.height)),
        Facing(dir),
        Speed(template.speed),
        Health::full(1.0),
        Flags(ActorFlags::SPAWN),
        Tint(template.color),
        Kind::Projectile,
        Projectile { owner, dir },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::classes::BASIC;
    use crate::defs::weapons::{ENEMY_BASIC, MASTER, START};
    use crate::world::{FloorStyle, TileMap};

    #[test]
    fn hp_scales_every_fifteen_waves() {
        assert_eq!(wave_hp(10.0, 1, 15), 10.0);
        assert_eq!(wave_hp(10.0, 14, 15), 10.0);
        assert_eq!(wave_hp(10.0, 16, 15), 15.0);
        assert_eq!(wave_hp(10.0, 30, 15), 20.0);
    }

    #[test]
    fn player_starts_in_the_middle() {
        let mut world = World::new();
        let map = TileMap::from_style(FloorStyle::Grass);
        let p = spawn_player(&mut world, &map, &START, 0.05);
        assert_eq!(world.get::<&Body>(p).unwrap().pos, Vec2::new(182.0, 182.0));
        assert_eq!(*world.get::<&Kind>(p).unwrap(), Kind::Player);
        assert_eq!(world.get::<&Weapon>(p).unwrap().template.name, "start");
    }

    #[test]
    fn enemy_faces_target_and_scales() {
        let mut world = World::new();
        let e = spawn_enemy_at(
            &mut world,
            &BASIC,
            &ENEMY_BASIC,
            Vec2::new(100.0, 100.0),
            16,
            15,
            Some(Vec2::new(107.5, 50.0)),
        );
        assert_eq!(world.get::<&Facing>(e).unwrap().0, 90.0);
        let h = *world.get::<&Health>(e).unwrap();
        assert_eq!((h.hp, h.max), (15.0, 15.0));
    }

    #[test]
    fn re_equip_frees_a_frozen_parent() {
        let mut world = World::new();
        let map = TileMap::from_style(FloorStyle::Stone);
        let p = spawn_player(&mut world, &map, &START, 0.05);
        world.get::<&mut Flags>(p).unwrap().0.remove(ActorFlags::CAN_MOVE);
        assert!(equip_weapon(&mut world, p, &MASTER));
        assert!(world.get::<&Flags>(p).unwrap().0.contains(ActorFlags::CAN_MOVE));
        assert_eq!(world.get::<&Weapon>(p).unwrap().damage, 1.5);
    }
}
