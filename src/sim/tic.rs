use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::collision::{SpawnError, find_spawn_point};
use super::config::{ArenaConfig, ConfigError};
use super::systems::{self, PlayerFate};
use super::waves::{WaveOutcome, WaveScheduler};
use super::{Body, Countdown, Flags, Health, InputCmd, Kind, Tint, Weapon, mob};
use crate::defs::weapons::START;
use crate::defs::{ActorFlags, EnemyClass, ProjectileTemplate, WeaponTemplate};
use crate::world::{Color, FloorStyle, TileMap};

/// Running totals for the HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub deaths: u32,
    pub kills: u32,
    pub ticks: u64,
}

/// Deferred creation, applied between ticks.
#[derive(Debug, Clone, Copy)]
enum Spawn {
    Enemy {
        class: &'static EnemyClass,
        weapon: &'static WeaponTemplate,
        wave: u32,
    },
    Projectile {
        owner: Entity,
        template: ProjectileTemplate,
        dir: f32,
    },
}

/// One drawable rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub active: bool,
    /// Health fraction, only for entities that have taken damage.
    pub health: Option<f32>,
}

/// The whole game state: entities, map, wave timer and tick timer.
pub struct Arena {
    world: World,
    /// Tick order. The player is always first.
    roster: Vec<Entity>,
    player: Entity,
    pending: SmallVec<[Spawn; 8]>,
    map: TileMap,
    scheduler: WaveScheduler,
    ticker: Countdown,
    rng: ChaCha8Rng,
    cfg: ArenaConfig,
    paused: bool,
    last_player_weapon: &'static WeaponTemplate,
    stats: Stats,
}

impl Arena {
    pub fn new(cfg: ArenaConfig) -> Result<Self, ConfigError> {
        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
        let floor = cfg.floor.unwrap_or_else(|| FloorStyle::random(&mut rng));
        Self::build(cfg, TileMap::from_style(floor), rng)
    }

    /// Arena over a caller-supplied map.
    pub fn with_map(cfg: ArenaConfig, map: TileMap) -> Result<Self, ConfigError> {
        let rng = ChaCha8Rng::seed_from_u64(cfg.seed);
        Self::build(cfg, map, rng)
    }

    fn build(cfg: ArenaConfig, map: TileMap, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut world = World::new();
        let player = mob::spawn_player(&mut world, &map, &START, cfg.player_regen);
        info!(
            cols = map.cols(),
            rows = map.rows(),
            seed = cfg.seed,
            "arena ready"
        );
        Ok(Self {
            world,
            roster: vec![player],
            player,
            pending: SmallVec::new(),
            map,
            scheduler: WaveScheduler::new(cfg.wave_delay_ms, cfg.wave_rate, cfg.max_enemies),
            ticker: Countdown::new(cfg.tick_ms),
            rng,
            cfg,
            paused: false,
            last_player_weapon: &START,
            stats: Stats::default(),
        })
    }

    /* ---------------------------------------------------------------- */
    /* accessors                                                        */
    /* ---------------------------------------------------------------- */

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[inline]
    pub fn player(&self) -> Entity {
        self.player
    }

    #[inline]
    pub fn roster(&self) -> &[Entity] {
        &self.roster
    }

    #[inline]
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    #[inline]
    pub fn field(&self) -> Vec2 {
        self.map.pixel_size()
    }

    #[inline]
    pub fn config(&self) -> &ArenaConfig {
        &self.cfg
    }

    #[inline]
    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn last_player_weapon(&self) -> &'static WeaponTemplate {
        self.last_player_weapon
    }

    /// Live enemies on the field, not counting ones already swept.
    pub fn enemy_count(&self) -> usize {
        self.entities_of(Kind::Enemy).len()
    }

    /// Roster entries of one kind, in tick order.
    pub fn entities_of(&self, kind: Kind) -> Vec<Entity> {
        self.roster
            .iter()
            .copied()
            .filter(|&e| {
                let Ok(mut q) = self.world.query_one::<(&Kind, &Flags)>(e) else {
                    return false;
                };
                q.get()
                    .is_some_and(|(k, f)| *k == kind && !f.0.contains(ActorFlags::TO_REMOVE))
            })
            .collect()
    }

    fn queued_enemies(&self) -> usize {
        self.pending
            .iter()
            .filter(|s| matches!(s, Spawn::Enemy { .. }))
            .count()
    }

    /* ---------------------------------------------------------------- */
    /* commands                                                         */
    /* ---------------------------------------------------------------- */

    pub fn apply_input(&mut self, cmd: InputCmd) {
        systems::apply_input(&mut self.world, self.player, cmd, self.paused);
    }

    pub fn swing_player(&mut self) -> bool {
        systems::swing(&mut self.world, self.player, self.paused)
    }

    /// Freeze or thaw both the tick and the wave timers together.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.ticker.pause();
        self.scheduler.countdown_mut().pause();
        info!(
            next_wave_in_ms = self.scheduler.countdown().remaining(),
            "paused"
        );
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.ticker.resume();
        self.scheduler.countdown_mut().resume();
        info!("resumed");
    }

    /// Place an enemy at a random free spot away from the player.
    pub fn spawn_enemy(
        &mut self,
        class: &'static EnemyClass,
        weapon: &'static WeaponTemplate,
    ) -> Result<Entity, SpawnError> {
        let wave = self.scheduler.wave();
        self.place_enemy(class, weapon, wave)
    }

    /// Place an enemy at an exact position, skipping the free-spot search.
    pub fn spawn_enemy_at(
        &mut self,
        class: &'static EnemyClass,
        weapon: &'static WeaponTemplate,
        pos: Vec2,
    ) -> Entity {
        let target = self.player_center();
        let e = mob::spawn_enemy_at(
            &mut self.world,
            class,
            weapon,
            pos,
            self.scheduler.wave(),
            self.cfg.hp_wave_step,
            target,
        );
        self.roster.push(e);
        e
    }

    pub fn equip(&mut self, e: Entity, template: &'static WeaponTemplate) -> bool {
        mob::equip_weapon(&mut self.world, e, template)
    }

    /// Arm the player; the choice survives death.
    pub fn equip_player(&mut self, template: &'static WeaponTemplate) -> bool {
        let ok = mob::equip_weapon(&mut self.world, self.player, template);
        if ok {
            self.last_player_weapon = template;
            info!(weapon = template.name, "player equipped");
        }
        ok
    }

    /// Queue a projectile from `owner`; it appears at the next flush.
    pub fn fire_projectile(&mut self, owner: Entity, template: ProjectileTemplate, dir: f32) {
        self.pending.push(Spawn::Projectile {
            owner,
            template,
            dir,
        });
    }

    /// Remove everything but the player.
    pub fn clear_enemies(&mut self) {
        let gone = self.roster.split_off(1);
        for &e in &gone {
            self.world.despawn(e).ok();
        }
        self.pending.clear();
        info!(removed = gone.len(), "cleared arena");
    }

    /* ---------------------------------------------------------------- */
    /* drivers                                                          */
    /* ---------------------------------------------------------------- */

    /// Feed `dt_ms` of wall time through the tick and wave timers, firing
    /// each in chronological order. Does nothing while paused.
    pub fn advance(&mut self, dt_ms: f64) {
        if self.paused {
            return;
        }
        let mut budget = dt_ms.max(0.0);
        while !self.paused {
            let step = budget
                .min(self.ticker.remaining())
                .min(self.scheduler.countdown().remaining());
            budget -= step;

            let wave_due = self.scheduler.countdown_mut().elapse(step);
            let tick_due = self.ticker.elapse(step);
            if wave_due {
                self.fire_wave();
            }
            if tick_due {
                self.ticker.rearm(self.cfg.tick_ms);
                self.tick();
            }
            if !wave_due && !tick_due {
                break;
            }
        }
        self.flush_pending();
    }

    /// Let the wave scheduler act now.
    pub fn fire_wave(&mut self) -> WaveOutcome {
        let live = self.enemy_count() + self.queued_enemies();
        let outcome = self.scheduler.fire(live, &mut self.rng);
        match outcome {
            WaveOutcome::Skipped { wave } => {
                debug!(wave, live, "arena full, holding wave back");
            }
            WaveOutcome::Spawned { wave, desc } => {
                info!(
                    wave,
                    count = desc.count,
                    class = desc.class.name,
                    weapon = desc.weapon.name,
                    next_delay_ms = self.scheduler.delay_ms(),
                    "wave incoming"
                );
                for _ in 0..desc.count {
                    self.pending.push(Spawn::Enemy {
                        class: desc.class,
                        weapon: desc.weapon,
                        wave,
                    });
                }
            }
        }
        outcome
    }

    /// Materialise everything queued since the last flush.
    pub fn flush_pending(&mut self) {
        let queued = std::mem::take(&mut self.pending);
        for spawn in queued {
            match spawn {
                Spawn::Enemy {
                    class,
                    weapon,
                    wave,
                } => {
                    if let Err(err) = self.place_enemy(class, weapon, wave) {
                        warn!(class = class.name, %err, "dropping enemy spawn");
                    }
                }
                Spawn::Projectile {
                    owner,
                    template,
                    dir,
                } => {
                    if let Some(e) = mob::spawn_projectile(&mut self.world, owner, &template, dir) {
                        self.roster.push(e);
                    }
                }
            }
        }
    }

    /// One fixed step: every live entity acts once, then the dead are swept.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.flush_pending();
        self.stats.ticks += 1;
        let field = self.field();

        let order: SmallVec<[Entity; 32]> = self.roster.iter().copied().collect();
        for e in order {
            let Ok(mut q) = self.world.query_one::<(&Kind, &Flags)>(e) else {
                continue;
            };
            let Some((&kind, flags)) = q.get() else {
                continue;
            };
            if flags.0.contains(ActorFlags::TO_REMOVE) {
                continue;
            }
            drop(q);

            match kind {
                Kind::Player => {
                    if systems::player_tick(&mut self.world, e, field) == PlayerFate::Died {
                        self.respawn_player(e);
                    }
                }
                Kind::Enemy => {
                    systems::enemy_tick(&mut self.world, e, self.player, field, self.paused)
                }
                Kind::Projectile => systems::projectile_tick(&mut self.world, e, field),
            }
        }

        self.compact();
    }

    fn place_enemy(
        &mut self,
        class: &'static EnemyClass,
        weapon: &'static WeaponTemplate,
        wave: u32,
    ) -> Result<Entity, SpawnError> {
        let target = self.player_center();
        let size = Vec2::new(class.width, class.height);
        let field = self.field();
        let pos = find_spawn_point(
            &self.world,
            &mut self.rng,
            size,
            field,
            target,
            self.cfg.spawn_dist,
            None,
        )?;
        let e = mob::spawn_enemy_at(
            &mut self.world,
            class,
            weapon,
            pos,
            wave,
            self.cfg.hp_wave_step,
            target,
        );
        self.roster.push(e);
        Ok(e)
    }

    fn player_center(&self) -> Option<Vec2> {
        self.world.get::<&Body>(self.player).ok().map(|b| b.center())
    }

    /// Replace a dead player and scatter the enemies. The wave carries on.
    fn respawn_player(&mut self, old: Entity) {
        if let Ok(mut q) = self.world.query_one::<(&mut Health, &mut Flags)>(old) {
            if let Some((h, f)) = q.get() {
                h.hp = 0.0;
                f.0.insert(ActorFlags::TO_REMOVE);
            }
        }

        let player = mob::spawn_player(
            &mut self.world,
            &self.map,
            self.last_player_weapon,
            self.cfg.player_regen,
        );
        self.roster.insert(0, player);
        self.player = player;
        self.stats.deaths += 1;

        let centre = self.player_center();
        let field = self.field();
        let mut stranded: SmallVec<[Entity; 8]> = SmallVec::new();
        for e in self.entities_of(Kind::Enemy) {
            let Ok(size) = self.world.get::<&Body>(e).map(|b| b.size) else {
                continue;
            };
            match find_spawn_point(
                &self.world,
                &mut self.rng,
                size,
                field,
                centre,
                self.cfg.spawn_dist,
                Some(e),
            ) {
                Ok(pos) => {
                    if let Ok(mut b) = self.world.get::<&mut Body>(e) {
                        b.pos = pos;
                    }
                }
                Err(err) => {
                    warn!(?e, %err, "no room to relocate enemy, removing it");
                    stranded.push(e);
                    continue;
                }
            }
            if let Ok(mut w) = self.world.get::<&mut Weapon>(e) {
                w.saturate();
            }
        }
        // Removed outright, so they are not counted as kills.
        if !stranded.is_empty() {
            self.roster.retain(|e| !stranded.contains(e));
            for &e in &stranded {
                self.world.despawn(e).ok();
            }
        }

        info!(
            deaths = self.stats.deaths,
            wave = self.scheduler.wave(),
            "player died, respawning"
        );
    }

    /// Drop everything flagged `TO_REMOVE` and count enemy kills.
    fn compact(&mut self) {
        let world = &self.world;
        let mut swept: SmallVec<[Entity; 16]> = SmallVec::new();
        self.roster.retain(|&e| {
            let gone = world
                .get::<&Flags>(e)
                .map_or(true, |f| f.0.contains(ActorFlags::TO_REMOVE));
            if gone {
                swept.push(e);
            }
            !gone
        });
        if swept.is_empty() {
            return;
        }

        for &e in &swept {
            if self.world.get::<&Kind>(e).is_ok_and(|k| *k == Kind::Enemy) {
                self.stats.kills += 1;
            }
            self.world.despawn(e).ok();
        }
        debug!(
            removed = swept.len(),
            kills = self.stats.kills,
            "swept roster"
        );
    }

    /* ---------------------------------------------------------------- */
    /* scene                                                            */
    /* ---------------------------------------------------------------- */

    /// Bodies in roster order, then swinging weapons on top.
    pub fn sprites(&self) -> Vec<Sprite> {
        let mut out = Vec::with_capacity(self.roster.len() * 2);
        for &e in &self.roster {
            let Ok(mut q) = self.world.query_one::<(&Body, &Tint, &Flags, &Health)>(e) else {
                continue;
            };
            if let Some((b, t, f, h)) = q.get() {
                out.push(Sprite {
                    pos: b.pos,
                    size: b.size,
                    color: t.0,
                    active: f.0.contains(ActorFlags::ACTIVE),
                    health: h.hurt_ratio(),
                });
            }
        }
        for &e in &self.roster {
            let Ok(w) = self.world.get::<&Weapon>(e) else {
                continue;
            };
            if w.active {
                out.push(Sprite {
                    pos: w.hitbox.pos,
                    size: w.hitbox.size,
                    color: w.color,
                    active: true,
                    health: None,
                });
            }
        }
        out
    }
}

/// Feeds wall-clock time into an [`Arena`].
pub struct TicRunner {
    arena: Arena,
    last: Instant,
}

impl TicRunner {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            last: Instant::now(),
        }
    }

    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    #[inline]
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Advance the arena by however much real time passed since last call.
    pub fn pump(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        self.arena.advance(dt.as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::classes::{BASIC, BIG};
    use crate::defs::weapons::{ENEMY_BASIC, MASTER, SPEAR};

    fn arena() -> Arena {
        Arena::new(ArenaConfig {
            floor: Some(FloorStyle::Grass),
            seed: 42,
            ..Default::default()
        })
        .unwrap()
    }

    fn centre(a: &Arena, e: Entity) -> Vec2 {
        a.world().get::<&Body>(e).unwrap().center()
    }

    #[test]
    fn starts_with_lone_player() {
        let a = arena();
        assert_eq!(a.roster(), &[a.player()]);
        assert_eq!(a.field(), Vec2::new(350.0, 350.0));
        assert_eq!(a.scheduler().wave(), 1);
        assert_eq!(a.enemy_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Arena::new(ArenaConfig {
            max_enemies: 0,
            ..Default::default()
        });
        assert!(matches!(err, Err(ConfigError::ZeroCap)));
    }

    #[test]
    fn first_wave_after_initial_delay() {
        let mut a = arena();
        a.advance(5999.0);
        assert_eq!(a.enemy_count(), 0);
        assert_eq!(a.stats().ticks, 99);
        a.advance(1.0);
        assert_eq!(a.enemy_count(), 1);
        assert_eq!(a.stats().ticks, 100);
        assert_eq!(a.scheduler().wave(), 2);
        assert_eq!(a.scheduler().delay_ms(), 6737.705);

        let e = a.entities_of(Kind::Enemy)[0];
        assert!(centre(&a, e).distance(centre(&a, a.player())) > 80.0 - 5.0);
    }

    #[test]
    fn pause_freezes_everything() {
        let mut a = arena();
        a.advance(3000.0);
        a.toggle_pause();
        assert!(a.is_paused());
        a.advance(60_000.0);
        a.tick();
        assert_eq!(a.stats().ticks, 50);
        assert_eq!(a.scheduler().countdown().remaining(), 3000.0);
        assert!(!a.swing_player());

        a.toggle_pause();
        a.advance(3000.0);
        assert_eq!(a.scheduler().wave(), 2);
    }

    #[test]
    fn paused_advance_leaves_queue_alone() {
        let mut a = arena();
        a.fire_wave();
        a.toggle_pause();
        a.advance(1000.0);
        assert_eq!(a.enemy_count(), 0);
        assert_eq!(a.roster(), &[a.player()]);

        a.toggle_pause();
        a.advance(0.0);
        assert_eq!(a.enemy_count(), 1);
    }

    #[test]
    fn enemy_without_room_is_removed_on_respawn() {
        let mut a = Arena::new(ArenaConfig {
            floor: Some(FloorStyle::Grass),
            seed: 7,
            spawn_dist: 1000.0,
            ..Default::default()
        })
        .unwrap();
        let old = a.player();
        let foe = a.spawn_enemy_at(&BASIC, &ENEMY_BASIC, Vec2::new(150.0, 150.0));

        a.world_mut().get::<&mut Health>(old).unwrap().hp = -1.0;
        a.tick();

        assert_eq!(a.stats().deaths, 1);
        assert!(!a.world().contains(foe));
        assert_eq!(a.roster(), &[a.player()]);
        assert_eq!(a.stats().kills, 0);
    }

    #[test]
    fn full_arena_holds_wave() {
        let mut a = Arena::new(ArenaConfig {
            floor: Some(FloorStyle::Grass),
            max_enemies: 1,
            ..Default::default()
        })
        .unwrap();
        a.spawn_enemy_at(&BIG, &ENEMY_BASIC, Vec2::new(0.0, 0.0));
        assert_eq!(a.fire_wave(), WaveOutcome::Skipped { wave: 1 });
        assert_eq!(a.scheduler().wave(), 1);
        assert_eq!(a.enemy_count(), 1);
    }

    #[test]
    fn kills_are_swept_and_counted() {
        let mut a = arena();
        let e = a.spawn_enemy_at(&BASIC, &ENEMY_BASIC, Vec2::new(0.0, 0.0));
        a.world_mut().get::<&mut Health>(e).unwrap().hp = 0.0;
        a.tick();
        assert_eq!(a.stats().kills, 1);
        assert_eq!(a.roster().len(), 1);
        assert!(!a.world().contains(e));
    }

    #[test]
    fn death_respawns_player_and_scatters_enemies() {
        let mut a = arena();
        a.equip_player(&MASTER);
        let old = a.player();
        let foe = a.spawn_enemy_at(&BIG, &ENEMY_BASIC, Vec2::new(150.0, 150.0));
        let wave = a.scheduler().wave();

        a.world_mut().get::<&mut Health>(old).unwrap().hp = -1.0;
        a.tick();

        assert_eq!(a.stats().deaths, 1);
        assert_ne!(a.player(), old);
        assert_eq!(a.roster()[0], a.player());
        assert!(!a.world().contains(old));
        assert_eq!(a.scheduler().wave(), wave);
        assert_eq!(
            a.world().get::<&Weapon>(a.player()).unwrap().template.name,
            "master"
        );
        assert_eq!(a.world().get::<&Health>(a.player()).unwrap().hp, 100.0);

        // Relocated clear of the new player, then stepped at most once.
        let gap = centre(&a, foe).distance(centre(&a, a.player()));
        assert!(gap > 80.0 - 3.0);
        let w = *a.world().get::<&Weapon>(foe).unwrap();
        assert_eq!(w.swing_count, w.swing_max);
    }

    #[test]
    fn clear_enemies_keeps_player() {
        let mut a = arena();
        a.spawn_enemy_at(&BASIC, &ENEMY_BASIC, Vec2::new(0.0, 0.0));
        a.spawn_enemy_at(&BIG, &ENEMY_BASIC, Vec2::new(300.0, 300.0));
        a.clear_enemies();
        assert_eq!(a.roster(), &[a.player()]);
        assert_eq!(a.world().len(), 1);
    }

    #[test]
    fn equipped_weapon_is_remembered() {
        let mut a = arena();
        assert_eq!(a.last_player_weapon().name, "start");
        assert!(a.equip_player(&SPEAR));
        assert_eq!(a.last_player_weapon().name, "spear");
    }

    #[test]
    fn projectile_queued_then_spent() {
        let mut a = arena();
        let dart = ProjectileTemplate::new(25.0, 4.0, 4.0, Color::RED).unwrap();
        a.fire_projectile(a.player(), dart, 180.0);
        assert_eq!(a.roster().len(), 1);
        a.flush_pending();
        let shots = a.entities_of(Kind::Projectile);
        assert_eq!(shots.len(), 1);
        a.tick();
        assert!(a.entities_of(Kind::Projectile).is_empty());
        assert_eq!(a.stats().kills, 0);
    }

    #[test]
    fn sprites_draw_weapons_last() {
        let mut a = arena();
        a.spawn_enemy_at(&BASIC, &ENEMY_BASIC, Vec2::new(0.0, 0.0));
        assert!(a.swing_player());
        let sprites = a.sprites();
        assert_eq!(sprites.len(), 3);
        assert_eq!(sprites[0].color, Color::BLUE);
        assert_eq!(sprites[1].color, BASIC.color);
        assert_eq!(sprites[2].color, Color::GREY);
        assert!(sprites.iter().all(|s| s.health.is_none()));
    }
}
