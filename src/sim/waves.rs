//! Wave scheduling: which enemies come next and when.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use super::Countdown;
use crate::defs::WaveDesc;
use crate::defs::waves::{
    BOSS_CLASS, BOSS_WEAPON, PROCEDURAL_CLASSES, PROCEDURAL_WEAPONS, SCRIPTED_WAVES,
};

/// Delay (ms) that follows `d`, keyed on wave number `wave`.
///
/// Grows by a shrinking fraction of itself, doubles when `wave` is a
/// multiple of ten and relaxes again at the wave after it.
pub fn next_delay(d: f64, rate: f64, wave: u32) -> f64 {
    let inc = d * (rate / ((d / 4.1).floor() + 1.0));
    let mut d = d + inc;
    if wave % 10 == 0 {
        d *= 2.0;
    } else if wave % 10 == 1 && wave != 1 {
        d = d / 2.0 + inc;
    }
    (d * 1000.0).round() / 1000.0
}

/// Wave number the delay is keyed on once wave `n` has spawned.
///
/// Scripted waves look one ahead; generated waves use their own number,
/// so the delay doubles right after every boss wave.
pub fn delay_key(n: u32) -> u32 {
    if (n as usize) <= SCRIPTED_WAVES.len() { n + 1 } else { n }
}

/// Successive delays starting from `d0`: the delay after wave 1, after
/// wave 2, and so on.
pub fn delay_schedule(d0: f64, rate: f64) -> impl Iterator<Item = f64> {
    (1u32..).scan(d0, move |d, n| {
        *d = next_delay(*d, rate, delay_key(n));
        Some(*d)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavePhase {
    Scripted,
    Procedural,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveOutcome {
    /// Arena was full; wave `wave` will be retried next time.
    Skipped { wave: u32 },
    Spawned { wave: u32, desc: WaveDesc },
}

#[derive(Debug, Clone)]
pub struct WaveScheduler {
    wave: u32,
    delay_ms: f64,
    rate: f64,
    cap: usize,
    phase: WavePhase,
    countdown: Countdown,
}

impl WaveScheduler {
    pub fn new(delay_ms: f64, rate: f64, cap: usize) -> Self {
        Self {
            wave: 1,
            delay_ms,
            rate,
            cap,
            phase: WavePhase::Scripted,
            countdown: Countdown::new(delay_ms),
        }
    }

    /// Number of the next wave to spawn.
    #[inline]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    #[inline]
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    #[inline]
    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    #[inline]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    #[inline]
    pub fn countdown_mut(&mut self) -> &mut Countdown {
        &mut self.countdown
    }

    /// The countdown ran out: decide on the next wave and re-arm.
    ///
    /// `live` counts enemies on the field plus those already queued.
    pub fn fire<R: Rng + ?Sized>(&mut self, live: usize, rng: &mut R) -> WaveOutcome {
        let n = self.wave;
        let outcome = if live >= self.cap {
            WaveOutcome::Skipped { wave: n }
        } else {
            let desc = self.describe(n, rng);
            self.wave = n + 1;
            self.delay_ms = next_delay(self.delay_ms, self.rate, delay_key(n));
            WaveOutcome::Spawned { wave: n, desc }
        };
        self.countdown.rearm(self.delay_ms);
        outcome
    }

    fn describe<R: Rng + ?Sized>(&mut self, n: u32, rng: &mut R) -> WaveDesc {
        if let Some(desc) = SCRIPTED_WAVES.get(n as usize - 1) {
            return *desc;
        }
        if self.phase == WavePhase::Scripted {
            self.phase = WavePhase::Procedural;
            info!(wave = n, "scripted waves exhausted, generating from here on");
        }
        procedural(n, rng)
    }
}

/// Random wave `n`; every tenth one is a boss fight.
fn procedural<R: Rng + ?Sized>(n: u32, rng: &mut R) -> WaveDesc {
    if n % 10 == 0 {
        return WaveDesc {
            count: rng.gen_range(1..=2),
            class: BOSS_CLASS,
            weapon: BOSS_WEAPON,
        };
    }
    let class = PROCEDURAL_CLASSES.choose(rng).copied().unwrap_or(BOSS_CLASS);
    let weapon = PROCEDURAL_WEAPONS.choose(rng).copied().unwrap_or(BOSS_WEAPON);
    WaveDesc {
        count: rng.gen_range(2..4),
        class,
        weapon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::classes::{BASIC, BOSS};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn delay_recurrence() {
        assert_eq!(next_delay(6000.0, 180.0, 2), 6737.705);
        // Going into a tenth wave doubles; the one after relaxes.
        let before = 9000.0;
        let inc = before * (180.0 / ((before / 4.1f64).floor() + 1.0));
        assert_eq!(next_delay(before, 180.0, 10), ((before + inc) * 2.0 * 1000.0).round() / 1000.0);
        assert_eq!(
            next_delay(before, 180.0, 11),
            (((before + inc) / 2.0 + inc) * 1000.0).round() / 1000.0
        );
        // Wave 1 never gets the post-boss relaxation.
        assert_eq!(
            next_delay(before, 180.0, 1),
            ((before + inc) * 1000.0).round() / 1000.0
        );
    }

    #[test]
    fn schedule_starts_after_first_wave() {
        let first: Vec<f64> = delay_schedule(6000.0, 180.0).take(2).collect();
        assert_eq!(first[0], 6737.705);
        assert_eq!(first[1], next_delay(6737.705, 180.0, 3));
    }

    #[test]
    fn scripted_then_procedural() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut s = WaveScheduler::new(6000.0, 180.0, 25);
        for n in 1..=6 {
            match s.fire(0, &mut rng) {
                WaveOutcome::Spawned { wave, desc } => {
                    assert_eq!(wave, n);
                    assert_eq!(desc, SCRIPTED_WAVES[n as usize - 1]);
                }
                other => panic!("unexpected {other:?}"),
            }
            assert_eq!(s.phase(), WavePhase::Scripted);
        }
        for n in 7..=40 {
            let WaveOutcome::Spawned { wave, desc } = s.fire(0, &mut rng) else {
                panic!("wave {n} skipped");
            };
            assert_eq!(wave, n);
            assert_eq!(s.phase(), WavePhase::Procedural);
            if n % 10 == 0 {
                assert_eq!(desc.class.name, BOSS.name);
                assert!((1..=2).contains(&desc.count));
            } else {
                assert_ne!(desc.class.name, BOSS.name);
                assert!((2..4).contains(&desc.count));
            }
        }
        assert_eq!(s.wave(), 41);
    }

    #[test]
    fn delay_doubles_after_boss_wave() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut s = WaveScheduler::new(6000.0, 180.0, 25);
        let mut prev = s.delay_ms();
        for n in 1..=11 {
            assert!(matches!(s.fire(0, &mut rng), WaveOutcome::Spawned { wave, .. } if wave == n));
            let d = s.delay_ms();
            assert_eq!(d, next_delay(prev, 180.0, delay_key(n)));
            match n {
                9 => assert!(d < prev * 2.0),
                10 => assert!(d > prev * 2.0),
                11 => assert!(d < prev),
                _ => {}
            }
            prev = d;
        }
    }

    #[test]
    fn schedule_matches_scheduler() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut s = WaveScheduler::new(6000.0, 180.0, 25);
        for expected in delay_schedule(6000.0, 180.0).take(12) {
            s.fire(0, &mut rng);
            assert_eq!(s.delay_ms(), expected);
        }
    }

    #[test]
    fn full_arena_retries_same_wave() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut s = WaveScheduler::new(6000.0, 180.0, 25);
        assert_eq!(s.fire(25, &mut rng), WaveOutcome::Skipped { wave: 1 });
        assert_eq!(s.wave(), 1);
        assert_eq!(s.delay_ms(), 6000.0);
        assert_eq!(s.countdown().remaining(), 6000.0);

        let WaveOutcome::Spawned { wave, desc } = s.fire(24, &mut rng) else {
            panic!("expected a spawn");
        };
        assert_eq!((wave, desc.count, desc.class.name), (1, 1, BASIC.name));
        assert_eq!(s.delay_ms(), 6737.705);
        assert_eq!(s.countdown().remaining(), 6737.705);
    }
}
