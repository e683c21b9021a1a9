use super::DefError;
use crate::world::Color;

/// How an enemy chooses where to go each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiPolicy {
    /// Re-aim at the player every tick.
    Pursue,
    /// Re-aim only every `steps` ticks, walking a straight line in between.
    PursueThenHold { steps: u32 },
}

/// Immutable description of one enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyClass {
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub speed: f32,
    pub hp: f32,
    pub policy: AiPolicy,
}

impl EnemyClass {
    pub fn validate(&self) -> Result<(), DefError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(DefError::BadSize {
                name: self.name,
                width: self.width,
                height: self.height,
            });
        }
        if !(self.speed >= 0.0) {
            return Err(DefError::BadSpeed(self.name));
        }
        if !(self.hp > 0.0) {
            return Err(DefError::BadHp(self.name));
        }
        if let AiPolicy::PursueThenHold { steps: 0 } = self.policy {
            return Err(DefError::ZeroSteps(self.name));
        }
        Ok(())
    }
}

pub static BASIC: EnemyClass = EnemyClass {
    name: "basic",
    width: 15.0,
    height: 15.0,
    color: Color::TEAL,
    speed: 5.0,
    hp: 10.0,
    policy: AiPolicy::PursueThenHold { steps: 10 },
};

pub static BIG: EnemyClass = EnemyClass {
    name: "big",
    width: 20.0,
    height: 20.0,
    color: Color::YELLOW,
    speed: 3.0,
    hp: 25.0,
    policy: AiPolicy::Pursue,
};

pub static SMALL: EnemyClass = EnemyClass {
    name: "small",
    width: 10.0,
    height: 10.0,
    color: Color::LIGHT_BLUE,
    speed: 7.0,
    hp: 5.0,
    policy: AiPolicy::PursueThenHold { steps: 17 },
};

pub static BOSS: EnemyClass = EnemyClass {
    name: "boss",
    width: 45.0,
    height: 45.0,
    color: Color::DARK_GREY,
    speed: 5.0,
    hp: 100.0,
    policy: AiPolicy::Pursue,
};

pub static ENEMY_CLASSES: [&EnemyClass; 4] = [&BASIC, &BIG, &SMALL, &BOSS];
