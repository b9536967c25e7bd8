//! Power-up drops: spawning, collection, timed effects and expiry
//!
//! A drop falls from a destroyed brick. Touching the paddle applies its
//! effect and marks it `activated`; it stays in the list, invisible, until
//! its timer runs out. Shared flags (sticky, pass-through, confuse, chaos)
//! are only cleared when the last activated instance of that kind expires.

use glam::{Vec2, Vec3};

use super::collision::check_aabb;
use super::state::{Entity, Playfield};
use crate::consts::*;
use crate::render::Sprite;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    SpeedUp,
    SpeedDown,
    Sticky,
    PassThrough,
    PadIncrease,
    PadDecrease,
    Confuse,
    Chaos,
    LifeUp,
}

/// Static data for one kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpProfile {
    /// Drop chance is 1 in `chance`
    pub chance: u32,
    pub color: Vec3,
    /// Seconds the effect lasts; 0 for one-shot effects
    pub duration: f32,
}

impl PowerUpKind {
    /// Spawn roll order
    pub const ALL: [PowerUpKind; 9] = [
        PowerUpKind::SpeedUp,
        PowerUpKind::SpeedDown,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadIncrease,
        PowerUpKind::PadDecrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
        PowerUpKind::LifeUp,
    ];

    pub fn profile(self) -> PowerUpProfile {
        let (chance, color, duration) = match self {
            PowerUpKind::SpeedUp => (30, Vec3::new(0.5, 0.5, 1.0), 0.0),
            PowerUpKind::SpeedDown => (50, Vec3::new(0.5, 0.5, 1.0), 0.0),
            PowerUpKind::Sticky => (60, Vec3::new(1.0, 0.5, 1.0), 20.0),
            PowerUpKind::PassThrough => (75, Vec3::new(0.5, 1.0, 0.5), 10.0),
            PowerUpKind::PadIncrease => (50, Vec3::new(1.0, 0.6, 0.4), 0.0),
            PowerUpKind::PadDecrease => (40, Vec3::new(1.0, 0.0, 0.0), 0.0),
            PowerUpKind::Confuse => (30, Vec3::new(1.0, 0.3, 0.3), 15.0),
            PowerUpKind::Chaos => (30, Vec3::new(0.9, 0.25, 0.25), 15.0),
            PowerUpKind::LifeUp => (100, Vec3::new(1.0, 0.5, 0.5), 0.0),
        };
        PowerUpProfile {
            chance,
            color,
            duration,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::SpeedUp => "speed-up",
            PowerUpKind::SpeedDown => "speed-down",
            PowerUpKind::Sticky => "sticky",
            PowerUpKind::PassThrough => "pass-through",
            PowerUpKind::PadIncrease => "pad-increase",
            PowerUpKind::PadDecrease => "pad-decrease",
            PowerUpKind::Confuse => "confuse",
            PowerUpKind::Chaos => "chaos",
            PowerUpKind::LifeUp => "life-up",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == s)
    }

    /// Whether the effect is undone when the timer runs out
    pub fn is_timed(self) -> bool {
        self.profile().duration > 0.0
    }
}

/// A power-up drop
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub body: Entity,
    pub kind: PowerUpKind,
    /// Seconds left once activated
    pub duration: f32,
    /// Collected and currently in effect
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        let profile = kind.profile();
        Self {
            body: Entity::new(pos, POWERUP_SIZE, Sprite::PowerUp(kind))
                .with_color(profile.color)
                .with_velocity(POWERUP_VELOCITY),
            kind,
            duration: profile.duration,
            activated: false,
        }
    }
}

/// Roll every kind independently; `roll` decides whether a kind drops
pub fn roll_spawns(origin: Vec2, mut roll: impl FnMut(PowerUpKind) -> bool) -> Vec<PowerUp> {
    PowerUpKind::ALL
        .into_iter()
        .filter(|&kind| roll(kind))
        .map(|kind| PowerUp::new(kind, origin))
        .collect()
}

/// Apply a collected power-up's effect
pub fn activate(kind: PowerUpKind, field: &mut Playfield) {
    let ball = &mut field.ball;
    match kind {
        PowerUpKind::SpeedUp => {
            ball.body.vel *= SPEED_UP_FACTOR;
        }
        PowerUpKind::SpeedDown => {
            // Signed compare: falling or slow rising balls scale, fast rising ones clamp
            let half_vy = INITIAL_BALL_VELOCITY.y / 2.0;
            let vel = &mut ball.body.vel;
            if vel.y > half_vy {
                *vel *= SPEED_DOWN_FACTOR;
            } else {
                vel.x = half_vy.abs().copysign(vel.x);
                vel.y = half_vy;
            }
        }
        PowerUpKind::Sticky => {
            ball.sticky = true;
            field.paddle.color = PADDLE_STICKY_COLOR;
        }
        PowerUpKind::PassThrough => {
            ball.pass_through = true;
            ball.body.color = BALL_PASS_THROUGH_COLOR;
        }
        PowerUpKind::PadIncrease => {
            field.paddle.size.x += PAD_RESIZE_STEP;
        }
        PowerUpKind::PadDecrease => {
            let min_width = PLAYER_SIZE.x / 2.0;
            field.paddle.size.x = (field.paddle.size.x - PAD_RESIZE_STEP).max(min_width);
        }
        PowerUpKind::Confuse => {
            if !field.effects.chaos {
                field.effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !field.effects.confuse {
                field.effects.chaos = true;
            }
        }
        PowerUpKind::LifeUp => {
            field.lives += 1;
        }
    }
}

/// Undo a timed effect. One-shot kinds have nothing to undo.
pub fn deactivate(kind: PowerUpKind, field: &mut Playfield) {
    match kind {
        PowerUpKind::Sticky => {
            field.ball.sticky = false;
            field.paddle.color = PADDLE_COLOR;
        }
        PowerUpKind::PassThrough => {
            field.ball.pass_through = false;
            field.ball.body.color = BALL_COLOR;
        }
        PowerUpKind::Confuse => field.effects.confuse = false,
        PowerUpKind::Chaos => field.effects.chaos = false,
        PowerUpKind::SpeedUp
        | PowerUpKind::SpeedDown
        | PowerUpKind::PadIncrease
        | PowerUpKind::PadDecrease
        | PowerUpKind::LifeUp => {}
    }
}

/// Whether any instance of `kind` is still in effect
pub fn is_other_active(power_ups: &[PowerUp], kind: PowerUpKind) -> bool {
    power_ups.iter().any(|p| p.activated && p.kind == kind)
}

/// Drop off-screen power-ups and collect the ones touching the paddle.
/// Returns the kinds collected this frame, in list order.
pub fn collect(power_ups: &mut [PowerUp], field: &mut Playfield) -> Vec<PowerUpKind> {
    let mut collected = Vec::new();
    for p in power_ups.iter_mut().filter(|p| !p.body.destroyed) {
        if p.body.pos.y > field.height {
            p.body.destroyed = true;
        }
        if check_aabb(&field.paddle.aabb(), &p.body.aabb()) {
            activate(p.kind, field);
            p.body.destroyed = true;
            p.activated = true;
            collected.push(p.kind);
        }
    }
    collected
}

/// Move drops, run down timers and prune finished instances.
/// Returns the kinds that expired this frame.
pub fn age(power_ups: &mut Vec<PowerUp>, field: &mut Playfield, dt: f32) -> Vec<PowerUpKind> {
    let mut expired = Vec::new();
    for i in 0..power_ups.len() {
        let p = &mut power_ups[i];
        p.body.pos += p.body.vel * dt;
        if !p.activated {
            continue;
        }
        p.duration -= dt;
        if p.duration <= 0.0 {
            p.activated = false;
            let kind = p.kind;
            if kind.is_timed() {
                if !is_other_active(&power_ups[..], kind) {
                    deactivate(kind, field);
                }
                expired.push(kind);
            }
        }
    }
    power_ups.retain(|p| !(p.body.destroyed && !p.activated));
    expired
}
