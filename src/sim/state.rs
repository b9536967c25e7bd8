//! Game session state and core entity types
//!
//! Everything the frame update mutates lives in `GameState`, which is passed
//! explicitly into every collision and power-up operation.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::geometry::{Aabb, Circle};
use super::powerup::{self, PowerUp, PowerUpKind};
use crate::config::Config;
use crate::consts::*;
use crate::level::{Level, LevelError};
use crate::render::Sprite;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameMode {
    /// Level select, waiting for confirm
    Menu,
    /// Gameplay
    Active,
    /// Level cleared, waiting for confirm
    Win,
}

/// Base shape shared by bricks, the paddle, the ball and power-ups
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: Vec3,
    /// Degrees; only used for drawing
    pub rotation: f32,
    pub solid: bool,
    pub destroyed: bool,
    pub sprite: Sprite,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2, sprite: Sprite) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            color: Vec3::ONE,
            rotation: 0.0,
            solid: false,
            destroyed: false,
            sprite,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub body: Entity,
    pub radius: f32,
    /// Bound to the paddle; only moves with it
    pub stuck: bool,
    /// Next paddle contact sticks the ball again
    pub sticky: bool,
    /// Breakable bricks don't deflect the ball
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            body: Entity::new(pos, Vec2::splat(radius * 2.0), Sprite::Ball)
                .with_color(BALL_COLOR)
                .with_velocity(vel),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.pos + Vec2::splat(self.radius)
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.center(), self.radius)
    }

    /// Integrate velocity and bounce off the left, right and top edges.
    /// The bottom edge is open. Stuck balls don't move.
    pub fn advance(&mut self, dt: f32, screen_width: f32) -> Vec2 {
        if !self.stuck {
            let body = &mut self.body;
            body.pos += body.vel * dt;

            if body.pos.x <= 0.0 {
                body.vel.x = -body.vel.x;
                body.pos.x = 0.0;
            } else if body.pos.x + body.size.x >= screen_width {
                body.vel.x = -body.vel.x;
                body.pos.x = screen_width - body.size.x;
            }
            if body.pos.y <= 0.0 {
                body.vel.y = -body.vel.y;
                body.pos.y = 0.0;
            }
        }
        self.body.pos
    }

    /// Put the ball back on the paddle with fresh state
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.body.color = BALL_COLOR;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}

/// Full-screen effect flags read by the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Effects {
    pub confuse: bool,
    pub chaos: bool,
    pub shake: bool,
    /// Seconds of shake left
    pub shake_time: f32,
}

impl Effects {
    pub fn start_shake(&mut self, duration: f32) {
        self.shake = true;
        self.shake_time = duration;
    }

    /// Count down the shake timer
    pub fn update(&mut self, dt: f32) {
        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            if self.shake_time <= 0.0 {
                self.shake = false;
            }
        }
    }
}

/// The parts of the session power-up effects act on
#[derive(Debug, Clone)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    pub paddle: Entity,
    pub ball: Ball,
    pub effects: Effects,
    pub lives: u32,
}

impl Playfield {
    pub fn new(width: f32, height: f32, lives: u32) -> Self {
        let paddle_pos = Self::paddle_start(width, height);
        let ball = Ball::new(
            Self::ball_start(paddle_pos),
            BALL_RADIUS,
            INITIAL_BALL_VELOCITY,
        );
        Self {
            width,
            height,
            paddle: Entity::new(paddle_pos, PLAYER_SIZE, Sprite::Paddle).with_color(PADDLE_COLOR),
            ball,
            effects: Effects::default(),
            lives,
        }
    }

    fn paddle_start(width: f32, height: f32) -> Vec2 {
        Vec2::new(width / 2.0 - PLAYER_SIZE.x / 2.0, height - PLAYER_SIZE.y)
    }

    /// Ball resting on top of the paddle center
    fn ball_start(paddle_pos: Vec2) -> Vec2 {
        paddle_pos + Vec2::new(PLAYER_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0)
    }

    /// Paddle and ball back to their start, timed effects off
    pub fn reset_player(&mut self) {
        let paddle_pos = Self::paddle_start(self.width, self.height);
        self.paddle.size = PLAYER_SIZE;
        self.paddle.pos = paddle_pos;
        self.paddle.color = PADDLE_COLOR;
        self.ball
            .reset(Self::ball_start(paddle_pos), INITIAL_BALL_VELOCITY);
        self.effects.confuse = false;
        self.effects.chaos = false;
    }
}

/// Gameplay events for the frontend (audio cues, logging)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BrickBroken { pos: Vec2 },
    SolidBrickHit,
    PaddleHit,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    LifeLost { lives_left: u32 },
    GameOver,
    LevelCompleted { level: usize },
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    /// Index into `levels`
    pub level: usize,
    pub levels: Vec<Level>,
    pub field: Playfield,
    /// Falling drops plus collected ones still timing out
    pub power_ups: Vec<PowerUp>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub starting_lives: u32,
    disabled_power_ups: Vec<PowerUpKind>,
    rng: Pcg32,
}

impl GameState {
    /// Create a session in the menu. Fails if `levels` is empty.
    pub fn new(config: &Config, levels: Vec<Level>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        Ok(Self {
            mode: GameMode::Menu,
            level: 0,
            levels,
            field: Playfield::new(config.width, config.height, config.starting_lives),
            power_ups: Vec::new(),
            events: Vec::new(),
            starting_lives: config.starting_lives,
            disabled_power_ups: config.disabled_kinds(),
            rng: Pcg32::seed_from_u64(config.seed),
        })
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level]
    }

    /// Rebuild the current level, drop all power-ups, restore lives
    pub fn reset_level(&mut self) {
        self.power_ups.clear();
        self.levels[self.level].reset();
        self.field.lives = self.starting_lives;
    }

    /// Reset paddle and ball and drop every collected power-up; drops still
    /// falling stay in play
    pub fn reset_player(&mut self) {
        self.field.reset_player();
        self.power_ups.retain(|p| !p.body.destroyed);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Roll drops for a destroyed brick at `origin`
    pub(crate) fn spawn_power_ups(&mut self, origin: Vec2) {
        let disabled = &self.disabled_power_ups;
        let rng = &mut self.rng;
        let spawned = powerup::roll_spawns(origin, |kind| {
            !disabled.contains(&kind) && rng.random_range(0..kind.profile().chance) == 0
        });
        for p in &spawned {
            log::debug!("Spawned {} at {:?}", p.kind.name(), origin);
            self.events.push(GameEvent::PowerUpSpawned(p.kind));
        }
        self.power_ups.extend(spawned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_layout() {
        let field = Playfield::new(800.0, 600.0, 3);
        assert_eq!(field.paddle.pos, Vec2::new(350.0, 580.0));
        assert_eq!(field.ball.body.pos, Vec2::new(387.5, 555.0));
        assert_eq!(field.ball.body.size, Vec2::splat(25.0));
        assert!(field.ball.stuck);
        assert_eq!(field.ball.body.color, BALL_COLOR);
    }

    #[test]
    fn test_ball_bounces_off_walls() {
        let mut ball = Ball::new(Vec2::new(5.0, 5.0), 5.0, Vec2::new(-100.0, -100.0));
        ball.stuck = false;
        ball.advance(0.1, 800.0);
        assert_eq!(ball.body.pos, Vec2::ZERO);
        assert_eq!(ball.body.vel, Vec2::new(100.0, 100.0));

        let mut ball = Ball::new(Vec2::new(785.0, 300.0), 5.0, Vec2::new(100.0, 0.0));
        ball.stuck = false;
        ball.advance(0.1, 800.0);
        assert_eq!(ball.body.pos.x, 790.0);
        assert_eq!(ball.body.vel.x, -100.0);
    }

    #[test]
    fn test_ball_falls_through_bottom() {
        let mut ball = Ball::new(Vec2::new(100.0, 590.0), 5.0, Vec2::new(0.0, 100.0));
        ball.stuck = false;
        let pos = ball.advance(0.5, 800.0);
        assert_eq!(pos.y, 640.0);
        assert_eq!(ball.body.vel.y, 100.0);
    }

    #[test]
    fn test_stuck_ball_does_not_move() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 5.0, Vec2::new(50.0, -50.0));
        ball.advance(1.0, 800.0);
        assert_eq!(ball.body.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_shake_times_out() {
        let mut effects = Effects::default();
        effects.start_shake(0.05);
        effects.update(0.03);
        assert!(effects.shake);
        effects.update(0.03);
        assert!(!effects.shake);
    }

    fn one_level() -> Vec<Level> {
        vec![Level::parse("t", "2 2", 800.0, 300.0).unwrap()]
    }

    #[test]
    fn test_new_without_levels_fails() {
        let err = GameState::new(&Config::default(), Vec::new()).unwrap_err();
        assert!(matches!(err, LevelError::NoLevels));
    }

    #[test]
    fn test_reset_player_keeps_falling_drops() {
        let mut state = GameState::new(&Config::default(), one_level()).unwrap();
        let mut collected = PowerUp::new(PowerUpKind::Sticky, Vec2::ZERO);
        collected.body.destroyed = true;
        collected.activated = true;
        state.power_ups.push(collected);
        state.power_ups.push(PowerUp::new(PowerUpKind::Chaos, Vec2::new(10.0, 20.0)));

        state.reset_player();

        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].kind, PowerUpKind::Chaos);
        assert!(!state.power_ups[0].activated);
        assert!(!state.power_ups[0].body.destroyed);
    }

    #[test]
    fn test_reset_player_restores_defaults() {
        let mut field = Playfield::new(800.0, 600.0, 3);
        field.paddle.size.x = 250.0;
        field.paddle.pos.x = 10.0;
        field.paddle.color = PADDLE_STICKY_COLOR;
        field.ball.sticky = true;
        field.ball.pass_through = true;
        field.ball.stuck = false;
        field.effects.confuse = true;
        field.effects.chaos = true;

        field.reset_player();

        let fresh = Playfield::new(800.0, 600.0, 3);
        assert_eq!(field.paddle, fresh.paddle);
        assert_eq!(field.ball, fresh.ball);
        assert!(!field.effects.confuse && !field.effects.chaos);
    }
}
