//! Brickbreak - A classic brick-breaker game core
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (collisions, power-ups, game flow)
//! - `level`: Level definitions and brick layout
//! - `render`: Draw contract for an external sprite renderer
//! - `audio`: Sound cue contract for an external audio backend
//! - `input`: Key state with edge tracking
//! - `config`: Game configuration

pub mod audio;
pub mod config;
pub mod input;
pub mod level;
pub mod render;
pub mod sim;

pub use config::Config;
pub use level::{Level, LevelError};

/// Game configuration constants
pub mod consts {
    use glam::{Vec2, Vec3};

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Paddle speed (pixels/s)
    pub const PLAYER_VELOCITY: f32 = 500.0;
    /// Width added or removed by the pad-size power-ups
    pub const PAD_RESIZE_STEP: f32 = 50.0;

    /// Ball defaults
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    pub const BALL_RADIUS: f32 = 12.5;
    /// How strongly the paddle contact offset steers the ball
    pub const PADDLE_STRENGTH: f32 = 2.0;

    /// Power-up drops
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    pub const SPEED_UP_FACTOR: f32 = 1.2;
    pub const SPEED_DOWN_FACTOR: f32 = 0.8;

    /// Camera shake after a solid brick hit (seconds)
    pub const SHAKE_TIME: f32 = 0.05;

    pub const STARTING_LIVES: u32 = 3;

    /// Entity colors
    pub const BALL_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const BALL_PASS_THROUGH_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.5);
    pub const PADDLE_COLOR: Vec3 = Vec3::ONE;
    pub const PADDLE_STICKY_COLOR: Vec3 = Vec3::new(1.0, 0.5, 1.0);
}
