//! Draw contract for an external sprite renderer
//!
//! The core never touches the GPU. Every drawable entity turns into a
//! `SpriteInstance`, laid out so a renderer can upload a slice of them as an
//! instance buffer.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::sim::{Ball, Effects, Entity, GameMode, GameState, PowerUp, PowerUpKind};

/// Texture an entity is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Block,
    BlockSolid,
    Paddle,
    Ball,
    PowerUp(PowerUpKind),
}

impl Sprite {
    /// Stable texture slot for the renderer's atlas
    pub fn texture_id(self) -> u32 {
        match self {
            Sprite::Block => 0,
            Sprite::BlockSolid => 1,
            Sprite::Paddle => 2,
            Sprite::Ball => 3,
            Sprite::PowerUp(kind) => 4 + kind as u32,
        }
    }
}

/// One textured, tinted, optionally rotated quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct SpriteInstance {
    /// Top-left corner in screen pixels
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Degrees
    pub rotation: f32,
    pub color: [f32; 3],
    pub texture: u32,
}

/// Anything the renderer can draw
pub trait Drawable {
    fn sprite(&self) -> SpriteInstance;
}

impl Drawable for Entity {
    fn sprite(&self) -> SpriteInstance {
        SpriteInstance {
            position: self.pos.to_array(),
            size: self.size.to_array(),
            rotation: self.rotation,
            color: self.color.to_array(),
            texture: self.sprite.texture_id(),
        }
    }
}

impl Drawable for Ball {
    fn sprite(&self) -> SpriteInstance {
        self.body.sprite()
    }
}

impl Drawable for PowerUp {
    fn sprite(&self) -> SpriteInstance {
        self.body.sprite()
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub mode: GameMode,
    pub level: usize,
    pub lives: u32,
    pub effects: Effects,
    /// Back to front
    pub sprites: Vec<SpriteInstance>,
}

impl FrameSnapshot {
    /// Bricks, paddle, falling power-ups, then the ball
    pub fn capture(state: &GameState) -> Self {
        let level = state.current_level();
        let field = &state.field;

        let mut sprites: Vec<SpriteInstance> = level
            .bricks
            .iter()
            .filter(|b| !b.destroyed)
            .map(|b| b.sprite())
            .collect();
        sprites.push(field.paddle.sprite());
        sprites.extend(
            state
                .power_ups
                .iter()
                .filter(|p| !p.body.destroyed)
                .map(|p| p.sprite()),
        );
        sprites.push(field.ball.sprite());

        Self {
            mode: state.mode,
            level: state.level,
            lives: field.lives,
            effects: field.effects.clone(),
            sprites,
        }
    }

    /// Raw bytes for an instance buffer upload
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }
}
