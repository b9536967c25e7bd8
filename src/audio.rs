//! Sound cue contract
//!
//! The core raises `GameEvent`s; this module maps them to one-shot cues and
//! hands them to whatever backend the frontend plugs in.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Breakable brick destroyed
    BrickBreak,
    /// Ball bounced off a solid brick
    SolidHit,
    /// Ball bounced off the paddle
    PaddleBounce,
    /// Power-up caught
    PowerUpCollected,
}

impl SoundEffect {
    /// Cue for a gameplay event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BrickBroken { .. } => Some(SoundEffect::BrickBreak),
            GameEvent::SolidBrickHit => Some(SoundEffect::SolidHit),
            GameEvent::PaddleHit => Some(SoundEffect::PaddleBounce),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUpCollected),
            _ => None,
        }
    }

    /// Asset name a backend can look the cue up by
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::BrickBreak => "bleep.mp3",
            SoundEffect::SolidHit => "solid.wav",
            SoundEffect::PaddleBounce => "bleep.wav",
            SoundEffect::PowerUpCollected => "powerup.wav",
        }
    }
}

/// Something that can play a cue at a volume
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("♪ {:?} ({}) at {:.2}", effect, effect.asset(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the cue for every event that has one
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
