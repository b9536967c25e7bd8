//! Keyboard state with edge tracking
//!
//! Movement keys are read while held. One-shot actions (confirm, level
//! select, launch) fire once per press: the press is marked consumed and
//! only becomes available again after the key is released.

/// Game actions the frontend maps physical keys to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Launch,
    Confirm,
    Next,
    Previous,
}

impl Key {
    const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; Key::COUNT],
    consumed: [bool; Key::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    /// Releasing re-arms the key's one-shot action
    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
        self.consumed[key.index()] = false;
    }

    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// True once per press
    pub fn take_press(&mut self, key: Key) -> bool {
        let i = key.index();
        if self.held[i] && !self.consumed[i] {
            self.consumed[i] = true;
            true
        } else {
            false
        }
    }
}
