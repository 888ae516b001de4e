//! Keyboard input

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    /// Pause toggle
    P,
    /// Restart after game over
    Enter,
    Escape,
}

/// Anything that can answer "is this key held right now"
pub trait KeySource {
    fn is_key_held(&self, key: Key) -> bool;
}

/// Rising-edge detector.
///
/// Turns a level signal (held, or repeated OS press events) into exactly one
/// `true` per physical press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    down: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level; true only on the up-to-down transition
    pub fn observe(&mut self, down: bool) -> bool {
        let fired = down && !self.down;
        self.down = down;
        fired
    }
}
