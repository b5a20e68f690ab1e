//! Keyboard and pointer mapping
//!
//! Direction keys set persistent held flags that the tick consumes; pointer
//! motion steers the paddle directly. DOM key strings are translated to a
//! closed vocabulary here so the driver stays a thin dispatcher, and anything
//! unrecognized maps to `None` and is dropped on the floor.

use super::state::GameState;

/// The game's complete keyboard vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Space: begin a new game while none is running
    Start,
    MusicToggle,
    SfxToggle,
    VolumeUp,
    VolumeDown,
}

impl Key {
    /// Translate a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " => Some(Key::Start),
            "m" | "M" => Some(Key::MusicToggle),
            "s" | "S" => Some(Key::SfxToggle),
            "ArrowUp" => Some(Key::VolumeUp),
            "ArrowDown" => Some(Key::VolumeDown),
            _ => None,
        }
    }
}

/// Record a key press; only the direction keys touch simulation state
pub fn key_down(state: &mut GameState, key: Key) {
    match key {
        Key::Left => state.input.left = true,
        Key::Right => state.input.right = true,
        _ => {}
    }
}

/// Record a key release
pub fn key_up(state: &mut GameState, key: Key) {
    match key {
        Key::Left => state.input.left = false,
        Key::Right => state.input.right = false,
        _ => {}
    }
}

/// Steer the paddle toward a pointer position (canvas x, pixels)
///
/// The pointer maps onto the paddle center, but only while it is strictly
/// inside the court; the per-tick clamp keeps the paddle legal even when the
/// mapped position pokes past an edge.
pub fn pointer_moved(state: &mut GameState, x: f32) {
    if x > 0.0 && x < state.tuning.court.x {
        state.paddle.pos.x = x - state.paddle.size.x / 2.0;
    }
}
