//! Brickout - a space-themed brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game loop)
//! - `renderer`: 2D canvas rendering
//! - `platform`: Frame pacing for the browser scheduler
//! - `audio`: Synthesized sound effects and music
//! - `tuning`: Data-driven game balance (variant presets)

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use sim::state::GameState;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Minimum interval between simulation ticks (ms); the frame gate
    /// skips animation-frame callbacks that arrive sooner
    pub const TICK_INTERVAL_MS: f64 = 16.0;
    /// Pause between clearing a level and serving the next one (ms)
    pub const LEVEL_RESUME_DELAY_MS: f64 = 3000.0;
    /// Background music starts this long after the start jingle (s)
    pub const MUSIC_START_DELAY_S: f64 = 2.0;

    /// Lives at the start of a game
    pub const START_LIVES: u8 = 3;
    /// Ball speed gained per cleared level (px/tick)
    pub const SPEED_STEP: f32 = 1.0;

    /// Paddle deflection: impact offset across the paddle maps onto this
    /// span of horizontal velocity change (px/tick)
    pub const DEFLECT_SPAN: f32 = 5.0;
    /// Paddle deflection: subtracted so a center hit is nearly neutral
    pub const DEFLECT_BIAS: f32 = 2.0;

    /// Master volume step for the ArrowUp/ArrowDown bindings
    pub const VOLUME_STEP: f32 = 0.1;
    /// Master volume at startup
    pub const DEFAULT_VOLUME: f32 = 0.5;
}
