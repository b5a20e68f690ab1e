//! Platform abstraction layer
//!
//! Keeps scheduling portable: the simulation never reads a clock, it is fed
//! timestamps by whoever drives it (the browser's animation-frame callback,
//! or a test with a synthetic clock).

pub mod time;

pub use time::FrameGate;
