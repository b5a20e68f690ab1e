//! Canvas 2D rendering module
//!
//! Everything on screen is a plain `CanvasRenderingContext2d` fill:
//! rectangles, one arc for the ball and a handful of text runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
