//! Scene painter for the 2D canvas context
//!
//! Stateless apart from the cached context handle: every frame redraws
//! the whole court from the current [`GameState`], so there is nothing
//! to keep in sync when the grid rebuilds or entities blink out.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::{Ball, GamePhase, GameState};

const COLOR_BACKDROP: &str = "#060a18";
const COLOR_STAR: &str = "#2c3e6b";
const COLOR_BALL: &str = "#e8ecff";
const COLOR_PADDLE: &str = "#4f6df5";
const COLOR_HUD: &str = "#9fb0ff";
const COLOR_TITLE: &str = "#7cfc00";
const COLOR_LEVEL: &str = "#ffd24a";
const COLOR_GAME_OVER: &str = "#ff4f5e";

const HUD_FONT: &str = "16px 'Courier New', monospace";
const BANNER_FONT: &str = "48px 'Courier New', monospace";
/// Advance width of one glyph in the banner font, used to center text
/// without a `measure_text` round trip
const BANNER_GLYPH_W: f64 = 28.8;
/// Advance width of one glyph in the HUD font
const HUD_GLYPH_W: f64 = 9.6;

const STAR_COUNT: usize = 70;

/// Draws the whole game from a [`GameState`] snapshot
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    /// Wrap the canvas element's 2d context. The element must already
    /// be sized to the court.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Repaint the full scene
    pub fn draw(&self, state: &GameState) {
        self.draw_backdrop();
        self.draw_bricks(state);
        if state.ball.visible {
            self.draw_ball(&state.ball);
        }
        if state.paddle.visible {
            self.draw_paddle(state);
        }
        self.draw_hud(state);
        self.draw_overlay(state);
    }

    fn draw_backdrop(&self) {
        self.ctx.set_fill_style_str(COLOR_BACKDROP);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        // Fixed starfield, positions hashed from the star index so the
        // sky never flickers between frames
        self.ctx.set_fill_style_str(COLOR_STAR);
        let (w, h) = (self.width as usize, self.height as usize);
        for i in 0..STAR_COUNT {
            let x = ((i * 97 + 31) % w) as f64;
            let y = ((i * 57 + 13) % h) as f64;
            self.ctx.fill_rect(x, y, 2.0, 2.0);
        }
    }

    fn draw_bricks(&self, state: &GameState) {
        for brick in &state.bricks {
            if !brick.alive() {
                continue;
            }
            self.ctx.set_fill_style_str(brick.color.css());
            self.ctx.fill_rect(
                brick.rect.pos.x as f64,
                brick.rect.pos.y as f64,
                brick.rect.size.x as f64,
                brick.rect.size.y as f64,
            );
        }
    }

    fn draw_ball(&self, ball: &Ball) {
        let r = ball.radius as f64;
        self.ctx.set_fill_style_str(COLOR_BALL);
        self.ctx.begin_path();
        self.ctx
            .arc(ball.pos.x as f64 + r, ball.pos.y as f64 + r, r, 0.0, TAU)
            .ok();
        self.ctx.fill();
    }

    fn draw_paddle(&self, state: &GameState) {
        let p = &state.paddle;
        self.ctx.set_fill_style_str(COLOR_PADDLE);
        self.ctx.fill_rect(
            p.pos.x as f64,
            p.pos.y as f64,
            p.size.x as f64,
            p.size.y as f64,
        );
    }

    fn draw_hud(&self, state: &GameState) {
        self.ctx.set_font(HUD_FONT);
        self.ctx.set_fill_style_str(COLOR_HUD);
        self.ctx
            .fill_text(&format!("Score: {}", state.score), 8.0, 20.0)
            .ok();

        let level = format!("Level: {}", state.level);
        let level_x = (self.width - level.len() as f64 * HUD_GLYPH_W) / 2.0;
        self.ctx.fill_text(&level, level_x, 20.0).ok();

        // Remaining lives as mini paddles, rightmost icon first
        self.ctx.set_fill_style_str(COLOR_PADDLE);
        for i in 0..state.lives.min(3) {
            let x = self.width - 50.0 * (i + 1) as f64;
            self.ctx.fill_rect(x, 9.0, 40.0, 13.0);
        }
    }

    fn draw_overlay(&self, state: &GameState) {
        let mid = self.height / 2.0;
        match state.phase {
            GamePhase::Running => {}
            GamePhase::Idle => {
                self.banner("BRICKOUT", COLOR_TITLE, mid - 16.0);
                self.caption("press space to launch", mid + 20.0);
            }
            GamePhase::LevelTransition => {
                self.banner(&format!("LEVEL {}!", state.level), COLOR_LEVEL, mid);
            }
            GamePhase::GameOver => {
                self.banner("GAME OVER", COLOR_GAME_OVER, mid - 16.0);
                self.caption("press space to play again", mid + 20.0);
            }
        }
    }

    /// Big centered banner line
    fn banner(&self, text: &str, color: &str, y: f64) {
        self.ctx.set_font(BANNER_FONT);
        self.ctx.set_fill_style_str(color);
        let x = ((self.width - text.len() as f64 * BANNER_GLYPH_W) / 2.0).max(0.0);
        self.ctx.fill_text(text, x, y).ok();
    }

    /// Small centered caption line
    fn caption(&self, text: &str, y: f64) {
        self.ctx.set_font(HUD_FONT);
        self.ctx.set_fill_style_str(COLOR_HUD);
        let x = ((self.width - text.len() as f64 * HUD_GLYPH_W) / 2.0).max(0.0);
        self.ctx.fill_text(text, x, y).ok();
    }
}
