//! Data-driven game balance
//!
//! One simulation core, several game feels: every knob that used to differ
//! between the shipped variants lives here as plain data. `classic` is the
//! full arcade rule set; `minimal` is the sparse training-wheels court.

use glam::Vec2;

use crate::consts::START_LIVES;
use crate::sim::state::BrickColor;

/// How many points a brick pays per registered hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRule {
    /// Rows near the top pay more: `(rows - row) * step`
    RowLadder { step: u32 },
    /// Every brick pays the same
    Flat(u32),
}

impl ScoreRule {
    /// Point value for a brick in `row` (0 = top) of a `rows`-deep grid
    pub fn points(&self, row: u32, rows: u32) -> u32 {
        match *self {
            ScoreRule::RowLadder { step } => (rows - row) * step,
            ScoreRule::Flat(points) => points,
        }
    }
}

/// Complete parameter set for one game variant
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Court (canvas) dimensions in pixels
    pub court: Vec2,

    /// Ball radius; the ball occupies a `2r` square for collision purposes
    pub ball_radius: f32,
    /// Ball speed at level 1 (px/tick); grows by `SPEED_STEP` per level
    pub ball_speed: f32,

    /// Paddle width and height
    pub paddle_size: Vec2,
    /// Paddle speed (px/tick), or the bonus over ball speed when coupled
    pub paddle_speed: f32,
    /// Couple paddle speed to the current ball speed (`ball + paddle_speed`)
    pub paddle_speed_tracks_ball: bool,

    /// Brick grid depth (rows) and width (columns)
    pub rows: u32,
    pub cols: u32,
    /// Single brick dimensions
    pub brick_size: Vec2,
    /// Gap between neighboring bricks
    pub brick_padding: f32,
    /// Top-left corner of the grid
    pub grid_offset: Vec2,
    /// Row colors, cycled when the grid is deeper than the palette
    pub row_palette: &'static [BrickColor],
    /// Hits needed to destroy a top-row brick (rows below always take 1)
    pub top_row_hits: u8,
    /// Scoring rule applied per registered hit
    pub score_rule: ScoreRule,

    /// Lives at game start
    pub lives: u8,
}

impl Tuning {
    /// The full arcade rule set: 480x320 court, ladder scoring, durable
    /// top row, paddle speed that follows the ball across levels
    pub fn classic() -> Self {
        let court = Vec2::new(480.0, 320.0);
        let cols = 10;
        Self {
            court,
            ball_radius: 10.0,
            ball_speed: 7.0,
            paddle_size: Vec2::new(100.0, 20.0),
            paddle_speed: 7.0,
            paddle_speed_tracks_ball: true,
            rows: 5,
            cols,
            // Bricks span the court wall to wall
            brick_size: Vec2::new(court.x / cols as f32, 30.0),
            brick_padding: 0.0,
            grid_offset: Vec2::new(0.0, 30.0),
            row_palette: &[
                BrickColor::Red,
                BrickColor::Orange,
                BrickColor::Yellow,
                BrickColor::Blue,
                BrickColor::Green,
            ],
            top_row_hits: 2,
            score_rule: ScoreRule::RowLadder { step: 2 },
            lives: START_LIVES,
        }
    }

    /// The sparse court: bigger canvas, padded one-hit bricks, flat scoring,
    /// fixed paddle speed
    pub fn minimal() -> Self {
        Self {
            court: Vec2::new(800.0, 600.0),
            ball_radius: 10.0,
            ball_speed: 4.0,
            paddle_size: Vec2::new(80.0, 10.0),
            paddle_speed: 8.0,
            paddle_speed_tracks_ball: false,
            rows: 5,
            cols: 9,
            brick_size: Vec2::new(70.0, 20.0),
            brick_padding: 10.0,
            grid_offset: Vec2::new(45.0, 60.0),
            row_palette: &[BrickColor::Azure],
            top_row_hits: 1,
            score_rule: ScoreRule::Flat(1),
            lives: START_LIVES,
        }
    }

    /// Effective paddle speed for the current ball speed
    pub fn paddle_speed_for(&self, ball_speed: f32) -> f32 {
        if self.paddle_speed_tracks_ball {
            ball_speed + self.paddle_speed
        } else {
            self.paddle_speed
        }
    }

    /// Color for a grid row
    pub fn row_color(&self, row: u32) -> BrickColor {
        self.row_palette[row as usize % self.row_palette.len()]
    }

    /// Hits a brick in `row` starts with
    pub fn row_hits(&self, row: u32) -> u8 {
        if row == 0 { self.top_row_hits } else { 1 }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_grid_spans_court() {
        let t = Tuning::classic();
        let grid_w = t.cols as f32 * (t.brick_size.x + t.brick_padding);
        assert_eq!(grid_w, t.court.x);
    }

    #[test]
    fn test_ladder_scoring_top_rows_pay_more() {
        let t = Tuning::classic();
        assert_eq!(t.score_rule.points(0, t.rows), 10);
        assert_eq!(t.score_rule.points(1, t.rows), 8);
        assert_eq!(t.score_rule.points(4, t.rows), 2);
    }

    #[test]
    fn test_flat_scoring() {
        let t = Tuning::minimal();
        assert_eq!(t.score_rule.points(0, t.rows), 1);
        assert_eq!(t.score_rule.points(4, t.rows), 1);
    }

    #[test]
    fn test_paddle_speed_coupling() {
        let classic = Tuning::classic();
        assert_eq!(classic.paddle_speed_for(7.0), 14.0);
        assert_eq!(classic.paddle_speed_for(9.0), 16.0);

        let minimal = Tuning::minimal();
        assert_eq!(minimal.paddle_speed_for(4.0), 8.0);
        assert_eq!(minimal.paddle_speed_for(9.0), 8.0);
    }

    #[test]
    fn test_top_row_durability() {
        let t = Tuning::classic();
        assert_eq!(t.row_hits(0), 2);
        assert_eq!(t.row_hits(1), 1);
        assert_eq!(t.row_hits(4), 1);
    }

    #[test]
    fn test_palette_cycles() {
        let t = Tuning::minimal();
        assert_eq!(t.row_color(0), BrickColor::Azure);
        assert_eq!(t.row_color(4), BrickColor::Azure);
    }
}
