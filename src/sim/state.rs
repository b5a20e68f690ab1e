//! Game state and core simulation types
//!
//! Everything the loop mutates lives here, owned by a single [`GameState`]
//! context; entities are built with the session and are never absent.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Pre-start splash, waiting for the start key
    Idle,
    /// Active gameplay
    Running,
    /// Grid cleared; the next level is built and waiting on the resume timer
    LevelTransition,
    /// Run ended; positions are frozen
    GameOver,
}

/// Row colors plus the damaged state a multi-hit brick degrades into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickColor {
    Red,
    Orange,
    Yellow,
    Blue,
    Green,
    Azure,
    Damaged,
}

impl BrickColor {
    /// CSS color the renderer paints this brick with
    pub fn css(&self) -> &'static str {
        match self {
            BrickColor::Red => "red",
            BrickColor::Orange => "orange",
            BrickColor::Yellow => "yellow",
            BrickColor::Blue => "blue",
            BrickColor::Green => "green",
            BrickColor::Azure => "#0095dd",
            BrickColor::Damaged => "darkgray",
        }
    }
}

/// Something a tick wants the outside world to hear about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PaddleHit,
    BrickHit { points: u32, destroyed: bool },
    BallLost { lives_left: u8 },
    LevelComplete { level: u32 },
    GameOver { score: u64 },
}

/// The ball entity
///
/// `pos` is the top-left corner of the ball's bounding square (side `2r`),
/// matching how the sprite is placed on the canvas; the collision rules work
/// on that square.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement applied each tick (px/tick, not px/s)
    pub vel: Vec2,
    pub radius: f32,
    pub visible: bool,
}

impl Ball {
    /// Bounding square used by the collision rules
    #[inline]
    pub fn aabb(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(self.radius * 2.0),
        }
    }

    /// Horizontal center of the ball
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// The player's paddle; `pos` is its top-left corner
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed applied per tick while a direction key is held
    pub dx: f32,
    pub visible: bool,
}

impl Paddle {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Move horizontally, then clamp back inside the court
    pub fn shift(&mut self, delta: f32, court_w: f32) {
        self.pos.x += delta;
        self.clamp_x(court_w);
    }

    /// Keep the paddle fully inside `[0, court_w]`
    pub fn clamp_x(&mut self, court_w: f32) {
        self.pos.x = self.pos.x.clamp(0.0, court_w - self.size.x);
    }
}

/// One cell of the brick grid
///
/// A destroyed brick keeps its slot with `hits_left == 0`; the grid is built
/// once per level and only ever mutated in place, never shrunk.
#[derive(Debug, Clone, Copy)]
pub struct Brick {
    pub rect: Rect,
    pub color: BrickColor,
    /// Points paid out per registered hit
    pub points: u32,
    pub hits_left: u8,
}

impl Brick {
    #[inline]
    pub fn alive(&self) -> bool {
        self.hits_left > 0
    }

    /// Take one hit; returns true when this hit destroyed the brick
    pub fn register_hit(&mut self) -> bool {
        self.hits_left = self.hits_left.saturating_sub(1);
        if self.hits_left == 1 {
            self.color = BrickColor::Damaged;
        }
        self.hits_left == 0
    }
}

/// Held directional keys; set and cleared by input events, read by the tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

/// Complete game state (deterministic, owned context)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Variant parameters this session was built with
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Score, monotonically non-decreasing within a run
    pub score: u64,
    /// Player lives
    pub lives: u8,
    /// Current level (1-based)
    pub level: u32,
    /// Ball speed magnitude (px/tick); grows by `SPEED_STEP` per level
    pub speed: f32,
    /// Held directional keys
    pub input: InputState,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Row-major grid, top row first; storage order is the collision
    /// tie-break order
    pub bricks: Vec<Brick>,
    rng: Pcg32,
}

impl GameState {
    /// Create a fully populated Idle session for one variant
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        debug_assert!(tuning.ball_radius > 0.0);
        debug_assert!(tuning.paddle_size.x > 0.0 && tuning.paddle_size.y > 0.0);
        debug_assert!(tuning.rows > 0 && tuning.cols > 0);

        let ball = Ball {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: tuning.ball_radius,
            visible: true,
        };
        let paddle = Paddle {
            pos: Vec2::ZERO,
            size: tuning.paddle_size,
            dx: 0.0,
            visible: true,
        };

        let mut state = Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            lives: tuning.lives,
            level: 1,
            speed: tuning.ball_speed,
            input: InputState::default(),
            ball,
            paddle,
            bricks: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.rebuild_bricks();
        state.reset_paddle();
        state.reset_ball();
        state
    }

    /// Begin a fresh run: counters back to start values, new grid, new serve
    pub fn start(&mut self) {
        self.score = 0;
        self.lives = self.tuning.lives;
        self.level = 1;
        self.speed = self.tuning.ball_speed;
        self.rebuild_bricks();
        self.reset_paddle();
        self.reset_ball();
        self.phase = GamePhase::Running;
    }

    /// Return from the level-transition pause to live play
    pub fn resume_level(&mut self) {
        if self.phase == GamePhase::LevelTransition {
            self.ball.visible = true;
            self.paddle.visible = true;
            self.phase = GamePhase::Running;
        }
    }

    /// Center the ball above the paddle and serve with a random heading
    pub fn reset_ball(&mut self) {
        let r = self.ball.radius;
        self.ball.pos = Vec2::new(
            self.tuning.court.x / 2.0,
            self.tuning.court.y - self.paddle.size.y - 2.0 * r,
        );
        let heading: f32 = self.rng.random_range(-1.0..1.0);
        self.ball.vel = Vec2::new(self.speed * heading, -self.speed);
        self.ball.visible = true;
    }

    /// Center the paddle and re-derive its speed from the current ball speed
    pub fn reset_paddle(&mut self) {
        self.paddle.pos = Vec2::new(
            (self.tuning.court.x - self.paddle.size.x) / 2.0,
            self.tuning.court.y - self.paddle.size.y,
        );
        self.paddle.dx = self.tuning.paddle_speed_for(self.speed);
        self.paddle.visible = true;
    }

    /// Replace the grid with a freshly built one for the current level
    pub fn rebuild_bricks(&mut self) {
        self.bricks = build_grid(&self.tuning);
    }

    /// True when every brick in the grid is destroyed
    pub fn level_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.alive())
    }

    /// Bricks still standing (log helper)
    pub fn alive_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive()).count()
    }
}

/// Build the row-major brick grid for a variant
pub fn build_grid(tuning: &Tuning) -> Vec<Brick> {
    let mut bricks = Vec::with_capacity((tuning.rows * tuning.cols) as usize);
    for row in 0..tuning.rows {
        for col in 0..tuning.cols {
            let pos = Vec2::new(
                tuning.grid_offset.x + col as f32 * (tuning.brick_size.x + tuning.brick_padding),
                tuning.grid_offset.y + row as f32 * (tuning.brick_size.y + tuning.brick_padding),
            );
            bricks.push(Brick {
                rect: Rect {
                    pos,
                    size: tuning.brick_size,
                },
                color: tuning.row_color(row),
                points: tuning.score_rule.points(row, tuning.rows),
                hits_left: tuning.row_hits(row),
            });
        }
    }
    bricks
}
