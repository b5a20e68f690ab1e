//! Per-tick simulation step
//!
//! The whole state machine advances through [`tick`]: one call applies one
//! fixed displacement, resolves collisions and settles the phase. Callers
//! learn what happened from the [`TickReport`] and drive scheduling off its
//! directive; ticks in any phase but `Running` are inert.

use super::collision;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::SPEED_STEP;

/// What the driver should do with the loop after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopDirective {
    /// Keep scheduling frames
    Continue,
    /// Stop frames and arm the delayed level resume instead
    ResumeAfterDelay,
    /// Stop the loop; the run is over
    Halt,
}

/// Everything one tick produced
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Events in the order they happened, for audio and logging
    pub events: Vec<GameEvent>,
    pub directive: LoopDirective,
}

impl TickReport {
    /// Report for a tick that was not allowed to do anything
    fn inert() -> Self {
        Self {
            events: Vec::new(),
            directive: LoopDirective::Continue,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) -> TickReport {
    if state.phase != GamePhase::Running {
        return TickReport::inert();
    }

    let mut events = Vec::new();
    let court = state.tuning.court;

    // Ball first, then the paddle under the held keys; a pointer-set paddle
    // position passes through the same clamp
    state.ball.pos += state.ball.vel;
    if state.input.right {
        state.paddle.shift(state.paddle.dx, court.x);
    }
    if state.input.left {
        state.paddle.shift(-state.paddle.dx, court.x);
    }
    state.paddle.clamp_x(court.x);

    collision::collide_walls(&mut state.ball, court);

    if collision::collide_paddle(&mut state.ball, &state.paddle, court) {
        events.push(GameEvent::PaddleHit);
    }

    for hit in collision::sweep_bricks(&mut state.ball, &mut state.bricks) {
        state.score += hit.points as u64;
        events.push(GameEvent::BrickHit {
            points: hit.points,
            destroyed: hit.destroyed,
        });
    }

    if state.level_cleared() {
        let directive = advance_level(state, &mut events);
        return TickReport { events, directive };
    }

    if collision::ball_lost(&state.ball, court) {
        let directive = lose_life(state, &mut events);
        return TickReport { events, directive };
    }

    TickReport {
        events,
        directive: LoopDirective::Continue,
    }
}

/// The grid is empty: stage the next level behind the transition pause
fn advance_level(state: &mut GameState, events: &mut Vec<GameEvent>) -> LoopDirective {
    state.level += 1;
    state.speed += SPEED_STEP;
    state.rebuild_bricks();
    state.reset_paddle();
    state.reset_ball();
    // Entities wait hidden under the banner until the resume timer fires
    state.ball.visible = false;
    state.paddle.visible = false;
    state.phase = GamePhase::LevelTransition;

    log::info!(
        "level cleared, {} up next at speed {}",
        state.level,
        state.speed
    );
    events.push(GameEvent::LevelComplete { level: state.level });
    LoopDirective::ResumeAfterDelay
}

/// The ball fell past the paddle
fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) -> LoopDirective {
    state.lives = state.lives.saturating_sub(1);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("game over, final score {}", state.score);
        events.push(GameEvent::GameOver { score: state.score });
        return LoopDirective::Halt;
    }

    events.push(GameEvent::BallLost {
        lives_left: state.lives,
    });
    state.reset_paddle();
    state.reset_ball();
    LoopDirective::Continue
}
