//! Collision detection and response for the rectangular court
//!
//! Every rule is a pure function over entity state: walls reflect and clamp,
//! the paddle rescues and deflects, bricks absorb hits. The grid sweep pays
//! out every overlapped brick but lets only the first one steer the ball.

use glam::Vec2;

use super::state::{Ball, Brick, Paddle};
use crate::consts::{DEFLECT_BIAS, DEFLECT_SPAN};

/// Walls the ball bounced off during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// One brick damaged during a grid sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    /// Index into the grid storage
    pub index: usize,
    /// Points this hit pays out
    pub points: u32,
    /// Whether this hit emptied the brick
    pub destroyed: bool,
}

/// Bounce the ball off the side and top walls
///
/// Reflects the velocity component and clamps the ball flush to the wall it
/// crossed. The bottom edge is deliberately absent: falling past it is the
/// life-loss condition, not a bounce.
pub fn collide_walls(ball: &mut Ball, court: Vec2) -> WallContact {
    let mut contact = WallContact::default();
    let d = ball.radius * 2.0;

    if ball.pos.x < 0.0 {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = 0.0;
        contact.left = true;
    }
    if ball.pos.x + d > court.x {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = court.x - d;
        contact.right = true;
    }
    if ball.pos.y < 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = 0.0;
        contact.top = true;
    }
    contact
}

/// Paddle rescue test and response
///
/// A hit needs the ball's bottom edge inside the paddle's vertical band, the
/// ball's center still above the court floor, and the center strictly inside
/// the paddle's horizontal span. The response bounces the ball upward,
/// settles it flush on top of the paddle, and bends `dx` by where on the
/// paddle the ball landed.
pub fn collide_paddle(ball: &mut Ball, paddle: &Paddle, court: Vec2) -> bool {
    let d = ball.radius * 2.0;

    let in_band = ball.pos.y + d > court.y - paddle.size.y && ball.pos.y + ball.radius < court.y;
    let over_paddle =
        ball.center_x() > paddle.pos.x && ball.center_x() < paddle.pos.x + paddle.size.x;
    if !(in_band && over_paddle) {
        return false;
    }

    ball.vel.y = -ball.vel.y;
    ball.pos.y = court.y - paddle.size.y - d;

    // TODO: switch the deflection to a real angled bounce (sin/cos) instead
    // of the linear offset
    let offset = (ball.pos.x - paddle.pos.x) / paddle.size.x;
    ball.vel.x += offset * DEFLECT_SPAN - DEFLECT_BIAS;
    true
}

/// Sweep the brick grid in storage order
///
/// Every live brick overlapping the ball's bounding square takes one hit and
/// pays out; only the FIRST such brick decides the reflection axis. Dead
/// bricks keep their slots and are skipped.
pub fn sweep_bricks(ball: &mut Ball, bricks: &mut [Brick]) -> Vec<BrickHit> {
    let mut hits = Vec::new();
    let aabb = ball.aabb();

    for (index, brick) in bricks.iter_mut().enumerate() {
        if !brick.alive() || !aabb.overlaps(&brick.rect) {
            continue;
        }
        if hits.is_empty() {
            deflect_off_brick(ball, brick);
        }
        let points = brick.points;
        let destroyed = brick.register_hit();
        hits.push(BrickHit {
            index,
            points,
            destroyed,
        });
    }
    hits
}

/// Reflect off one brick, judging the entry side from the pre-step position
///
/// If the ball's span was entirely left or right of the brick one tick ago it
/// came in sideways and `dx` flips; any other approach flips `dy`.
fn deflect_off_brick(ball: &mut Ball, brick: &Brick) {
    let d = ball.radius * 2.0;
    let prev = ball.pos - ball.vel;

    let from_left = prev.x + d <= brick.rect.left();
    let from_right = prev.x >= brick.rect.right();
    if from_left || from_right {
        ball.vel.x = -ball.vel.x;
    } else {
        ball.vel.y = -ball.vel.y;
    }
}

/// Life-loss test: the ball's lower edge has passed the court floor
#[inline]
pub fn ball_lost(ball: &Ball, court: Vec2) -> bool {
    ball.pos.y + ball.radius * 2.0 > court.y
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURT: Vec2 = Vec2::new(480.0, 320.0);

    fn ball_at(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(dx, dy),
            radius: 10.0,
            visible: true,
        }
    }

    fn paddle_at(x: f32) -> Paddle {
        Paddle {
            pos: Vec2::new(x, COURT.y - 20.0),
            size: Vec2::new(100.0, 20.0),
            dx: 14.0,
            visible: true,
        }
    }

    fn brick_at(x: f32, y: f32, hits: u8) -> Brick {
        Brick {
            rect: crate::sim::rect::Rect::new(x, y, 48.0, 30.0),
            color: crate::sim::state::BrickColor::Red,
            points: 10,
            hits_left: hits,
        }
    }

    #[test]
    fn test_right_wall_reflects_and_clamps() {
        // Bounding square side is 20, so x=465 pokes past the 480 wall
        let mut ball = ball_at(465.0, 100.0, 5.0, -3.0);
        let contact = collide_walls(&mut ball, COURT);
        assert!(contact.right);
        assert_eq!(ball.vel.x, -5.0);
        assert_eq!(ball.pos.x, 460.0);
        // Vertical velocity untouched
        assert_eq!(ball.vel.y, -3.0);
    }

    #[test]
    fn test_left_wall_reflects_and_clamps() {
        let mut ball = ball_at(-3.0, 100.0, -5.0, 2.0);
        let contact = collide_walls(&mut ball, COURT);
        assert!(contact.left);
        assert_eq!(ball.vel.x, 5.0);
        assert_eq!(ball.pos.x, 0.0);
    }

    #[test]
    fn test_top_wall_reflects_and_clamps() {
        let mut ball = ball_at(200.0, -2.0, 3.0, -7.0);
        let contact = collide_walls(&mut ball, COURT);
        assert!(contact.top);
        assert_eq!(ball.vel.y, 7.0);
        assert_eq!(ball.pos.y, 0.0);
    }

    #[test]
    fn test_wall_reflection_preserves_speed() {
        let mut ball = ball_at(470.0, -5.0, 6.0, -4.0);
        let speed_before = ball.vel.length();
        collide_walls(&mut ball, COURT);
        assert!((ball.vel.length() - speed_before).abs() < 1e-5);
    }

    #[test]
    fn test_bottom_is_not_a_wall() {
        let mut ball = ball_at(200.0, 330.0, 2.0, 5.0);
        let contact = collide_walls(&mut ball, COURT);
        assert!(!contact.any());
        assert_eq!(ball.vel.y, 5.0);
    }

    #[test]
    fn test_paddle_hit_bounces_and_settles() {
        let paddle = paddle_at(190.0);
        // Bottom edge at 305 is inside the 300..320 band, center above floor
        let mut ball = ball_at(230.0, 285.0, 2.0, 7.0);
        assert!(collide_paddle(&mut ball, &paddle, COURT));
        assert_eq!(ball.vel.y, -7.0);
        // Flush on top of the paddle: 320 - 20 - 20
        assert_eq!(ball.pos.y, 280.0);
    }

    #[test]
    fn test_paddle_deflection_formula() {
        let paddle = paddle_at(190.0);

        // Impact at the paddle's left edge: offset 0 bends dx by -2
        let mut ball = ball_at(190.0, 285.0, 1.0, 7.0);
        assert!(collide_paddle(&mut ball, &paddle, COURT));
        assert!((ball.vel.x - (1.0 - 2.0)).abs() < 1e-5);

        // Dead center: offset 0.5 bends dx by +0.5
        let mut ball = ball_at(240.0, 285.0, 1.0, 7.0);
        assert!(collide_paddle(&mut ball, &paddle, COURT));
        assert!((ball.vel.x - (1.0 + 0.5)).abs() < 1e-5);

        // Far right of the reachable span: offset 0.8 bends dx by +2
        let mut ball = ball_at(270.0, 285.0, 1.0, 7.0);
        assert!(collide_paddle(&mut ball, &paddle, COURT));
        assert!((ball.vel.x - (1.0 + 2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_miss_beside() {
        let paddle = paddle_at(190.0);
        // Right depth, but the ball center (110) is left of the paddle span
        let mut ball = ball_at(100.0, 285.0, 2.0, 7.0);
        let before = ball;
        assert!(!collide_paddle(&mut ball, &paddle, COURT));
        assert_eq!(ball.pos, before.pos);
        assert_eq!(ball.vel, before.vel);
    }

    #[test]
    fn test_paddle_miss_too_deep() {
        let paddle = paddle_at(190.0);
        // Ball center already below the floor - the rescue window has closed
        let mut ball = ball_at(230.0, 311.0, 2.0, 7.0);
        assert!(!collide_paddle(&mut ball, &paddle, COURT));
    }

    #[test]
    fn test_brick_entry_from_side_flips_dx() {
        let mut bricks = vec![brick_at(100.0, 100.0, 1)];
        // One tick ago the ball's right edge (99) was left of the brick
        let mut ball = ball_at(84.0, 110.0, 5.0, 2.0);
        let hits = sweep_bricks(&mut ball, &mut bricks);
        assert_eq!(hits.len(), 1);
        assert_eq!(ball.vel.x, -5.0);
        assert_eq!(ball.vel.y, 2.0);
        assert!(hits[0].destroyed);
    }

    #[test]
    fn test_brick_entry_from_top_flips_dy() {
        let mut bricks = vec![brick_at(100.0, 100.0, 1)];
        // Dropping straight down onto the brick face
        let mut ball = ball_at(110.0, 85.0, 1.0, 6.0);
        let hits = sweep_bricks(&mut ball, &mut bricks);
        assert_eq!(hits.len(), 1);
        assert_eq!(ball.vel.x, 1.0);
        assert_eq!(ball.vel.y, -6.0);
    }

    #[test]
    fn test_multi_brick_tick_pays_all_flips_once() {
        let mut bricks = vec![brick_at(100.0, 100.0, 1), brick_at(148.0, 100.0, 1)];
        // Bounding square 138..158 straddles both bricks
        let mut ball = ball_at(138.0, 95.0, 0.0, 5.0);
        let hits = sweep_bricks(&mut ball, &mut bricks);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[1].index, 1);
        // Flipped exactly once, by the first brick in grid order
        assert_eq!(ball.vel.y, -5.0);
        assert!(!bricks[0].alive());
        assert!(!bricks[1].alive());
    }

    #[test]
    fn test_two_hit_brick_damages_then_destroys() {
        use crate::sim::state::BrickColor;

        let mut bricks = vec![brick_at(100.0, 100.0, 2)];
        let mut ball = ball_at(110.0, 85.0, 0.0, 6.0);
        let hits = sweep_bricks(&mut ball, &mut bricks);
        assert_eq!(hits.len(), 1);
        assert!(!hits[0].destroyed);
        assert_eq!(hits[0].points, 10);
        assert_eq!(bricks[0].hits_left, 1);
        assert_eq!(bricks[0].color, BrickColor::Damaged);
        assert!(bricks[0].alive());

        // Second pass through the same cell finishes it
        let mut ball = ball_at(110.0, 85.0, 0.0, 6.0);
        let hits = sweep_bricks(&mut ball, &mut bricks);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].destroyed);
        assert_eq!(hits[0].points, 10);
        assert!(!bricks[0].alive());
    }

    #[test]
    fn test_dead_brick_is_skipped() {
        let mut bricks = vec![brick_at(100.0, 100.0, 0)];
        let mut ball = ball_at(110.0, 85.0, 0.0, 6.0);
        let hits = sweep_bricks(&mut ball, &mut bricks);
        assert!(hits.is_empty());
        assert_eq!(ball.vel.y, 6.0);
    }

    #[test]
    fn test_ball_lost_at_lower_edge() {
        // Lower edge exactly at the floor: still in play
        let ball = ball_at(200.0, 300.0, 0.0, 5.0);
        assert!(!ball_lost(&ball, COURT));
        // One pixel further: gone
        let ball = ball_at(200.0, 301.0, 0.0, 5.0);
        assert!(ball_lost(&ball, COURT));
    }
}
