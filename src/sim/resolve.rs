//! Collision response for the ball
//!
//! Bricks reflect the ball along the axis it hit and push it back out by the
//! penetration depth. The paddle steers the ball based on where it landed.

use glam::Vec2;

use super::collision::{Collision, Direction};
use super::state::{Ball, Entity};
use crate::consts::*;

/// What happened to a brick the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    /// Breakable brick, now destroyed
    Broken,
    /// Solid brick, unchanged
    Solid,
}

/// Respond to a ball hitting a brick
///
/// A pass-through ball still breaks breakable bricks but only bounces off
/// solid ones.
pub fn resolve_brick(ball: &mut Ball, brick: &mut Entity, collision: &Collision) -> BrickHit {
    let outcome = if brick.solid {
        BrickHit::Solid
    } else {
        brick.destroyed = true;
        BrickHit::Broken
    };

    if !(ball.pass_through && !brick.solid) {
        bounce_off_box(ball, collision);
    }
    outcome
}

/// Flip the velocity component along the hit axis and move the ball out of
/// the box so it sits exactly one radius from the contact point
pub fn bounce_off_box(ball: &mut Ball, collision: &Collision) {
    let radius = ball.radius;
    let body = &mut ball.body;
    if collision.direction.is_horizontal() {
        body.vel.x = -body.vel.x;
        let penetration = radius - collision.penetration.x.abs();
        if collision.direction == Direction::Left {
            body.pos.x += penetration;
        } else {
            body.pos.x -= penetration;
        }
    } else {
        body.vel.y = -body.vel.y;
        let penetration = radius - collision.penetration.y.abs();
        if collision.direction == Direction::Up {
            body.pos.y -= penetration;
        } else {
            body.pos.y += penetration;
        }
    }
}

/// Bounce the ball off the paddle
///
/// The further from the paddle center the ball lands, the more horizontal
/// speed it gets. Total speed is unchanged and the ball always leaves upward.
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Entity) {
    let half_width = paddle.size.x / 2.0;
    let paddle_center = paddle.pos.x + half_width;
    let distance = (ball.body.pos.x + ball.radius) - paddle_center;
    let percentage = distance / half_width;

    let old_vel = ball.body.vel;
    let steered = Vec2::new(
        INITIAL_BALL_VELOCITY.x * percentage * PADDLE_STRENGTH,
        old_vel.y,
    );
    let mut vel = steered.normalize_or_zero() * old_vel.length();
    vel.y = -vel.y.abs();

    ball.body.vel = vel;
    ball.stuck = ball.sticky;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Sprite;
    use crate::sim::collision::check_ball_box;
    use proptest::prelude::*;

    fn brick(pos: Vec2, size: Vec2, solid: bool) -> Entity {
        let mut e = Entity::new(pos, size, Sprite::Block);
        e.solid = solid;
        e
    }

    fn free_ball(pos: Vec2, radius: f32, vel: Vec2) -> Ball {
        let mut ball = Ball::new(pos, radius, vel);
        ball.stuck = false;
        ball
    }

    #[test]
    fn test_solid_brick_below_end_to_end() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), 10.0, Vec2::new(0.0, -200.0));
        let mut solid = brick(Vec2::new(80.0, 115.0), Vec2::new(60.0, 20.0), true);

        let collision = check_ball_box(&ball.circle(), &solid.aabb());
        assert!(collision.hit);
        assert_eq!(collision.direction, Direction::Up);

        let outcome = resolve_brick(&mut ball, &mut solid, &collision);
        assert_eq!(outcome, BrickHit::Solid);
        assert!(!solid.destroyed);
        assert_eq!(ball.body.vel, Vec2::new(0.0, 200.0));
        // Penetration was 10 - 5
        assert_eq!(ball.body.pos.y, 95.0);

        assert!(!check_ball_box(&ball.circle(), &solid.aabb()).hit);
    }

    #[test]
    fn test_breakable_brick_side_hit() {
        // Ball center 3px left of the brick's left edge
        let mut ball = free_ball(Vec2::new(87.0, 140.0), 10.0, Vec2::new(150.0, 20.0));
        let mut b = brick(Vec2::new(100.0, 130.0), Vec2::new(60.0, 40.0), false);

        let collision = check_ball_box(&ball.circle(), &b.aabb());
        assert_eq!(collision.direction, Direction::Right);

        assert_eq!(resolve_brick(&mut ball, &mut b, &collision), BrickHit::Broken);
        assert!(b.destroyed);
        assert_eq!(ball.body.vel, Vec2::new(-150.0, 20.0));
        assert_eq!(ball.body.pos.x, 80.0);
    }

    #[test]
    fn test_pass_through_ignores_breakable_bricks() {
        let vel = Vec2::new(0.0, -200.0);
        let mut ball = free_ball(Vec2::new(100.0, 100.0), 10.0, vel);
        ball.pass_through = true;
        let mut b = brick(Vec2::new(80.0, 115.0), Vec2::new(60.0, 20.0), false);

        let collision = check_ball_box(&ball.circle(), &b.aabb());
        assert_eq!(resolve_brick(&mut ball, &mut b, &collision), BrickHit::Broken);
        assert!(b.destroyed);
        assert_eq!(ball.body.vel, vel);
        assert_eq!(ball.body.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_pass_through_still_bounces_off_solid() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), 10.0, Vec2::new(0.0, -200.0));
        ball.pass_through = true;
        let mut solid = brick(Vec2::new(80.0, 115.0), Vec2::new(60.0, 20.0), true);

        let collision = check_ball_box(&ball.circle(), &solid.aabb());
        resolve_brick(&mut ball, &mut solid, &collision);
        assert_eq!(ball.body.vel, Vec2::new(0.0, 200.0));
    }

    #[test]
    fn test_bottom_hit_pushes_down() {
        let mut ball = free_ball(Vec2::new(100.0, 135.0), 10.0, Vec2::new(0.0, -200.0));
        let b = brick(Vec2::new(80.0, 100.0), Vec2::new(60.0, 40.0), false);

        let collision = check_ball_box(&ball.circle(), &b.aabb());
        assert_eq!(collision.direction, Direction::Down);
        bounce_off_box(&mut ball, &collision);
        assert_eq!(ball.body.vel.y, 200.0);
        assert_eq!(ball.body.pos.y, 140.0);
    }

    fn paddle() -> Entity {
        Entity::new(Vec2::new(350.0, 580.0), PLAYER_SIZE, Sprite::Paddle)
    }

    #[test]
    fn test_paddle_center_hit_goes_straight_up() {
        let p = paddle();
        let mut ball = free_ball(Vec2::new(387.5, 560.0), BALL_RADIUS, Vec2::new(100.0, 350.0));
        bounce_off_paddle(&mut ball, &p);

        let speed = Vec2::new(100.0, 350.0).length();
        assert!(ball.body.vel.x.abs() < 1e-4);
        assert!((ball.body.vel.y + speed).abs() < 1e-3);
        assert!(!ball.stuck);
    }

    #[test]
    fn test_paddle_edge_hit_steers_sideways() {
        let p = paddle();
        // Ball center over the right edge
        let mut ball = free_ball(Vec2::new(437.5, 560.0), BALL_RADIUS, Vec2::new(0.0, 350.0));
        bounce_off_paddle(&mut ball, &p);
        assert!(ball.body.vel.x > 0.0);
        assert!(ball.body.vel.y < 0.0);

        let mut ball = free_ball(Vec2::new(337.5, 560.0), BALL_RADIUS, Vec2::new(0.0, 350.0));
        bounce_off_paddle(&mut ball, &p);
        assert!(ball.body.vel.x < 0.0);
    }

    #[test]
    fn test_sticky_paddle_catches_ball() {
        let p = paddle();
        let mut ball = free_ball(Vec2::new(387.5, 560.0), BALL_RADIUS, Vec2::new(0.0, 350.0));
        ball.sticky = true;
        bounce_off_paddle(&mut ball, &p);
        assert!(ball.stuck);
    }

    proptest! {
        #[test]
        fn prop_paddle_bounce_keeps_speed(
            vx in -600.0f32..600.0,
            vy in 50.0f32..600.0,
            down in any::<bool>(),
            offset in -70.0f32..70.0,
        ) {
            let p = paddle();
            let vel = Vec2::new(vx, if down { vy } else { -vy });
            let x = p.pos.x + p.size.x / 2.0 + offset - BALL_RADIUS;
            let mut ball = free_ball(Vec2::new(x, 560.0), BALL_RADIUS, vel);

            bounce_off_paddle(&mut ball, &p);

            let before = vel.length();
            let after = ball.body.vel.length();
            prop_assert!((after - before).abs() <= before * 1e-4);
            prop_assert!(ball.body.vel.y < 0.0);
        }
    }
}
