//! Collision detection between boxes and the ball
//!
//! Both tests are pure. The circle test reports which side of the box was
//! hit so the resolver knows which velocity component to flip.

use glam::Vec2;

use super::geometry::{Aabb, Circle};

/// Side of a box the ball collided on
///
/// The unit vectors are in screen space (y grows down), so `Up` is `(0, 1)`:
/// the penetration vector points from the ball center down into a box lying
/// underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Enumeration order; also the tie-break order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Result of a ball-vs-box check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Whether a collision occurred
    pub hit: bool,
    /// Side the ball hit (meaningless on a miss)
    pub direction: Direction,
    /// Closest point on the box minus the ball center
    pub penetration: Vec2,
}

impl Collision {
    pub fn miss() -> Self {
        Self {
            hit: false,
            direction: Direction::Up,
            penetration: Vec2::ZERO,
        }
    }
}

/// Box-vs-box overlap. Touching edges count as overlap.
pub fn check_aabb(a: &Aabb, b: &Aabb) -> bool {
    let a_max = a.max();
    let b_max = b.max();
    let overlap_x = a_max.x >= b.min.x && b_max.x >= a.min.x;
    let overlap_y = a_max.y >= b.min.y && b_max.y >= a.min.y;
    overlap_x && overlap_y
}

/// Circle-vs-box test using the closest point on the box
///
/// The hit test is strict (`<` radius): a ball pushed out to exactly its
/// radius by the resolver must not register again on the next frame.
pub fn check_ball_box(ball: &Circle, aabb: &Aabb) -> Collision {
    let half = aabb.half_extents();
    let box_center = aabb.center();

    let clamped = (ball.center - box_center).clamp(-half, half);
    let closest = box_center + clamped;
    let penetration = closest - ball.center;

    if penetration.length() < ball.radius {
        Collision {
            hit: true,
            direction: vector_direction(penetration),
            penetration,
        }
    } else {
        Collision::miss()
    }
}

/// Classify a vector by the cardinal direction it is closest to
///
/// The first direction reaching the maximum dot product wins, so exact ties
/// resolve in `Direction::ALL` order. A zero vector maps to `Up`.
pub fn vector_direction(target: Vec2) -> Direction {
    let normalized = target.normalize_or_zero();
    let mut best = Direction::Up;
    let mut max = f32::NEG_INFINITY;
    for dir in Direction::ALL {
        let dot = normalized.dot(dir.unit());
        if dot > max {
            max = dot;
            best = dir;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_at_center(center: Vec2, radius: f32) -> Circle {
        Circle::new(center, radius)
    }

    #[test]
    fn test_aabb_overlap_and_touching() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(check_aabb(&a, &b));

        // Shared edge counts
        let c = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(check_aabb(&a, &c));

        let d = Aabb::new(Vec2::new(10.5, 0.0), Vec2::new(10.0, 10.0));
        assert!(!check_aabb(&a, &d));

        // Overlap on x only
        let e = Aabb::new(Vec2::new(2.0, 20.0), Vec2::new(4.0, 4.0));
        assert!(!check_aabb(&a, &e));
    }

    #[test]
    fn test_ball_corner_strict_radius() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::new(100.0, 50.0));
        // 3-4-5 offset from the bottom-right corner: distance is exactly 5
        let center = Vec2::new(103.0, 54.0);

        assert!(check_ball_box(&ball_at_center(center, 5.01), &aabb).hit);
        assert!(!check_ball_box(&ball_at_center(center, 4.99), &aabb).hit);
        assert!(!check_ball_box(&ball_at_center(center, 5.0), &aabb).hit);
    }

    #[test]
    fn test_ball_resting_on_box_is_up() {
        // Ball above a box: penetration points down the screen, i.e. +y
        let aabb = Aabb::new(Vec2::new(0.0, 100.0), Vec2::new(100.0, 20.0));
        let result = check_ball_box(&ball_at_center(Vec2::new(50.0, 95.0), 10.0), &aabb);
        assert!(result.hit);
        assert_eq!(result.direction, Direction::Up);
        assert_eq!(result.penetration, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_ball_each_side() {
        let aabb = Aabb::new(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0));

        let below = check_ball_box(&ball_at_center(Vec2::new(150.0, 205.0), 10.0), &aabb);
        assert_eq!(below.direction, Direction::Down);

        let left = check_ball_box(&ball_at_center(Vec2::new(95.0, 150.0), 10.0), &aabb);
        assert_eq!(left.direction, Direction::Right);

        let right = check_ball_box(&ball_at_center(Vec2::new(205.0, 150.0), 10.0), &aabb);
        assert_eq!(right.direction, Direction::Left);
    }

    #[test]
    fn test_miss_reports_up_and_zero() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let result = check_ball_box(&ball_at_center(Vec2::new(100.0, 100.0), 5.0), &aabb);
        assert_eq!(result, Collision::miss());
    }

    #[test]
    fn test_vector_direction() {
        assert_eq!(vector_direction(Vec2::new(0.0, 3.0)), Direction::Up);
        assert_eq!(vector_direction(Vec2::new(0.0, -3.0)), Direction::Down);
        assert_eq!(vector_direction(Vec2::new(2.0, 0.1)), Direction::Right);
        assert_eq!(vector_direction(Vec2::new(-2.0, 0.1)), Direction::Left);
    }

    #[test]
    fn test_diagonal_tie_break() {
        // Exact 45° ties go to the earlier direction
        assert_eq!(vector_direction(Vec2::new(5.0, 5.0)), Direction::Up);
        assert_eq!(vector_direction(Vec2::new(5.0, -5.0)), Direction::Right);
        assert_eq!(vector_direction(Vec2::new(-5.0, -5.0)), Direction::Down);
        assert_eq!(vector_direction(Vec2::new(-5.0, 5.0)), Direction::Up);
        assert_eq!(vector_direction(Vec2::ZERO), Direction::Up);
    }

    #[test]
    fn test_center_inside_box() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let result = check_ball_box(&ball_at_center(Vec2::new(40.0, 60.0), 5.0), &aabb);
        assert!(result.hit);
        assert_eq!(result.penetration, Vec2::ZERO);
        assert_eq!(result.direction, Direction::Up);
    }

    fn arb_aabb() -> impl Strategy<Value = Aabb> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Aabb::new(Vec2::new(x, y), Vec2::new(w, h)))
    }

    proptest! {
        #[test]
        fn prop_aabb_overlap_is_symmetric(a in arb_aabb(), b in arb_aabb()) {
            prop_assert_eq!(check_aabb(&a, &b), check_aabb(&b, &a));
        }
    }
}
