//! Combat geometry
//!
//! Pure hit tests used by the tick pipeline: the melee circle, body
//! overlap for contact/projectile damage, and knockback direction.

use glam::Vec2;

use crate::consts::{MELEE_OFFSET, MELEE_RADIUS};
use super::state::Facing;

/// Center of the melee hit circle: offset in front of the player.
pub fn melee_center(player_pos: Vec2, facing: Facing) -> Vec2 {
    Vec2::new(player_pos.x + facing.sign() * MELEE_OFFSET, player_pos.y)
}

/// True when `point` lies inside the melee circle around `center`.
pub fn in_melee_range(center: Vec2, point: Vec2) -> bool {
    center.distance_squared(point) <= MELEE_RADIUS * MELEE_RADIUS
}

/// Axis-aligned overlap test between two body boxes given centers and
/// half extents.
pub fn bodies_overlap(a_pos: Vec2, a_half: Vec2, b_pos: Vec2, b_half: Vec2) -> bool {
    (a_pos.x - b_pos.x).abs() <= a_half.x + b_half.x
        && (a_pos.y - b_pos.y).abs() <= a_half.y + b_half.y
}

/// Horizontal knockback direction pushing `target_x` away from `from_x`.
/// A dead-centered target is shoved right.
pub fn knockback_sign(from_x: f32, target_x: f32) -> f32 {
    if target_x < from_x { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melee_center_respects_facing() {
        let pos = Vec2::new(100.0, 400.0);
        assert_eq!(
            melee_center(pos, Facing::Right),
            Vec2::new(100.0 + MELEE_OFFSET, 400.0)
        );
        assert_eq!(
            melee_center(pos, Facing::Left),
            Vec2::new(100.0 - MELEE_OFFSET, 400.0)
        );
    }

    #[test]
    fn test_melee_range_boundary() {
        let center = Vec2::ZERO;
        assert!(in_melee_range(center, Vec2::new(MELEE_RADIUS, 0.0)));
        assert!(!in_melee_range(center, Vec2::new(MELEE_RADIUS + 0.1, 0.0)));
        // Diagonal just inside
        let d = MELEE_RADIUS / std::f32::consts::SQRT_2 - 0.1;
        assert!(in_melee_range(center, Vec2::new(d, d)));
    }

    #[test]
    fn test_bodies_overlap_edges() {
        let half = Vec2::new(10.0, 20.0);
        let a = Vec2::ZERO;
        assert!(bodies_overlap(a, half, Vec2::new(20.0, 0.0), half));
        assert!(!bodies_overlap(a, half, Vec2::new(20.1, 0.0), half));
        assert!(bodies_overlap(a, half, Vec2::new(0.0, 40.0), half));
        assert!(!bodies_overlap(a, half, Vec2::new(0.0, 40.1), half));
    }

    #[test]
    fn test_knockback_points_away() {
        assert_eq!(knockback_sign(100.0, 50.0), -1.0);
        assert_eq!(knockback_sign(100.0, 150.0), 1.0);
        assert_eq!(knockback_sign(100.0, 100.0), 1.0);
    }
}
