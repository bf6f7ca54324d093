//! Collision detection
//!
//! The player is always treated as a circle. Pickups are circles too;
//! hazards are axis-aligned rectangles.

use glam::Vec2;

use super::actor::Actor;

/// Circle–circle overlap (touching counts)
#[inline]
pub fn circles_overlap(a_center: Vec2, a_radius: f32, b_center: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_center.distance_squared(b_center) <= reach * reach
}

/// Circle–rectangle overlap using the clamped-distance method:
/// `u = max(|Δcenter| - half_extents, 0)` per axis, hit iff `|u|² <= r²`
#[inline]
pub fn circle_rect_overlap(
    circle_center: Vec2,
    radius: f32,
    rect_center: Vec2,
    half_extents: Vec2,
) -> bool {
    let v = (circle_center - rect_center).abs();
    let u = (v - half_extents).max(Vec2::ZERO);
    u.length_squared() <= radius * radius
}

/// Player vs pickup: both approximated as circles with diameter = their width
pub fn player_hits_pickup(player: &Actor, pickup: &Actor) -> bool {
    circles_overlap(
        player.center(),
        player.size.x / 2.0,
        pickup.center(),
        pickup.size.x / 2.0,
    )
}

/// Player vs hazard: circle against the hazard's bounding rectangle
pub fn player_hits_hazard(player: &Actor, hazard: &Actor) -> bool {
    circle_rect_overlap(
        player.center(),
        player.size.x / 2.0,
        hazard.center(),
        hazard.size / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::AssetId;

    fn square(x: f32, y: f32, side: f32) -> Actor {
        Actor::square(Vec2::new(x, y), side, AssetId::from("test"))
    }

    #[test]
    fn test_circles_touching_counts() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.01, 0.0), 5.0));
    }

    #[test]
    fn test_circle_rect_side_and_corner() {
        let half = Vec2::new(5.0, 5.0);
        // Straight above the rect: gap of 3 on y only
        assert!(circle_rect_overlap(Vec2::new(0.0, -8.0), 3.0, Vec2::ZERO, half));
        assert!(!circle_rect_overlap(Vec2::new(0.0, -8.1), 3.0, Vec2::ZERO, half));
        // Diagonal from the corner: (3, 4) away -> distance 5
        assert!(circle_rect_overlap(Vec2::new(8.0, 9.0), 5.0, Vec2::ZERO, half));
        assert!(!circle_rect_overlap(Vec2::new(8.0, 9.0), 4.9, Vec2::ZERO, half));
    }

    #[test]
    fn test_circle_inside_rect() {
        assert!(circle_rect_overlap(
            Vec2::new(1.0, 1.0),
            0.5,
            Vec2::ZERO,
            Vec2::new(5.0, 5.0)
        ));
    }

    #[test]
    fn test_player_vs_actors() {
        let player = square(0.0, 0.0, 60.0);
        // Pickup of 36 whose center is 48 away horizontally: 30 + 18 = 48
        assert!(player_hits_pickup(&player, &square(60.0, 12.0, 36.0)));
        assert!(!player_hits_pickup(&player, &square(61.0, 12.0, 36.0)));

        // Hazard in the next lane over never touches
        assert!(!player_hits_hazard(&player, &square(150.0, 0.0, 36.0)));
        assert!(player_hits_hazard(&player, &square(12.0, -30.0, 36.0)));
    }
}
