//! Polygon-vs-polygon collision
//!
//! Vertex containment: two shapes collide when any vertex of one lies inside
//! (or on the boundary of) the other. Cheap and exact enough for the small
//! convex shapes used here, but it misses overlaps where no vertex of either
//! shape crosses into the other, e.g. two thin rectangles laid across each
//! other like a plus sign.

use glam::Vec2;

use super::polygon::{Polygon, contains};

/// Anything with a world-space outline
pub trait Collidable {
    fn polygon(&self) -> &Polygon;

    fn world_points(&self) -> Vec<Vec2> {
        self.polygon().transformed_points()
    }
}

impl Collidable for Polygon {
    fn polygon(&self) -> &Polygon {
        self
    }
}

/// Vertex-containment test between two world-space outlines. Symmetric.
pub fn outlines_collide(a: &[Vec2], b: &[Vec2]) -> bool {
    a.iter().any(|&p| contains(b, p)) || b.iter().any(|&p| contains(a, p))
}

/// Vertex-containment test between two entities at their current poses
pub fn collides<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    outlines_collide(&a.world_points(), &b.world_points())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::polygon::{diamond_shape, rect_shape};

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Polygon {
        Polygon::new(rect_shape(w, h), Vec2::new(x, y), 0.0).unwrap()
    }

    #[test]
    fn test_overlapping_rects_collide() {
        let a = rect(0.0, 0.0, 40.0, 40.0);
        let b = rect(30.0, 30.0, 40.0, 40.0);
        assert!(collides(&a, &b));
        assert!(collides(&b, &a));
    }

    #[test]
    fn test_separated_rects_miss() {
        let a = rect(0.0, 0.0, 40.0, 40.0);
        let b = rect(41.0, 0.0, 40.0, 40.0);
        assert!(!collides(&a, &b));
        assert!(!collides(&b, &a));
    }

    #[test]
    fn test_touching_edges_collide() {
        let a = rect(0.0, 0.0, 40.0, 40.0);
        let b = rect(40.0, 10.0, 40.0, 40.0);
        assert!(collides(&a, &b));
    }

    #[test]
    fn test_small_shape_inside_large() {
        // No vertex of the big square is inside the coin, but the coin's are
        let big = rect(0.0, 0.0, 100.0, 100.0);
        let coin = Polygon::new(diamond_shape(18.0, 18.0), Vec2::new(50.0, 50.0), 30.0).unwrap();
        assert!(collides(&big, &coin));
        assert!(collides(&coin, &big));
    }

    #[test]
    fn test_crossing_bars_are_missed() {
        // Known blind spot: a plus sign where neither bar has a vertex
        // inside the other
        let horizontal = rect(0.0, 45.0, 100.0, 10.0);
        let vertical = rect(45.0, 0.0, 10.0, 100.0);
        assert!(!collides(&horizontal, &vertical));
        assert!(!collides(&vertical, &horizontal));
    }
}
