//! Tessellation of 2D primitives into triangle lists

use glam::Vec2;

use super::vertex::{Color, Vertex};

/// Map a pixel position to normalized device coordinates (y up)
#[inline]
pub fn to_ndc(point: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(point.x / viewport.x * 2.0 - 1.0, 1.0 - point.y / viewport.y * 2.0)
}

/// Triangle fan over a convex outline (pixel space in, NDC out)
pub fn polygon_fan(points: &[Vec2], color: Color, viewport: Vec2) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let anchor = to_ndc(points[0], viewport);

    for pair in points[1..].windows(2) {
        let b = to_ndc(pair[0], viewport);
        let c = to_ndc(pair[1], viewport);
        vertices.push(Vertex::new(anchor.x, anchor.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
        vertices.push(Vertex::new(c.x, c.y, color));
    }

    vertices
}

/// A line segment expanded into a quad `width` pixels wide
pub fn line_quad(from: Vec2, to: Vec2, width: f32, color: Color, viewport: Vec2) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let corners = [from + perp, from - perp, to + perp, to - perp].map(|p| to_ndc(p, viewport));
    let [a, b, c, d] = corners;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}
