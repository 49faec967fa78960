//! Polygon geometry for every entity
//!
//! A polygon is a local-space outline plus a world position and a rotation
//! in degrees. World-space points are derived on demand, never cached:
//! - rotate each local point about the local origin
//! - translate by `position`

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{normalize_degrees, rotate_degrees};

/// Tolerance for treating a point as lying on an edge
const EDGE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },
}

/// A shape placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    shape: Vec<Vec2>,
    /// World-space translation
    pub position: Vec2,
    /// Degrees, kept in [0, 360) by `set_rotation`/`rotate_by`
    rotation: f32,
}

impl Polygon {
    pub fn new(shape: Vec<Vec2>, position: Vec2, rotation: f32) -> Result<Self, GeometryError> {
        if shape.len() < 3 {
            return Err(GeometryError::TooFewPoints { count: shape.len() });
        }
        Ok(Self {
            shape,
            position,
            rotation: normalize_degrees(rotation),
        })
    }

    /// Built-in outlines from the shape helpers below, known non-degenerate
    pub(crate) fn from_shape(shape: Vec<Vec2>, position: Vec2, rotation: f32) -> Self {
        debug_assert!(shape.len() >= 3, "built-in shape must have 3+ points");
        Self {
            shape,
            position,
            rotation: normalize_degrees(rotation),
        }
    }

    /// Local-space outline
    #[inline]
    pub fn shape(&self) -> &[Vec2] {
        &self.shape
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
    }

    pub fn rotate_by(&mut self, degrees: f32) {
        self.set_rotation(self.rotation + degrees);
    }

    /// World-space outline at the current pose
    pub fn transformed_points(&self) -> Vec<Vec2> {
        transformed_points(&self.shape, self.position, self.rotation)
    }

    /// Point containment against the current world-space outline
    pub fn contains(&self, point: Vec2) -> bool {
        contains(&self.transformed_points(), point)
    }

    /// Mean of the world-space vertices
    pub fn centroid(&self) -> Vec2 {
        let points = self.transformed_points();
        points.iter().copied().sum::<Vec2>() / points.len() as f32
    }

    /// Largest distance from the local origin to any vertex
    pub fn radius(&self) -> f32 {
        self.shape
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }

    /// (min, max) corners of the world-space bounding box
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let points = self.transformed_points();
        points.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), &p| (min.min(p), max.max(p)),
        )
    }
}

/// Rotate each local point by `rotation_degrees` about the origin, then
/// translate by `position`
pub fn transformed_points(shape: &[Vec2], position: Vec2, rotation_degrees: f32) -> Vec<Vec2> {
    let rotation = normalize_degrees(rotation_degrees);
    shape
        .iter()
        .map(|&local| position + rotate_degrees(local, rotation))
        .collect()
}

/// Even-odd point-in-polygon test over the closed outline `points`
///
/// Boundary inclusive: vertices and points on an edge count as inside, so a
/// polygon always contains its own vertices. Self-intersecting or concave
/// outlines follow the even-odd rule.
pub fn contains(points: &[Vec2], point: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[j];

        if on_segment(point, a, b) {
            return true;
        }

        if (a.y > point.y) != (b.y > point.y) {
            let crossing_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether `p` lies on segment `ab` (within `EDGE_EPSILON`)
fn on_segment(p: Vec2, a: Vec2, b: Vec2) -> bool {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < EDGE_EPSILON * EDGE_EPSILON {
        return p.distance_squared(a) <= EDGE_EPSILON * EDGE_EPSILON;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    p.distance_squared(closest) <= EDGE_EPSILON * EDGE_EPSILON
}

/// Axis-aligned rectangle with its top-left corner at the local origin
pub fn rect_shape(width: f32, height: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(width, 0.0),
        Vec2::new(width, height),
        Vec2::new(0.0, height),
    ]
}

/// Diamond centered on the local origin
pub fn diamond_shape(width: f32, height: f32) -> Vec<Vec2> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    vec![
        Vec2::new(0.0, -hh),
        Vec2::new(hw, 0.0),
        Vec2::new(0.0, hh),
        Vec2::new(-hw, 0.0),
    ]
}

/// Isosceles triangle centered on the local origin, nose along +x
pub fn arrow_shape(length: f32, width: f32) -> Vec<Vec2> {
    let (hl, hw) = (length / 2.0, width / 2.0);
    vec![
        Vec2::new(hl, 0.0),
        Vec2::new(-hl, hw),
        Vec2::new(-hl, -hw),
    ]
}
