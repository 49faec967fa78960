//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA, 0-1 per channel
pub type Color = [f32; 4];

/// 2D vertex with position (normalized device coordinates) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const LANE_DIVIDER: Color = [0.16, 0.16, 0.16, 1.0];
    pub const CAR: Color = [0.47, 0.78, 0.47, 1.0];
    pub const HEADING: Color = [1.0, 1.0, 1.0, 1.0];
    pub const OBSTACLE: Color = [0.86, 0.27, 0.27, 1.0];
    pub const COIN: Color = [1.0, 0.84, 0.0, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
}
