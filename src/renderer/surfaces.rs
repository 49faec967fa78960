//! Concrete draw surfaces
//!
//! - `DrawList`: records calls verbatim (headless runs, tests)
//! - `MeshSurface`: tessellates into a triangle list ready for a GPU buffer

use glam::Vec2;

use super::DrawSurface;
use super::shapes::{line_quad, polygon_fan};
use super::vertex::{Color, Vertex, colors};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillPolygon { points: Vec<Vec2>, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
    Text { at: Vec2, text: String, color: Color },
}

/// Records every call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text strings drawn this frame, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Filled polygons of one color
    pub fn polygons_with(&self, color: Color) -> Vec<&[Vec2]> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillPolygon { points, color: c } if *c == color => {
                    Some(points.as_slice())
                }
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for DrawList {
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_text(&mut self, at: Vec2, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_owned(),
            color,
        });
    }
}

/// Builds one triangle list per frame. Text has no geometry here; labels are
/// kept aside for an overlay (DOM, egui, ...) to draw.
#[derive(Debug, Clone)]
pub struct MeshSurface {
    viewport: Vec2,
    /// What the backend clears the render target to before drawing
    pub clear_color: Color,
    pub line_width: f32,
    pub vertices: Vec<Vertex>,
    pub labels: Vec<(Vec2, String)>,
}

impl MeshSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Vec2::new(width, height),
            clear_color: colors::BACKGROUND,
            line_width: 2.0,
            vertices: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}

impl DrawSurface for MeshSurface {
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.vertices
            .extend(polygon_fan(points, color, self.viewport));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.vertices
            .extend(line_quad(from, to, self.line_width, color, self.viewport));
    }

    fn draw_text(&mut self, at: Vec2, text: &str, _color: Color) {
        self.labels.push((at, text.to_owned()));
    }
}
