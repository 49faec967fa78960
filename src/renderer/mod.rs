//! Rendering boundary
//!
//! The simulation never draws directly. `render` walks a `Session` and issues
//! immediate-mode calls against a `DrawSurface`; backends decide what a
//! filled polygon or a line actually becomes.

pub mod shapes;
pub mod surfaces;
pub mod vertex;

pub use surfaces::{DrawCommand, DrawList, MeshSurface};
pub use vertex::{Color, Vertex, colors};

use glam::Vec2;

use crate::consts::HEADING_LINE_LENGTH;
use crate::heading;
use crate::sim::{Collidable, Session};

/// Immediate-mode 2D drawing target
pub trait DrawSurface {
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn draw_text(&mut self, at: Vec2, text: &str, color: Color);
}

/// Divider width between lanes (pixels)
const DIVIDER_WIDTH: f32 = 4.0;

/// Paint one frame: road, coins, obstacles, the car, then the HUD overlay
pub fn render<S: DrawSurface + ?Sized>(session: &Session, surface: &mut S) {
    let config = session.config();

    // Lane dividers behind everything
    for lane in 1..config.lane_count {
        let x = config.lane_margin + lane as f32 * config.lane_width();
        let half = DIVIDER_WIDTH / 2.0;
        surface.fill_polygon(
            &[
                Vec2::new(x - half, 0.0),
                Vec2::new(x + half, 0.0),
                Vec2::new(x + half, config.viewport_height),
                Vec2::new(x - half, config.viewport_height),
            ],
            colors::LANE_DIVIDER,
        );
    }

    for coin in session.live_coins() {
        surface.fill_polygon(&coin.world_points(), colors::COIN);
    }

    for obstacle in session.obstacles() {
        surface.fill_polygon(&obstacle.world_points(), colors::OBSTACLE);
    }

    let car = session.car();
    surface.fill_polygon(&car.world_points(), colors::CAR);
    let center = car.body.centroid();
    surface.draw_line(
        center,
        center + heading(car.rotation()) * HEADING_LINE_LENGTH,
        colors::HEADING,
    );

    surface.draw_text(
        Vec2::new(14.0, 24.0),
        &format!("Score: {}", session.score()),
        colors::TEXT,
    );
    if session.is_paused() {
        surface.draw_text(Vec2::new(14.0, 44.0), "PAUSED (P)", colors::TEXT);
    }
    if session.is_game_over() {
        surface.draw_text(Vec2::new(14.0, 64.0), "GAME OVER - press R", colors::TEXT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{Coin, Obstacle};

    #[test]
    fn test_draw_order() {
        let mut session = Session::new(GameConfig::default()).unwrap();
        session.push_obstacle(Obstacle::new(Vec2::new(100.0, 400.0), 40.0, 40.0, 4.0));
        session.push_coin(Coin::from_config(Vec2::new(600.0, 400.0), session.config()));

        let mut list = DrawList::default();
        render(&session, &mut list);

        let kinds: Vec<Color> = list
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillPolygon { color, .. } if *color != colors::LANE_DIVIDER => {
                    Some(*color)
                }
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![colors::COIN, colors::OBSTACLE, colors::CAR]);

        // Heading line follows the car, text last
        let line = list
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Line { .. }))
            .unwrap();
        let text = list
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { .. }))
            .unwrap();
        assert!(line < text);
        assert_eq!(list.texts(), vec!["Score: 0"]);
    }

    #[test]
    fn test_overlay_flags() {
        let mut session = Session::new(GameConfig::default()).unwrap();
        session.toggle_pause();
        let mut list = DrawList::default();
        render(&session, &mut list);
        assert!(list.texts().contains(&"PAUSED (P)"));
    }

    #[test]
    fn test_heading_line_from_centroid() {
        let session = Session::new(GameConfig::default()).unwrap();
        let mut list = DrawList::default();
        render(&session, &mut list);
        let (from, to) = list
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .unwrap();
        assert!((from - session.car().body.centroid()).length() < 1e-4);
        // Car starts facing down the screen
        assert!((to - from - Vec2::new(0.0, HEADING_LINE_LENGTH)).length() < 1e-3);
    }
}
