//! Frame geometry from a simulation snapshot
//!
//! Draw order: rails, obstacle bars, player, overlay. Coordinates are field
//! pixels with y pointing down; the pipeline maps them to NDC.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{GamePhase, Gravity, Rect, RenderSnapshot, player_rect};

/// Thickness of the top and bottom rails (drawn inside the field)
pub const RAIL_THICKNESS: f32 = 4.0;

/// Build the triangle list for one frame
pub fn build_scene(snapshot: &RenderSnapshot, settings: &Settings) -> Vec<Vertex> {
    let field = snapshot.field;
    let mut vertices = Vec::with_capacity(12 + snapshot.obstacles.len() * 12 + 12);

    // Rails
    vertices.extend(shapes::rect(
        &Rect::new(0.0, 0.0, field.x, RAIL_THICKNESS),
        colors::RAIL,
    ));
    vertices.extend(shapes::rect(
        &Rect::new(0.0, field.y - RAIL_THICKNESS, field.x, RAIL_THICKNESS),
        colors::RAIL,
    ));

    let obstacle_color = if settings.high_contrast {
        colors::OBSTACLE_HIGH_CONTRAST
    } else {
        colors::OBSTACLE
    };
    for obstacle in &snapshot.obstacles {
        for bar in obstacle.bars(field.y) {
            vertices.extend(shapes::rect(&bar, obstacle_color));
        }
    }

    let player = player_rect(snapshot.player_x, snapshot.player_y, snapshot.player_size);
    let angle = if settings.player_tilt() {
        snapshot.player_rotation
    } else {
        0.0
    };
    let player_color = match snapshot.gravity {
        Gravity::Down => colors::PLAYER_DOWN,
        Gravity::Up => colors::PLAYER_UP,
    };
    vertices.extend(shapes::rotated_square(
        player.center(),
        snapshot.player_size,
        angle,
        player_color,
    ));

    // Intro / game over text is DOM; the canvas only dims
    if snapshot.phase != GamePhase::Playing {
        vertices.extend(shapes::rect(
            &Rect::new(0.0, 0.0, field.x, field.y),
            colors::OVERLAY,
        ));
    }

    vertices
}
