//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    if r.size().x <= 0.0 || r.size().y <= 0.0 {
        return Vec::new();
    }
    quad(
        [
            r.min,
            Vec2::new(r.max.x, r.min.y),
            r.max,
            Vec2::new(r.min.x, r.max.y),
        ],
        color,
    )
}

/// Square of side `size` centred on `center`, rotated by `angle` radians
pub fn rotated_square(center: Vec2, size: f32, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    let rot = Vec2::from_angle(angle);
    let corners = [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
    .map(|c| center + rot.rotate(c));
    quad(corners, color)
}

/// Quad from four corners in winding order
fn quad(c: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(c[0].x, c[0].y, color),
        Vertex::new(c[1].x, c[1].y, color),
        Vertex::new(c[2].x, c[2].y, color),
        Vertex::new(c[2].x, c[2].y, color),
        Vertex::new(c[3].x, c[3].y, color),
        Vertex::new(c[0].x, c[0].y, color),
    ]
}
