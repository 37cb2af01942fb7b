//! Shape generation for 2D primitives

use std::f32::consts::PI;

use glam::Vec2;

use super::Canvas;
use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Canvas that records triangles in surface coordinates
///
/// `clear` only drops the recorded geometry; the render pass paints the
/// background.
#[derive(Debug, Clone)]
pub struct VertexCanvas {
    pub vertices: Vec<Vertex>,
    pub circle_segments: u32,
    /// Surface size from the last `clear`
    pub size: Vec2,
}

impl Default for VertexCanvas {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            circle_segments: 32,
            size: Vec2::ZERO,
        }
    }
}

impl Canvas for VertexCanvas {
    fn clear(&mut self, width: f32, height: f32) {
        self.vertices.clear();
        self.size = Vec2::new(width, height);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        self.vertices
            .extend_from_slice(&rect(Vec2::new(x, y), Vec2::new(w, h), color));
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: [f32; 4]) {
        self.vertices
            .extend(circle(Vec2::new(cx, cy), r, color, self.circle_segments));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 5.0), [1.0; 4]);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| x == 10.0 || x == 40.0));
        assert!(ys.iter().all(|&y| y == 20.0 || y == 25.0));
    }

    #[test]
    fn test_circle_vertices_on_radius() {
        let center = Vec2::new(100.0, 50.0);
        let v = circle(center, 12.0, [1.0; 4], 16);
        assert_eq!(v.len(), 48);
        for tri in v.chunks(3) {
            assert_eq!(tri[0].position, [100.0, 50.0]);
            let edge = Vec2::from(tri[1].position) - center;
            assert!((edge.length() - 12.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_vertex_canvas_clear_drops_geometry() {
        let mut canvas = VertexCanvas::default();
        canvas.clear(600.0, 400.0);
        canvas.fill_rect(0.0, 0.0, 10.0, 10.0, [1.0; 4]);
        canvas.fill_circle(5.0, 5.0, 2.0, [1.0; 4]);
        assert_eq!(canvas.vertices.len(), 6 + 32 * 3);

        canvas.clear(600.0, 400.0);
        assert!(canvas.vertices.is_empty());
        assert_eq!(canvas.size, Vec2::new(600.0, 400.0));
    }
}
