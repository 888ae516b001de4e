//! Line-list vertices for a GPU backend

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// World-space position plus RGBA, laid out for a vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn at(point: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: point.to_array(),
            color,
        }
    }

    /// Map from world space (origin bottom-left, y-up) to clip space
    pub fn to_clip(self, world_size: Vec2) -> Self {
        let p = Vec2::from(self.position) / world_size * 2.0 - Vec2::ONE;
        Self {
            position: p.to_array(),
            ..self
        }
    }
}
